pub mod config;
pub mod error;
pub mod feed;
pub mod notifier;
pub mod render;
pub mod session;

// Re-export common error type
pub use error::{PsnError, Result};
