//! Notification delivery trait.

use crate::error::Result;

/// Delivers rendered notification text to its destination.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one notification.
    ///
    /// Only a transport failure is an error; the receiver's response status
    /// is not inspected.
    async fn send(&self, message: &str) -> Result<()>;
}
