pub mod seen_sessions;
pub mod session_monitor;

pub use crate::seen_sessions::SeenSessions;
pub use crate::session_monitor::{PollReport, SessionMonitor};
