pub mod ntfy_notifier;
pub mod plex_session_feed;

pub use crate::ntfy_notifier::NtfyNotifier;
pub use crate::plex_session_feed::PlexSessionFeed;
