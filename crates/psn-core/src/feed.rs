//! Session feed service trait.

use crate::error::Result;
use crate::session::SessionRecord;

/// Source of the currently active playback sessions.
///
/// One call is one network attempt; implementations do not cache or retry.
#[async_trait::async_trait]
pub trait SessionFeed: Send + Sync {
    /// Fetches the active sessions in the order the server reports them.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<SessionRecord>)`: possibly empty list of sessions
    /// - `Err(PsnError::InvalidToken)`: the server rejected the credential
    /// - `Err(PsnError::UnexpectedStatus)`: any other non-success status
    /// - `Err(PsnError::MalformedResponse)`: the body is not a session feed
    /// - `Err(PsnError::Transport)`: the request did not complete
    async fn fetch_sessions(&self) -> Result<Vec<SessionRecord>>;
}
