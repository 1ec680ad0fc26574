//! Error types for the Plex session notifier.

use thiserror::Error;

/// A shared error type for every PSN crate.
///
/// Every variant is fatal: the polling loop stops on the first error and the
/// process exits with the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PsnError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// The Plex server rejected the token (HTTP 401)
    #[error("Invalid Plex token")]
    InvalidToken,

    /// The Plex server answered with a non-success status other than 401
    #[error("Unexpected status code {status} returned from status url")]
    UnexpectedStatus { status: u16 },

    /// The request never completed (connect, DNS, body read)
    #[error("Failed to {action}: {message}")]
    Transport {
        action: &'static str, // "fetch sessions", "send notification"
        message: String,
    },

    /// The session feed body is not the expected XML envelope
    #[error("Failed to parse session feed: {message}")]
    MalformedResponse { message: String },

    /// A notification template failed to compile or render.
    ///
    /// This points at a programming or template authoring defect rather than
    /// a runtime condition.
    #[error("Template error: {0}")]
    Render(String),
}

impl PsnError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Transport error
    pub fn transport(action: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            action,
            message: message.into(),
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if the server rejected the credential
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Self::InvalidToken)
    }

    /// Check if the server answered with an unexpected status
    pub fn is_unexpected_status(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { .. })
    }

    /// Check if this is a network-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if the feed body could not be parsed
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    /// Check if this is a template error
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render(_))
    }
}

impl From<minijinja::Error> for PsnError {
    fn from(err: minijinja::Error) -> Self {
        Self::Render(err.to_string())
    }
}

/// A type alias for `Result<T, PsnError>`.
pub type Result<T> = std::result::Result<T, PsnError>;
