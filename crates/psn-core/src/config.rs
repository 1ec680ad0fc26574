//! Runtime configuration.
//!
//! Values come from `PSN_*` environment variables (or the matching CLI flags)
//! and are validated once at startup. Nothing mutates a [`Config`] afterwards.

use std::fmt;
use std::time::Duration;

use crate::error::{PsnError, Result};

pub const DEFAULT_PLEX_IP: &str = "127.0.0.1";
pub const DEFAULT_CHECK_INTERVAL: &str = "30s";
pub const PLEX_PORT: u16 = 32400;

/// Validated configuration for the notifier.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Host or IP of the Plex server
    pub plex_ip: String,
    /// Value sent as `X-Plex-Token`
    pub plex_token: String,
    /// ntfy topic URL receiving the notifications
    pub ntfy_topic_url: String,
    /// Sessions of this user never trigger a notification
    pub ignored_user: Option<String>,
    /// Pause between two polls
    pub check_interval: Duration,
}

impl Config {
    /// Builds a configuration and validates it.
    ///
    /// An empty `ignored_user` is treated as unset.
    pub fn new(
        plex_ip: impl Into<String>,
        plex_token: impl Into<String>,
        ntfy_topic_url: impl Into<String>,
        ignored_user: Option<String>,
        check_interval: Duration,
    ) -> Result<Self> {
        let config = Self {
            plex_ip: plex_ip.into(),
            plex_token: plex_token.into(),
            ntfy_topic_url: ntfy_topic_url.into(),
            ignored_user: ignored_user.filter(|user| !user.is_empty()),
            check_interval,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.plex_ip.trim().is_empty() {
            return Err(PsnError::config("PSN_PLEX_IP must not be empty"));
        }
        if self.plex_token.is_empty() {
            return Err(PsnError::config("PSN_PLEX_TOKEN must not be empty"));
        }
        if self.ntfy_topic_url.trim().is_empty() {
            return Err(PsnError::config("PSN_NTFY_TOPIC_URL must not be empty"));
        }
        if self.check_interval.is_zero() {
            return Err(PsnError::config("PSN_CHECK_INTERVAL must be positive"));
        }
        Ok(())
    }

    /// Base address of the session feed, without the token.
    pub fn status_endpoint(&self) -> String {
        format!("http://{}:{}/status/sessions", self.plex_ip, PLEX_PORT)
    }
}

// The token stays out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("plex_ip", &self.plex_ip)
            .field("plex_token", &"<redacted>")
            .field("ntfy_topic_url", &self.ntfy_topic_url)
            .field("ignored_user", &self.ignored_user)
            .field("check_interval", &self.check_interval)
            .finish()
    }
}

/// Parses a Go-style duration such as `30s`, `1m30s`, `500ms` or `2h`.
///
/// Supported units are `ms`, `s`, `m` and `h`; a bare number is rejected so
/// that `30` is never silently read as nanoseconds or minutes.
pub fn parse_interval(input: &str) -> Result<Duration> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PsnError::config("check interval must not be empty"));
    }

    let invalid = || PsnError::config(format!("invalid check interval '{input}'"));

    let mut total = Duration::ZERO;
    let mut rest = trimmed;
    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        if digits == 0 {
            return Err(invalid());
        }
        let value: u64 = rest[..digits].parse().map_err(|_| invalid())?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let part = match &rest[..unit_len] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.saturating_mul(60)),
            "h" => Duration::from_secs(value.saturating_mul(3600)),
            _ => return Err(invalid()),
        };
        total = total.saturating_add(part);
        rest = &rest[unit_len..];
    }

    Ok(total)
}
