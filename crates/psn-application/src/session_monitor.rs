//! Polling loop that turns new Plex sessions into notifications.
//!
//! Each cycle fetches the active sessions, skips the ignored user and every
//! session key already notified, then renders and sends one notification per
//! remaining record. The loop sleeps for the configured interval after every
//! cycle, including cycles that returned no sessions.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use psn_core::Result;
use psn_core::config::Config;
use psn_core::feed::SessionFeed;
use psn_core::notifier::Notifier;
use psn_core::render::NotificationRenderer;
use psn_core::session::SessionRecord;
use tracing::{debug, info};

use crate::seen_sessions::SeenSessions;

/// Outcome counts of a single poll cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// Records returned by the feed
    pub fetched: usize,
    /// Records skipped because they belong to the ignored user
    pub ignored: usize,
    /// Records skipped because their key was already notified
    pub already_seen: usize,
    /// Notifications sent
    pub notified: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    IgnoredUser,
    AlreadySeen,
    New,
}

/// Owns the dedup state and drives fetch, filter, render and send.
pub struct SessionMonitor {
    feed: Arc<dyn SessionFeed>,
    notifier: Arc<dyn Notifier>,
    renderer: NotificationRenderer,
    ignored_user: Option<String>,
    check_interval: Duration,
    seen: SeenSessions,
}

impl SessionMonitor {
    /// Creates a monitor with an empty seen-session set.
    ///
    /// # Arguments
    ///
    /// * `config` - Source of the ignored user and the poll interval
    /// * `feed` - Where active sessions come from
    /// * `notifier` - Where rendered notifications go
    /// * `renderer` - Turns a session record into notification text
    pub fn new(
        config: &Config,
        feed: Arc<dyn SessionFeed>,
        notifier: Arc<dyn Notifier>,
        renderer: NotificationRenderer,
    ) -> Self {
        Self {
            feed,
            notifier,
            renderer,
            ignored_user: config.ignored_user.clone(),
            check_interval: config.check_interval,
            seen: SeenSessions::new(),
        }
    }

    /// Session keys notified so far.
    pub fn seen_sessions(&self) -> &SeenSessions {
        &self.seen
    }

    /// Runs one fetch/filter/render/send cycle without sleeping.
    ///
    /// The first error from the feed, the renderer or the notifier aborts the
    /// cycle and is returned as is.
    pub async fn poll_once(&mut self) -> Result<PollReport> {
        let sessions = self.feed.fetch_sessions().await?;
        let mut report = PollReport {
            fetched: sessions.len(),
            ..Default::default()
        };

        for record in &sessions {
            match classify(record, self.ignored_user.as_deref(), &mut self.seen) {
                Disposition::IgnoredUser => {
                    debug!(session_key = %record.session_key, "Skipping session of ignored user");
                    report.ignored += 1;
                }
                Disposition::AlreadySeen => {
                    debug!(session_key = %record.session_key, "Skipping already notified session");
                    report.already_seen += 1;
                }
                Disposition::New => {
                    let message = self.renderer.render(record)?;
                    self.notifier.send(&message).await?;
                    info!(
                        session_key = %record.session_key,
                        user = %record.user_name(),
                        title = %record.title,
                        "Sent notification for new session"
                    );
                    report.notified += 1;
                }
            }
        }

        Ok(report)
    }

    /// Polls forever, sleeping `check_interval` between cycles.
    ///
    /// Only returns when a cycle fails.
    pub async fn run(&mut self) -> Result<Infallible> {
        info!(
            interval = ?self.check_interval,
            ignored_user = ?self.ignored_user,
            "Watching Plex sessions"
        );

        loop {
            let report = self.poll_once().await?;
            debug!(?report, seen = self.seen.len(), "Poll cycle complete");
            tokio::time::sleep(self.check_interval).await;
        }
    }
}

/// Decides what to do with `record`, marking new keys as seen.
///
/// The ignored-user check runs first, so an ignored user's key is never
/// recorded.
fn classify(
    record: &SessionRecord,
    ignored_user: Option<&str>,
    seen: &mut SeenSessions,
) -> Disposition {
    if ignored_user == Some(record.user_name()) {
        return Disposition::IgnoredUser;
    }
    if !seen.mark(&record.session_key) {
        return Disposition::AlreadySeen;
    }
    Disposition::New
}
