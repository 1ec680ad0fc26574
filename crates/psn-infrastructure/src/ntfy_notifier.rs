//! ntfy webhook notifier.

use async_trait::async_trait;
use psn_core::notifier::Notifier;
use psn_core::{PsnError, Result};
use reqwest::{Client, Url};
use tracing::warn;

pub const NOTIFICATION_TITLE: &str = "New Plex session";
pub const NOTIFICATION_TAGS: &str = "clapper";

const SEND_ACTION: &str = "send notification";

/// Posts notifications to an ntfy topic URL.
///
/// Each message is one POST whose body is the rendered text. ntfy reads the
/// `Title`, `Markdown` and `Tags` headers as message metadata.
#[derive(Clone)]
pub struct NtfyNotifier {
    client: Client,
    topic_url: Url,
}

impl NtfyNotifier {
    pub fn new(topic_url: &str) -> Result<Self> {
        let topic_url = Url::parse(topic_url).map_err(|err| {
            PsnError::config(format!("failed to parse ntfy topic url '{topic_url}': {err}"))
        })?;

        Ok(Self {
            client: Client::new(),
            topic_url,
        })
    }
}

#[async_trait]
impl Notifier for NtfyNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        let response = self
            .client
            .post(self.topic_url.clone())
            .header("Title", NOTIFICATION_TITLE)
            .header("Markdown", "yes")
            .header("Tags", NOTIFICATION_TAGS)
            .body(message.to_owned())
            .send()
            .await
            // Topic URLs may carry credentials (`?auth=`, `user:pass@`)
            .map_err(|err| PsnError::transport(SEND_ACTION, err.without_url().to_string()))?;

        // Delivery is fire-and-forget past the network layer.
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "ntfy answered with a non-success status");
        }

        Ok(())
    }
}
