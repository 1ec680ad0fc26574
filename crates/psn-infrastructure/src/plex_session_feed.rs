//! Plex `/status/sessions` client.
//!
//! Issues one GET per call, maps 401 and other non-success statuses to
//! dedicated errors, and deserializes the XML `MediaContainer` envelope with
//! quick-xml's serde support.

use async_trait::async_trait;
use psn_core::config::Config;
use psn_core::feed::SessionFeed;
use psn_core::session::{MediaContainer, SessionRecord};
use psn_core::{PsnError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

const TOKEN_PARAM: &str = "X-Plex-Token";
const ROOT_ELEMENT: &str = "MediaContainer";
const FETCH_ACTION: &str = "fetch sessions";

/// Session feed backed by a Plex Media Server.
#[derive(Clone)]
pub struct PlexSessionFeed {
    client: Client,
    status_url: Url,
}

impl PlexSessionFeed {
    /// Creates a feed for the server and token in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_endpoint(&config.status_endpoint(), &config.plex_token)
    }

    /// Creates a feed for an explicit status endpoint.
    ///
    /// The token is appended as the `X-Plex-Token` query parameter and
    /// percent-encoded.
    pub fn with_endpoint(endpoint: &str, token: &str) -> Result<Self> {
        let status_url = Url::parse_with_params(endpoint, &[(TOKEN_PARAM, token)])
            .map_err(|err| {
                PsnError::config(format!("failed to parse status url '{endpoint}': {err}"))
            })?;

        Ok(Self {
            client: Client::new(),
            status_url,
        })
    }
}

#[async_trait]
impl SessionFeed for PlexSessionFeed {
    async fn fetch_sessions(&self) -> Result<Vec<SessionRecord>> {
        // without_url() keeps the token out of error messages
        let response = self
            .client
            .get(self.status_url.clone())
            .send()
            .await
            .map_err(|err| PsnError::transport(FETCH_ACTION, err.without_url().to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(PsnError::InvalidToken);
        }
        if !status.is_success() {
            return Err(PsnError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| PsnError::transport(FETCH_ACTION, err.without_url().to_string()))?;

        let sessions = parse_sessions(&body)?;
        debug!(count = sessions.len(), "Fetched active Plex sessions");
        Ok(sessions)
    }
}

/// Parses a `/status/sessions` body into its session records.
///
/// The root element must be `MediaContainer`; its `Video` children are
/// returned in document order. Other children are ignored.
pub fn parse_sessions(body: &str) -> Result<Vec<SessionRecord>> {
    ensure_root_element(body)?;

    let container: MediaContainer =
        quick_xml::de::from_str(body).map_err(|err| PsnError::malformed(err.to_string()))?;

    Ok(container.videos)
}

/// serde ignores the root element name, so an HTML error page or any other
/// well-formed document would otherwise parse as an empty feed.
fn ensure_root_element(body: &str) -> Result<()> {
    let mut reader = Reader::from_str(body);

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                let name = element.local_name();
                if name.as_ref() == ROOT_ELEMENT.as_bytes() {
                    return Ok(());
                }
                return Err(PsnError::malformed(format!(
                    "expected <{ROOT_ELEMENT}> root element, found <{}>",
                    String::from_utf8_lossy(name.as_ref())
                )));
            }
            Ok(Event::Eof) => {
                return Err(PsnError::malformed("response body contains no XML element"));
            }
            Err(err) => return Err(PsnError::malformed(err.to_string())),
            _ => {}
        }
    }
}
