//! Session records reported by the Plex `/status/sessions` feed.
//!
//! The feed is an XML `MediaContainer` whose `Video` children describe one
//! playback session each. Only `sessionKey`, `title`, `grandparentTitle` and
//! `User.title` drive control flow; everything else is carried through for
//! templates and logging.
//!
//! Field renames follow the serde convention used by quick-xml: attributes
//! are prefixed with `@`, child elements use their element name. Every struct
//! defaults missing attributes to empty strings so that sparse responses
//! (e.g. a transcoding session without `Media`) still deserialize.

use serde::Deserialize;

/// Root element of the session feed.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MediaContainer {
    #[serde(rename = "@size")]
    pub size: String,
    #[serde(rename = "Video")]
    pub videos: Vec<SessionRecord>,
}

/// One active playback session.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionRecord {
    #[serde(rename = "@sessionKey")]
    pub session_key: String,
    #[serde(rename = "@title")]
    pub title: String,
    /// Series name; empty for films.
    #[serde(rename = "@grandparentTitle")]
    pub grandparent_title: String,
    #[serde(rename = "@parentTitle")]
    pub parent_title: String,
    #[serde(rename = "@type")]
    pub media_type: String,
    #[serde(rename = "@key")]
    pub key: String,
    #[serde(rename = "@ratingKey")]
    pub rating_key: String,
    #[serde(rename = "@guid")]
    pub guid: String,
    #[serde(rename = "@year")]
    pub year: String,
    #[serde(rename = "@duration")]
    pub duration: String,
    #[serde(rename = "@viewOffset")]
    pub view_offset: String,
    #[serde(rename = "@librarySectionTitle")]
    pub library_section_title: String,
    #[serde(rename = "@thumb")]
    pub thumb: String,
    #[serde(rename = "@art")]
    pub art: String,
    #[serde(rename = "@addedAt")]
    pub added_at: String,
    #[serde(rename = "@updatedAt")]
    pub updated_at: String,
    /// One entry per version of the item; Plex lists several when more
    /// than one file matches.
    #[serde(rename = "Media")]
    pub media: Vec<Media>,
    #[serde(rename = "User")]
    pub user: User,
    #[serde(rename = "Player")]
    pub player: Player,
    #[serde(rename = "Session")]
    pub session: SessionInfo,
}

impl SessionRecord {
    /// Returns true when the record is an episode of a series.
    pub fn is_episode(&self) -> bool {
        !self.grandparent_title.is_empty()
    }

    /// Display name of the watching user.
    pub fn user_name(&self) -> &str {
        &self.user.title
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Media {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@container")]
    pub container: String,
    #[serde(rename = "@bitrate")]
    pub bitrate: String,
    #[serde(rename = "@videoCodec")]
    pub video_codec: String,
    #[serde(rename = "@audioCodec")]
    pub audio_codec: String,
    #[serde(rename = "@audioChannels")]
    pub audio_channels: String,
    #[serde(rename = "@videoResolution")]
    pub video_resolution: String,
    #[serde(rename = "@width")]
    pub width: String,
    #[serde(rename = "@height")]
    pub height: String,
    /// Multi-part items (e.g. a film split over two files) repeat `Part`.
    #[serde(rename = "Part")]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Part {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@file")]
    pub file: String,
    #[serde(rename = "@size")]
    pub size: String,
    #[serde(rename = "@decision")]
    pub decision: String,
    #[serde(rename = "Stream")]
    pub streams: Vec<Stream>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Stream {
    #[serde(rename = "@id")]
    pub id: String,
    /// 1 = video, 2 = audio, 3 = subtitle
    #[serde(rename = "@streamType")]
    pub stream_type: String,
    #[serde(rename = "@codec")]
    pub codec: String,
    #[serde(rename = "@displayTitle")]
    pub display_title: String,
    #[serde(rename = "@language")]
    pub language: String,
    #[serde(rename = "@selected")]
    pub selected: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@title")]
    pub title: String,
    #[serde(rename = "@thumb")]
    pub thumb: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Player {
    #[serde(rename = "@title")]
    pub title: String,
    #[serde(rename = "@platform")]
    pub platform: String,
    #[serde(rename = "@product")]
    pub product: String,
    #[serde(rename = "@device")]
    pub device: String,
    #[serde(rename = "@state")]
    pub state: String,
    #[serde(rename = "@address")]
    pub address: String,
    #[serde(rename = "@local")]
    pub local: String,
    #[serde(rename = "@machineIdentifier")]
    pub machine_identifier: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionInfo {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@bandwidth")]
    pub bandwidth: String,
    #[serde(rename = "@location")]
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_episode() {
        let mut record = SessionRecord {
            title: "Pilot".to_string(),
            ..Default::default()
        };
        assert!(!record.is_episode());

        record.grandparent_title = "Show".to_string();
        assert!(record.is_episode());
    }
}
