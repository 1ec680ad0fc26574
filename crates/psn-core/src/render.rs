//! Notification text rendering.
//!
//! Episodes and films use separate templates. Templates are minijinja
//! sources evaluated with auto-escaping disabled, so titles such as
//! `Bob's Burgers` or `Fast & Furious` reach the webhook verbatim.

use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};

use crate::error::Result;
use crate::session::SessionRecord;

pub const SERIES_TEMPLATE: &str = "{{ user }} started watching {{ series }}: '{{ title }}'";
pub const FILM_TEMPLATE: &str = "{{ user }} started watching '{{ title }}'";

const SERIES_NAME: &str = "series";
const FILM_NAME: &str = "film";

/// Renders the notification body for a session.
///
/// Available template variables: `user`, `title`, `series`, `player`,
/// `platform`, `media_type`, `year`, `session_key`. Unknown variables are an error.
pub struct NotificationRenderer {
    env: Environment<'static>,
}

impl NotificationRenderer {
    /// Creates a renderer with the built-in templates.
    pub fn new() -> Result<Self> {
        Self::with_templates(SERIES_TEMPLATE, FILM_TEMPLATE)
    }

    /// Creates a renderer with custom templates.
    ///
    /// Both sources are compiled once, here, so that a syntax error surfaces
    /// at startup instead of on the first new session.
    pub fn with_templates(
        series_template: impl Into<String>,
        film_template: impl Into<String>,
    ) -> Result<Self> {
        let mut env = build_environment();
        env.add_template_owned(SERIES_NAME, series_template.into())?;
        env.add_template_owned(FILM_NAME, film_template.into())?;
        Ok(Self { env })
    }

    /// Renders the notification for `record`.
    ///
    /// Leading and trailing whitespace of the result is trimmed.
    pub fn render(&self, record: &SessionRecord) -> Result<String> {
        let name = if record.is_episode() {
            SERIES_NAME
        } else {
            FILM_NAME
        };

        let rendered = self.env.get_template(name)?.render(context! {
            user => record.user_name(),
            title => &record.title,
            series => &record.grandparent_title,
            player => &record.player.title,
            platform => &record.player.platform,
            media_type => &record.media_type,
            year => &record.year,
            session_key => &record.session_key,
        })?;

        Ok(rendered.trim().to_string())
    }
}

fn build_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::User;

    fn record(user: &str, series: &str, title: &str) -> SessionRecord {
        SessionRecord {
            session_key: "1".to_string(),
            title: title.to_string(),
            grandparent_title: series.to_string(),
            user: User {
                title: user.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_render_episode() {
        let renderer = NotificationRenderer::new().unwrap();
        let text = renderer.render(&record("Alice", "Show", "Ep1")).unwrap();
        assert_eq!(text, "Alice started watching Show: 'Ep1'");
    }

    #[test]
    fn test_render_film() {
        let renderer = NotificationRenderer::new().unwrap();
        let text = renderer.render(&record("Bob", "", "Movie")).unwrap();
        assert_eq!(text, "Bob started watching 'Movie'");
    }

    #[test]
    fn test_render_keeps_markup_characters_literal() {
        let renderer = NotificationRenderer::new().unwrap();
        let text = renderer
            .render(&record("Tom & Jerry", "Bob's Burgers", "<Pilot> \"One\""))
            .unwrap();
        assert_eq!(
            text,
            "Tom & Jerry started watching Bob's Burgers: '<Pilot> \"One\"'"
        );
        assert!(!text.contains("&#39;"));
        assert!(!text.contains("&amp;"));
    }

    #[test]
    fn test_custom_templates_see_player_fields() {
        let renderer = NotificationRenderer::with_templates(
            "{{ user }}: {{ series }} - {{ title }} on {{ player }} ({{ platform }})",
            "{{ user }}: {{ title }} ({{ year }}) on {{ player }}",
        )
        .unwrap();

        let mut film = record("Bob", "", "Heat");
        film.year = "1995".to_string();
        film.player.title = "Living Room".to_string();
        assert_eq!(
            renderer.render(&film).unwrap(),
            "Bob: Heat (1995) on Living Room"
        );

        let mut episode = record("Alice", "Show", "Ep1");
        episode.player.title = "iPhone".to_string();
        episode.player.platform = "iOS".to_string();
        assert_eq!(
            renderer.render(&episode).unwrap(),
            "Alice: Show - Ep1 on iPhone (iOS)"
        );
    }

    #[test]
    fn test_malformed_template_fails_at_construction() {
        let result = NotificationRenderer::with_templates("{{ user ", FILM_TEMPLATE);
        assert!(result.is_err_and(|err| err.is_render()));
    }

    #[test]
    fn test_templates_are_registered_once() {
        let renderer =
            NotificationRenderer::with_templates("{{ user }} / {{ series }}", "{{ user }}").unwrap();
        assert!(renderer.env.get_template(SERIES_NAME).is_ok());
        assert!(renderer.env.get_template(FILM_NAME).is_ok());
        assert_eq!(renderer.env.templates().count(), 2);

        // The compiled templates are reused across renders.
        for _ in 0..3 {
            assert_eq!(
                renderer.render(&record("Alice", "Show", "Ep1")).unwrap(),
                "Alice / Show"
            );
        }
        assert_eq!(renderer.render(&record("Bob", "", "Movie")).unwrap(), "Bob");
    }

    #[test]
    fn test_unknown_variable_fails_at_render() {
        let renderer =
            NotificationRenderer::with_templates(SERIES_TEMPLATE, "{{ nickname }}").unwrap();
        let err = renderer.render(&record("Bob", "", "Movie")).unwrap_err();
        assert!(err.is_render());
    }
}
