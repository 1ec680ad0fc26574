use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use psn_application::SessionMonitor;
use psn_core::config::{self, Config};
use psn_core::render::{self, NotificationRenderer};
use psn_infrastructure::{NtfyNotifier, PlexSessionFeed};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "psn")]
#[command(
    about = "PSN - Plex Session Notifier, pushes new Plex playback sessions to an ntfy topic",
    long_about = None
)]
struct Cli {
    /// Host or IP address of the Plex Media Server
    #[arg(long, env = "PSN_PLEX_IP", default_value = config::DEFAULT_PLEX_IP)]
    plex_ip: String,

    /// Plex token (PlexOnlineToken in Preferences.xml)
    #[arg(long, env = "PSN_PLEX_TOKEN", hide_env_values = true)]
    plex_token: String,

    /// ntfy topic URL that receives the notifications
    #[arg(long, env = "PSN_NTFY_TOPIC_URL")]
    ntfy_topic_url: String,

    /// Never notify for sessions of this Plex user
    #[arg(long, env = "PSN_IGNORED_USER")]
    ignored_user: Option<String>,

    /// Time between two polls, e.g. 30s, 1m30s, 500ms
    #[arg(
        long,
        env = "PSN_CHECK_INTERVAL",
        default_value = config::DEFAULT_CHECK_INTERVAL,
        value_parser = config::parse_interval
    )]
    check_interval: Duration,

    /// Template used for episodes
    #[arg(long, env = "PSN_SERIES_TEMPLATE", default_value = render::SERIES_TEMPLATE)]
    series_template: String,

    /// Template used for films and anything without a series title
    #[arg(long, env = "PSN_FILM_TEMPLATE", default_value = render::FILM_TEMPLATE)]
    film_template: String,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::new(
        cli.plex_ip,
        cli.plex_token,
        cli.ntfy_topic_url,
        cli.ignored_user,
        cli.check_interval,
    )
    .context("failed to load configuration")?;

    let renderer = NotificationRenderer::with_templates(cli.series_template, cli.film_template)
        .context("failed to compile notification templates")?;
    let feed = PlexSessionFeed::new(&config)?;
    let notifier = NtfyNotifier::new(&config.ntfy_topic_url)?;

    let mut monitor = SessionMonitor::new(&config, Arc::new(feed), Arc::new(notifier), renderer);

    if cli.once {
        let report = monitor.poll_once().await?;
        tracing::info!(?report, "Single poll cycle complete");
        return Ok(());
    }

    let never = monitor.run().await?;
    match never {}
}
