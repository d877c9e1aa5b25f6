use clap::{Parser, Subcommand};
use hottest_core::{Config, HttpSource, TouchMove, guard, schedule};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

use crate::display::ConsoleTarget;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "hottest", version, about = "Hottest place on Earth, in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Persist the data endpoint URL.
    Configure {
        /// JSON endpoint serving the current reading.
        url: String,
    },

    /// Fetch and render the current reading once.
    Show {
        /// Override the configured data endpoint.
        #[arg(long)]
        url: Option<String>,
    },

    /// Run the refresh loop: render now, then every interval, indefinitely.
    Run {
        /// Override the configured data endpoint.
        #[arg(long)]
        url: Option<String>,

        /// Override the configured refresh interval.
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { url } => {
                let mut config = Config::load()?;
                config.set_data_url(url);
                config.save()?;

                println!("Saved data URL to {}", Config::config_file_path()?.display());
            }
            Command::Show { url } => {
                let config = Config::load()?;
                let url = resolve_url(url, &config)?;

                let source = HttpSource::new(url);
                let mut target = ConsoleTarget::new();
                schedule::cycle(&source, &mut target).await?;
            }
            Command::Run { url, interval_secs } => {
                let config = Config::load()?;
                let url = resolve_url(url, &config)?;
                let interval = interval_secs
                    .map_or_else(|| config.refresh_interval(), Duration::from_secs);

                // Installed once for the life of the process; the sender is
                // held here so the subscription never ends.
                let _gestures = install_gesture_guard();

                info!(%url, interval_secs = interval.as_secs(), "starting refresh loop");
                schedule::run(HttpSource::new(url), ConsoleTarget::new(), interval).await;
            }
        }

        Ok(())
    }
}

fn resolve_url(flag: Option<String>, config: &Config) -> anyhow::Result<String> {
    match flag {
        Some(url) => Ok(url),
        None => Ok(config.data_url()?.to_string()),
    }
}

/// Spawn the touch-gesture guard and hand back its event sender.
fn install_gesture_guard() -> mpsc::UnboundedSender<TouchMove> {
    let (gestures, gesture_rx) = mpsc::unbounded_channel();
    tokio::spawn(guard::run(gesture_rx));
    gestures
}
