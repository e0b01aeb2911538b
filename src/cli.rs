//! Command-line options and logging setup for the terminal front end.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use relic_escape::entities::Hero;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "relic_escape=info";

#[derive(Debug, Parser)]
#[command(name = "relic-escape")]
#[command(about = "Grab the relic, open the door, shoot the warden")]
pub struct Cli {
    /// Skip hero select and start as this hero (Wraith, Rune Knight, Ironbound)
    #[arg(long)]
    pub hero: Option<Hero>,

    /// Simulation and render rate
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(15..=240))]
    pub fps: u32,

    /// Write logs to this file; nothing is logged without it
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// tracing filter directive, e.g. `relic_escape=debug` (defaults to RUST_LOG)
    #[arg(long, requires = "log_file")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// The game owns the terminal, so logs only ever go to a file.
    pub fn init_logging(&self) -> anyhow::Result<()> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };

        let filter = match &self.log_filter {
            Some(directive) => EnvFilter::try_new(directive)
                .with_context(|| format!("invalid log filter {directive:?}"))?,
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        };
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("installing log subscriber")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sixty_fps_and_no_hero() {
        let cli = Cli::try_parse_from(["relic-escape"]).unwrap();
        assert_eq!(cli.fps, 60);
        assert_eq!(cli.hero, None);
        assert_eq!(cli.frame_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn hero_flag_accepts_loose_spelling() {
        let cli = Cli::try_parse_from(["relic-escape", "--hero", "rune-knight"]).unwrap();
        assert_eq!(cli.hero, Some(Hero::RuneKnight));
    }

    #[test]
    fn rejects_unknown_hero_and_silly_frame_rates() {
        assert!(Cli::try_parse_from(["relic-escape", "--hero", "bard"]).is_err());
        assert!(Cli::try_parse_from(["relic-escape", "--fps", "5"]).is_err());
    }

    #[test]
    fn log_filter_needs_a_log_file() {
        assert!(Cli::try_parse_from(["relic-escape", "--log-filter", "debug"]).is_err());
    }
}
