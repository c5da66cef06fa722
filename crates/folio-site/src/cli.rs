#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use folio_core::route::RouteId;
use folio_runtime::{DEFAULT_FPS, FolioConfig, FrameClock};

use crate::error::Result;
use crate::replay::{OutputFormat, ReplayOptions, ReplaySummary, run_replay};

#[derive(Debug, Parser)]
#[command(
    name = "folio-demo",
    about = "Replay route changes through the Folio transition layer and print every frame",
    version
)]
pub struct Cli {
    /// Route to visit, in order. Repeat for a navigation script; defaults to
    /// every navigation link.
    #[arg(long = "route")]
    pub routes: Vec<String>,

    /// TOML or JSON configuration file (by extension).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Frame rate of the replay clock.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Milliseconds to stay on each route.
    #[arg(long = "hold-ms", default_value_t = 1500)]
    pub hold_ms: u64,

    /// Viewport width in CSS pixels, for the header layout.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Emit JSON lines (and JSON logs) instead of text.
    #[arg(long)]
    pub json: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long = "log-filter", default_value = "warn")]
    pub log_filter: String,
}

impl Cli {
    /// Configuration from `--config`, or the stock site defaults.
    pub fn load_config(&self) -> Result<FolioConfig> {
        let config = match &self.config {
            Some(path) => FolioConfig::from_file(path)?,
            None => FolioConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn replay_options(&self) -> Result<ReplayOptions> {
        Ok(ReplayOptions {
            routes: self.routes.iter().map(RouteId::new).collect(),
            hold: Duration::from_millis(self.hold_ms),
            clock: FrameClock::from_fps(self.fps)?,
            width: self.width,
            format: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        })
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    folio_core::logging::init_subscriber(&cli.log_filter, cli.json);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<ReplaySummary> {
    let config = cli.load_config()?;
    let options = cli.replay_options()?;
    run_replay(&config, &options, out)
}
