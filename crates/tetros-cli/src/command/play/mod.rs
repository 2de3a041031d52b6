use std::path::PathBuf;

use anyhow::Context as _;
use tetros_engine::{EngineConfig, PieceSeed, Session};

use crate::{tui::Runtime, util};

use self::app::PlayApp;

mod app;
mod input;

const DEFAULT_TICK_RATE: f64 = 30.0;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece sequence seed, 32 hex characters (default: random)
    #[arg(long)]
    pub(super) seed: Option<PieceSeed>,
    /// Game ticks per second
    #[arg(long, default_value_t = DEFAULT_TICK_RATE)]
    pub(super) tick_rate: f64,
    /// Engine configuration file (JSON); missing fields keep their defaults
    #[arg(long)]
    pub(super) config: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate: DEFAULT_TICK_RATE,
            config: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        tick_rate,
        config,
    } = arg;

    anyhow::ensure!(
        tick_rate.is_finite() && *tick_rate > 0.0,
        "tick rate must be a positive number, got {tick_rate}"
    );

    let config = match config {
        Some(path) => util::read_engine_config(path)?,
        None => EngineConfig::default(),
    };
    let session = match seed {
        Some(seed) => Session::with_seed(config, *seed),
        None => Session::new(config),
    }
    .context("Invalid engine configuration")?;

    let mut app = PlayApp::new(session, *tick_rate);
    Runtime::new().run(&mut app)
}
