use std::path::PathBuf;

use gridblast_engine::{GameSession, PieceGenerator, PieceSeed};
use tracing::info;

use crate::{high_score::JsonFileHighScore, logging, tui::Tui};

use self::app::PlayApp;

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex digits); random when omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// File the high score is read from and written to
    #[clap(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    pub(crate) high_score_file: PathBuf,
    /// Append logs to this file (the terminal is used by the game)
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
}

const DEFAULT_HIGH_SCORE_FILE: &str = "./data/high-score.json";

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            log_file: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        high_score_file,
        log_file,
    } = arg;

    if let Some(path) = log_file {
        logging::init_file(path)?;
    }

    let seed = seed.unwrap_or_else(rand::random);
    let store = JsonFileHighScore::new(high_score_file);
    info!(%seed, high_score_file = %store.path().display(), "starting game");

    let session =
        GameSession::with_providers(Box::new(PieceGenerator::with_seed(seed)), Box::new(store));
    let mut app = PlayApp::new(session);
    Tui::new().run(&mut app)?;

    info!(
        score = app.session().score(),
        high_score = app.session().high_score(),
        "quit"
    );
    Ok(())
}
