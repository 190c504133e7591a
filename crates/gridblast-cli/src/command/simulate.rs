use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use gridblast_engine::{GameSession, MemoryHighScore, PieceGenerator, PieceSeed, SLOT_COUNT};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::{debug, info};

use crate::logging;

/// Upper bound on placements per game; a game that survives this long is
/// reported as unfinished.
const MAX_PLACEMENTS: usize = 10_000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[clap(long, default_value_t = 100)]
    pub(crate) games: usize,
    /// Seed the per-game seeds are derived from (32 hex digits); random when omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Write the JSON summary to this file instead of stdout
    #[clap(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct GameResult {
    seed: PieceSeed,
    score: u64,
    placed_pieces: usize,
    cleared_lines: usize,
    best_combo: u64,
    game_over: bool,
}

#[derive(Debug, Clone, Serialize)]
struct SimulationSummary {
    seed: PieceSeed,
    games: usize,
    min_score: u64,
    max_score: u64,
    mean_score: f64,
    mean_placed_pieces: f64,
    best_combo: u64,
    results: Vec<GameResult>,
}

impl SimulationSummary {
    #[expect(clippy::cast_precision_loss)]
    fn new(seed: PieceSeed, results: Vec<GameResult>) -> Self {
        let games = results.len();
        let mean = |total: f64| if games == 0 { 0.0 } else { total / games as f64 };
        Self {
            seed,
            games,
            min_score: results.iter().map(|r| r.score).min().unwrap_or(0),
            max_score: results.iter().map(|r| r.score).max().unwrap_or(0),
            mean_score: mean(results.iter().map(|r| r.score as f64).sum()),
            mean_placed_pieces: mean(results.iter().map(|r| r.placed_pieces as f64).sum()),
            best_combo: results.iter().map(|r| r.best_combo).max().unwrap_or(0),
            results,
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        games,
        seed,
        output,
    } = arg;

    logging::init_stderr()?;

    let seed = seed.unwrap_or_else(rand::random);
    info!(%seed, games, "starting simulation");

    let summary = simulate(seed, *games);
    info!(
        min_score = summary.min_score,
        max_score = summary.max_score,
        mean_score = summary.mean_score,
        "simulation finished"
    );

    write_summary(&summary, output.as_deref())
}

/// Writes the summary as pretty JSON to `path`, or to stdout when `None`.
fn write_summary(summary: &SimulationSummary, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), summary)
                .with_context(|| format!("Failed to write summary to {}", path.display()))
        }
        None => write_json(io::stdout().lock(), summary)
            .context("Failed to write summary to stdout"),
    }
}

fn write_json<W: Write>(mut writer: W, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

fn simulate(seed: PieceSeed, games: usize) -> SimulationSummary {
    let mut seeds = Pcg32::from_seed(*seed.as_bytes());
    let results = (0..games)
        .map(|game| {
            let game_seed: PieceSeed = seeds.random();
            let result = play_game(game_seed);
            debug!(game, seed = %game_seed, score = result.score, "game finished");
            result
        })
        .collect();
    SimulationSummary::new(seed, results)
}

fn play_game(seed: PieceSeed) -> GameResult {
    let mut session = GameSession::with_providers(
        Box::new(PieceGenerator::with_seed(seed)),
        Box::new(MemoryHighScore::default()),
    );
    for _ in 0..MAX_PLACEMENTS {
        let Some((slot, x, y)) = choose_placement(&session) else {
            break;
        };
        if session.place_piece(slot, x, y).is_none_or(|outcome| outcome.game_over) {
            break;
        }
    }
    let stats = session.stats();
    GameResult {
        seed,
        score: stats.score(),
        placed_pieces: stats.placed_pieces(),
        cleared_lines: stats.cleared_lines(),
        best_combo: stats.best_combo(),
        game_over: session.session_state().is_game_over(),
    }
}

/// Greedy choice: the placement that clears the most lines.
///
/// Slots are tried in order and positions row by row; the first placement
/// found wins ties.
fn choose_placement(session: &GameSession) -> Option<(usize, isize, isize)> {
    let board = session.board();
    let mut best: Option<((usize, isize, isize), usize)> = None;
    for slot in 0..SLOT_COUNT {
        let Some(piece) = session.slots().get(slot) else {
            continue;
        };
        for (x, y) in board.legal_origins(piece.shape()) {
            let cleared = board
                .placed(piece.shape(), piece.color(), x, y)
                .find_full_lines()
                .count();
            if best.is_none_or(|(_, most)| cleared > most) {
                best = Some(((slot, x, y), cleared));
            }
        }
    }
    best.map(|(placement, _)| placement)
}
