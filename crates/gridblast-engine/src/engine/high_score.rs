use std::{cell::Cell, fmt, rc::Rc};

/// Persistent storage for the best score.
///
/// The session reads the value when it starts (and on reset) and writes it
/// whenever a placement raises the high score. Writes are fire-and-forget:
/// implementations deal with their own failures and never block the game.
pub trait HighScoreStore: fmt::Debug {
    /// Returns the stored high score, or `0` if none is stored or it cannot be read.
    fn load(&self) -> u64;

    /// Stores a new high score.
    fn save(&mut self, high_score: u64);
}

#[derive(Debug, Default, Clone, Copy)]
struct MemoryState {
    value: u64,
    saves: usize,
}

/// In-process high score store.
///
/// Clones share the same value, so a caller can keep a handle and observe
/// what the session wrote.
///
/// # Example
///
/// ```
/// use gridblast_engine::{HighScoreStore, MemoryHighScore};
///
/// let store = MemoryHighScore::new(120);
/// let mut handle = store.clone();
/// handle.save(150);
/// assert_eq!(store.load(), 150);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryHighScore {
    state: Rc<Cell<MemoryState>>,
}

impl MemoryHighScore {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self {
            state: Rc::new(Cell::new(MemoryState { value, saves: 0 })),
        }
    }

    /// Number of times [`HighScoreStore::save`] was called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.state.get().saves
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u64 {
        self.state.get().value
    }

    fn save(&mut self, high_score: u64) {
        let mut state = self.state.get();
        state.value = high_score;
        state.saves += 1;
        self.state.set(state);
    }
}
