//! Core data types for match state.

use crate::scoring::round_score::RoundScore;
use crate::scoring::tables::TARGET_SCORE;

/// A scoring side: a team of two in the four-player game, or an individual
/// player in the two- and three-player games.
#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    /// Per-hand totals in commit order. Append-only, except that undoing a
    /// hand pops the latest entry.
    pub scores: Vec<i64>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: Vec::new(),
        }
    }

    pub fn total(&self) -> i64 {
        self.scores.iter().sum()
    }

    pub fn has_won(&self) -> bool {
        self.total() >= TARGET_SCORE
    }
}

/// One committed hand: its 1-based number and one score per team, in the
/// match's team order.
#[derive(Debug, Clone)]
pub struct Round {
    pub number: u32,
    pub scores: Vec<RoundScore>,
}
