//! Error conditions surfaced by the match engine.
//!
//! All of these are contract violations or malformed external input, not
//! transient failures: they surface immediately and nothing is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    /// A match is played by 2 teams or 3 individual players; four players
    /// join as 2 teams of two.
    #[error("a match needs 2 or 3 participants, got {0}")]
    InvalidParticipantCount(usize),

    /// A hand commit must carry exactly one score per team, in team order.
    #[error("expected {expected} round scores, got {got}")]
    RoundScoreCountMismatch { expected: usize, got: usize },

    /// A saved-match record was missing required fields or had the wrong
    /// shape. No partial match is ever built from one.
    #[error("malformed match record: {0}")]
    MalformedMatchRecord(String),
}
