//! Match state: teams, committed hands, and win detection.

use crate::engine::error::MatchError;
use crate::engine::models::{Round, Team};
use crate::scoring::round_score::RoundScore;

/// A Buraco match in progress (or concluded).
///
/// All mutation goes through [`Match::commit_round`] and
/// [`Match::undo_last_round`]; collaborators read computed state through
/// the accessors but never write fields directly. The winner is held as an
/// index into the team list, so re-evaluation always reads live totals.
#[derive(Debug, Clone)]
pub struct Match {
    pub(crate) teams: Vec<Team>,
    pub(crate) rounds: Vec<Round>,
    pub(crate) current_round: u32,
    pub(crate) winner: Option<usize>,
    pub(crate) was_tied_win: bool,
}

impl Match {
    /// Start a match for 2 or 3 named sides. Four players join as 2 teams
    /// of two. Names are fixed for the life of the match.
    pub fn new<S: Into<String>>(team_names: Vec<S>) -> Result<Self, MatchError> {
        if team_names.len() < 2 || team_names.len() > 3 {
            return Err(MatchError::InvalidParticipantCount(team_names.len()));
        }
        Ok(Self {
            teams: team_names.into_iter().map(Team::new).collect(),
            rounds: Vec::new(),
            current_round: 1,
            winner: None,
            was_tied_win: false,
        })
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn num_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// 1-based number of the hand being played next.
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn winner(&self) -> Option<&Team> {
        self.winner.map(|i| &self.teams[i])
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    /// True when the win came from several teams crossing the target in the
    /// same hand, resolved by highest total.
    pub fn was_tied_win(&self) -> bool {
        self.was_tied_win
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Record the scores for one completed hand, one per team in team
    /// order, then re-evaluate the winner. On a count mismatch the match is
    /// left untouched.
    ///
    /// Committing after `is_over()` is a caller contract violation — the
    /// engine does not forbid it, the UI must gate hand entry on it.
    pub fn commit_round(&mut self, scores: Vec<RoundScore>) -> Result<(), MatchError> {
        if scores.len() != self.teams.len() {
            return Err(MatchError::RoundScoreCountMismatch {
                expected: self.teams.len(),
                got: scores.len(),
            });
        }
        for (team, score) in self.teams.iter_mut().zip(&scores) {
            team.scores.push(score.total());
        }
        let number = self.current_round;
        self.rounds.push(Round { number, scores });
        self.current_round += 1;
        tracing::info!(hand = number, "hand committed");
        self.check_winner();
        Ok(())
    }

    /// Drop the most recently committed hand, if any. Win state is
    /// re-derived from the shorter histories: the undo can un-cross the
    /// target, or leave an earlier qualifying hand standing as the win.
    pub fn undo_last_round(&mut self) {
        let Some(round) = self.rounds.pop() else {
            return;
        };
        for team in &mut self.teams {
            team.scores.pop();
        }
        self.current_round -= 1;
        self.winner = None;
        self.was_tied_win = false;
        tracing::info!(hand = round.number, "hand undone");
        self.check_winner();
    }

    /// Re-derive the winner from current totals. A single team at or past
    /// the target wins outright; when several cross in the same hand the
    /// highest total wins, ties on the maximum going to the first team in
    /// seating order.
    pub(crate) fn check_winner(&mut self) {
        let qualifiers: Vec<usize> = (0..self.teams.len())
            .filter(|&i| self.teams[i].has_won())
            .collect();
        match qualifiers.as_slice() {
            [] => {}
            [single] => {
                self.winner = Some(*single);
                self.was_tied_win = false;
                tracing::info!(
                    team = %self.teams[*single].name,
                    total = self.teams[*single].total(),
                    "match won"
                );
            }
            several => {
                let mut best = several[0];
                for &i in &several[1..] {
                    if self.teams[i].total() > self.teams[best].total() {
                        best = i;
                    }
                }
                self.winner = Some(best);
                self.was_tied_win = true;
                tracing::info!(
                    team = %self.teams[best].name,
                    total = self.teams[best].total(),
                    "match won on simultaneous threshold"
                );
            }
        }
    }
}
