//! Per-team scoring for a single hand.

use super::tables::Bonus;

/// One team's raw scoring factors for one hand, as reported at the table.
///
/// Counts are unsigned by construction; the input layer clamps malformed or
/// negative text to zero before building one of these. Whether a claimed
/// canasta or closing was actually legal is trusted, not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundScore {
    pub team_name: String,
    /// Point value of cards melded on the table.
    pub cards_down: u32,
    /// Point value of cards still in hand (a penalty).
    pub cards_remaining: u32,
    pub closed: bool,
    pub pure_canastas: u32,
    pub impure_canastas: u32,
    /// This team picked up the dead pile.
    pub dead_pile_taken: bool,
    /// Whether the dead pile was in play at all this hand. When false the
    /// taken flag is meaningless and the dead pile contributes nothing.
    pub dead_pile_available: bool,
}

impl RoundScore {
    /// A blank score sheet for `team_name`: all counts zero, dead pile in
    /// play but not taken.
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            cards_down: 0,
            cards_remaining: 0,
            closed: false,
            pure_canastas: 0,
            impure_canastas: 0,
            dead_pile_taken: false,
            dead_pile_available: true,
        }
    }

    /// Signed hand total.
    ///
    /// Cards down minus cards left, plus the closing bonus, plus per-canasta
    /// bonuses, plus the dead pile: +100 taken, −100 left on the table,
    /// nothing when it was not in play.
    pub fn total(&self) -> i64 {
        let mut points = i64::from(self.cards_down) - i64::from(self.cards_remaining);
        if self.closed {
            points += Bonus::Closing.points();
        }
        points += i64::from(self.pure_canastas) * Bonus::PureCanasta.points();
        points += i64::from(self.impure_canastas) * Bonus::ImpureCanasta.points();
        if self.dead_pile_available {
            points += if self.dead_pile_taken {
                Bonus::DeadPile.points()
            } else {
                -Bonus::DeadPile.points()
            };
        }
        points
    }

    /// Line-by-line audit of the hand total. Terms appear in the same order
    /// `total()` adds them, only when they contribute, and the last line is
    /// the total itself — display code relies on that ordering.
    pub fn breakdown(&self) -> String {
        let mut lines = vec![
            format!("  Cards laid down:    +{}", self.cards_down),
            format!("  Cards in hand:      -{}", self.cards_remaining),
        ];
        if self.closed {
            lines.push(format!("  Closing:            +{}", Bonus::Closing.points()));
        }
        if self.pure_canastas > 0 {
            lines.push(format!(
                "  Pure canastas x{}:   +{}",
                self.pure_canastas,
                i64::from(self.pure_canastas) * Bonus::PureCanasta.points()
            ));
        }
        if self.impure_canastas > 0 {
            lines.push(format!(
                "  Impure canastas x{}: +{}",
                self.impure_canastas,
                i64::from(self.impure_canastas) * Bonus::ImpureCanasta.points()
            ));
        }
        if self.dead_pile_available {
            if self.dead_pile_taken {
                lines.push(format!("  Dead pile taken:    +{}", Bonus::DeadPile.points()));
            } else {
                lines.push(format!("  Dead pile missed:   -{}", Bonus::DeadPile.points()));
            }
        }
        lines.push("  ------------------------".to_string());
        lines.push(format!("  Hand total:         {:+}", self.total()));
        lines.join("\n")
    }
}
