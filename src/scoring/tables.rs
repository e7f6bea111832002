//! Card valuation and bonus tables for Buraco scoring.
//!
//! Process-wide constants: card point values, bonus magnitudes for special
//! plays, and the cumulative target that ends a match.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Cumulative total a team must reach to end the match.
pub const TARGET_SCORE: i64 = 3000;

/// A scoring card: a rank 1–13 (ace = 1, J/Q/K = 11/12/13) or the joker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Card {
    Rank(u8),
    Joker,
}

/// Point value of every card, keyed the way score sheets list them.
pub static CARD_VALUES: Lazy<HashMap<Card, i64>> = Lazy::new(|| {
    let mut values = HashMap::new();
    values.insert(Card::Rank(1), 15);
    values.insert(Card::Rank(2), 20);
    for rank in 3..=7 {
        values.insert(Card::Rank(rank), 5);
    }
    for rank in 8..=13 {
        values.insert(Card::Rank(rank), 10);
    }
    values.insert(Card::Joker, 50);
    values
});

/// Forgiving lookup: cards outside the table are worth nothing.
pub fn card_value(card: Card) -> i64 {
    CARD_VALUES.get(&card).copied().unwrap_or(0)
}

/// Sum the value of a batch of cards (card → quantity). Unknown
/// identifiers contribute zero, never an error.
pub fn card_points(cards: &HashMap<Card, u32>) -> i64 {
    cards
        .iter()
        .map(|(card, qty)| card_value(*card) * i64::from(*qty))
        .sum()
}

/// Fixed bonuses for special plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bonus {
    /// Going out, emptying the hand.
    Closing,
    /// A canasta built without wildcards.
    PureCanasta,
    /// A canasta that used wildcards.
    ImpureCanasta,
    /// The contested extra draw pile.
    DeadPile,
}

impl Bonus {
    pub const fn points(self) -> i64 {
        match self {
            Bonus::Closing => 100,
            Bonus::PureCanasta => 200,
            Bonus::ImpureCanasta => 100,
            Bonus::DeadPile => 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_values() {
        assert_eq!(card_value(Card::Rank(1)), 15);
        assert_eq!(card_value(Card::Rank(2)), 20);
        for rank in 3..=7 {
            assert_eq!(card_value(Card::Rank(rank)), 5);
        }
        for rank in 8..=13 {
            assert_eq!(card_value(Card::Rank(rank)), 10);
        }
        assert_eq!(card_value(Card::Joker), 50);
    }

    #[test]
    fn test_unknown_rank_is_worthless() {
        assert_eq!(card_value(Card::Rank(0)), 0);
        assert_eq!(card_value(Card::Rank(14)), 0);
    }

    #[test]
    fn test_card_points_sums_quantities() {
        let cards: HashMap<Card, u32> = [
            (Card::Rank(1), 2),  // 30
            (Card::Rank(5), 3),  // 15
            (Card::Rank(11), 1), // 10
            (Card::Joker, 1),    // 50
        ]
        .into_iter()
        .collect();
        assert_eq!(card_points(&cards), 105);
    }

    #[test]
    fn test_card_points_ignores_unknown_cards() {
        let cards: HashMap<Card, u32> = [(Card::Rank(99), 4), (Card::Rank(2), 1)]
            .into_iter()
            .collect();
        assert_eq!(card_points(&cards), 20);
    }

    #[test]
    fn test_card_points_empty() {
        assert_eq!(card_points(&HashMap::new()), 0);
    }
}
