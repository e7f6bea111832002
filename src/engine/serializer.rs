//! Flat record form of a match, for save and resume.
//!
//! The record keeps team names, per-hand totals, the hand counter, and the
//! winner's name. Hand-level breakdown detail (which bonuses contributed)
//! is not part of the record: a resumed match shows standings and history
//! totals only. Reading and writing the record as a file is the
//! collaborator's job; this module only converts.

use serde::{Deserialize, Serialize};

use crate::engine::error::MatchError;
use crate::engine::match_state::Match;
use crate::engine::models::Team;

/// One team's slice of the persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub scores: Vec<i64>,
}

/// The on-disk contract. Field names and shapes are compatibility-bearing;
/// `winner` is informational only and always recomputed on import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub teams: Vec<TeamRecord>,
    pub current_round: u32,
    pub winner: Option<String>,
}

impl MatchRecord {
    /// Parse the UTF-8 text form. Missing fields or wrong shapes surface
    /// as [`MatchError::MalformedMatchRecord`].
    pub fn from_json(text: &str) -> Result<Self, MatchError> {
        serde_json::from_str(text).map_err(|e| MatchError::MalformedMatchRecord(e.to_string()))
    }
}

impl Match {
    /// Flatten to the persisted record form.
    pub fn to_record(&self) -> MatchRecord {
        MatchRecord {
            teams: self
                .teams
                .iter()
                .map(|t| TeamRecord {
                    name: t.name.clone(),
                    scores: t.scores.clone(),
                })
                .collect(),
            current_round: self.current_round,
            winner: self.winner().map(|t| t.name.clone()),
        }
    }

    /// Rebuild a match from a record. Histories and the hand counter are
    /// taken verbatim; the winner is recomputed from the histories rather
    /// than trusted. Hand detail is not recorded, so the rebuilt match has
    /// no round records and undo is a no-op until new hands are committed.
    pub fn from_record(record: &MatchRecord) -> Result<Self, MatchError> {
        if record.teams.len() < 2 || record.teams.len() > 3 {
            return Err(MatchError::MalformedMatchRecord(format!(
                "expected 2 or 3 teams, record has {}",
                record.teams.len()
            )));
        }
        if record.current_round == 0 {
            return Err(MatchError::MalformedMatchRecord(
                "current_round must be at least 1".to_string(),
            ));
        }
        let teams = record
            .teams
            .iter()
            .map(|t| Team {
                name: t.name.clone(),
                scores: t.scores.clone(),
            })
            .collect();
        let mut game = Match {
            teams,
            rounds: Vec::new(),
            current_round: record.current_round,
            winner: None,
            was_tied_win: false,
        };
        game.check_winner();
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::round_score::RoundScore;

    fn plain_score(team: &str, cards_down: u32) -> RoundScore {
        RoundScore {
            cards_down,
            dead_pile_available: false,
            ..RoundScore::new(team)
        }
    }

    fn played_match() -> Match {
        let mut game = Match::new(vec!["Us", "Them"]).unwrap();
        game.commit_round(vec![plain_score("Us", 300), plain_score("Them", 150)])
            .unwrap();
        game.commit_round(vec![plain_score("Us", 80), plain_score("Them", 420)])
            .unwrap();
        game
    }

    #[test]
    fn test_record_round_trip() {
        let game = played_match();
        let restored = Match::from_record(&game.to_record()).unwrap();

        assert_eq!(restored.num_teams(), 2);
        assert_eq!(restored.current_round(), game.current_round());
        for (a, b) in game.teams().iter().zip(restored.teams()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.scores, b.scores);
        }
        assert_eq!(restored.winner_index(), game.winner_index());
    }

    #[test]
    fn test_json_round_trip_preserves_field_names() {
        let game = played_match();
        let text = serde_json::to_string_pretty(&game.to_record()).unwrap();
        assert!(text.contains("\"teams\""));
        assert!(text.contains("\"scores\""));
        assert!(text.contains("\"current_round\""));
        assert!(text.contains("\"winner\": null"));

        let restored = Match::from_record(&MatchRecord::from_json(&text).unwrap()).unwrap();
        assert_eq!(restored.teams()[1].scores, vec![150, 420]);
    }

    #[test]
    fn test_winner_is_recomputed_not_trusted() {
        let mut game = Match::new(vec!["Us", "Them"]).unwrap();
        game.commit_round(vec![plain_score("Us", 3200), plain_score("Them", 100)])
            .unwrap();
        let mut record = game.to_record();
        assert_eq!(record.winner.as_deref(), Some("Us"));

        // A tampered winner field changes nothing.
        record.winner = Some("Them".to_string());
        let restored = Match::from_record(&record).unwrap();
        assert_eq!(restored.winner().map(|t| t.name.as_str()), Some("Us"));
    }

    #[test]
    fn test_import_restores_win_state() {
        let mut game = Match::new(vec!["Us", "Them"]).unwrap();
        game.commit_round(vec![plain_score("Us", 3100), plain_score("Them", 3050)])
            .unwrap();
        let restored = Match::from_record(&game.to_record()).unwrap();
        assert!(restored.is_over());
        assert_eq!(restored.winner_index(), Some(0));
        assert!(restored.was_tied_win());
    }

    #[test]
    fn test_undo_after_import_is_noop() {
        let game = played_match();
        let mut restored = Match::from_record(&game.to_record()).unwrap();
        restored.undo_last_round();
        assert_eq!(restored.current_round(), 3);
        assert_eq!(restored.teams()[0].scores, vec![300, 80]);
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        for text in [
            "{}",
            r#"{"teams": []}"#,
            r#"{"teams": [{"name": "Us", "scores": []}], "winner": null}"#,
            r#"{"teams": [{"name": "Us"}], "current_round": 1, "winner": null}"#,
            r#"{"teams": "nope", "current_round": 1, "winner": null}"#,
            "not json at all",
        ] {
            assert!(
                matches!(
                    MatchRecord::from_json(text),
                    Err(MatchError::MalformedMatchRecord(_))
                ),
                "should reject: {text}"
            );
        }
    }

    #[test]
    fn test_bad_team_count_is_malformed() {
        let record = MatchRecord {
            teams: vec![TeamRecord {
                name: "Solo".to_string(),
                scores: vec![100],
            }],
            current_round: 2,
            winner: None,
        };
        assert!(matches!(
            Match::from_record(&record),
            Err(MatchError::MalformedMatchRecord(_))
        ));
    }

    #[test]
    fn test_zero_round_counter_is_malformed() {
        let record = MatchRecord {
            teams: vec![
                TeamRecord {
                    name: "Us".to_string(),
                    scores: vec![],
                },
                TeamRecord {
                    name: "Them".to_string(),
                    scores: vec![],
                },
            ],
            current_round: 0,
            winner: None,
        };
        assert!(matches!(
            Match::from_record(&record),
            Err(MatchError::MalformedMatchRecord(_))
        ));
    }
}
