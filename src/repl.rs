//! Interactive score-keeping session — the collaborator layer around the
//! engine. Raw text is parsed and clamped here; the engine only ever sees
//! validated, typed values.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

use buraco_scorekeeper::config::ScorekeeperConfig;
use buraco_scorekeeper::engine::match_state::Match;
use buraco_scorekeeper::engine::serializer::MatchRecord;
use buraco_scorekeeper::scoring::round_score::RoundScore;
use buraco_scorekeeper::scoring::tables::{card_points, card_value, Bonus, Card, TARGET_SCORE};

const HELP: &str = "\
Commands:
  new <name> <name> [name]   start a match (2 teams or 3 players)
  hand                       enter scores for the next hand
  undo                       drop the last hand
  standings                  totals and progress toward the target
  history                    per-hand totals
  values                     card point values
  rules                      scoring rules
  calc                       card calculator
  save <path>                write the match to a file
  load <path>                resume a match from a file
  quit                       leave";

pub fn run(
    config: ScorekeeperConfig,
    load: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut game: Option<Match> = match load {
        Some(path) => {
            let resumed = load_match(path)?;
            println!("Resumed match from {}.", path.display());
            println!("{}", render_standings(&resumed));
            Some(resumed)
        }
        None => None,
    };

    println!("Buraco scorekeeper — type 'help' for commands.");
    let stdin = io::stdin();
    let mut input = stdin.lock();

    match session_loop(&mut input, &config, &mut game) {
        // Ctrl-D quits like 'quit' does.
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
        other => other.map_err(Into::into),
    }
}

fn session_loop(
    input: &mut impl BufRead,
    config: &ScorekeeperConfig,
    game: &mut Option<Match>,
) -> io::Result<()> {
    loop {
        let line = prompt(input, "> ")?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "help" => println!("{HELP}"),
            "new" => {
                if let Some(current) = game {
                    if !current.is_over() {
                        let answer =
                            prompt(input, "A match is in progress. Abandon it? [y/N] ")?;
                        if !parse_yes_no(&answer, false) {
                            continue;
                        }
                    }
                }
                match Match::new(args) {
                    Ok(fresh) => {
                        println!("{}", render_standings(&fresh));
                        *game = Some(fresh);
                    }
                    Err(e) => println!("{e}"),
                }
            }
            "hand" => {
                let Some(current) = game.as_mut() else {
                    println!("No match in progress — 'new' starts one.");
                    continue;
                };
                if current.is_over() {
                    println!("The match is over — 'undo' the last hand or start a 'new' one.");
                    continue;
                }
                match enter_hand(input, current)? {
                    Some(scores) => match current.commit_round(scores) {
                        Ok(()) => {
                            println!("{}", render_standings(current));
                            if current.is_over() {
                                println!("{}", render_winner(current));
                            }
                            autosave(config, current);
                        }
                        Err(e) => println!("{e}"),
                    },
                    None => println!("Hand discarded."),
                }
            }
            "undo" => {
                let Some(current) = game.as_mut() else {
                    println!("No match in progress — 'new' starts one.");
                    continue;
                };
                if current.rounds().is_empty() {
                    println!("Nothing to undo.");
                    continue;
                }
                current.undo_last_round();
                println!("{}", render_standings(current));
                autosave(config, current);
            }
            "standings" => match game {
                Some(current) => {
                    println!("{}", render_standings(current));
                    if current.is_over() {
                        println!("{}", render_winner(current));
                    }
                }
                None => println!("No match in progress — 'new' starts one."),
            },
            "history" => match game {
                Some(current) => println!("{}", render_history(current)),
                None => println!("No match in progress — 'new' starts one."),
            },
            "values" => println!("{}", render_card_values()),
            "rules" => println!("{}", render_rules()),
            "calc" => {
                let total = run_calculator(input)?;
                println!("Total: {total} pts");
            }
            "save" => match (game.as_ref(), args.first()) {
                (None, _) => println!("No match in progress — 'new' starts one."),
                (_, None) => println!("Usage: save <path>"),
                (Some(current), Some(&path)) => match save_match(current, Path::new(path)) {
                    Ok(()) => println!("Saved to {path}."),
                    Err(e) => println!("{e}"),
                },
            },
            "load" => match args.first() {
                None => println!("Usage: load <path>"),
                Some(&path) => match load_match(Path::new(path)) {
                    Ok(loaded) => {
                        println!("{}", render_standings(&loaded));
                        if loaded.is_over() {
                            println!("{}", render_winner(&loaded));
                        }
                        *game = Some(loaded);
                    }
                    Err(e) => println!("{e}"),
                },
            },
            "quit" | "exit" => break,
            other => println!("Unknown command '{other}'. Type 'help'."),
        }
    }
    Ok(())
}

/// Collect one hand's scores from the table talk: dead pile first (at most
/// one side can take it), then each team's factors with a live breakdown
/// preview. Returns None if the hand is discarded at the confirm step.
fn enter_hand(input: &mut impl BufRead, game: &Match) -> io::Result<Option<Vec<RoundScore>>> {
    println!("— Hand {} —", game.current_round());

    let available = parse_yes_no(&prompt(input, "Dead pile in play this hand? [Y/n] ")?, true);
    let mut taker: Option<usize> = None;
    if available {
        let team_list = game
            .teams()
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}={}", i + 1, t.name))
            .collect::<Vec<_>>()
            .join(", ");
        let answer = prompt(
            input,
            &format!("Who took the dead pile? ({team_list}, 0=nobody) "),
        )?;
        let choice = parse_count(&answer) as usize;
        if (1..=game.num_teams()).contains(&choice) {
            taker = Some(choice - 1);
        }
    }

    let mut scores = Vec::with_capacity(game.num_teams());
    for (idx, team) in game.teams().iter().enumerate() {
        println!("{}:", team.name);
        let cards_down = prompt_points(input, "  Cards laid down ('c' = calculator): ")?;
        let cards_remaining = prompt_points(input, "  Cards left in hand ('c' = calculator): ")?;
        let closed = parse_yes_no(&prompt(input, "  Closed the hand? [y/N] ")?, false);
        let pure_canastas = parse_count(&prompt(input, "  Pure canastas: ")?);
        let impure_canastas = parse_count(&prompt(input, "  Impure canastas: ")?);

        let score = RoundScore {
            team_name: team.name.clone(),
            cards_down,
            cards_remaining,
            closed,
            pure_canastas,
            impure_canastas,
            dead_pile_taken: taker == Some(idx),
            dead_pile_available: available,
        };
        println!("{}", score.breakdown());
        scores.push(score);
    }

    if !parse_yes_no(&prompt(input, "Commit this hand? [Y/n] ")?, true) {
        return Ok(None);
    }
    Ok(Some(scores))
}

/// Tally a set of cards into points: lines of "<card> <count>", blank line
/// to finish. Unknown cards count for nothing, like the value table.
fn run_calculator(input: &mut impl BufRead) -> io::Result<i64> {
    println!("Card calculator — '<card> <count>' per line (e.g. '7 3', 'k 2', 'joker 1'), blank line to finish.");
    let mut cards: HashMap<Card, u32> = HashMap::new();
    loop {
        let line = prompt(input, "calc> ")?;
        if line.is_empty() {
            break;
        }
        let mut parts = line.split_whitespace();
        let card = parts.next().and_then(parse_card);
        let qty = parts.next().map(parse_count).unwrap_or(1);
        match card {
            Some(card) => {
                *cards.entry(card).or_insert(0) += qty;
                println!("  running total: {} pts", card_points(&cards));
            }
            None => println!("  unrecognized card"),
        }
    }
    Ok(card_points(&cards))
}

/// Read a points field. 'c' opens the card calculator and uses its total;
/// anything else parses as a count.
fn prompt_points(input: &mut impl BufRead, label: &str) -> io::Result<u32> {
    let line = prompt(input, label)?;
    if line.eq_ignore_ascii_case("c") {
        let total = run_calculator(input)?;
        println!("  using {total} pts");
        return Ok(total.clamp(0, i64::from(u32::MAX)) as u32);
    }
    Ok(parse_count(&line))
}

fn prompt(input: &mut impl BufRead, text: &str) -> io::Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
    }
    Ok(line.trim().to_string())
}

/// Parse a count the way the paper score sheet is read out: blank,
/// malformed, or negative input counts as zero.
fn parse_count(text: &str) -> u32 {
    text.trim()
        .parse::<i64>()
        .unwrap_or(0)
        .clamp(0, i64::from(u32::MAX)) as u32
}

fn parse_yes_no(text: &str, default: bool) -> bool {
    match text.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

fn parse_card(text: &str) -> Option<Card> {
    match text.to_lowercase().as_str() {
        "a" | "ace" => Some(Card::Rank(1)),
        "j" | "jack" => Some(Card::Rank(11)),
        "q" | "queen" => Some(Card::Rank(12)),
        "k" | "king" => Some(Card::Rank(13)),
        "joker" | "wild" => Some(Card::Joker),
        n => n.parse::<u8>().ok().map(Card::Rank),
    }
}

fn render_standings(game: &Match) -> String {
    let mut lines = vec![format!(
        "— Standings ({} hands played) —",
        game.rounds().len()
    )];
    for team in game.teams() {
        lines.push(format!(
            "  {:<16} {:>6} / {}",
            team.name,
            team.total(),
            TARGET_SCORE
        ));
    }
    lines.join("\n")
}

fn render_winner(game: &Match) -> String {
    match game.winner() {
        Some(team) if game.was_tied_win() => format!(
            "{} wins the match with {} points! (several sides passed {}; highest total takes it)",
            team.name,
            team.total(),
            TARGET_SCORE
        ),
        Some(team) => format!("{} wins the match with {} points!", team.name, team.total()),
        None => String::new(),
    }
}

/// Per-hand totals, one row per hand. Works from the team histories, so it
/// also covers matches resumed from a record (which carry no hand detail).
fn render_history(game: &Match) -> String {
    let hands = game
        .teams()
        .iter()
        .map(|t| t.scores.len())
        .max()
        .unwrap_or(0);
    if hands == 0 {
        return "No hands recorded yet.".to_string();
    }
    let mut lines = Vec::with_capacity(hands + 1);
    let header: Vec<String> = std::iter::once(format!("{:>4}", "Hand"))
        .chain(game.teams().iter().map(|t| format!("{:>12}", t.name)))
        .collect();
    lines.push(header.join(" "));
    for hand in 0..hands {
        let row: Vec<String> = std::iter::once(format!("{:>4}", hand + 1))
            .chain(game.teams().iter().map(|t| match t.scores.get(hand) {
                Some(total) => format!("{:>12}", total),
                None => format!("{:>12}", "-"),
            }))
            .collect();
        lines.push(row.join(" "));
    }
    lines.join("\n")
}

fn render_card_values() -> String {
    let mut lines = vec!["Card values:".to_string()];
    for rank in 1..=13u8 {
        lines.push(format!(
            "  {:<6} {:>3} pts",
            rank_label(rank),
            card_value(Card::Rank(rank))
        ));
    }
    lines.push(format!("  {:<6} {:>3} pts", "Joker", card_value(Card::Joker)));
    lines.join("\n")
}

fn rank_label(rank: u8) -> String {
    match rank {
        1 => "A (1)".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        n => n.to_string(),
    }
}

fn render_rules() -> String {
    [
        "Scoring per hand:".to_string(),
        "  + value of cards laid down on the table".to_string(),
        "  - value of cards left in hand".to_string(),
        format!("  +{} for closing the hand", Bonus::Closing.points()),
        format!(
            "  +{} per pure canasta, +{} per impure canasta",
            Bonus::PureCanasta.points(),
            Bonus::ImpureCanasta.points()
        ),
        format!(
            "  +{} for taking the dead pile, -{} for leaving it",
            Bonus::DeadPile.points(),
            Bonus::DeadPile.points()
        ),
        format!(
            "First side to {} points wins; if several cross in the same hand, the highest total takes the match.",
            TARGET_SCORE
        ),
    ]
    .join("\n")
}

fn save_match(game: &Match, path: &Path) -> Result<(), String> {
    let text = serde_json::to_string_pretty(&game.to_record())
        .map_err(|e| format!("Failed to encode match: {}", e))?;
    std::fs::write(path, text).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

fn load_match(path: &Path) -> Result<Match, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let record = MatchRecord::from_json(&text).map_err(|e| e.to_string())?;
    Match::from_record(&record).map_err(|e| e.to_string())
}

fn autosave(config: &ScorekeeperConfig, game: &Match) {
    if !config.autosave {
        return;
    }
    let path = config.effective_autosave_path();
    match save_match(game, &path) {
        Ok(()) => tracing::info!(path = %path.display(), "match autosaved"),
        Err(e) => tracing::warn!(error = %e, "autosave failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_count_clamps_to_zero() {
        assert_eq!(parse_count("42"), 42);
        assert_eq!(parse_count("  7 "), 7);
        assert_eq!(parse_count("-5"), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
    }

    #[test]
    fn test_parse_card_names() {
        assert_eq!(parse_card("a"), Some(Card::Rank(1)));
        assert_eq!(parse_card("10"), Some(Card::Rank(10)));
        assert_eq!(parse_card("J"), Some(Card::Rank(11)));
        assert_eq!(parse_card("joker"), Some(Card::Joker));
        assert_eq!(parse_card("x"), None);
    }

    #[test]
    fn test_parse_yes_no_defaults() {
        assert!(parse_yes_no("y", false));
        assert!(!parse_yes_no("N", true));
        assert!(parse_yes_no("", true));
        assert!(!parse_yes_no("", false));
        assert!(parse_yes_no("whatever", true));
    }

    #[test]
    fn test_calculator_tallies_and_ignores_unknown() {
        // 2 aces + 3 fives + an off-deck rank = 30 + 15 + 0
        let mut input = Cursor::new("a 2\n5 3\n27 4\n\n");
        let total = run_calculator(&mut input).unwrap();
        assert_eq!(total, 45);
    }

    #[test]
    fn test_enter_hand_builds_scores_with_single_taker() {
        let mut game = Match::new(vec!["Us", "Them"]).unwrap();
        // Dead pile in play, team 1 took it; team 1: 50 down / 10 left,
        // closed, 1 pure, 2 impure; team 2: plain 30/80 with a negative
        // canasta count that clamps to zero.
        let mut input = Cursor::new("y\n1\n50\n10\ny\n1\n2\n30\n80\nn\n-3\n0\ny\n");
        let scores = enter_hand(&mut input, &game).unwrap().unwrap();

        assert_eq!(scores.len(), 2);
        assert!(scores[0].dead_pile_taken);
        assert!(!scores[1].dead_pile_taken);
        assert_eq!(scores[0].total(), 640);
        assert_eq!(scores[1].pure_canastas, 0);
        assert_eq!(scores[1].total(), 30 - 80 - 100);

        game.commit_round(scores).unwrap();
        assert_eq!(game.teams()[0].total(), 640);
    }

    #[test]
    fn test_enter_hand_discard_at_confirm() {
        let game = Match::new(vec!["Us", "Them"]).unwrap();
        let mut input = Cursor::new("n\n0\n0\nn\n0\n0\n0\n0\nn\n0\n0\nn\n");
        assert!(enter_hand(&mut input, &game).unwrap().is_none());
    }

    #[test]
    fn test_render_history_rows_per_hand() {
        let mut game = Match::new(vec!["Us", "Them"]).unwrap();
        let plain = |team: &str, down: u32| RoundScore {
            cards_down: down,
            dead_pile_available: false,
            ..RoundScore::new(team)
        };
        game.commit_round(vec![plain("Us", 120), plain("Them", 45)])
            .unwrap();
        game.commit_round(vec![plain("Us", 0), plain("Them", 300)])
            .unwrap();

        let text = render_history(&game);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].contains("120"));
        assert!(rows[2].contains("300"));
    }

    #[test]
    fn test_render_standings_shows_target() {
        let game = Match::new(vec!["Us", "Them"]).unwrap();
        let text = render_standings(&game);
        assert!(text.contains("Us"));
        assert!(text.contains("/ 3000"));
    }
}
