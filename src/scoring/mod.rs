pub mod round_score;
pub mod tables;
