pub mod error;
pub mod match_state;
pub mod models;
pub mod serializer;
