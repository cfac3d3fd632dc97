//! Scoring module
//!
//! Scores a normalized submission task by task and aggregates the results
//! into a report plus a worst/best leaderboard.

mod engine;
mod leaderboard;

pub use engine::*;
pub use leaderboard::*;
