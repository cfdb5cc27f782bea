//! Gamification subsystem: XP, levels, streaks, badges, and rewards.

mod badges;
pub mod config;
pub mod engine;
pub mod levels;
mod progress;
pub mod rewards;
mod streak;
pub mod types;
mod xp;

pub use config::GamificationConfig;
pub use engine::{EarnOutcome, GamificationEngine, GamificationNotification, StreakOutcome};
pub use levels::{calculate_level, xp_progress};
pub use rewards::RewardCategory;

use crate::storage::DatabaseError;

/// Gamification errors.
#[derive(Debug, thiserror::Error)]
pub enum GamificationError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
}

impl From<rusqlite::Error> for GamificationError {
    fn from(e: rusqlite::Error) -> Self {
        GamificationError::Storage(DatabaseError::QueryFailed(e.to_string()))
    }
}
