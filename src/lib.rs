//! WellRise - Wellness Gamification Engine
//!
//! The progression layer of a self-hosted wellness tracker: XP and level
//! bookkeeping, calendar-day streaks with milestone bonuses, and a badge
//! catalog evaluated against aggregated user progress, persisted in
//! embedded SQLite.

pub mod gamification;
pub mod storage;

// Re-export commonly used types
pub use gamification::config::GamificationConfig;
pub use gamification::engine::{EarnOutcome, GamificationEngine, GamificationNotification};
pub use gamification::types::{
    BadgeDefinition, BadgeRarity, LevelInfo, StreakUpdate, UserProgress, XpAward,
};
pub use gamification::GamificationError;
pub use storage::{Database, Profile};
