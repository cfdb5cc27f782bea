//! Gamification engine facade.
//!
//! Ties the individual operations together the way the UI consumes them:
//! an action awards XP, progress is re-aggregated, badges are evaluated,
//! and the outcome carries an ordered notification queue for display.

use crate::gamification::badges::check_and_award_badges;
use crate::gamification::config::GamificationConfig;
use crate::gamification::levels;
use crate::gamification::progress::user_progress;
use crate::gamification::rewards::{reward_message, RewardCategory};
use crate::gamification::streak::update_streak_on;
use crate::gamification::types::{
    BadgeDefinition, BadgeRarity, EarnedBadge, LevelInfo, StreakUpdate, UserProgress, XpAward,
    XpProgress,
};
use crate::gamification::GamificationError;
use crate::storage::Database;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A queued notification for the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GamificationNotification {
    Xp { amount: i64, message: String },
    LevelUp { level: u32, message: String },
    Badge { badge_name: String, message: String },
    Streak { streak: u32, message: String },
}

/// Everything that happened when a user earned XP for an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarnOutcome {
    pub award: XpAward,
    pub new_badges: Vec<BadgeDefinition>,
    pub notifications: Vec<GamificationNotification>,
}

/// Everything that happened on a streak maintenance call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakOutcome {
    pub streak: StreakUpdate,
    pub notifications: Vec<GamificationNotification>,
}

/// Gamification engine.
pub struct GamificationEngine {
    db: Arc<Database>,
    config: Arc<GamificationConfig>,
}

impl GamificationEngine {
    /// Create a new engine over a database and a loaded configuration.
    pub fn new(db: Arc<Database>, config: Arc<GamificationConfig>) -> Self {
        Self { db, config }
    }

    // ========== Core operations ==========

    /// Award XP for a named action (see [`XpAward`]).
    pub fn award_xp(
        &self,
        user_id: &Uuid,
        action: &str,
        multiplier: f64,
    ) -> Result<XpAward, GamificationError> {
        crate::gamification::xp::award_xp(&self.db, &self.config, user_id, action, multiplier)
    }

    /// Record activity for today and update the user's streak.
    pub fn update_streak(&self, user_id: &Uuid) -> Result<StreakUpdate, GamificationError> {
        self.update_streak_on(user_id, Utc::now().date_naive())
    }

    /// Streak update pinned to a specific calendar day.
    pub fn update_streak_on(
        &self,
        user_id: &Uuid,
        today: NaiveDate,
    ) -> Result<StreakUpdate, GamificationError> {
        update_streak_on(&self.db, &self.config, user_id, today)
    }

    /// Aggregate the user's current progress.
    pub fn user_progress(&self, user_id: &Uuid) -> Result<UserProgress, GamificationError> {
        user_progress(&self.db, user_id)
    }

    /// Evaluate unearned badges against a progress snapshot and persist
    /// the newly earned ones.
    pub fn check_and_award_badges(
        &self,
        user_id: &Uuid,
        progress: &UserProgress,
    ) -> Result<Vec<BadgeDefinition>, GamificationError> {
        check_and_award_badges(&self.db, &self.config, user_id, progress)
    }

    // ========== Orchestration ==========

    /// Full earn flow: award XP, re-aggregate progress, evaluate badges,
    /// and build the notification queue.
    pub fn earn_xp(
        &self,
        user_id: &Uuid,
        action: &str,
        multiplier: f64,
    ) -> Result<EarnOutcome, GamificationError> {
        let award = self.award_xp(user_id, action, multiplier)?;
        let progress = self.user_progress(user_id)?;
        let new_badges = self.check_and_award_badges(user_id, &progress)?;

        let mut notifications = vec![GamificationNotification::Xp {
            amount: award.xp_awarded,
            message: reward_message(&self.config, RewardCategory::XpGained),
        }];

        if award.leveled_up {
            notifications.push(GamificationNotification::LevelUp {
                level: award.new_level,
                message: reward_message(&self.config, RewardCategory::LevelUp),
            });
        }

        for badge in &new_badges {
            notifications.push(GamificationNotification::Badge {
                badge_name: badge.name.clone(),
                message: reward_message(&self.config, RewardCategory::BadgeEarned),
            });
        }

        Ok(EarnOutcome {
            award,
            new_badges,
            notifications,
        })
    }

    /// Streak maintenance flow, with a notification when a record is set.
    pub fn maintain_streak(&self, user_id: &Uuid) -> Result<StreakOutcome, GamificationError> {
        self.maintain_streak_on(user_id, Utc::now().date_naive())
    }

    /// Streak maintenance pinned to a specific calendar day.
    pub fn maintain_streak_on(
        &self,
        user_id: &Uuid,
        today: NaiveDate,
    ) -> Result<StreakOutcome, GamificationError> {
        let streak = self.update_streak_on(user_id, today)?;

        let mut notifications = Vec::new();
        if streak.updated && streak.is_new_record {
            notifications.push(GamificationNotification::Streak {
                streak: streak.current_streak,
                message: reward_message(&self.config, RewardCategory::StreakMilestone),
            });
        }

        Ok(StreakOutcome {
            streak,
            notifications,
        })
    }

    // ========== Catalog getters ==========

    /// The full badge catalog.
    pub fn all_badges(&self) -> &[BadgeDefinition] {
        self.config.all_badges()
    }

    /// Look up a badge definition by ID.
    pub fn badge_by_id(&self, badge_id: &str) -> Option<&BadgeDefinition> {
        self.config.badge_by_id(badge_id)
    }

    /// Hex color for a rarity tier.
    pub fn rarity_color(&self, rarity: BadgeRarity) -> &str {
        self.config.rarity_color(rarity)
    }

    /// Level band info for a level number.
    pub fn level_info(&self, level: u32) -> Option<&LevelInfo> {
        self.config.level_info(level)
    }

    /// Level band info for the level after the given one.
    pub fn next_level_info(&self, level: u32) -> Option<&LevelInfo> {
        self.config.next_level_info(level)
    }

    /// Progress within the current level band for an XP total.
    pub fn xp_progress(&self, xp: i64) -> XpProgress {
        levels::xp_progress(&self.config, xp)
    }

    /// Badges a user has earned, most recent first.
    pub fn earned_badges(&self, user_id: &Uuid) -> Result<Vec<EarnedBadge>, GamificationError> {
        Ok(self.db.earned_badges(user_id)?)
    }
}
