//! Gamification type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A level band in the level table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// Level number (1-based)
    pub level: u32,
    /// Total XP required to reach this level
    pub xp_required: i64,
    /// Display title
    pub title: String,
    /// Short description shown on the progress screen
    pub description: String,
    /// Accent color as a hex string
    pub color: String,
}

/// Badge rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl BadgeRarity {
    /// String form used in storage and config keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeRarity::Common => "common",
            BadgeRarity::Uncommon => "uncommon",
            BadgeRarity::Rare => "rare",
            BadgeRarity::Epic => "epic",
            BadgeRarity::Legendary => "legendary",
        }
    }

    /// Parse from the storage string form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "common" => Some(BadgeRarity::Common),
            "uncommon" => Some(BadgeRarity::Uncommon),
            "rare" => Some(BadgeRarity::Rare),
            "epic" => Some(BadgeRarity::Epic),
            "legendary" => Some(BadgeRarity::Legendary),
            _ => None,
        }
    }
}

/// What a badge requirement is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    Checkins,
    Streak,
    HabitsCompleted,
    GoalsCompleted,
    ExercisesCompleted,
    Level,
    TotalXp,
}

impl RequirementType {
    /// String form used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementType::Checkins => "checkins",
            RequirementType::Streak => "streak",
            RequirementType::HabitsCompleted => "habits_completed",
            RequirementType::GoalsCompleted => "goals_completed",
            RequirementType::ExercisesCompleted => "exercises_completed",
            RequirementType::Level => "level",
            RequirementType::TotalXp => "total_xp",
        }
    }

    /// Parse from the storage string form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "checkins" => Some(RequirementType::Checkins),
            "streak" => Some(RequirementType::Streak),
            "habits_completed" => Some(RequirementType::HabitsCompleted),
            "goals_completed" => Some(RequirementType::GoalsCompleted),
            "exercises_completed" => Some(RequirementType::ExercisesCompleted),
            "level" => Some(RequirementType::Level),
            "total_xp" => Some(RequirementType::TotalXp),
            _ => None,
        }
    }
}

/// The threshold a user's progress must meet to earn a badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeRequirement {
    /// Progress field the requirement is checked against
    #[serde(rename = "type")]
    pub requirement_type: RequirementType,
    /// Minimum value of that field
    pub value: i64,
}

/// A badge definition from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDefinition {
    /// Unique identifier
    pub id: String,
    /// Display name (unique, used to resolve catalog rows)
    pub name: String,
    /// Display description
    pub description: String,
    /// Icon name resolved by the UI layer
    pub icon: String,
    /// Accent color as a hex string
    pub color: String,
    /// Rarity tier
    pub rarity: BadgeRarity,
    /// Requirement to earn the badge
    pub requirement: BadgeRequirement,
}

/// A badge a user has earned, with the time it was unlocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub badge: BadgeDefinition,
    pub earned_at: DateTime<Utc>,
}

/// A user's aggregated progress, assembled fresh on each read.
///
/// The four activity counters come from independent count queries and are
/// not snapshot-consistent with one another.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProgress {
    pub xp: i64,
    pub level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_checkins: i64,
    pub total_habits_completed: i64,
    pub total_goals_completed: i64,
    pub total_exercises_completed: i64,
}

/// Result of an XP award.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpAward {
    /// XP actually granted by this call (after the multiplier)
    pub xp_awarded: i64,
    /// Total XP after the award
    pub new_xp: i64,
    /// Level after the award
    pub new_level: u32,
    /// Whether the award crossed a level boundary
    pub leveled_up: bool,
}

/// Result of a streak update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakUpdate {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Whether the longest streak grew on this update
    pub is_new_record: bool,
    /// False when activity was already counted for today (no write happened)
    pub updated: bool,
}

/// Breakdown of progress toward the next level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XpProgress {
    pub current_level: u32,
    pub next_level: u32,
    /// XP floor of the current level band
    pub current_level_xp: i64,
    /// XP floor of the next level band
    pub next_level_xp: i64,
    /// XP earned within the current band
    pub xp_in_current_level: i64,
    /// Width of the current band
    pub xp_needed_for_level: i64,
    /// Progress toward the next level, clamped to 0-100
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_round_trip() {
        for rarity in [
            BadgeRarity::Common,
            BadgeRarity::Uncommon,
            BadgeRarity::Rare,
            BadgeRarity::Epic,
            BadgeRarity::Legendary,
        ] {
            assert_eq!(BadgeRarity::from_str(rarity.as_str()), Some(rarity));
        }
        assert_eq!(BadgeRarity::from_str("mythic"), None);
    }

    #[test]
    fn test_requirement_type_round_trip() {
        for req in [
            RequirementType::Checkins,
            RequirementType::Streak,
            RequirementType::HabitsCompleted,
            RequirementType::GoalsCompleted,
            RequirementType::ExercisesCompleted,
            RequirementType::Level,
            RequirementType::TotalXp,
        ] {
            assert_eq!(RequirementType::from_str(req.as_str()), Some(req));
        }
        assert_eq!(RequirementType::from_str("distance"), None);
    }
}
