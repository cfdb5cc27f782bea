//! Static gamification tables: levels, badges, XP actions, rarity colors,
//! and reward messages.
//!
//! The tables are loaded once at startup (from TOML, or the built-in
//! defaults) and never mutated afterwards. Lookup misses degrade
//! gracefully: unknown actions award 0 XP, unknown rarities render
//! neutral gray, empty reward categories fall back to a generic line.

use crate::gamification::rewards::RewardCategory;
use crate::gamification::types::{
    BadgeDefinition, BadgeRarity, BadgeRequirement, LevelInfo, RequirementType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Neutral gray used when a rarity has no configured color.
pub const DEFAULT_RARITY_COLOR: &str = "#94A3B8";

/// Immutable gamification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationConfig {
    /// Level bands, ordered ascending by XP required
    pub levels: Vec<LevelInfo>,
    /// Badge catalog
    pub badges: Vec<BadgeDefinition>,
    /// Action name to XP value
    pub xp_actions: BTreeMap<String, i64>,
    /// Rarity name to hex color
    pub rarity_colors: BTreeMap<String, String>,
    /// Congratulatory copy per reward category
    #[serde(default)]
    pub reward_messages: RewardMessages,
}

/// Categorized reward message lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewardMessages {
    #[serde(default)]
    pub xp_gained: Vec<String>,
    #[serde(default)]
    pub level_up: Vec<String>,
    #[serde(default)]
    pub badge_earned: Vec<String>,
    #[serde(default)]
    pub streak_milestone: Vec<String>,
}

impl GamificationConfig {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &PathBuf) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: GamificationConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from a TOML file if it exists, otherwise fall back to the
    /// built-in defaults.
    pub fn load_or_default(path: &PathBuf) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check the level-table and badge-catalog invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::ValidationError(
                "level table must not be empty".to_string(),
            ));
        }

        let first = &self.levels[0];
        if first.level != 1 || first.xp_required != 0 {
            return Err(ConfigError::ValidationError(
                "level 1 must require 0 XP".to_string(),
            ));
        }

        for pair in self.levels.windows(2) {
            if pair[1].level != pair[0].level + 1 {
                return Err(ConfigError::ValidationError(format!(
                    "level numbers must be consecutive, got {} after {}",
                    pair[1].level, pair[0].level
                )));
            }
            if pair[1].xp_required <= pair[0].xp_required {
                return Err(ConfigError::ValidationError(format!(
                    "xp_required must strictly increase, level {} does not",
                    pair[1].level
                )));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for badge in &self.badges {
            if !seen.insert(badge.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate badge id: {}",
                    badge.id
                )));
            }
        }

        Ok(())
    }

    /// XP value for an action; unknown actions are worth 0.
    pub fn xp_for_action(&self, action: &str) -> i64 {
        self.xp_actions.get(action).copied().unwrap_or(0)
    }

    /// Level band info for a level number.
    pub fn level_info(&self, level: u32) -> Option<&LevelInfo> {
        self.levels.iter().find(|l| l.level == level)
    }

    /// Level band info for the level after the given one.
    pub fn next_level_info(&self, current_level: u32) -> Option<&LevelInfo> {
        self.levels.iter().find(|l| l.level == current_level + 1)
    }

    /// The full badge catalog.
    pub fn all_badges(&self) -> &[BadgeDefinition] {
        &self.badges
    }

    /// Look up a badge definition by ID.
    pub fn badge_by_id(&self, badge_id: &str) -> Option<&BadgeDefinition> {
        self.badges.iter().find(|b| b.id == badge_id)
    }

    /// Hex color for a rarity tier, with a neutral fallback.
    pub fn rarity_color(&self, rarity: BadgeRarity) -> &str {
        self.rarity_colors
            .get(rarity.as_str())
            .map(String::as_str)
            .unwrap_or(DEFAULT_RARITY_COLOR)
    }

    /// Message pool for a reward category.
    pub fn reward_messages(&self, category: RewardCategory) -> &[String] {
        match category {
            RewardCategory::XpGained => &self.reward_messages.xp_gained,
            RewardCategory::LevelUp => &self.reward_messages.level_up,
            RewardCategory::BadgeEarned => &self.reward_messages.badge_earned,
            RewardCategory::StreakMilestone => &self.reward_messages.streak_milestone,
        }
    }
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            badges: default_badges(),
            xp_actions: default_xp_actions(),
            rarity_colors: default_rarity_colors(),
            reward_messages: default_reward_messages(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "wellrise", "WellRise")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the gamification configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("gamification.toml")
}

fn level(level: u32, xp_required: i64, title: &str, description: &str, color: &str) -> LevelInfo {
    LevelInfo {
        level,
        xp_required,
        title: title.to_string(),
        description: description.to_string(),
        color: color.to_string(),
    }
}

/// Built-in level table.
pub fn default_levels() -> Vec<LevelInfo> {
    vec![
        level(1, 0, "Newcomer", "First steps on your wellness journey", "#94A3B8"),
        level(2, 100, "Explorer", "Finding your rhythm", "#38BDF8"),
        level(3, 250, "Pathfinder", "Building healthy routines", "#34D399"),
        level(4, 500, "Achiever", "Your habits are paying off", "#FBBF24"),
        level(5, 1000, "Challenger", "Consistency is your strength", "#FB923C"),
        level(6, 1750, "Champion", "An example to others", "#F87171"),
        level(7, 2750, "Guardian", "Wellness is part of who you are", "#A78BFA"),
        level(8, 4000, "Sage", "Deep and lasting balance", "#818CF8"),
        level(9, 5500, "Luminary", "Your progress inspires", "#F472B6"),
        level(10, 7500, "Enlightened", "The summit of the journey", "#FACC15"),
    ]
}

fn badge(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    color: &str,
    rarity: BadgeRarity,
    requirement_type: RequirementType,
    value: i64,
) -> BadgeDefinition {
    BadgeDefinition {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        rarity,
        requirement: BadgeRequirement {
            requirement_type,
            value,
        },
    }
}

/// Built-in badge catalog.
pub fn default_badges() -> Vec<BadgeDefinition> {
    use BadgeRarity::*;
    use RequirementType::*;

    vec![
        badge("first_checkin", "First Steps", "Log your first mood check-in", "footprints", "#94A3B8", Common, Checkins, 1),
        badge("checkin_collector", "Check-in Collector", "Log 25 mood check-ins", "notebook", "#34D399", Uncommon, Checkins, 25),
        badge("checkin_century", "Century of Calm", "Log 100 mood check-ins", "sparkles", "#38BDF8", Rare, Checkins, 100),
        badge("week_streak", "Week Warrior", "Stay active 7 days in a row", "flame", "#34D399", Uncommon, Streak, 7),
        badge("month_streak", "Monthly Master", "Stay active 30 days in a row", "calendar", "#A78BFA", Epic, Streak, 30),
        badge("hundred_streak", "Unstoppable", "Stay active 100 days in a row", "crown", "#FACC15", Legendary, Streak, 100),
        badge("habit_builder", "Habit Builder", "Complete 10 habits", "hammer", "#94A3B8", Common, HabitsCompleted, 10),
        badge("habit_machine", "Habit Machine", "Complete 50 habits", "cog", "#38BDF8", Rare, HabitsCompleted, 50),
        badge("goal_getter", "Goal Getter", "Complete your first goal", "target", "#94A3B8", Common, GoalsCompleted, 1),
        badge("goal_crusher", "Goal Crusher", "Complete 10 goals", "trophy", "#A78BFA", Epic, GoalsCompleted, 10),
        badge("mindful_mover", "Mindful Mover", "Finish 5 guided exercises", "wind", "#94A3B8", Common, ExercisesCompleted, 5),
        badge("exercise_pro", "Exercise Pro", "Finish 30 guided exercises", "dumbbell", "#38BDF8", Rare, ExercisesCompleted, 30),
        badge("rising_star", "Rising Star", "Reach level 5", "star", "#34D399", Uncommon, Level, 5),
        badge("peak_form", "Peak Form", "Reach level 10", "mountain", "#FACC15", Legendary, Level, 10),
        badge("xp_collector", "XP Collector", "Accumulate 1000 XP", "gem", "#38BDF8", Rare, TotalXp, 1000),
    ]
}

/// Built-in XP action table.
pub fn default_xp_actions() -> BTreeMap<String, i64> {
    let mut actions = BTreeMap::new();
    actions.insert("checkin".to_string(), 10);
    actions.insert("habit_completed".to_string(), 15);
    actions.insert("exercise_completed".to_string(), 25);
    actions.insert("goal_completed".to_string(), 50);
    actions.insert("profile_completed".to_string(), 20);
    actions.insert("streak_milestone_7".to_string(), 70);
    actions.insert("streak_milestone_30".to_string(), 300);
    actions.insert("streak_milestone_100".to_string(), 1000);
    actions
}

/// Built-in rarity color table.
pub fn default_rarity_colors() -> BTreeMap<String, String> {
    let mut colors = BTreeMap::new();
    colors.insert("common".to_string(), "#94A3B8".to_string());
    colors.insert("uncommon".to_string(), "#34D399".to_string());
    colors.insert("rare".to_string(), "#38BDF8".to_string());
    colors.insert("epic".to_string(), "#A78BFA".to_string());
    colors.insert("legendary".to_string(), "#FACC15".to_string());
    colors
}

/// Built-in reward message lists.
pub fn default_reward_messages() -> RewardMessages {
    RewardMessages {
        xp_gained: vec![
            "Nice work, every step counts!".to_string(),
            "Progress logged. Keep the momentum!".to_string(),
            "Another step on your journey!".to_string(),
        ],
        level_up: vec![
            "You leveled up! Your dedication shows.".to_string(),
            "A new level reached. Onwards!".to_string(),
            "Level up! You earned this.".to_string(),
        ],
        badge_earned: vec![
            "New badge unlocked!".to_string(),
            "You earned a badge. Wear it proudly!".to_string(),
            "Achievement unlocked!".to_string(),
        ],
        streak_milestone: vec![
            "Your streak is on fire!".to_string(),
            "Consistency pays off. New streak record!".to_string(),
            "Day after day, you show up. Impressive!".to_string(),
        ],
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
