//! Reward message selection.

use crate::gamification::config::GamificationConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Fallback line used when a category has no configured messages.
pub const FALLBACK_MESSAGE: &str = "Well done, keep it up!";

/// Category of congratulatory copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardCategory {
    XpGained,
    LevelUp,
    BadgeEarned,
    StreakMilestone,
}

/// Pick a reward message for a category, uniformly at random.
pub fn reward_message(config: &GamificationConfig, category: RewardCategory) -> String {
    let mut rng = SmallRng::from_entropy();
    reward_message_with(config, category, &mut rng)
}

/// Pick a reward message with a caller-supplied random source.
///
/// Seed the RNG in tests for deterministic selection.
pub fn reward_message_with<R: Rng>(
    config: &GamificationConfig,
    category: RewardCategory,
    rng: &mut R,
) -> String {
    let messages = config.reward_messages(category);
    if messages.is_empty() {
        return FALLBACK_MESSAGE.to_string();
    }
    messages[rng.gen_range(0..messages.len())].clone()
}
