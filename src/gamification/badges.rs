//! Badge evaluation and awarding.

use crate::gamification::config::GamificationConfig;
use crate::gamification::types::{BadgeDefinition, RequirementType, UserProgress};
use crate::gamification::GamificationError;
use crate::storage::Database;
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

/// Evaluate every unearned catalog badge against a progress snapshot and
/// persist the newly satisfied ones.
///
/// Already-earned badges are skipped entirely, so repeated calls with
/// unchanged progress award nothing. Catalog rows are created lazily the
/// first time a badge is earned by anyone, resolved by display name.
pub(crate) fn check_and_award_badges(
    db: &Database,
    config: &GamificationConfig,
    user_id: &Uuid,
    progress: &UserProgress,
) -> Result<Vec<BadgeDefinition>, GamificationError> {
    let earned: HashSet<String> = db.earned_badge_ids(user_id)?.into_iter().collect();

    let mut newly_earned = Vec::new();

    for badge in config.all_badges() {
        if earned.contains(&badge.id) {
            continue;
        }

        if !requirement_met(badge, progress) {
            continue;
        }

        let badge_db_id = match db.find_badge_id_by_name(&badge.name)? {
            Some(id) => id,
            None => {
                db.insert_badge(badge)?;
                badge.id.clone()
            }
        };

        db.insert_user_badge(user_id, &badge_db_id, Utc::now())?;
        tracing::debug!(%user_id, badge_id = %badge.id, "badge earned");

        newly_earned.push(badge.clone());
    }

    Ok(newly_earned)
}

/// Whether a progress snapshot satisfies a badge's requirement.
fn requirement_met(badge: &BadgeDefinition, progress: &UserProgress) -> bool {
    let value = badge.requirement.value;

    match badge.requirement.requirement_type {
        RequirementType::Checkins => progress.total_checkins >= value,
        RequirementType::Streak => i64::from(progress.current_streak) >= value,
        RequirementType::HabitsCompleted => progress.total_habits_completed >= value,
        RequirementType::GoalsCompleted => progress.total_goals_completed >= value,
        RequirementType::ExercisesCompleted => progress.total_exercises_completed >= value,
        RequirementType::Level => i64::from(progress.level) >= value,
        RequirementType::TotalXp => progress.xp >= value,
    }
}
