//! User progress aggregation.

use crate::gamification::types::UserProgress;
use crate::gamification::GamificationError;
use crate::storage::Database;
use uuid::Uuid;

/// Assemble a user's progress from the profile row plus four independent
/// count queries.
///
/// The aggregate is always current as of read time; nothing is cached.
/// The counters are separate queries and may reflect different moments if
/// counts change mid-read.
pub(crate) fn user_progress(
    db: &Database,
    user_id: &Uuid,
) -> Result<UserProgress, GamificationError> {
    let profile = db
        .get_profile(user_id)?
        .ok_or_else(|| GamificationError::ProfileNotFound(user_id.to_string()))?;

    let total_checkins = db.count_checkins(user_id)?;
    let total_habits_completed = db.count_habit_completions(user_id)?;
    let total_goals_completed = db.count_completed_goals(user_id)?;
    let total_exercises_completed = db.count_completed_exercises(user_id)?;

    Ok(UserProgress {
        xp: profile.xp,
        level: profile.level,
        current_streak: profile.current_streak,
        longest_streak: profile.longest_streak,
        total_checkins,
        total_habits_completed,
        total_goals_completed,
        total_exercises_completed,
    })
}
