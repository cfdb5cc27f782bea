//! Daily streak bookkeeping.
//!
//! Streaks are compared by calendar day, not elapsed hours: activity on
//! the day after the last recorded one extends the streak, a second
//! activity on the same day is a no-op, and any gap resets to 1.

use crate::gamification::config::GamificationConfig;
use crate::gamification::types::StreakUpdate;
use crate::gamification::xp::award_xp;
use crate::gamification::GamificationError;
use crate::storage::Database;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

/// Record activity for `today` and update the user's streak.
///
/// The read-update-write runs in one transaction; a second call on the
/// same day sees the committed `last_activity_date` and becomes a no-op,
/// so a milestone can only fire once.
///
/// Milestone bonuses (streak landing exactly on 7, 30 or 100) are awarded
/// after the streak commit. If the bonus award fails the streak stays
/// committed and the error propagates.
pub(crate) fn update_streak_on(
    db: &Database,
    config: &GamificationConfig,
    user_id: &Uuid,
    today: NaiveDate,
) -> Result<StreakUpdate, GamificationError> {
    let tx = db.connection().unchecked_transaction()?;

    let row: Option<(u32, u32, Option<String>)> = tx
        .query_row(
            "SELECT current_streak, longest_streak, last_activity_date
             FROM profiles WHERE id = ?1",
            params![user_id.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;

    let (current_streak, longest_streak, last_activity) = match row {
        Some(values) => values,
        None => return Err(GamificationError::ProfileNotFound(user_id.to_string())),
    };

    let last_activity_date = match last_activity {
        Some(s) => Some(s.parse::<NaiveDate>().map_err(|e| {
            GamificationError::Storage(crate::storage::DatabaseError::DeserializationError(
                format!("Invalid activity date: {}", e),
            ))
        })?),
        None => None,
    };

    if last_activity_date == Some(today) {
        // Already counted for today.
        return Ok(StreakUpdate {
            current_streak,
            longest_streak,
            is_new_record: false,
            updated: false,
        });
    }

    let new_streak = if last_activity_date == today.pred_opt() {
        current_streak + 1
    } else {
        1
    };

    let new_longest = longest_streak.max(new_streak);
    let is_new_record = new_longest > longest_streak;

    tx.execute(
        "UPDATE profiles SET current_streak = ?2, longest_streak = ?3,
         last_activity_date = ?4, updated_at = ?5 WHERE id = ?1",
        params![
            user_id.to_string(),
            new_streak,
            new_longest,
            today.to_string(),
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;

    tx.commit()?;

    tracing::debug!(%user_id, new_streak, new_longest, "streak updated");

    if let Some(action) = milestone_action(new_streak) {
        award_xp(db, config, user_id, action, 1.0)?;
    }

    Ok(StreakUpdate {
        current_streak: new_streak,
        longest_streak: new_longest,
        is_new_record,
        updated: true,
    })
}

/// Bonus action for a streak landing exactly on a milestone.
fn milestone_action(streak: u32) -> Option<&'static str> {
    match streak {
        7 => Some("streak_milestone_7"),
        30 => Some("streak_milestone_30"),
        100 => Some("streak_milestone_100"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_actions_exact_only() {
        assert_eq!(milestone_action(7), Some("streak_milestone_7"));
        assert_eq!(milestone_action(30), Some("streak_milestone_30"));
        assert_eq!(milestone_action(100), Some("streak_milestone_100"));
        assert_eq!(milestone_action(6), None);
        assert_eq!(milestone_action(8), None);
        assert_eq!(milestone_action(31), None);
        assert_eq!(milestone_action(101), None);
    }
}
