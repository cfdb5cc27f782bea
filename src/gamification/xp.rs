//! XP awarding.

use crate::gamification::config::GamificationConfig;
use crate::gamification::levels::calculate_level;
use crate::gamification::types::XpAward;
use crate::gamification::GamificationError;
use crate::storage::Database;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

/// Award XP to a user for a named action.
///
/// The configured XP for the action is scaled by `multiplier` and rounded
/// to the nearest integer; an action missing from the configuration is
/// worth 0 XP. The read-compute-write runs in one transaction so two
/// rapid awards for the same user cannot both read stale XP.
pub(crate) fn award_xp(
    db: &Database,
    config: &GamificationConfig,
    user_id: &Uuid,
    action: &str,
    multiplier: f64,
) -> Result<XpAward, GamificationError> {
    let base_xp = config.xp_for_action(action);
    let xp_awarded = (base_xp as f64 * multiplier).round() as i64;

    let tx = db.connection().unchecked_transaction()?;

    let row: Option<(i64, u32)> = tx
        .query_row(
            "SELECT xp, level FROM profiles WHERE id = ?1",
            params![user_id.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (xp, old_level) = match row {
        Some(values) => values,
        None => return Err(GamificationError::ProfileNotFound(user_id.to_string())),
    };

    let new_xp = xp + xp_awarded;
    let new_level = calculate_level(config, new_xp);
    let leveled_up = new_level > old_level;

    tx.execute(
        "UPDATE profiles SET xp = ?2, level = ?3, updated_at = ?4 WHERE id = ?1",
        params![
            user_id.to_string(),
            new_xp,
            new_level,
            Utc::now().to_rfc3339(),
        ],
    )?;

    tx.commit()?;

    if leveled_up {
        tracing::info!(%user_id, new_level, "user leveled up");
    } else {
        tracing::debug!(%user_id, action, xp_awarded, "XP awarded");
    }

    Ok(XpAward {
        xp_awarded,
        new_xp,
        new_level,
        leveled_up,
    })
}
