//! Level lookup and XP progress calculations.

use crate::gamification::config::GamificationConfig;
use crate::gamification::types::XpProgress;

/// Level for a given XP total.
///
/// Scans the table from the highest band down and returns the first level
/// whose floor is at or below `xp`. Negative XP and an empty table both
/// resolve to level 1.
pub fn calculate_level(config: &GamificationConfig, xp: i64) -> u32 {
    for info in config.levels.iter().rev() {
        if xp >= info.xp_required {
            return info.level;
        }
    }
    1
}

/// Progress within the current level band, as a clamped percentage.
///
/// At the terminal level there is no next band; the result synthesizes
/// `next_level = current_level + 1` with a zero-width band and reports
/// 100%.
pub fn xp_progress(config: &GamificationConfig, xp: i64) -> XpProgress {
    let current_level = calculate_level(config, xp);

    let (current_info, next_info) = match (
        config.level_info(current_level),
        config.next_level_info(current_level),
    ) {
        (Some(current), Some(next)) => (current, next),
        _ => {
            // Terminal (or unconfigured) level: degenerate zero-width band.
            return XpProgress {
                current_level,
                next_level: current_level + 1,
                current_level_xp: 0,
                next_level_xp: 0,
                xp_in_current_level: 0,
                xp_needed_for_level: 0,
                percentage: 100.0,
            };
        }
    };

    let xp_in_current_level = xp - current_info.xp_required;
    let xp_needed_for_level = next_info.xp_required - current_info.xp_required;
    let percentage =
        ((xp_in_current_level as f64 / xp_needed_for_level as f64) * 100.0).clamp(0.0, 100.0);

    XpProgress {
        current_level,
        next_level: next_info.level,
        current_level_xp: current_info.xp_required,
        next_level_xp: next_info.xp_required,
        xp_in_current_level,
        xp_needed_for_level,
        percentage,
    }
}
