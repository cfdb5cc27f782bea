//! Tests for the engine facade: earn flow and notification queue.

use std::sync::Arc;

use chrono::NaiveDate;
use wellrise::{
    Database, GamificationConfig, GamificationEngine, GamificationNotification, Profile,
};

fn setup() -> (Arc<Database>, GamificationEngine) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to create database"));
    let engine = GamificationEngine::new(db.clone(), Arc::new(GamificationConfig::default()));
    (db, engine)
}

#[test]
fn test_earn_flow_emits_xp_then_level_then_badge() {
    let (db, engine) = setup();
    let mut profile = Profile::new("Flow".to_string());
    profile.xp = 90;
    db.insert_profile(&profile).unwrap();
    db.record_checkin(&profile.id, Some("calm")).unwrap();

    // 10 XP checkin pushes 90 to 100, crossing into level 2, and the
    // recorded check-in satisfies the First Steps badge.
    let outcome = engine.earn_xp(&profile.id, "checkin", 1.0).unwrap();

    assert_eq!(outcome.award.new_xp, 100);
    assert!(outcome.award.leveled_up);
    assert_eq!(outcome.new_badges.len(), 1);
    assert_eq!(outcome.new_badges[0].id, "first_checkin");

    assert_eq!(outcome.notifications.len(), 3);
    assert!(matches!(
        outcome.notifications[0],
        GamificationNotification::Xp { amount: 10, .. }
    ));
    assert!(matches!(
        outcome.notifications[1],
        GamificationNotification::LevelUp { level: 2, .. }
    ));
    assert!(matches!(
        outcome.notifications[2],
        GamificationNotification::Badge { ref badge_name, .. } if badge_name == "First Steps"
    ));
}

#[test]
fn test_earn_flow_without_level_up_or_badges() {
    let (db, engine) = setup();
    let profile = Profile::new("Quiet".to_string());
    db.insert_profile(&profile).unwrap();

    let outcome = engine.earn_xp(&profile.id, "habit_completed", 1.0).unwrap();

    assert!(!outcome.award.leveled_up);
    assert!(outcome.new_badges.is_empty());
    assert_eq!(outcome.notifications.len(), 1);
    assert!(matches!(
        outcome.notifications[0],
        GamificationNotification::Xp { amount: 15, .. }
    ));
}

#[test]
fn test_maintain_streak_notifies_on_new_record() {
    let (db, engine) = setup();
    let profile = Profile::new("Daily".to_string());
    db.insert_profile(&profile).unwrap();

    let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
    let outcome = engine.maintain_streak_on(&profile.id, today).unwrap();

    assert_eq!(outcome.streak.current_streak, 1);
    assert!(outcome.streak.is_new_record);
    assert_eq!(outcome.notifications.len(), 1);
    assert!(matches!(
        outcome.notifications[0],
        GamificationNotification::Streak { streak: 1, .. }
    ));

    // Same day again: no update, no notification.
    let repeat = engine.maintain_streak_on(&profile.id, today).unwrap();
    assert!(!repeat.streak.updated);
    assert!(repeat.notifications.is_empty());
}

#[test]
fn test_notifications_serialize_with_type_tags() {
    let notification = GamificationNotification::LevelUp {
        level: 3,
        message: "A new level reached. Onwards!".to_string(),
    };

    let json = serde_json::to_string(&notification).unwrap();
    assert!(json.contains("\"type\":\"level_up\""));
    assert!(json.contains("\"level\":3"));
}

#[test]
fn test_level_getters() {
    let (_db, engine) = setup();

    let info = engine.level_info(1).expect("level 1 must exist");
    assert_eq!(info.xp_required, 0);

    let next = engine.next_level_info(1).expect("level 2 must exist");
    assert_eq!(next.level, 2);

    assert!(engine.next_level_info(10).is_none());

    let progress = engine.xp_progress(175);
    assert_eq!(progress.current_level, 2);
}
