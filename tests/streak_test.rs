//! Tests for streak transitions and milestone bonuses.

use std::sync::Arc;

use chrono::NaiveDate;
use wellrise::{Database, GamificationConfig, GamificationEngine, Profile};

fn setup() -> (Arc<Database>, GamificationEngine) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to create database"));
    let engine = GamificationEngine::new(db.clone(), Arc::new(GamificationConfig::default()));
    (db, engine)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
}

fn seed_profile(db: &Database, streak: u32, longest: u32, last: Option<NaiveDate>) -> Profile {
    let mut profile = Profile::new("Streaker".to_string());
    profile.current_streak = streak;
    profile.longest_streak = longest;
    profile.last_activity_date = last;
    db.insert_profile(&profile).expect("Failed to insert");
    profile
}

#[test]
fn test_first_activity_starts_a_streak() {
    let (db, engine) = setup();
    let profile = seed_profile(&db, 0, 0, None);

    let update = engine.update_streak_on(&profile.id, today()).unwrap();

    assert_eq!(update.current_streak, 1);
    assert_eq!(update.longest_streak, 1);
    assert!(update.is_new_record);
    assert!(update.updated);

    let stored = db.get_profile(&profile.id).unwrap().unwrap();
    assert_eq!(stored.last_activity_date, Some(today()));
}

#[test]
fn test_consecutive_day_extends_the_streak() {
    let (db, engine) = setup();
    let yesterday = today().pred_opt().unwrap();
    let profile = seed_profile(&db, 3, 5, Some(yesterday));

    let update = engine.update_streak_on(&profile.id, today()).unwrap();

    assert_eq!(update.current_streak, 4);
    assert_eq!(update.longest_streak, 5);
    assert!(!update.is_new_record);
}

#[test]
fn test_same_day_is_a_no_op() {
    let (db, engine) = setup();
    let profile = seed_profile(&db, 3, 5, Some(today()));

    let update = engine.update_streak_on(&profile.id, today()).unwrap();

    assert_eq!(update.current_streak, 3);
    assert_eq!(update.longest_streak, 5);
    assert!(!update.updated);
    assert!(!update.is_new_record);
}

#[test]
fn test_gap_resets_to_one() {
    let (db, engine) = setup();
    let two_days_ago = today().pred_opt().unwrap().pred_opt().unwrap();
    let profile = seed_profile(&db, 9, 9, Some(two_days_ago));

    let update = engine.update_streak_on(&profile.id, today()).unwrap();

    assert_eq!(update.current_streak, 1);
    assert_eq!(update.longest_streak, 9);
    assert!(!update.is_new_record);
}

#[test]
fn test_new_record_flag() {
    let (db, engine) = setup();
    let yesterday = today().pred_opt().unwrap();
    let profile = seed_profile(&db, 5, 5, Some(yesterday));

    let update = engine.update_streak_on(&profile.id, today()).unwrap();

    assert_eq!(update.current_streak, 6);
    assert_eq!(update.longest_streak, 6);
    assert!(update.is_new_record);
}

#[test]
fn test_milestone_seven_awards_bonus_xp_once() {
    let (db, engine) = setup();
    let yesterday = today().pred_opt().unwrap();
    let profile = seed_profile(&db, 6, 6, Some(yesterday));

    let update = engine.update_streak_on(&profile.id, today()).unwrap();
    assert_eq!(update.current_streak, 7);

    // streak_milestone_7 is configured at 70 XP.
    let stored = db.get_profile(&profile.id).unwrap().unwrap();
    assert_eq!(stored.xp, 70);

    // A repeat call on the same day changes nothing.
    let repeat = engine.update_streak_on(&profile.id, today()).unwrap();
    assert!(!repeat.updated);
    let stored = db.get_profile(&profile.id).unwrap().unwrap();
    assert_eq!(stored.xp, 70);
}

#[test]
fn test_streak_of_eight_fires_no_milestone() {
    let (db, engine) = setup();
    let yesterday = today().pred_opt().unwrap();
    let profile = seed_profile(&db, 7, 7, Some(yesterday));

    let update = engine.update_streak_on(&profile.id, today()).unwrap();
    assert_eq!(update.current_streak, 8);

    let stored = db.get_profile(&profile.id).unwrap().unwrap();
    assert_eq!(stored.xp, 0);
}

#[test]
fn test_longest_streak_never_regresses() {
    let (db, engine) = setup();
    let profile = seed_profile(&db, 0, 0, None);

    let mut day = today();
    let mut max_seen = 0;

    // Ten consecutive days, a three-day gap, then five more days.
    for _ in 0..10 {
        let update = engine.update_streak_on(&profile.id, day).unwrap();
        max_seen = max_seen.max(update.current_streak);
        assert!(update.longest_streak >= max_seen);
        day = day.succ_opt().unwrap();
    }

    day = day.succ_opt().unwrap().succ_opt().unwrap();
    for _ in 0..5 {
        let update = engine.update_streak_on(&profile.id, day).unwrap();
        max_seen = max_seen.max(update.current_streak);
        assert!(update.longest_streak >= max_seen);
        day = day.succ_opt().unwrap();
    }

    let stored = db.get_profile(&profile.id).unwrap().unwrap();
    assert_eq!(stored.longest_streak, 10);
    assert_eq!(stored.current_streak, 5);
}
