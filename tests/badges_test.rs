//! Tests for badge evaluation, awarding, and idempotence.

use std::sync::Arc;

use wellrise::{Database, GamificationConfig, GamificationEngine, Profile, UserProgress};

fn setup() -> (Arc<Database>, GamificationEngine) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to create database"));
    let engine = GamificationEngine::new(db.clone(), Arc::new(GamificationConfig::default()));
    (db, engine)
}

fn seed_profile(db: &Database) -> Profile {
    let profile = Profile::new("Earner".to_string());
    db.insert_profile(&profile).expect("Failed to insert");
    profile
}

#[test]
fn test_streak_badge_awarded_exactly_once() {
    let (db, engine) = setup();
    let profile = seed_profile(&db);

    let progress = UserProgress {
        current_streak: 7,
        longest_streak: 7,
        ..Default::default()
    };

    let first = engine.check_and_award_badges(&profile.id, &progress).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].id, "week_streak");

    let second = engine.check_and_award_badges(&profile.id, &progress).unwrap();
    assert!(second.is_empty());
}

#[test]
fn test_requirement_is_a_threshold_not_equality() {
    let (db, engine) = setup();
    let profile = seed_profile(&db);

    let progress = UserProgress {
        current_streak: 12,
        longest_streak: 12,
        ..Default::default()
    };

    let earned = engine.check_and_award_badges(&profile.id, &progress).unwrap();
    assert_eq!(earned.len(), 1);
    assert_eq!(earned[0].id, "week_streak");
}

#[test]
fn test_simultaneous_matches_award_in_catalog_order() {
    let (db, engine) = setup();
    let profile = seed_profile(&db);

    let progress = UserProgress {
        xp: 1000,
        level: 5,
        ..Default::default()
    };

    let earned = engine.check_and_award_badges(&profile.id, &progress).unwrap();
    let ids: Vec<&str> = earned.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["rising_star", "xp_collector"]);
}

#[test]
fn test_catalog_row_created_lazily() {
    let (db, engine) = setup();
    let profile = seed_profile(&db);

    assert!(db.find_badge_id_by_name("First Steps").unwrap().is_none());

    let progress = UserProgress {
        total_checkins: 1,
        ..Default::default()
    };
    engine.check_and_award_badges(&profile.id, &progress).unwrap();

    let row_id = db.find_badge_id_by_name("First Steps").unwrap();
    assert_eq!(row_id.as_deref(), Some("first_checkin"));
}

#[test]
fn test_existing_catalog_row_is_reused() {
    let (db, engine) = setup();
    let first = seed_profile(&db);
    let second = seed_profile(&db);

    let progress = UserProgress {
        total_checkins: 1,
        ..Default::default()
    };

    engine.check_and_award_badges(&first.id, &progress).unwrap();
    engine.check_and_award_badges(&second.id, &progress).unwrap();

    assert_eq!(db.earned_badge_ids(&first.id).unwrap().len(), 1);
    assert_eq!(db.earned_badge_ids(&second.id).unwrap().len(), 1);
}

#[test]
fn test_earned_badges_listing() {
    let (db, engine) = setup();
    let profile = seed_profile(&db);

    let progress = UserProgress {
        total_checkins: 25,
        ..Default::default()
    };
    let earned = engine.check_and_award_badges(&profile.id, &progress).unwrap();
    assert_eq!(earned.len(), 2); // first_checkin and checkin_collector

    let listed = engine.earned_badges(&profile.id).unwrap();
    assert_eq!(listed.len(), 2);
    for entry in &listed {
        assert!(entry.badge.id == "first_checkin" || entry.badge.id == "checkin_collector");
    }
}

#[test]
fn test_catalog_getters() {
    let (_db, engine) = setup();

    assert!(!engine.all_badges().is_empty());

    let badge = engine.badge_by_id("week_streak").expect("missing badge");
    assert_eq!(badge.name, "Week Warrior");
    assert!(engine.badge_by_id("no_such_badge").is_none());

    assert_eq!(engine.rarity_color(wellrise::BadgeRarity::Legendary), "#FACC15");
}
