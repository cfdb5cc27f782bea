//! Database operations using rusqlite.
//!
//! Owns the schema, migrations, and the row-level CRUD that the
//! gamification engine builds on: profiles, activity records, the badge
//! catalog, and the earned-badge ledger.

use crate::gamification::types::{BadgeDefinition, BadgeRarity, BadgeRequirement, EarnedBadge, RequirementType};
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// A user's profile row.
///
/// The gamification engine owns the xp/level/streak fields; display
/// identity belongs to the account feature.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub display_name: String,
    /// Total accumulated XP
    pub xp: i64,
    /// Current level, derived from XP
    pub level: u32,
    /// Consecutive active days ending at the last activity date
    pub current_streak: u32,
    /// Longest streak ever recorded
    pub longest_streak: u32,
    /// Calendar day of the most recent qualifying activity
    pub last_activity_date: Option<NaiveDate>,
    /// Profile creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a fresh profile with zeroed progress.
    pub fn new(display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_name,
            xp: 0,
            level: 1,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &PathBuf) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        // Future migrations would go here:
        // if from_version < 2 { ... }

        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ========== Profile CRUD ==========

    /// Insert a new profile.
    pub fn insert_profile(&self, profile: &Profile) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO profiles (id, display_name, xp, level, current_streak,
                 longest_streak, last_activity_date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    profile.id.to_string(),
                    profile.display_name,
                    profile.xp,
                    profile.level,
                    profile.current_streak,
                    profile.longest_streak,
                    profile.last_activity_date.map(|d| d.to_string()),
                    profile.created_at.to_rfc3339(),
                    profile.updated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Get a profile by ID.
    pub fn get_profile(&self, id: &Uuid) -> Result<Option<Profile>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, display_name, xp, level, current_streak, longest_streak,
                 last_activity_date, created_at, updated_at FROM profiles WHERE id = ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let result = stmt.query_row(params![id.to_string()], |row| {
            Ok(ProfileRow {
                id: row.get(0)?,
                display_name: row.get(1)?,
                xp: row.get(2)?,
                level: row.get(3)?,
                current_streak: row.get(4)?,
                longest_streak: row.get(5)?,
                last_activity_date: row.get(6)?,
                created_at: row.get(7)?,
                updated_at: row.get(8)?,
            })
        });

        match result {
            Ok(row) => Ok(Some(row.into_profile()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    // ========== Activity records ==========

    /// Record a daily mood check-in.
    pub fn record_checkin(&self, user_id: &Uuid, mood: Option<&str>) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO checkins (user_id, mood, logged_at) VALUES (?1, ?2, ?3)",
                params![user_id.to_string(), mood, Utc::now().to_rfc3339()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Record a habit completion.
    pub fn record_habit_completion(&self, user_id: &Uuid, habit: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO habit_completions (user_id, habit, completed_at) VALUES (?1, ?2, ?3)",
                params![user_id.to_string(), habit, Utc::now().to_rfc3339()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Create a new active goal, returning its ID.
    pub fn insert_goal(&self, user_id: &Uuid, title: &str) -> Result<Uuid, DatabaseError> {
        let id = Uuid::new_v4();
        self.conn
            .execute(
                "INSERT INTO goals (id, user_id, title, status, created_at)
                 VALUES (?1, ?2, ?3, 'active', ?4)",
                params![id.to_string(), user_id.to_string(), title, Utc::now().to_rfc3339()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(id)
    }

    /// Mark a goal as completed.
    pub fn complete_goal(&self, goal_id: &Uuid) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE goals SET status = 'completed', completed_at = ?2 WHERE id = ?1",
                params![goal_id.to_string(), Utc::now().to_rfc3339()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Goal {}", goal_id)));
        }

        Ok(())
    }

    /// Record progress on a guided exercise.
    pub fn record_exercise_progress(
        &self,
        user_id: &Uuid,
        exercise: &str,
        completed: bool,
    ) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO exercise_progress (user_id, exercise, completed, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    user_id.to_string(),
                    exercise,
                    completed as i32,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    // ========== Progress counters ==========

    /// Count a user's check-ins.
    pub fn count_checkins(&self, user_id: &Uuid) -> Result<i64, DatabaseError> {
        self.count_for_user("SELECT COUNT(*) FROM checkins WHERE user_id = ?1", user_id)
    }

    /// Count a user's habit completions.
    pub fn count_habit_completions(&self, user_id: &Uuid) -> Result<i64, DatabaseError> {
        self.count_for_user(
            "SELECT COUNT(*) FROM habit_completions WHERE user_id = ?1",
            user_id,
        )
    }

    /// Count a user's completed goals.
    pub fn count_completed_goals(&self, user_id: &Uuid) -> Result<i64, DatabaseError> {
        self.count_for_user(
            "SELECT COUNT(*) FROM goals WHERE user_id = ?1 AND status = 'completed'",
            user_id,
        )
    }

    /// Count a user's completed exercises.
    pub fn count_completed_exercises(&self, user_id: &Uuid) -> Result<i64, DatabaseError> {
        self.count_for_user(
            "SELECT COUNT(*) FROM exercise_progress WHERE user_id = ?1 AND completed = 1",
            user_id,
        )
    }

    fn count_for_user(&self, sql: &str, user_id: &Uuid) -> Result<i64, DatabaseError> {
        self.conn
            .query_row(sql, params![user_id.to_string()], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    // ========== Badge catalog and ledger ==========

    /// Find a badge catalog row by display name.
    pub fn find_badge_id_by_name(&self, name: &str) -> Result<Option<String>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT id FROM badges WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Insert a badge catalog row from its definition.
    pub fn insert_badge(&self, badge: &BadgeDefinition) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO badges (id, name, description, icon, rarity,
                 requirement_type, requirement_value, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    badge.id,
                    badge.name,
                    badge.description,
                    badge.icon,
                    badge.rarity.as_str(),
                    badge.requirement.requirement_type.as_str(),
                    badge.requirement.value,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// IDs of all badges a user has earned.
    pub fn earned_badge_ids(&self, user_id: &Uuid) -> Result<Vec<String>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT badge_id FROM user_badges WHERE user_id = ?1")
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id.to_string()], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?);
        }

        Ok(ids)
    }

    /// Insert an earned-badge ledger row.
    pub fn insert_user_badge(
        &self,
        user_id: &Uuid,
        badge_id: &str,
        earned_at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO user_badges (id, user_id, badge_id, earned_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    Uuid::new_v4().to_string(),
                    user_id.to_string(),
                    badge_id,
                    earned_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Badges earned by a user, most recent first.
    pub fn earned_badges(&self, user_id: &Uuid) -> Result<Vec<EarnedBadge>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT b.id, b.name, b.description, b.icon, b.rarity,
                 b.requirement_type, b.requirement_value, ub.earned_at
                 FROM badges b
                 JOIN user_badges ub ON b.id = ub.badge_id
                 WHERE ub.user_id = ?1
                 ORDER BY ub.earned_at DESC",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id.to_string()], |row| {
                Ok(BadgeLedgerRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    icon: row.get(3)?,
                    rarity: row.get(4)?,
                    requirement_type: row.get(5)?,
                    requirement_value: row.get(6)?,
                    earned_at: row.get(7)?,
                })
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut earned = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            earned.push(row.into_earned_badge()?);
        }

        Ok(earned)
    }
}

/// Intermediate struct for reading profile rows from the database.
struct ProfileRow {
    id: String,
    display_name: String,
    xp: i64,
    level: u32,
    current_streak: u32,
    longest_streak: u32,
    last_activity_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ProfileRow {
    fn into_profile(self) -> Result<Profile, DatabaseError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| DatabaseError::DeserializationError(format!("Invalid UUID: {}", e)))?;

        let last_activity_date = self
            .last_activity_date
            .map(|s| s.parse::<NaiveDate>())
            .transpose()
            .map_err(|e| {
                DatabaseError::DeserializationError(format!("Invalid activity date: {}", e))
            })?;

        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                DatabaseError::DeserializationError(format!("Invalid created date: {}", e))
            })?;

        let updated_at = DateTime::parse_from_rfc3339(&self.updated_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                DatabaseError::DeserializationError(format!("Invalid updated date: {}", e))
            })?;

        Ok(Profile {
            id,
            display_name: self.display_name,
            xp: self.xp,
            level: self.level,
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_activity_date,
            created_at,
            updated_at,
        })
    }
}

/// Intermediate struct for reading joined badge ledger rows.
struct BadgeLedgerRow {
    id: String,
    name: String,
    description: String,
    icon: String,
    rarity: String,
    requirement_type: String,
    requirement_value: i64,
    earned_at: String,
}

impl BadgeLedgerRow {
    fn into_earned_badge(self) -> Result<EarnedBadge, DatabaseError> {
        let rarity = BadgeRarity::from_str(&self.rarity).ok_or_else(|| {
            DatabaseError::DeserializationError(format!("Unknown rarity: {}", self.rarity))
        })?;

        let requirement_type = RequirementType::from_str(&self.requirement_type).ok_or_else(|| {
            DatabaseError::DeserializationError(format!(
                "Unknown requirement type: {}",
                self.requirement_type
            ))
        })?;

        let earned_at = DateTime::parse_from_rfc3339(&self.earned_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                DatabaseError::DeserializationError(format!("Invalid earned date: {}", e))
            })?;

        Ok(EarnedBadge {
            badge: BadgeDefinition {
                id: self.id,
                name: self.name,
                description: self.description,
                icon: self.icon,
                // Catalog rows carry no color; the UI derives it from rarity.
                color: String::new(),
                rarity,
                requirement: BadgeRequirement {
                    requirement_type,
                    value: self.requirement_value,
                },
            },
            earned_at,
        })
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}
