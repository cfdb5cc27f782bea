//! Persistence layer: SQLite database, schema, and migrations.

pub mod database;
pub mod schema;

pub use database::{Database, DatabaseError, Profile};
