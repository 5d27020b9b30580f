//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and connection
//! configuration for the wager and history SQLite databases.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Embedded migrations for the wager database (teams, events, bets).
pub const BETS_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/bets");

/// Embedded migrations for the history database (matches, maps, statistics).
pub const HISTORY_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/history");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Sets the busy timeout on every pooled connection.
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        diesel::sql_query("PRAGMA busy_timeout=5000")
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// An in-memory database is private to its connection, so `:memory:` pools
/// hold a single connection.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    let max_size = if database_url == ":memory:" { 1 } else { 5 };
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run pending wager database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_bets_migrations(pool: &DbPool) -> Result<()> {
    run_migrations(pool, BETS_MIGRATIONS)
}

/// Run pending history database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_history_migrations(pool: &DbPool) -> Result<()> {
    run_migrations(pool, HISTORY_MIGRATIONS)
}

fn run_migrations(pool: &DbPool, migrations: EmbeddedMigrations) -> Result<()> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(migrations)
        .map_err(|e| Error::Connection(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    fn tables(pool: &DbPool) -> Vec<String> {
        let mut conn = pool.get().unwrap();
        diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect()
    }

    #[test]
    fn create_pool_with_memory_db() {
        let pool = create_pool(":memory:").unwrap();
        assert!(pool.get().is_ok());
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn bets_migrations_create_tables() {
        let pool = create_pool(":memory:").unwrap();
        run_bets_migrations(&pool).unwrap();

        assert_eq!(tables(&pool), vec!["bets", "events", "teams"]);
    }

    #[test]
    fn history_migrations_create_tables() {
        let pool = create_pool(":memory:").unwrap();
        run_history_migrations(&pool).unwrap();

        assert_eq!(tables(&pool), vec!["game_maps", "map_statistics", "matches"]);
    }

    #[test]
    fn migrations_are_idempotent() {
        let pool = create_pool(":memory:").unwrap();
        run_bets_migrations(&pool).unwrap();
        run_bets_migrations(&pool).unwrap();

        assert_eq!(tables(&pool).len(), 3);
    }

    #[test]
    fn file_pool_shares_schema_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("bets.db").display().to_string();
        let pool = create_pool(&url).unwrap();
        run_bets_migrations(&pool).unwrap();

        let first = pool.get().unwrap();
        let second_tables = tables(&pool);
        drop(first);
        assert!(second_tables.contains(&"bets".to_string()));
    }
}
