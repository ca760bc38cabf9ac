//! # regio-db
//!
//! libSQL-backed [`RegionStore`](regio_core::RegionStore) for regio.
//!
//! Holds the three region tables in a local database file (or `:memory:`).
//! Parent links are enforced with foreign keys and each level carries a
//! uniqueness constraint, so a repeated fetch for the same parent cannot
//! double-insert.

pub mod error;
mod migrations;
mod repos;
mod store;

use std::path::Path;

use error::DatabaseError;
use libsql::Builder;
use regio_config::StoreConfig;
use tokio::sync::RwLock;

/// Handle to the local region database.
///
/// All access shares one connection, so an open batch transaction is visible
/// to anything else on it. `access` keeps reads out while a write holds it:
/// readers only ever see committed levels.
pub struct RegionDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    access: RwLock<()>,
}

impl RegionDb {
    /// Open a local database at the given path (`:memory:` for in-memory).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let region_db = Self {
            db,
            conn,
            access: RwLock::new(()),
        };
        region_db.run_migrations().await?;
        tracing::debug!(path, "region database opened");
        Ok(region_db)
    }

    /// Open the database described by `config`, creating its parent
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the path cannot be resolved or created, or
    /// if [`Self::open_local`] fails.
    pub async fn open(config: &StoreConfig) -> Result<Self, DatabaseError> {
        if config.is_in_memory() {
            return Self::open_local(regio_config::IN_MEMORY).await;
        }

        let path = config
            .resolved_path()
            .map_err(|e| DatabaseError::Query(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::open_local(&path_str(&path)?).await
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

fn path_str(path: &Path) -> Result<String, DatabaseError> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| DatabaseError::Query(format!("non UTF-8 path: {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> RegionDb {
        RegionDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        for table in ["provinces", "cities", "counties"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn foreign_keys_are_enabled() {
        let db = test_db().await;
        let mut rows = db.conn().query("PRAGMA foreign_keys", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn open_from_config_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("regions.db");
        let config = StoreConfig {
            path: path.to_string_lossy().into_owned(),
        };

        RegionDb::open(&config).await.unwrap();
        assert!(path.exists());
    }
}
