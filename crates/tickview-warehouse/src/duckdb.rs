//! `DuckDB` connection management.
//!
//! A single database instance is opened lazily per manager; every connection
//! handed out afterwards is a `try_clone` of that instance, so all callers see
//! the same catalog without reopening the file.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use ::duckdb::{Config, Connection};

/// Access mode the database instance is opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Reads only; the database file must already exist.
    ReadOnly,
    /// Reads and writes; the file is created when missing.
    ReadWrite,
}

impl AccessMode {
    fn to_duckdb(self) -> ::duckdb::AccessMode {
        match self {
            Self::ReadOnly => ::duckdb::AccessMode::ReadOnly,
            Self::ReadWrite => ::duckdb::AccessMode::ReadWrite,
        }
    }
}

struct ManagerState {
    root: Option<Connection>,
    idle: Vec<Connection>,
}

struct ManagerInner {
    db_path: PathBuf,
    mode: AccessMode,
    max_idle: usize,
    state: Mutex<ManagerState>,
}

impl ManagerInner {
    fn lock(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hands out connections to one `DuckDB` database file.
#[derive(Clone)]
pub struct DuckDbConnectionManager {
    inner: Arc<ManagerInner>,
}

impl DuckDbConnectionManager {
    /// Create a manager for the database at `path`.
    ///
    /// Nothing is opened until the first [`acquire`](Self::acquire).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, mode: AccessMode, max_idle: usize) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                db_path: path.into(),
                mode,
                max_idle: max_idle.max(1),
                state: Mutex::new(ManagerState {
                    root: None,
                    idle: Vec::new(),
                }),
            }),
        }
    }

    /// Acquire a connection, reusing an idle one when available.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the connection
    /// cannot be cloned from the open instance.
    pub fn acquire(&self) -> Result<PooledConnection, ::duckdb::Error> {
        let mut state = self.inner.lock();
        let connection = match state.idle.pop() {
            Some(connection) => connection,
            None => match state.root.as_ref() {
                Some(root) => root.try_clone()?,
                None => {
                    let root = open_database(self.inner.db_path.as_path(), self.inner.mode)?;
                    let connection = root.try_clone()?;
                    state.root = Some(root);
                    connection
                }
            },
        };
        drop(state);

        Ok(PooledConnection {
            pool: Arc::clone(&self.inner),
            connection: Some(connection),
        })
    }

    /// Path of the managed database file.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        self.inner.db_path.as_path()
    }
}

/// A connection that returns to its manager's idle list when dropped.
pub struct PooledConnection {
    pool: Arc<ManagerInner>,
    connection: Option<Connection>,
}

impl Deref for PooledConnection {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        self.connection
            .as_ref()
            .expect("pooled connection unexpectedly missing")
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };

        let mut state = self.pool.lock();
        if state.idle.len() < self.pool.max_idle {
            state.idle.push(connection);
        }
    }
}

fn open_database(path: &Path, mode: AccessMode) -> Result<Connection, ::duckdb::Error> {
    log::debug!("opening duckdb database {} ({mode:?})", path.display());
    let config = Config::default().access_mode(mode.to_duckdb())?;
    let connection = Connection::open_with_flags(path, config)?;
    connection.execute_batch("PRAGMA disable_progress_bar;")?;
    Ok(connection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn connections_share_one_database_instance() {
        let temp = tempdir().expect("tempdir");
        let manager =
            DuckDbConnectionManager::new(temp.path().join("shared.duckdb"), AccessMode::ReadWrite, 2);

        let writer = manager.acquire().expect("writer");
        writer
            .execute_batch("CREATE TABLE t (v INTEGER); INSERT INTO t VALUES (7);")
            .expect("seed");

        let reader = manager.acquire().expect("reader");
        let value: i32 = reader
            .query_row("SELECT v FROM t", [], |row| row.get(0))
            .expect("read back");
        assert_eq!(value, 7);
    }

    #[test]
    fn dropped_connections_are_reused_up_to_the_idle_limit() {
        let temp = tempdir().expect("tempdir");
        let manager =
            DuckDbConnectionManager::new(temp.path().join("idle.duckdb"), AccessMode::ReadWrite, 1);

        let first = manager.acquire().expect("first");
        let second = manager.acquire().expect("second");
        drop(first);
        drop(second);

        assert_eq!(manager.inner.lock().idle.len(), 1);
    }

    #[test]
    fn read_only_mode_rejects_missing_file() {
        let temp = tempdir().expect("tempdir");
        let manager =
            DuckDbConnectionManager::new(temp.path().join("absent.duckdb"), AccessMode::ReadOnly, 1);

        assert!(manager.acquire().is_err());
    }
}
