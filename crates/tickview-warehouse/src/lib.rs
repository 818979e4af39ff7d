//! # Tickview Warehouse
//!
//! DuckDB-backed storage for daily ticker prices.
//!
//! ## Overview
//!
//! This crate owns the connection lifecycle of the price store: it resolves
//! where the database lives, opens it in the requested access mode, applies
//! schema migrations and hands out connections. It issues no data queries of
//! its own; the series repository in `tickview-core` borrows a connection
//! from here for every read.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tickview_warehouse::{Warehouse, WarehouseConfig};
//!
//! fn main() -> Result<(), tickview_warehouse::WarehouseError> {
//!     let warehouse = Warehouse::open(WarehouseConfig::default())?;
//!     let connection = warehouse.connection()?;
//!     let count: i64 = connection.query_row("SELECT COUNT(*) FROM daily_prices", [], |row| row.get(0))?;
//!     println!("{count} rows");
//!     Ok(())
//! }
//! ```
//!
//! ## Tables
//!
//! | Table | Description |
//! |-------|-------------|
//! | `daily_prices` | One OHLCV row per `(ticker, date)` |
//! | `schema_migrations` | Applied migration versions |

pub mod duckdb;
pub mod migrations;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use self::duckdb::{AccessMode, DuckDbConnectionManager, PooledConnection};

/// Name of the table holding daily prices.
pub const PRICES_TABLE: &str = "daily_prices";

/// Errors that can occur while opening or preparing the warehouse.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// `DuckDB` database error.
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    /// I/O error (creating the database directory).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Configuration for the warehouse database.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    /// Root directory for tickview data.
    pub tickview_home: PathBuf,
    /// Path to the `DuckDB` database file.
    pub db_path: PathBuf,
    /// How the database file is opened.
    pub access_mode: AccessMode,
    /// Maximum number of idle connections kept for reuse.
    pub max_pool_size: usize,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        let tickview_home = resolve_tickview_home();
        let db_path = env::var_os("TICKVIEW_DB")
            .map(PathBuf::from)
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| tickview_home.join("warehouse.duckdb"));
        Self {
            tickview_home,
            db_path,
            access_mode: AccessMode::ReadWrite,
            max_pool_size: 4,
        }
    }
}

impl WarehouseConfig {
    /// Use `db_path` instead of the resolved default.
    #[must_use]
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }

    /// Open the database with `access_mode`.
    #[must_use]
    pub fn with_access_mode(mut self, access_mode: AccessMode) -> Self {
        self.access_mode = access_mode;
        self
    }
}

/// Handle to an opened price warehouse.
#[derive(Clone)]
pub struct Warehouse {
    config: WarehouseConfig,
    manager: DuckDbConnectionManager,
}

impl Warehouse {
    /// Open a warehouse with the specified configuration.
    ///
    /// In read-write mode the parent directory is created and migrations are
    /// applied; in read-only mode the file must already carry the schema.
    pub fn open(config: WarehouseConfig) -> Result<Self, WarehouseError> {
        if config.access_mode == AccessMode::ReadWrite {
            if let Some(parent) = config.db_path.parent() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = DuckDbConnectionManager::new(
            config.db_path.clone(),
            config.access_mode,
            config.max_pool_size,
        );
        let warehouse = Self { config, manager };
        if warehouse.config.access_mode == AccessMode::ReadWrite {
            warehouse.initialize()?;
        }
        log::debug!("warehouse ready at {}", warehouse.db_path().display());
        Ok(warehouse)
    }

    /// Apply schema migrations.
    pub fn initialize(&self) -> Result<(), WarehouseError> {
        let connection = self.manager.acquire()?;
        migrations::apply_migrations(&connection)?;
        Ok(())
    }

    /// Borrow a connection for issuing statements.
    pub fn connection(&self) -> Result<PooledConnection, WarehouseError> {
        Ok(self.manager.acquire()?)
    }

    /// Get the path to the database file.
    pub fn db_path(&self) -> &Path {
        self.manager.db_path()
    }

    /// Configuration the warehouse was opened with.
    pub fn config(&self) -> &WarehouseConfig {
        &self.config
    }
}

/// Resolve the tickview home directory from environment or default.
fn resolve_tickview_home() -> PathBuf {
    if let Some(path) = env::var_os("TICKVIEW_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".tickview");
    }

    PathBuf::from(".tickview")
}
