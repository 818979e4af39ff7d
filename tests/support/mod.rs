//! Shared fixtures for the behaviour tests.

#![allow(dead_code)]

use std::cell::Cell;

use duckdb::Connection;
use tempfile::TempDir;
use tickview_core::{
    DuckDbSeriesRepository, RepositoryError, SeriesRepository, Symbol, TickerRecord, Warehouse,
    WarehouseConfig,
};
use time::Date;

pub const AAA_ROWS: &str = "
    ('AAA', DATE '2024-01-02', 10, 11, 9, 10.5, 10.5, 100),
    ('AAA', DATE '2024-01-03', 10.5, 12, 10, 11, 11, 150),
    ('AAA', DATE '2024-01-04', 11, 12.5, 10.5, 12, 12, 175)";

/// An on-disk warehouse in a temporary directory.
pub fn temp_warehouse() -> (TempDir, Warehouse) {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = WarehouseConfig::default()
        .with_db_path(temp.path().join("warehouse.duckdb"));
    let warehouse = Warehouse::open(config).expect("warehouse open");
    (temp, warehouse)
}

/// Insert `values` (a SQL VALUES list) into `daily_prices`.
pub fn seed(connection: &Connection, values: &str) {
    connection
        .execute_batch(&format!("INSERT INTO daily_prices VALUES {values};"))
        .expect("seed rows");
}

pub fn symbol(value: &str) -> Symbol {
    Symbol::parse(value).expect("valid symbol")
}

/// Counts every repository call before delegating to the DuckDB repository.
#[derive(Default)]
pub struct SpyRepository {
    inner: DuckDbSeriesRepository,
    calls: Cell<usize>,
}

impl SpyRepository {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn record_call(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl SeriesRepository for SpyRepository {
    fn fetch_full_history(
        &self,
        connection: &Connection,
        ticker: &Symbol,
    ) -> Result<Vec<TickerRecord>, RepositoryError> {
        self.record_call();
        self.inner.fetch_full_history(connection, ticker)
    }

    fn fetch_most_recent(
        &self,
        connection: &Connection,
        ticker: &Symbol,
    ) -> Result<Option<TickerRecord>, RepositoryError> {
        self.record_call();
        self.inner.fetch_most_recent(connection, ticker)
    }

    fn fetch_range(
        &self,
        connection: &Connection,
        ticker: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<Vec<TickerRecord>, RepositoryError> {
        self.record_call();
        self.inner.fetch_range(connection, ticker, start, end)
    }

    fn list_tickers(&self, connection: &Connection) -> Result<Vec<Symbol>, RepositoryError> {
        self.record_call();
        self.inner.list_tickers(connection)
    }
}
