//! Core contracts for tickview.
//!
//! This crate contains:
//! - Domain models and validation (`Symbol`, `TickerRecord`, `Column`, `Metric`)
//! - The series repository over the price warehouse
//! - The table shaper and chart payloads
//! - The view selector that assembles single-ticker, comparison and
//!   date-range views
//!
//! ```rust,no_run
//! use tickview_core::{DuckDbSeriesRepository, Metric, Symbol, ViewSelector, Warehouse,
//!     WarehouseConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let warehouse = Warehouse::open(WarehouseConfig::default())?;
//!     let connection = warehouse.connection()?;
//!     let selector = ViewSelector::new(&connection, DuckDbSeriesRepository);
//!     let view = selector.single_ticker(&Symbol::parse("AAPL")?, Metric::Close)?;
//!     println!("{} rows", view.history.len());
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod description;
pub mod domain;
pub mod error;
pub mod repository;
pub mod selector;
pub mod table;

pub use chart::{Chart, ChartSeries};
pub use description::{DescriptionLookup, StaticDescriptions};
pub use domain::{
    format_iso_date, parse_iso_date, Column, Metric, Symbol, TickerRecord, SCHEMA,
};
pub use error::{DescriptionError, RepositoryError, TableError, ValidationError, ViewError};
pub use repository::{DuckDbSeriesRepository, SeriesRepository};
pub use selector::{
    ComparisonView, DateRangeView, SingleTickerView, ViewPayload, ViewRequest, ViewSelector,
};
pub use table::{column, single_row_table, to_table, ColumnValues, Table};
pub use tickview_warehouse::{
    AccessMode, PooledConnection, Warehouse, WarehouseConfig, WarehouseError,
};
