//! Table shaper: fixed-schema, date-ordered tables built from repository
//! records, plus column projection for charting.
//!
//! The shaper never re-sorts. Row order is whatever the repository returned,
//! which is ascending by date.

use serde::Serialize;
use time::Date;

use crate::chart::ChartSeries;
use crate::domain::{serialize_dates, Column, Metric, TickerRecord, SCHEMA};
use crate::TableError;

/// Ordered rows under the schema `[date, open, high, low, close, adj_close, volume]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<TickerRecord>,
}

/// One projected column, in row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnValues {
    #[serde(serialize_with = "serialize_dates")]
    Dates(Vec<Date>),
    Prices(Vec<f64>),
    Volumes(Vec<u64>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Dates(values) => values.len(),
            Self::Prices(values) => values.len(),
            Self::Volumes(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Table {
    fn from_rows(rows: Vec<TickerRecord>) -> Self {
        Self {
            columns: SCHEMA.to_vec(),
            rows,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[TickerRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TickerRecord> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Last row, which is the most recent one.
    pub fn most_recent(&self) -> Option<&TickerRecord> {
        self.rows.last()
    }

    /// Rows with `start <= date <= end`, order preserved.
    pub fn between(&self, start: Date, end: Date) -> Table {
        Self::from_rows(
            self.rows
                .iter()
                .filter(|row| row.date >= start && row.date <= end)
                .copied()
                .collect(),
        )
    }

    /// Project a typed column.
    pub fn project(&self, column: Column) -> ColumnValues {
        let rows = self.rows.iter();
        match column {
            Column::Date => ColumnValues::Dates(rows.map(|row| row.date).collect()),
            Column::Open => ColumnValues::Prices(rows.map(|row| row.open).collect()),
            Column::High => ColumnValues::Prices(rows.map(|row| row.high).collect()),
            Column::Low => ColumnValues::Prices(rows.map(|row| row.low).collect()),
            Column::Close => ColumnValues::Prices(rows.map(|row| row.close).collect()),
            Column::AdjClose => ColumnValues::Prices(rows.map(|row| row.adj_close).collect()),
            Column::Volume => ColumnValues::Volumes(rows.map(|row| row.volume).collect()),
        }
    }

    /// The `(date, metric)` pair for a line chart.
    pub fn metric_series(&self, metric: Metric, label: impl Into<String>) -> ChartSeries {
        let dates = self.rows.iter().map(|row| row.date).collect();
        let values = self.rows.iter().map(|row| metric_value(row, metric)).collect();
        ChartSeries::new(label, metric, dates, values)
    }
}

/// Shape repository records into a table. Never fails; empty input gives a
/// zero-row table with the full schema.
pub fn to_table(records: Vec<TickerRecord>) -> Table {
    Table::from_rows(records)
}

/// Project the column called `name`.
pub fn column(table: &Table, name: &str) -> Result<ColumnValues, TableError> {
    let column = name.parse::<Column>()?;
    Ok(table.project(column))
}

/// Wrap a most-recent lookup so it renders like any other table.
pub fn single_row_table(record: Option<TickerRecord>) -> Table {
    Table::from_rows(record.into_iter().collect())
}

fn metric_value(row: &TickerRecord, metric: Metric) -> f64 {
    match metric {
        Metric::Open => row.open,
        Metric::High => row.high,
        Metric::Low => row.low,
        Metric::Close => row.close,
        Metric::AdjClose => row.adj_close,
        Metric::Volume => row.volume as f64,
    }
}
