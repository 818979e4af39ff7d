use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TableError;

/// A column of the fixed price schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Date,
    Open,
    High,
    Low,
    Close,
    AdjClose,
    Volume,
}

/// Schema of every [`Table`](crate::Table), in display order.
pub const SCHEMA: [Column; 7] = [
    Column::Date,
    Column::Open,
    Column::High,
    Column::Low,
    Column::Close,
    Column::AdjClose,
    Column::Volume,
];

impl Column {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::AdjClose => "adj_close",
            Self::Volume => "volume",
        }
    }

    /// The chartable metric behind this column, if any.
    pub const fn metric(self) -> Option<Metric> {
        match self {
            Self::Date => None,
            Self::Open => Some(Metric::Open),
            Self::High => Some(Metric::High),
            Self::Low => Some(Metric::Low),
            Self::Close => Some(Metric::Close),
            Self::AdjClose => Some(Metric::AdjClose),
            Self::Volume => Some(Metric::Volume),
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = TableError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "date" => Ok(Self::Date),
            "open" => Ok(Self::Open),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "close" => Ok(Self::Close),
            "adj_close" | "adj close" | "adjclose" => Ok(Self::AdjClose),
            "volume" => Ok(Self::Volume),
            _ => Err(TableError::UnknownColumn(value.to_owned())),
        }
    }
}

/// One of the six numeric columns that can be charted against date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Open,
    High,
    Low,
    Close,
    AdjClose,
    Volume,
}

impl Metric {
    pub const fn column(self) -> Column {
        match self {
            Self::Open => Column::Open,
            Self::High => Column::High,
            Self::Low => Column::Low,
            Self::Close => Column::Close,
            Self::AdjClose => Column::AdjClose,
            Self::Volume => Column::Volume,
        }
    }

    /// Axis label for charts of this metric.
    pub const fn axis_label(self) -> &'static str {
        match self {
            Self::Open => "Opening Price",
            Self::High => "High Price",
            Self::Low => "Low Price",
            Self::Close => "Closing Price",
            Self::AdjClose => "Adjusted Closing Price",
            Self::Volume => "Volume",
        }
    }

    pub const fn as_str(self) -> &'static str {
        self.column().as_str()
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = TableError;

    /// Accepts any schema column name except `date`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .parse::<Column>()?
            .metric()
            .ok_or_else(|| TableError::UnknownColumn(value.to_owned()))
    }
}
