//! # Domain Models
//!
//! Typed building blocks shared by the repository, the table shaper and the
//! view selector.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`TickerRecord`] | One OHLCV row for one trading day |
//! | [`Column`] | A column of the fixed price schema |
//! | [`Metric`] | A chartable numeric column |

mod column;
mod record;
mod symbol;

pub use column::{Column, Metric, SCHEMA};
pub use record::{format_iso_date, parse_iso_date, TickerRecord};
pub(crate) use record::{serialize_date, serialize_dates};
pub use symbol::Symbol;
