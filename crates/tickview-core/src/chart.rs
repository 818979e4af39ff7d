//! Chart payloads handed to a renderer. No drawing happens here.

use serde::Serialize;
use time::Date;

use crate::domain::{serialize_dates, Metric, Symbol};

/// One named line: a metric plotted against date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    label: String,
    metric: Metric,
    #[serde(serialize_with = "serialize_dates")]
    dates: Vec<Date>,
    values: Vec<f64>,
}

impl ChartSeries {
    pub(crate) fn new(
        label: impl Into<String>,
        metric: Metric,
        dates: Vec<Date>,
        values: Vec<f64>,
    ) -> Self {
        Self {
            label: label.into(),
            metric,
            dates,
            values,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// `(date, value)` pairs in date order.
    pub fn points(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

/// A titled line chart made of one or more series over a shared time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub y_label: String,
    pub series: Vec<ChartSeries>,
}

impl Chart {
    pub fn new(title: impl Into<String>, metric: Metric, series: Vec<ChartSeries>) -> Self {
        Self {
            title: title.into(),
            y_label: metric.axis_label().to_owned(),
            series,
        }
    }

    /// "Stock Price Over Time for AAPL", or "... for AAPL vs MSFT".
    pub fn title_for(tickers: &[&Symbol]) -> String {
        let names: Vec<&str> = tickers.iter().map(|ticker| ticker.as_str()).collect();
        format!("Stock Price Over Time for {}", names.join(" vs "))
    }

    /// Sorted, de-duplicated union of every series' dates.
    ///
    /// Series may cover different trading days; a renderer overlays them on
    /// this axis and leaves gaps where a series has no point.
    pub fn time_axis(&self) -> Vec<Date> {
        let mut axis: Vec<Date> = self
            .series
            .iter()
            .flat_map(|series| series.dates.iter().copied())
            .collect();
        axis.sort_unstable();
        axis.dedup();
        axis
    }
}
