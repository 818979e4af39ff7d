//! View selector: per-mode orchestration of repository reads and table
//! shaping.
//!
//! | Mode | Inputs | Fails with |
//! |------|--------|------------|
//! | single ticker | ticker, metric | `NoData` |
//! | comparison | two tickers, metric | `NoData` naming the empty side |
//! | date range | ticker, start, end, metric | `InvalidRange`, `NoData` |
//!
//! Every call is independent. Nothing is cached between calls.

use ::duckdb::Connection;
use serde::Serialize;
use time::Date;

use crate::chart::Chart;
use crate::description::DescriptionLookup;
use crate::domain::{serialize_date, Metric, Symbol};
use crate::repository::SeriesRepository;
use crate::table::{single_row_table, to_table, Table};
use crate::ViewError;

/// A view request as received from a UI shell. The metric is still text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRequest {
    SingleTicker {
        ticker: Symbol,
        metric: String,
    },
    Comparison {
        ticker_a: Symbol,
        ticker_b: Symbol,
        metric: String,
    },
    DateRange {
        ticker: Symbol,
        start: Date,
        end: Date,
        metric: String,
    },
}

impl ViewRequest {
    pub fn metric(&self) -> &str {
        match self {
            Self::SingleTicker { metric, .. }
            | Self::Comparison { metric, .. }
            | Self::DateRange { metric, .. } => metric,
        }
    }
}

/// Assembled payload for one mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewPayload {
    SingleTicker(SingleTickerView),
    Comparison(ComparisonView),
    DateRange(DateRangeView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleTickerView {
    pub ticker: Symbol,
    pub metric: Metric,
    pub most_recent: Table,
    pub history: Table,
    pub chart: Chart,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub ticker_a: Symbol,
    pub ticker_b: Symbol,
    pub metric: Metric,
    pub history_a: Table,
    pub history_b: Table,
    /// Two series, `ticker_a` first, over [`Chart::time_axis`].
    pub chart: Chart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeView {
    pub ticker: Symbol,
    pub metric: Metric,
    #[serde(serialize_with = "serialize_date")]
    pub start: Date,
    #[serde(serialize_with = "serialize_date")]
    pub end: Date,
    pub table: Table,
    pub chart: Chart,
}

/// Drives a [`SeriesRepository`] over one borrowed connection.
pub struct ViewSelector<'a, R> {
    connection: &'a Connection,
    repository: R,
    descriptions: Option<&'a dyn DescriptionLookup>,
}

impl<'a, R: SeriesRepository> ViewSelector<'a, R> {
    pub fn new(connection: &'a Connection, repository: R) -> Self {
        Self {
            connection,
            repository,
            descriptions: None,
        }
    }

    pub fn with_descriptions(mut self, descriptions: &'a dyn DescriptionLookup) -> Self {
        self.descriptions = Some(descriptions);
        self
    }

    /// Distinct tickers, sorted for selection lists.
    pub fn catalog(&self) -> Result<Vec<Symbol>, ViewError> {
        let mut tickers = self.repository.list_tickers(self.connection)?;
        tickers.sort();
        tickers.dedup();
        Ok(tickers)
    }

    /// Dispatch a request to its mode. The metric is parsed before any query.
    pub fn select(&self, request: &ViewRequest) -> Result<ViewPayload, ViewError> {
        let metric = request.metric().parse::<Metric>()?;
        match request {
            ViewRequest::SingleTicker { ticker, .. } => {
                self.single_ticker(ticker, metric).map(ViewPayload::SingleTicker)
            }
            ViewRequest::Comparison {
                ticker_a, ticker_b, ..
            } => self
                .comparison(ticker_a, ticker_b, metric)
                .map(ViewPayload::Comparison),
            ViewRequest::DateRange {
                ticker, start, end, ..
            } => self
                .date_range(ticker, *start, *end, metric)
                .map(ViewPayload::DateRange),
        }
    }

    pub fn single_ticker(
        &self,
        ticker: &Symbol,
        metric: Metric,
    ) -> Result<SingleTickerView, ViewError> {
        let most_recent = self.repository.fetch_most_recent(self.connection, ticker)?;
        let history = to_table(self.repository.fetch_full_history(self.connection, ticker)?);
        if history.is_empty() {
            log::info!("single-ticker view for {ticker}: no data");
            return Err(ViewError::NoData(ticker.clone()));
        }

        let chart = Chart::new(
            Chart::title_for(&[ticker]),
            metric,
            vec![history.metric_series(metric, ticker.as_str())],
        );
        let description = self.describe(ticker);
        log::info!(
            "single-ticker view for {ticker}: {} rows, metric {metric}",
            history.len()
        );

        Ok(SingleTickerView {
            ticker: ticker.clone(),
            metric,
            most_recent: single_row_table(most_recent),
            history,
            chart,
            description,
        })
    }

    /// Both sides are fetched even when `ticker_a == ticker_b`.
    pub fn comparison(
        &self,
        ticker_a: &Symbol,
        ticker_b: &Symbol,
        metric: Metric,
    ) -> Result<ComparisonView, ViewError> {
        let history_a = self.non_empty_history(ticker_a)?;
        let history_b = self.non_empty_history(ticker_b)?;

        let chart = Chart::new(
            Chart::title_for(&[ticker_a, ticker_b]),
            metric,
            vec![
                history_a.metric_series(metric, ticker_a.as_str()),
                history_b.metric_series(metric, ticker_b.as_str()),
            ],
        );
        log::info!(
            "comparison view {ticker_a} vs {ticker_b}: {} and {} rows, metric {metric}",
            history_a.len(),
            history_b.len()
        );

        Ok(ComparisonView {
            ticker_a: ticker_a.clone(),
            ticker_b: ticker_b.clone(),
            metric,
            history_a,
            history_b,
            chart,
        })
    }

    pub fn date_range(
        &self,
        ticker: &Symbol,
        start: Date,
        end: Date,
        metric: Metric,
    ) -> Result<DateRangeView, ViewError> {
        if start > end {
            return Err(ViewError::InvalidRange { start, end });
        }

        let table = to_table(
            self.repository
                .fetch_range(self.connection, ticker, start, end)?,
        );
        if table.is_empty() {
            log::info!("date-range view for {ticker} {start}..={end}: no data");
            return Err(ViewError::NoData(ticker.clone()));
        }

        let chart = Chart::new(
            Chart::title_for(&[ticker]),
            metric,
            vec![table.metric_series(metric, ticker.as_str())],
        );
        log::info!(
            "date-range view for {ticker} {start}..={end}: {} rows, metric {metric}",
            table.len()
        );

        Ok(DateRangeView {
            ticker: ticker.clone(),
            metric,
            start,
            end,
            table,
            chart,
        })
    }

    fn non_empty_history(&self, ticker: &Symbol) -> Result<Table, ViewError> {
        let history = to_table(self.repository.fetch_full_history(self.connection, ticker)?);
        if history.is_empty() {
            return Err(ViewError::NoData(ticker.clone()));
        }
        Ok(history)
    }

    fn describe(&self, ticker: &Symbol) -> Option<String> {
        let lookup = self.descriptions?;
        match lookup.describe(ticker) {
            Ok(description) => description,
            Err(error) => {
                log::warn!("no description for {ticker}: {error}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::StaticDescriptions;
    use crate::repository::DuckDbSeriesRepository;
    use crate::DescriptionError;
    use time::macros::date;

    fn store() -> Connection {
        let connection = Connection::open_in_memory().expect("in-memory db");
        tickview_warehouse::migrations::apply_migrations(&connection).expect("migrate");
        connection
            .execute_batch(
                "INSERT INTO daily_prices VALUES
                    ('AAA', DATE '2024-01-02', 10, 11, 9, 10.5, 10.5, 100),
                    ('AAA', DATE '2024-01-03', 10.5, 12, 10, 11, 11, 150),
                    ('BBB', DATE '2024-01-03', 20, 21, 19, 20.5, 20.5, 300);",
            )
            .expect("seed");
        connection
    }

    fn symbol(value: &str) -> Symbol {
        Symbol::parse(value).expect("symbol")
    }

    struct FailingDescriptions;

    impl DescriptionLookup for FailingDescriptions {
        fn describe(&self, _ticker: &Symbol) -> Result<Option<String>, DescriptionError> {
            Err(DescriptionError(String::from("offline")))
        }
    }

    #[test]
    fn single_ticker_view_has_latest_row_history_and_series() {
        let connection = store();
        let selector = ViewSelector::new(&connection, DuckDbSeriesRepository);
        let view = selector
            .single_ticker(&symbol("AAA"), Metric::Close)
            .expect("view");

        assert_eq!(view.most_recent.len(), 1);
        assert_eq!(
            view.most_recent.most_recent().map(|row| row.date),
            Some(date!(2024 - 01 - 03))
        );
        assert_eq!(view.history.len(), 2);
        assert_eq!(view.chart.title, "Stock Price Over Time for AAA");
        assert_eq!(view.chart.y_label, "Closing Price");
        assert_eq!(view.chart.series[0].values(), &[10.5, 11.0]);
        assert_eq!(view.description, None);
    }

    #[test]
    fn description_is_attached_when_known() {
        let connection = store();
        let descriptions = StaticDescriptions::new().with(symbol("AAA"), "Triple A Corp.");
        let selector =
            ViewSelector::new(&connection, DuckDbSeriesRepository).with_descriptions(&descriptions);
        let view = selector
            .single_ticker(&symbol("AAA"), Metric::Open)
            .expect("view");
        assert_eq!(view.description.as_deref(), Some("Triple A Corp."));
    }

    #[test]
    fn failed_description_lookup_does_not_fail_the_view() {
        let connection = store();
        let selector =
            ViewSelector::new(&connection, DuckDbSeriesRepository).with_descriptions(&FailingDescriptions);
        let view = selector
            .single_ticker(&symbol("AAA"), Metric::Close)
            .expect("view");
        assert_eq!(view.description, None);
    }

    #[test]
    fn comparison_names_the_empty_side() {
        let connection = store();
        let selector = ViewSelector::new(&connection, DuckDbSeriesRepository);
        let err = selector
            .comparison(&symbol("AAA"), &symbol("ZZZ"), Metric::Close)
            .expect_err("must fail");
        assert!(matches!(err, ViewError::NoData(ticker) if ticker.as_str() == "ZZZ"));
    }

    #[test]
    fn comparison_overlays_series_on_shared_axis() {
        let connection = store();
        let selector = ViewSelector::new(&connection, DuckDbSeriesRepository);
        let view = selector
            .comparison(&symbol("AAA"), &symbol("BBB"), Metric::Close)
            .expect("view");
        assert_eq!(view.chart.title, "Stock Price Over Time for AAA vs BBB");
        assert_eq!(view.chart.series[0].label(), "AAA");
        assert_eq!(view.chart.series[1].label(), "BBB");
        assert_eq!(
            view.chart.time_axis(),
            vec![date!(2024 - 01 - 02), date!(2024 - 01 - 03)]
        );
    }

    #[test]
    fn date_range_with_no_rows_is_no_data_not_invalid_range() {
        let connection = store();
        let selector = ViewSelector::new(&connection, DuckDbSeriesRepository);
        let err = selector
            .date_range(
                &symbol("AAA"),
                date!(2023 - 01 - 01),
                date!(2023 - 12 - 31),
                Metric::Close,
            )
            .expect_err("must fail");
        assert!(matches!(err, ViewError::NoData(_)));
    }

    #[test]
    fn select_rejects_unknown_metric() {
        let connection = store();
        let selector = ViewSelector::new(&connection, DuckDbSeriesRepository);
        let request = ViewRequest::SingleTicker {
            ticker: symbol("AAA"),
            metric: String::from("vwap"),
        };
        let err = selector.select(&request).expect_err("must fail");
        assert!(matches!(err, ViewError::UnknownColumn(name) if name == "vwap"));
    }

    #[test]
    fn select_dispatches_date_range() {
        let connection = store();
        let selector = ViewSelector::new(&connection, DuckDbSeriesRepository);
        let request = ViewRequest::DateRange {
            ticker: symbol("AAA"),
            start: date!(2024 - 01 - 03),
            end: date!(2024 - 01 - 31),
            metric: String::from("volume"),
        };
        let payload = selector.select(&request).expect("payload");
        let ViewPayload::DateRange(view) = payload else {
            panic!("expected date-range payload");
        };
        assert_eq!(view.table.len(), 1);
        assert_eq!(view.chart.y_label, "Volume");
        assert_eq!(view.chart.series[0].values(), &[150.0]);
    }

    #[test]
    fn payload_serializes_with_mode_tag() {
        let connection = store();
        let selector = ViewSelector::new(&connection, DuckDbSeriesRepository);
        let payload = selector
            .select(&ViewRequest::DateRange {
                ticker: symbol("AAA"),
                start: date!(2024 - 01 - 02),
                end: date!(2024 - 01 - 02),
                metric: String::from("close"),
            })
            .expect("payload");
        let json = serde_json::to_value(&payload).expect("json");
        assert_eq!(json["mode"], "date_range");
        assert_eq!(json["start"], "2024-01-02");
        assert_eq!(json["table"]["rows"][0]["close"], 10.5);
    }

    #[test]
    fn catalog_is_sorted() {
        let connection = store();
        connection
            .execute_batch(
                "INSERT INTO daily_prices VALUES ('^GSPC', DATE '2024-01-02', 1, 1, 1, 1, 1, 1)",
            )
            .expect("seed");
        let selector = ViewSelector::new(&connection, DuckDbSeriesRepository);
        let catalog = selector.catalog().expect("catalog");
        assert_eq!(catalog, vec![symbol("AAA"), symbol("BBB"), symbol("^GSPC")]);
    }
}
