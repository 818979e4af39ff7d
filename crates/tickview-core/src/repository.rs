//! Series repository: parameterized reads against the `daily_prices` table.
//!
//! Every operation borrows an open connection from the caller and returns
//! typed records or a [`RepositoryError`]; nothing is cached, retried or
//! returned partially.

use ::duckdb::{Connection, Row, ToSql};
use time::Date;

use crate::domain::{format_iso_date, parse_iso_date, Symbol, TickerRecord};
use crate::RepositoryError;

const SELECT_RECORDS: &str = "SELECT CAST(date AS VARCHAR), open, high, low, close, adj_close, volume \
     FROM daily_prices";

/// Read operations the view selector needs from the price store.
pub trait SeriesRepository {
    /// All rows for `ticker`, ascending by date. Empty when the ticker has none.
    fn fetch_full_history(
        &self,
        connection: &Connection,
        ticker: &Symbol,
    ) -> Result<Vec<TickerRecord>, RepositoryError>;

    /// The latest-dated row for `ticker`.
    fn fetch_most_recent(
        &self,
        connection: &Connection,
        ticker: &Symbol,
    ) -> Result<Option<TickerRecord>, RepositoryError>;

    /// Rows with `start <= date <= end`, ascending. Bounds are not validated.
    fn fetch_range(
        &self,
        connection: &Connection,
        ticker: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<Vec<TickerRecord>, RepositoryError>;

    /// Distinct tickers in the store, in no particular order.
    fn list_tickers(&self, connection: &Connection) -> Result<Vec<Symbol>, RepositoryError>;
}

impl<R: SeriesRepository + ?Sized> SeriesRepository for &R {
    fn fetch_full_history(
        &self,
        connection: &Connection,
        ticker: &Symbol,
    ) -> Result<Vec<TickerRecord>, RepositoryError> {
        (**self).fetch_full_history(connection, ticker)
    }

    fn fetch_most_recent(
        &self,
        connection: &Connection,
        ticker: &Symbol,
    ) -> Result<Option<TickerRecord>, RepositoryError> {
        (**self).fetch_most_recent(connection, ticker)
    }

    fn fetch_range(
        &self,
        connection: &Connection,
        ticker: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<Vec<TickerRecord>, RepositoryError> {
        (**self).fetch_range(connection, ticker, start, end)
    }

    fn list_tickers(&self, connection: &Connection) -> Result<Vec<Symbol>, RepositoryError> {
        (**self).list_tickers(connection)
    }
}

/// [`SeriesRepository`] backed by the `DuckDB` warehouse schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuckDbSeriesRepository;

impl SeriesRepository for DuckDbSeriesRepository {
    fn fetch_full_history(
        &self,
        connection: &Connection,
        ticker: &Symbol,
    ) -> Result<Vec<TickerRecord>, RepositoryError> {
        let sql = format!("{SELECT_RECORDS} WHERE ticker = ? ORDER BY date");
        let params: [&dyn ToSql; 1] = [&ticker.as_str()];
        let records = query_records(connection, ticker, sql.as_str(), &params)?;
        log::debug!("full history for {ticker}: {} rows", records.len());
        Ok(records)
    }

    fn fetch_most_recent(
        &self,
        connection: &Connection,
        ticker: &Symbol,
    ) -> Result<Option<TickerRecord>, RepositoryError> {
        let sql = format!("{SELECT_RECORDS} WHERE ticker = ? ORDER BY date DESC LIMIT 1");
        let params: [&dyn ToSql; 1] = [&ticker.as_str()];
        let record = query_records(connection, ticker, sql.as_str(), &params)?
            .into_iter()
            .next();
        log::debug!(
            "most recent for {ticker}: {}",
            record.map_or_else(|| String::from("none"), |r| format_iso_date(r.date))
        );
        Ok(record)
    }

    fn fetch_range(
        &self,
        connection: &Connection,
        ticker: &Symbol,
        start: Date,
        end: Date,
    ) -> Result<Vec<TickerRecord>, RepositoryError> {
        let sql = format!(
            "{SELECT_RECORDS} WHERE ticker = ? \
             AND date BETWEEN CAST(? AS DATE) AND CAST(? AS DATE) ORDER BY date"
        );
        let start = format_iso_date(start);
        let end = format_iso_date(end);
        let params: [&dyn ToSql; 3] = [&ticker.as_str(), &start, &end];
        let records = query_records(connection, ticker, sql.as_str(), &params)?;
        log::debug!("range {start}..={end} for {ticker}: {} rows", records.len());
        Ok(records)
    }

    fn list_tickers(&self, connection: &Connection) -> Result<Vec<Symbol>, RepositoryError> {
        let mut statement = connection.prepare("SELECT DISTINCT ticker FROM daily_prices")?;
        let raw = statement
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut tickers = Vec::with_capacity(raw.len());
        for value in raw {
            match Symbol::from_stored(value) {
                Some(symbol) => tickers.push(symbol),
                None => log::warn!("skipping blank stored ticker"),
            }
        }
        log::debug!("catalog: {} tickers", tickers.len());
        Ok(tickers)
    }
}

type RawRecord = (String, f64, f64, f64, f64, f64, i64);

fn read_raw(row: &Row<'_>) -> Result<RawRecord, ::duckdb::Error> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn query_records(
    connection: &Connection,
    ticker: &Symbol,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<TickerRecord>, RepositoryError> {
    let mut statement = connection.prepare(sql)?;
    let raw = statement
        .query_map(params, read_raw)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut records: Vec<TickerRecord> = Vec::with_capacity(raw.len());
    for row in raw {
        let record = decode_record(ticker, row)?;
        if let Some(previous) = records.last() {
            if previous.date >= record.date {
                return Err(invalid_row(
                    ticker,
                    format!(
                        "dates out of order: {} followed by {}",
                        format_iso_date(previous.date),
                        format_iso_date(record.date)
                    ),
                ));
            }
        }
        records.push(record);
    }
    Ok(records)
}

fn decode_record(ticker: &Symbol, raw: RawRecord) -> Result<TickerRecord, RepositoryError> {
    let (date, open, high, low, close, adj_close, volume) = raw;
    let date = parse_iso_date(&date).map_err(|error| invalid_row(ticker, error.to_string()))?;

    for (field, value) in [
        ("open", open),
        ("high", high),
        ("low", low),
        ("close", close),
        ("adj_close", adj_close),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid_row(
                ticker,
                format!("{field} must be a non-negative number, got {value}"),
            ));
        }
    }

    let volume = u64::try_from(volume)
        .map_err(|_| invalid_row(ticker, format!("volume must be non-negative, got {volume}")))?;

    Ok(TickerRecord {
        date,
        open,
        high,
        low,
        close,
        adj_close,
        volume,
    })
}

fn invalid_row(ticker: &Symbol, reason: String) -> RepositoryError {
    RepositoryError::InvalidRow {
        ticker: ticker.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn store() -> Connection {
        let connection = Connection::open_in_memory().expect("in-memory db");
        tickview_warehouse::migrations::apply_migrations(&connection).expect("migrate");
        connection
            .execute_batch(
                "INSERT INTO daily_prices VALUES
                    ('AAA', DATE '2024-01-03', 10.5, 12, 10, 11, 11, 150),
                    ('AAA', DATE '2024-01-02', 10, 11, 9, 10.5, 10.5, 100),
                    ('BBB', DATE '2024-01-02', 20, 21, 19, 20.5, 20.5, 300);",
            )
            .expect("seed");
        connection
    }

    fn aaa() -> Symbol {
        Symbol::parse("AAA").expect("symbol")
    }

    #[test]
    fn full_history_is_ascending_regardless_of_insert_order() {
        let connection = store();
        let records = DuckDbSeriesRepository
            .fetch_full_history(&connection, &aaa())
            .expect("history");

        let dates: Vec<_> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date!(2024 - 01 - 02), date!(2024 - 01 - 03)]);
        assert_eq!(records[1].volume, 150);
    }

    #[test]
    fn most_recent_returns_latest_row() {
        let connection = store();
        let record = DuckDbSeriesRepository
            .fetch_most_recent(&connection, &aaa())
            .expect("query")
            .expect("row");
        assert_eq!(record.date, date!(2024 - 01 - 03));
        assert_eq!(record.close, 11.0);
    }

    #[test]
    fn unknown_ticker_yields_empty_results_not_errors() {
        let connection = store();
        let zzz = Symbol::parse("ZZZ").expect("symbol");
        assert!(DuckDbSeriesRepository
            .fetch_full_history(&connection, &zzz)
            .expect("history")
            .is_empty());
        assert!(DuckDbSeriesRepository
            .fetch_most_recent(&connection, &zzz)
            .expect("most recent")
            .is_none());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let connection = store();
        let records = DuckDbSeriesRepository
            .fetch_range(&connection, &aaa(), date!(2024 - 01 - 03), date!(2024 - 01 - 03))
            .expect("range");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date!(2024 - 01 - 03));
    }

    #[test]
    fn negative_volume_is_reported_as_invalid_row() {
        let connection = store();
        connection
            .execute_batch(
                "INSERT INTO daily_prices VALUES ('CCC', DATE '2024-01-02', 1, 1, 1, 1, 1, -5)",
            )
            .expect("seed");
        let ccc = Symbol::parse("CCC").expect("symbol");
        let err = DuckDbSeriesRepository
            .fetch_full_history(&connection, &ccc)
            .expect_err("must fail");
        assert!(matches!(err, RepositoryError::InvalidRow { ticker, .. } if ticker == "CCC"));
    }

    #[test]
    fn catalog_keeps_stored_spelling_and_skips_blank_tickers() {
        let connection = store();
        connection
            .execute_batch(
                "INSERT INTO daily_prices VALUES
                    ('aaa', DATE '2024-01-02', 1, 1, 1, 1, 1, 1),
                    ('7203.T', DATE '2024-01-02', 2500, 2510, 2490, 2505, 2505, 1000),
                    ('', DATE '2024-01-02', 1, 1, 1, 1, 1, 1);",
            )
            .expect("seed");
        let mut tickers = DuckDbSeriesRepository
            .list_tickers(&connection)
            .expect("catalog");
        tickers.sort();
        let names: Vec<&str> = tickers.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["7203.T", "AAA", "BBB", "aaa"]);
    }

    #[test]
    fn stored_lowercase_ticker_is_fetched_by_its_catalog_symbol() {
        let connection = store();
        connection
            .execute_batch("INSERT INTO daily_prices VALUES ('aapl', DATE '2024-01-02', 1, 1, 1, 1, 1, 1)")
            .expect("seed");
        let aapl = DuckDbSeriesRepository
            .list_tickers(&connection)
            .expect("catalog")
            .into_iter()
            .find(|ticker| ticker.as_str() == "aapl")
            .expect("catalog entry");
        let history = DuckDbSeriesRepository
            .fetch_full_history(&connection, &aapl)
            .expect("history");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn missing_table_is_a_repository_error() {
        let connection = Connection::open_in_memory().expect("in-memory db");
        let err = DuckDbSeriesRepository
            .fetch_full_history(&connection, &aaa())
            .expect_err("must fail");
        assert!(matches!(err, RepositoryError::Query(_)));
    }
}
