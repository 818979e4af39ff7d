//! CLI argument definitions for tickview.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tickers` | List tickers in the warehouse |
//! | `show` | Latest row, full history and chart series for one ticker |
//! | `compare` | Overlay two tickers on one time axis |
//! | `range` | History of one ticker between two dates |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--db` | `$TICKVIEW_DB` or `<home>/warehouse.duckdb` | Warehouse file |
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `-v, --verbose` | off | Raise log level (repeat for debug) |
//!
//! # Examples
//!
//! ```bash
//! tickview tickers
//! tickview show AAPL --metric volume
//! tickview compare AAPL MSFT --format json --pretty
//! tickview range AAPL --start 2024-01-01 --end 2024-03-31
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Daily OHLCV viewer over a local DuckDB price warehouse.
#[derive(Debug, Parser)]
#[command(name = "tickview", author, version, about)]
pub struct Cli {
    /// Path to the warehouse database file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log more; `-v` for info, `-vv` for debug.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text for terminal display.
    Table,
    /// Single JSON object.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the tickers stored in the warehouse, sorted.
    Tickers,

    /// Latest row, full history and chart series for one ticker.
    ///
    ///   tickview show AAPL
    ///   tickview show AAPL --metric adj_close --descriptions companies.json
    Show(ShowArgs),

    /// Full histories of two tickers overlaid on one time axis.
    ///
    ///   tickview compare AAPL MSFT --metric close
    Compare(CompareArgs),

    /// History of one ticker between two dates, inclusive.
    ///
    ///   tickview range AAPL --start 2024-01-01 --end 2024-03-31
    Range(RangeArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Ticker symbol.
    pub ticker: String,

    /// Column to chart: open, high, low, close, adj_close or volume.
    #[arg(long, default_value = "close")]
    pub metric: String,

    /// JSON file mapping tickers to company descriptions.
    #[arg(long)]
    pub descriptions: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// First ticker symbol.
    pub ticker_a: String,

    /// Second ticker symbol; may equal the first.
    pub ticker_b: String,

    /// Column to chart.
    #[arg(long, default_value = "close")]
    pub metric: String,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Ticker symbol.
    pub ticker: String,

    /// First date, `YYYY-MM-DD`.
    #[arg(long)]
    pub start: String,

    /// Last date, `YYYY-MM-DD`.
    #[arg(long)]
    pub end: String,

    /// Column to chart.
    #[arg(long, default_value = "close")]
    pub metric: String,
}
