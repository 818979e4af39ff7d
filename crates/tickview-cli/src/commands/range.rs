use duckdb::Connection;
use tickview_core::{parse_iso_date, SeriesRepository, Symbol, ViewRequest, ViewSelector};

use crate::cli::RangeArgs;
use crate::error::CliError;

use super::CommandOutput;

pub fn run(
    args: &RangeArgs,
    connection: &Connection,
    repository: impl SeriesRepository,
) -> Result<CommandOutput, CliError> {
    let request = ViewRequest::DateRange {
        ticker: Symbol::parse(&args.ticker)?,
        start: parse_iso_date(&args.start)?,
        end: parse_iso_date(&args.end)?,
        metric: args.metric.clone(),
    };
    let payload = ViewSelector::new(connection, repository).select(&request)?;
    Ok(CommandOutput::View(payload))
}
