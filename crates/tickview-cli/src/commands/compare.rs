use duckdb::Connection;
use tickview_core::{SeriesRepository, Symbol, ViewRequest, ViewSelector};

use crate::cli::CompareArgs;
use crate::error::CliError;

use super::CommandOutput;

pub fn run(
    args: &CompareArgs,
    connection: &Connection,
    repository: impl SeriesRepository,
) -> Result<CommandOutput, CliError> {
    let request = ViewRequest::Comparison {
        ticker_a: Symbol::parse(&args.ticker_a)?,
        ticker_b: Symbol::parse(&args.ticker_b)?,
        metric: args.metric.clone(),
    };
    let payload = ViewSelector::new(connection, repository).select(&request)?;
    Ok(CommandOutput::View(payload))
}
