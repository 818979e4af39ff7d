use duckdb::Connection;
use tickview_core::{SeriesRepository, ViewSelector};

use crate::error::CliError;

use super::CommandOutput;

pub fn run(
    connection: &Connection,
    repository: impl SeriesRepository,
) -> Result<CommandOutput, CliError> {
    let tickers = ViewSelector::new(connection, repository).catalog()?;
    Ok(CommandOutput::Catalog { tickers })
}
