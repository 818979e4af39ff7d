mod compare;
mod range;
mod show;
mod tickers;

use serde::Serialize;
use tickview_core::{
    AccessMode, DuckDbSeriesRepository, Symbol, ViewPayload, Warehouse, WarehouseConfig,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a command hands to the renderer.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Catalog { tickers: Vec<Symbol> },
    View(ViewPayload),
}

pub fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let warehouse = open_warehouse(cli)?;
    let connection = warehouse.connection()?;
    let repository = DuckDbSeriesRepository;

    match &cli.command {
        Command::Tickers => tickers::run(&connection, repository),
        Command::Show(args) => show::run(args, &connection, repository),
        Command::Compare(args) => compare::run(args, &connection, repository),
        Command::Range(args) => range::run(args, &connection, repository),
    }
}

/// Open the warehouse read-only; `--db` overrides the configured path.
fn open_warehouse(cli: &Cli) -> Result<Warehouse, CliError> {
    let mut config = WarehouseConfig::default().with_access_mode(AccessMode::ReadOnly);
    if let Some(db) = &cli.db {
        config = config.with_db_path(db);
    }
    log::debug!("using warehouse {}", config.db_path.display());
    Ok(Warehouse::open(config)?)
}
