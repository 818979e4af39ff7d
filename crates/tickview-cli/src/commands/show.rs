use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use duckdb::Connection;
use tickview_core::{SeriesRepository, StaticDescriptions, Symbol, ViewRequest, ViewSelector};

use crate::cli::ShowArgs;
use crate::error::CliError;

use super::CommandOutput;

pub fn run(
    args: &ShowArgs,
    connection: &Connection,
    repository: impl SeriesRepository,
) -> Result<CommandOutput, CliError> {
    let request = ViewRequest::SingleTicker {
        ticker: Symbol::parse(&args.ticker)?,
        metric: args.metric.clone(),
    };

    let descriptions = match &args.descriptions {
        Some(path) => load_descriptions(path)?,
        None => StaticDescriptions::new(),
    };
    let selector = ViewSelector::new(connection, repository).with_descriptions(&descriptions);
    Ok(CommandOutput::View(selector.select(&request)?))
}

/// Read a `{"TICKER": "description", ...}` JSON object.
fn load_descriptions(path: &Path) -> Result<StaticDescriptions, CliError> {
    let raw = fs::read_to_string(path)?;
    let entries: BTreeMap<String, String> = serde_json::from_str(&raw)?;

    let mut descriptions = StaticDescriptions::new();
    for (ticker, description) in entries {
        match Symbol::parse(&ticker) {
            Ok(symbol) => descriptions.insert(symbol, description),
            Err(error) => log::warn!("skipping description for '{ticker}': {error}"),
        }
    }
    Ok(descriptions)
}
