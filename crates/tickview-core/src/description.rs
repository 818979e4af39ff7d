//! Optional company descriptions shown next to a single-ticker view.

use std::collections::HashMap;

use crate::domain::Symbol;
use crate::DescriptionError;

/// Source of a human-readable business summary for a ticker.
pub trait DescriptionLookup {
    fn describe(&self, ticker: &Symbol) -> Result<Option<String>, DescriptionError>;
}

/// In-memory descriptions keyed by ticker.
#[derive(Debug, Clone, Default)]
pub struct StaticDescriptions {
    entries: HashMap<Symbol, String>,
}

impl StaticDescriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ticker: Symbol, description: impl Into<String>) -> Self {
        self.entries.insert(ticker, description.into());
        self
    }

    pub fn insert(&mut self, ticker: Symbol, description: impl Into<String>) {
        self.entries.insert(ticker, description.into());
    }
}

impl DescriptionLookup for StaticDescriptions {
    fn describe(&self, ticker: &Symbol) -> Result<Option<String>, DescriptionError> {
        Ok(self.entries.get(ticker).cloned())
    }
}
