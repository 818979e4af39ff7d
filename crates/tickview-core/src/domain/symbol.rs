use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Ticker symbol, spelled exactly as it is stored in the price table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse a user-supplied ticker. Surrounding whitespace is trimmed; case
    /// is kept, since the store matches tickers exactly.
    ///
    /// Index tickers may start with `^` (e.g. `^GSPC`), exchange-suffixed
    /// tickers may start with a digit (e.g. `7203.T`) and currency or futures
    /// tickers may contain `=` (e.g. `EURUSD=X`).
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let len = trimmed.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        let mut chars = trimmed.chars().enumerate();
        if let Some((_, first)) = chars.next() {
            if !(first.is_ascii_alphanumeric() || first == '^') {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
        }

        for (index, ch) in chars {
            let valid = ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '=');
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Wrap a ticker read back from the store, byte for byte, so it can be
    /// bound again. Only an empty or blank value is refused.
    pub fn from_stored(value: String) -> Option<Self> {
        if value.trim().is_empty() {
            return None;
        }
        Some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_but_keeps_case() {
        let parsed = Symbol::parse(" brk.b ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "brk.b");
        assert_ne!(parsed, Symbol::parse("BRK.B").expect("symbol"));
    }

    #[test]
    fn accepts_index_currency_and_exchange_suffixed_tickers() {
        assert!(Symbol::parse("^GSPC").is_ok());
        assert!(Symbol::parse("EURUSD=X").is_ok());
        assert_eq!(Symbol::parse("7203.T").expect("symbol").as_str(), "7203.T");
        assert!(Symbol::parse("0700.HK").is_ok());
    }

    #[test]
    fn rejects_invalid_start() {
        let err = Symbol::parse(".AAPL").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidStart { ch: '.' }));
    }

    #[test]
    fn rejects_caret_after_first_position() {
        let err = Symbol::parse("A^B").expect_err("must fail");
        assert_eq!(err, ValidationError::SymbolInvalidChar { ch: '^', index: 1 });
    }

    #[test]
    fn stored_values_are_kept_verbatim_unless_blank() {
        let stored = Symbol::from_stored(String::from("bad ticker")).expect("kept");
        assert_eq!(stored.as_str(), "bad ticker");
        assert_eq!(Symbol::from_stored(String::from("  ")), None);
    }
}
