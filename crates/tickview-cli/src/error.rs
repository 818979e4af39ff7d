use thiserror::Error;
use tickview_core::ViewError;

/// Shown instead of an error banner when a view has no rows.
pub const NO_DATA_NOTICE: &str = "No data found in database, try another ticker.";

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tickview_core::ValidationError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("failed to open warehouse: {0}")]
    Warehouse(#[from] tickview_core::WarehouseError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::View(ViewError::InvalidRange { .. } | ViewError::UnknownColumn(_)) => 2,
            Self::View(ViewError::NoData(_)) => 3,
            Self::View(ViewError::Repository(_)) => 10,
            Self::Warehouse(_) => 10,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }

    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::View(ViewError::NoData(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickview_core::{Symbol, TableError};
    use time::macros::date;

    #[test]
    fn view_errors_map_to_distinct_exit_codes() {
        let no_data = CliError::from(ViewError::NoData(Symbol::parse("X").expect("symbol")));
        assert_eq!(no_data.exit_code(), 3);
        assert!(no_data.is_no_data());

        let range = CliError::from(ViewError::InvalidRange {
            start: date!(2024 - 02 - 01),
            end: date!(2024 - 01 - 01),
        });
        assert_eq!(range.exit_code(), 2);
        assert!(!range.is_no_data());

        let column = CliError::from(ViewError::from(TableError::UnknownColumn(String::from("x"))));
        assert_eq!(column.exit_code(), 2);
    }

    #[test]
    fn invalid_symbol_is_a_validation_error() {
        let error = CliError::from(Symbol::parse("").expect_err("must fail"));
        assert_eq!(error.exit_code(), 2);
    }
}
