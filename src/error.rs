// Catalog errors
// Every failure is fatal for the run: nothing here is recovered locally.

use std::fmt;
use thiserror::Error;

/// Sheet and 0-based row a value was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLocation {
    pub sheet: String,
    pub row: usize,
}

impl fmt::Display for RowLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sheet '{}', row {}", self.sheet, self.row)
    }
}

fn location_suffix(location: &Option<RowLocation>) -> String {
    match location {
        Some(loc) => format!(" ({})", loc),
        None => String::new(),
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Same settlement name appeared twice in the registry
    #[error("duplicate settlement name in registry: {name}")]
    DuplicateName { name: String },

    /// Non-capital settlement without a region
    #[error("settlement '{name}' has no region")]
    MissingRegion { name: String },

    /// Postal source references a settlement the registry never defined.
    /// `location` is None when the code did not come from a sheet row.
    #[error("unknown settlement '{name}'{}", location_suffix(.location))]
    UnknownSettlement {
        name: String,
        location: Option<RowLocation>,
    },

    /// Postal code is not exactly 4 ASCII digits
    #[error("invalid postal code '{code}' for settlement '{settlement}'")]
    InvalidPostalCode { code: String, settlement: String },

    /// Registry row has content but an empty name cell
    #[error("empty settlement name (sheet '{sheet}', row {row})")]
    MissingName { sheet: String, row: usize },

    #[error("sheet not found: {sheet}")]
    MissingSheet { sheet: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
