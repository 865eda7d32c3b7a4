//! Reader backend trait for transaction sources
//!
//! Defines the interface for loading the transaction table from different static inputs.

use super::normalizer::TransactionRecord;

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Csv(csv::Error),
    Database(rusqlite::Error),
    /// A required column is missing or a cell cannot be parsed.
    /// `row` is the 1-based data row (header excluded) when known.
    MalformedInput { row: Option<usize>, message: String },
}

impl LoadError {
    pub fn malformed(row: Option<usize>, message: impl Into<String>) -> Self {
        LoadError::MalformedInput {
            row,
            message: message.into(),
        }
    }

    pub fn is_malformed_input(&self) -> bool {
        matches!(self, LoadError::MalformedInput { .. })
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl From<rusqlite::Error> for LoadError {
    fn from(err: rusqlite::Error) -> Self {
        LoadError::Database(err)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Csv(e) => write!(f, "{}", e),
            LoadError::Database(e) => write!(f, "Database error: {}", e),
            LoadError::MalformedInput { row: Some(row), message } => {
                write!(f, "Malformed input at row {}: {}", row, message)
            }
            LoadError::MalformedInput { row: None, message } => {
                write!(f, "Malformed input: {}", message)
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Backend trait for reading the full transaction table
pub trait TransactionSource {
    /// Read and validate every record in the source
    fn read_records(&mut self) -> Result<Vec<TransactionRecord>, LoadError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}

/// Report every required column absent from `present`
pub fn check_required_columns<'a, I>(present: I) -> Result<(), LoadError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = present.into_iter().map(str::trim).collect();
    let missing: Vec<&str> = super::normalizer::REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !present.contains(col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::malformed(
            None,
            format!("missing required column(s): {}", missing.join(", ")),
        ))
    }
}
