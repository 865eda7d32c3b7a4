//! Unified loader for the transaction table
//!
//! Routes reads to either the CSV or SQLite backend based on configuration.

use super::reader::CsvTransactionReader;
use super::reader_backend::{LoadError, TransactionSource};
use super::sqlite_reader::SqliteTransactionReader;
use super::table::TransactionTable;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Csv,
    Sqlite,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Csv => "csv",
            SourceKind::Sqlite => "sqlite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Some(SourceKind::Csv),
            "sqlite" | "db" => Some(SourceKind::Sqlite),
            _ => None,
        }
    }

    /// Guess the backend from a file extension; anything unknown is read as CSV
    pub fn infer(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("db") | Some("sqlite") | Some("sqlite3") => SourceKind::Sqlite,
            _ => SourceKind::Csv,
        }
    }
}

/// Unified loader that routes to either the CSV or SQLite backend
pub enum TransactionLoader {
    Csv(CsvTransactionReader<File>),
    Sqlite(SqliteTransactionReader),
}

impl TransactionLoader {
    /// Open the input file with the given backend
    pub fn open(kind: SourceKind, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        match kind {
            SourceKind::Csv => Ok(TransactionLoader::Csv(CsvTransactionReader::open(path)?)),
            SourceKind::Sqlite => Ok(TransactionLoader::Sqlite(SqliteTransactionReader::open(path)?)),
        }
    }

    /// Read every record and build the approval-sorted table
    pub fn load(mut self) -> Result<TransactionTable, LoadError> {
        let backend = self.backend_type();
        let records = match &mut self {
            TransactionLoader::Csv(r) => r.read_records()?,
            TransactionLoader::Sqlite(r) => r.read_records()?,
        };
        let table = TransactionTable::from_records(records);
        log::info!("✅ Loaded {} transactions via {} backend", table.len(), backend);
        Ok(table)
    }

    pub fn backend_type(&self) -> &'static str {
        match self {
            TransactionLoader::Csv(r) => r.backend_type(),
            TransactionLoader::Sqlite(r) => r.backend_type(),
        }
    }
}

/// Open and load in one step
pub fn load_table(kind: SourceKind, path: impl AsRef<Path>) -> Result<TransactionTable, LoadError> {
    TransactionLoader::open(kind, path)?.load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_from_extension() {
        assert_eq!(SourceKind::infer(Path::new("data/main_data.csv")), SourceKind::Csv);
        assert_eq!(SourceKind::infer(Path::new("data/orders.DB")), SourceKind::Sqlite);
        assert_eq!(SourceKind::infer(Path::new("orders.sqlite3")), SourceKind::Sqlite);
        assert_eq!(SourceKind::infer(Path::new("orders")), SourceKind::Csv);
    }

    #[test]
    fn test_parse_source_kind() {
        assert_eq!(SourceKind::from_str("CSV"), Some(SourceKind::Csv));
        assert_eq!(SourceKind::from_str("sqlite"), Some(SourceKind::Sqlite));
        assert_eq!(SourceKind::from_str("parquet"), None);
        assert_eq!(SourceKind::Sqlite.as_str(), "sqlite");
    }
}
