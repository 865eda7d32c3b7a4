//! SQLite transaction reader
//!
//! Reads the `transactions` table of a static database file. The connection is
//! put in query-only mode so the loader can never write to its input.

use super::normalizer::{RawTransactionRow, TransactionRecord};
use super::reader_backend::{check_required_columns, LoadError, TransactionSource};
use rusqlite::Connection;
use std::path::Path;

const TABLE: &str = "transactions";

/// SQLite transaction reader
#[derive(Debug)]
pub struct SqliteTransactionReader {
    conn: Connection,
}

impl SqliteTransactionReader {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = db_path.as_ref();
        if !path.exists() {
            return Err(LoadError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("database not found: {}", path.display()),
            )));
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA query_only = ON")?;

        log::info!("📥 SQLite reader opened: {}", path.display());
        Ok(Self { conn })
    }

    fn column_names(&self) -> Result<Vec<String>, LoadError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM pragma_table_info(?1)")?;
        let names = stmt
            .query_map([TABLE], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl TransactionSource for SqliteTransactionReader {
    fn read_records(&mut self) -> Result<Vec<TransactionRecord>, LoadError> {
        let columns = self.column_names()?;
        if columns.is_empty() {
            return Err(LoadError::malformed(None, format!("table '{}' does not exist", TABLE)));
        }
        check_required_columns(columns.iter().map(String::as_str))?;

        let mut stmt = self.conn.prepare(
            "SELECT order_id, customer_id, customer_city, customer_state,
                    order_purchase_timestamp, order_approved_at,
                    order_delivered_carrier_date, order_delivered_customer_date,
                    order_estimated_delivery_date
             FROM transactions
             ORDER BY rowid ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(RawTransactionRow {
                order_id: row.get(0)?,
                customer_id: row.get(1)?,
                customer_city: row.get(2)?,
                customer_state: row.get(3)?,
                order_purchase_timestamp: row.get(4)?,
                order_approved_at: row.get(5)?,
                order_delivered_carrier_date: row.get(6)?,
                order_delivered_customer_date: row.get(7)?,
                order_estimated_delivery_date: row.get(8)?,
            })
        })?;

        let mut records = Vec::new();
        for (idx, raw) in rows.enumerate() {
            let row = idx + 1;
            let raw = raw.map_err(|e| match e {
                rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
                    LoadError::malformed(Some(row), e.to_string())
                }
                other => LoadError::Database(other),
            })?;
            let record = raw
                .normalize()
                .map_err(|e| LoadError::malformed(Some(row), e.to_string()))?;
            records.push(record);
        }

        log::info!("📥 Read {} rows from SQLite table '{}'", records.len(), TABLE);
        Ok(records)
    }

    fn backend_type(&self) -> &'static str {
        "SQLite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;
    use tempfile::tempdir;

    fn setup_test_db() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("orders.db");

        let conn = Connection::open(&db_path).unwrap();
        conn.execute(
            "CREATE TABLE transactions (
                order_id TEXT NOT NULL,
                customer_id TEXT NOT NULL,
                customer_city TEXT NOT NULL,
                customer_state TEXT NOT NULL,
                order_purchase_timestamp TEXT NOT NULL,
                order_approved_at TEXT,
                order_delivered_carrier_date TEXT,
                order_delivered_customer_date TEXT,
                order_estimated_delivery_date TEXT
            )",
            [],
        )
        .unwrap();

        (dir, db_path)
    }

    fn insert(conn: &Connection, order: &str, customer: &str, approved: Option<&str>) {
        conn.execute(
            "INSERT INTO transactions VALUES (?1, ?2, 'curitiba', 'PR', '2018-03-01 09:00:00', ?3, NULL, NULL, '2018-03-20 00:00:00')",
            params![order, customer, approved],
        )
        .unwrap();
    }

    #[test]
    fn test_reads_all_rows() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert(&conn, "o1", "c1", Some("2018-03-01 10:00:00"));
        insert(&conn, "o2", "c2", None);
        drop(conn);

        let mut reader = SqliteTransactionReader::open(&db_path).unwrap();
        let records = reader.read_records().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_id, "o1");
        assert!(records[0].approved_at.is_some());
        assert_eq!(records[1].approved_at, None);
        assert_eq!(records[1].customer_state, "PR");
        assert_eq!(reader.backend_type(), "SQLite");
    }

    #[test]
    fn test_missing_table_is_malformed() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("empty.db");
        Connection::open(&db_path).unwrap();

        let err = SqliteTransactionReader::open(&db_path)
            .unwrap()
            .read_records()
            .unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("partial.db");
        let conn = Connection::open(&db_path).unwrap();
        conn.execute("CREATE TABLE transactions (order_id TEXT, customer_id TEXT)", [])
            .unwrap();
        drop(conn);

        let err = SqliteTransactionReader::open(&db_path)
            .unwrap()
            .read_records()
            .unwrap_err();
        assert!(err.to_string().contains("customer_city"));
    }

    #[test]
    fn test_bad_timestamp_is_malformed() {
        let (_dir, db_path) = setup_test_db();
        let conn = Connection::open(&db_path).unwrap();
        insert(&conn, "o1", "c1", Some("garbage"));
        drop(conn);

        let err = SqliteTransactionReader::open(&db_path)
            .unwrap()
            .read_records()
            .unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { row: Some(1), .. }));
    }

    #[test]
    fn test_read_only_mode() {
        let (_dir, db_path) = setup_test_db();
        let reader = SqliteTransactionReader::open(&db_path).unwrap();

        let result = reader.conn.execute(
            "INSERT INTO transactions VALUES ('o', 'c', 'x', 'Y', '2018-01-01', NULL, NULL, NULL, NULL)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = SqliteTransactionReader::open(dir.path().join("nope.db")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
