//! CSV transaction reader with header validation

use super::normalizer::{RawTransactionRow, TransactionRecord};
use super::reader_backend::{check_required_columns, LoadError, TransactionSource};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct CsvTransactionReader<R: Read> {
    reader: csv::Reader<R>,
    origin: String,
}

impl CsvTransactionReader<File> {
    /// Open a CSV file on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        Ok(Self::from_reader(file, path.display().to_string()))
    }
}

impl<R: Read> CsvTransactionReader<R> {
    /// Wrap any reader producing CSV text (header row required)
    pub fn from_reader(inner: R, origin: impl Into<String>) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .flexible(false)
            .from_reader(inner);
        Self {
            reader,
            origin: origin.into(),
        }
    }
}

impl<R: Read> TransactionSource for CsvTransactionReader<R> {
    fn read_records(&mut self) -> Result<Vec<TransactionRecord>, LoadError> {
        let headers = self.reader.headers()?.clone();
        check_required_columns(headers.iter())?;

        let mut records = Vec::new();
        for (idx, result) in self.reader.deserialize::<RawTransactionRow>().enumerate() {
            let row = idx + 1;
            let raw = result.map_err(|e| {
                // Wrong cell count or an undecodable cell are both row-level defects
                if matches!(
                    e.kind(),
                    csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. }
                ) {
                    LoadError::malformed(Some(row), e.to_string())
                } else {
                    LoadError::Csv(e)
                }
            })?;
            let record = raw
                .normalize()
                .map_err(|e| LoadError::malformed(Some(row), e.to_string()))?;
            records.push(record);
        }

        log::info!("📖 Read {} rows from {}", records.len(), self.origin);
        Ok(records)
    }

    fn backend_type(&self) -> &'static str {
        "CSV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = ",order_id,customer_id,customer_city,customer_state,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,order_estimated_delivery_date";

    fn read(body: &str) -> Result<Vec<TransactionRecord>, LoadError> {
        let text = format!("{}\n{}", HEADER, body);
        CsvTransactionReader::from_reader(text.as_bytes(), "inline").read_records()
    }

    #[test]
    fn test_reads_rows_and_ignores_index_column() {
        let records = read(
            "0,o1,c1,franca,SP,2017-05-16 15:05:35,2017-05-16 15:22:12,2017-05-23 10:47:57,2017-05-25 10:35:35,2017-06-05 00:00:00\n\
             1,o2,c2,rio de janeiro,RJ,2018-01-12 20:48:24,,,,2018-02-06 00:00:00\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_id, "o1");
        assert_eq!(records[0].customer_city, "franca");
        assert!(records[0].approved_at.is_some());
        assert_eq!(records[1].customer_state, "RJ");
        assert_eq!(records[1].approved_at, None);
        assert_eq!(records[1].delivered_customer_at, None);
    }

    #[test]
    fn test_city_values_are_not_normalized() {
        let records = read(
            "0,o1,c1, Sao Paulo ,SP,2017-05-16 15:05:35,,,,\n\
             1,o2,c2,sao paulo,SP,2017-05-16 15:05:35,,,,\n",
        )
        .unwrap();
        assert_eq!(records[0].customer_city, " Sao Paulo ");
        assert_eq!(records[1].customer_city, "sao paulo");
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let text = "order_id,customer_id,customer_city\no1,c1,franca\n";
        let err = CsvTransactionReader::from_reader(text.as_bytes(), "inline")
            .read_records()
            .unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("order_approved_at"));
    }

    #[test]
    fn test_unparseable_timestamp_reports_row() {
        let err = read(
            "0,o1,c1,franca,SP,2017-05-16 15:05:35,,,,\n\
             1,o2,c2,franca,SP,2017-05-16 15:05:35,16/05/2017,,,\n",
        )
        .unwrap_err();
        match err {
            LoadError::MalformedInput { row, message } => {
                assert_eq!(row, Some(2));
                assert!(message.contains("order_approved_at"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_short_row_is_malformed_with_row_number() {
        let err = read(
            "0,o1,c1,franca,SP,2017-05-16 15:05:35,,,,\n\
             1,o2,c2,franca,SP,2017-05-16 15:05:35\n",
        )
        .unwrap_err();
        assert!(err.is_malformed_input());
        match err {
            LoadError::MalformedInput { row, .. } => assert_eq!(row, Some(2)),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let err = CsvTransactionReader::open("/nonexistent/orders.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
