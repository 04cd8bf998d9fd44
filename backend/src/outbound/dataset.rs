//! Filesystem-backed dataset source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::DatasetFile;
use crate::domain::ports::{DatasetSource, DatasetSourceError};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads one CSV file from disk on every load.
#[derive(Debug, Clone)]
pub struct LocalCsvDataset {
    path: PathBuf,
}

impl LocalCsvDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: impl ToString) -> DatasetSourceError {
        DatasetSourceError::io(self.path.display().to_string(), error.to_string())
    }
}

#[async_trait]
impl DatasetSource for LocalCsvDataset {
    async fn load(&self) -> Result<DatasetFile, DatasetSourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|error| self.io_error(error))?;
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| self.io_error("path has no file name"))?;
        let headers = read_headers(&bytes)?;
        debug!(path = %self.path.display(), columns = headers.len(), "dataset loaded");
        Ok(DatasetFile {
            file_name,
            bytes,
            headers,
        })
    }
}

fn read_headers(bytes: &[u8]) -> Result<Vec<String>, DatasetSourceError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let record = reader
        .headers()
        .map_err(|error| DatasetSourceError::malformed(format!("unreadable header row: {error}")))?;
    let headers: Vec<String> = record
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let cell = if index == 0 {
                cell.strip_prefix(BYTE_ORDER_MARK).unwrap_or(cell)
            } else {
                cell
            };
            cell.to_owned()
        })
        .collect();
    if headers.iter().all(|header| header.trim().is_empty()) {
        return Err(DatasetSourceError::malformed("missing header row"));
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn csv_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        file.write_all(contents).expect("write csv");
        file
    }

    #[tokio::test]
    async fn loads_bytes_name_and_headers() {
        let contents = b"Date,Order ID,Customer Email,Price\n2024-01-01,A1,a@b.c,\"1.234,50\"\n";
        let file = csv_file(contents);

        let dataset = LocalCsvDataset::new(file.path())
            .load()
            .await
            .expect("dataset");

        assert_eq!(dataset.bytes, contents);
        assert!(dataset.file_name.ends_with(".csv"));
        assert_eq!(dataset.headers, ["Date", "Order ID", "Customer Email", "Price"]);
    }

    #[tokio::test]
    async fn missing_files_are_io_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = LocalCsvDataset::new(dir.path().join("absent.csv"))
            .load()
            .await
            .expect_err("missing file");

        assert!(matches!(error, DatasetSourceError::Io { .. }), "{error:?}");
    }

    #[rstest]
    #[case::empty(b"")]
    #[case::blank_line(b"\n")]
    fn empty_files_have_no_header_row(#[case] contents: &[u8]) {
        assert!(matches!(
            read_headers(contents),
            Err(DatasetSourceError::Malformed { .. })
        ));
    }

    #[test]
    fn strips_only_the_byte_order_mark() {
        let headers = read_headers("\u{feff}Date,Price\n".as_bytes()).expect("headers");
        assert_eq!(headers, ["Date", "Price"]);
    }

    #[test]
    fn header_cells_keep_their_padding() {
        let headers = read_headers("\u{feff}Date, Price \n".as_bytes()).expect("headers");
        assert_eq!(headers, ["Date", " Price "]);
    }

    #[test]
    fn blank_header_rows_are_malformed() {
        let error = read_headers(" , \n1,2\n".as_bytes()).expect_err("blank headers");
        assert!(matches!(error, DatasetSourceError::Malformed { .. }), "{error:?}");
    }
}
