//! Driven port supplying the CSV file to upload.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::DatasetFile;

define_port_error! {
    /// Errors raised while loading the local dataset.
    pub enum DatasetSourceError {
        /// File missing or unreadable.
        Io { path: String, message: String } =>
            "failed to read dataset {path}: {message}",
        /// File read but its contents are unusable.
        Malformed { message: String } =>
            "dataset is malformed: {message}",
    }
}

/// Source of the dataset uploaded on each `upload` action.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Read the file and its header row.
    async fn load(&self) -> Result<DatasetFile, DatasetSourceError>;
}
