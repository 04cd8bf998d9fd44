//! CSV payload uploaded to Copilot.

/// File contents plus the parsed header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile {
    /// Name sent in the multipart `filename` parameter.
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Cells of the first CSV record, in file order.
    pub headers: Vec<String>,
}
