use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize workbook: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write action list: {0}")]
    Csv(String),
}
