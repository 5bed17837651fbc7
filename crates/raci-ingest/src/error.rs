use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The byte stream could not be opened as a structured workbook.
    /// Irregular content inside a readable workbook is never an error;
    /// it degrades to empty parse results instead.
    #[error("template is not a readable workbook: {source}")]
    UnreadableTemplate {
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
