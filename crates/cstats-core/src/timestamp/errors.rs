use crate::errors::CstatsError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write timestamp to '{path}': {source}")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize timestamp store: {message}")]
    SerializeFailed { message: String },
}

impl CstatsError for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            StoreError::WriteFailed { .. } => "STORE_WRITE_FAILED",
            StoreError::SerializeFailed { .. } => "STORE_SERIALIZE_FAILED",
        }
    }
}
