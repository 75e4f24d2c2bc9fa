use crate::errors::CstatsError;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot '{path}': {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Snapshot '{path}' is corrupted: {message}")]
    Corrupted { path: String, message: String },

    #[error("Failed to write snapshot '{path}': {source}")]
    WriteFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Listing payload is not a JSON object")]
    NotAnObject,

    #[error("Failed to serialize snapshot: {message}")]
    SerializeFailed { message: String },
}

impl CstatsError for SnapshotError {
    fn error_code(&self) -> &'static str {
        match self {
            SnapshotError::ReadFailed { .. } => "SNAPSHOT_READ_FAILED",
            SnapshotError::Corrupted { .. } => "SNAPSHOT_CORRUPTED",
            SnapshotError::WriteFailed { .. } => "SNAPSHOT_WRITE_FAILED",
            SnapshotError::NotAnObject => "SNAPSHOT_NOT_AN_OBJECT",
            SnapshotError::SerializeFailed { .. } => "SNAPSHOT_SERIALIZE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        // Exhaustive match ensures new variants force an explicit classification.
        match self {
            SnapshotError::Corrupted { .. } => true,

            SnapshotError::ReadFailed { .. }
            | SnapshotError::WriteFailed { .. }
            | SnapshotError::NotAnObject
            | SnapshotError::SerializeFailed { .. } => false,
        }
    }
}
