//! Snapshot persistence error types.

use std::path::PathBuf;

/// Errors from reading or writing snapshot documents.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Filesystem operation failed
    #[error("snapshot I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document could not be encoded or decoded
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SnapshotError::Io {
            path: PathBuf::from("data/schedule.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "snapshot I/O error at data/schedule.json: not found"
        );
    }

    #[test]
    fn from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SnapshotError = json_err.into();
        assert!(matches!(err, SnapshotError::Json(_)));
    }
}
