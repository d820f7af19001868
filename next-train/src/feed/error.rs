//! Feed loading error types.

use std::path::PathBuf;

/// Errors that abort loading a feed directory.
///
/// Individual rows that fail to parse are skipped, not reported here.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A table file could not be opened
    #[error("cannot open feed table {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A table's header row or structure is unreadable
    #[error("malformed feed table {table}: {source}")]
    Malformed {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A table lacks a column every row needs
    #[error("feed table {table} is missing required column {column}")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::MissingColumn {
            table: "trips.txt",
            column: "trip_id",
        };
        assert_eq!(
            err.to_string(),
            "feed table trips.txt is missing required column trip_id"
        );
    }

    #[test]
    fn open_error_mentions_path() {
        let source = csv::Reader::from_path("/nonexistent/feed/stops.txt").unwrap_err();
        let err = FeedError::Open {
            path: PathBuf::from("/nonexistent/feed/stops.txt"),
            source,
        };
        assert!(err.to_string().contains("/nonexistent/feed/stops.txt"));
    }
}
