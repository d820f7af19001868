//! Reading and writing snapshot documents on disk.

use std::path::{Path, PathBuf};

use tracing::info;

use super::Snapshot;
use super::error::SnapshotError;

/// File name of the human-readable snapshot.
pub const PRETTY_FILE: &str = "schedule.json";

/// File name of the minified snapshot served to clients.
pub const MINIFIED_FILE: &str = "schedule.min.json";

/// Where a snapshot was written and how large each document is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSnapshot {
    pub pretty_path: PathBuf,
    pub pretty_bytes: usize,
    pub minified_path: PathBuf,
    pub minified_bytes: usize,
}

/// Write the pretty-printed and minified documents into `dir`.
///
/// Both documents are encoded and staged next to their final paths before
/// either is renamed into place, so a failed write leaves any previous pair
/// untouched. The directory is created if needed.
pub fn write_snapshot(snapshot: &Snapshot, dir: &Path) -> Result<WrittenSnapshot, SnapshotError> {
    let pretty = serde_json::to_string_pretty(snapshot)?;
    let minified = serde_json::to_string(snapshot)?;

    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|source| SnapshotError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let pretty_path = dir.join(PRETTY_FILE);
    let minified_path = dir.join(MINIFIED_FILE);
    let pretty_staged = staging_path(&pretty_path);
    let minified_staged = staging_path(&minified_path);

    write_file(&pretty_staged, &pretty)?;
    if let Err(err) = write_file(&minified_staged, &minified) {
        let _ = std::fs::remove_file(&pretty_staged);
        return Err(err);
    }
    rename_file(&pretty_staged, &pretty_path)?;
    rename_file(&minified_staged, &minified_path)?;

    info!(
        pretty = %pretty_path.display(),
        minified = %minified_path.display(),
        minified_bytes = minified.len(),
        "Wrote snapshot"
    );

    Ok(WrittenSnapshot {
        pretty_path,
        pretty_bytes: pretty.len(),
        minified_path,
        minified_bytes: minified.len(),
    })
}

/// Load a snapshot document, pretty or minified.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, SnapshotError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_file(path: &Path, contents: &str) -> Result<(), SnapshotError> {
    std::fs::write(path, contents).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn rename_file(from: &Path, to: &Path) -> Result<(), SnapshotError> {
    std::fs::rename(from, to).map_err(|source| SnapshotError::Io {
        path: to.to_path_buf(),
        source,
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Departure, FeedDate, HolidayMap, RouteType, ServiceType, Station};
    use crate::snapshot::StationTimetable;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn snapshot() -> Snapshot {
        let mut schedule = BTreeMap::new();
        schedule.insert(
            "sf".to_string(),
            StationTimetable {
                n: vec![],
                s: vec![Departure::new(310, "101", RouteType::Local, ServiceType::Weekday)],
            },
        );
        Snapshot {
            stations: vec![Station::new("sf", "San Francisco")],
            schedule,
            holidays: HolidayMap::new(),
            valid_from: FeedDate::parse("20240101").unwrap(),
            valid_to: FeedDate::parse("20241231").unwrap(),
        }
    }

    #[test]
    fn write_and_load_both_documents() {
        let dir = tempdir().unwrap();
        let written = write_snapshot(&snapshot(), dir.path()).unwrap();

        assert!(written.pretty_bytes > written.minified_bytes);
        assert_eq!(load_snapshot(&written.pretty_path).unwrap(), snapshot());
        assert_eq!(load_snapshot(&written.minified_path).unwrap(), snapshot());

        let minified = std::fs::read_to_string(&written.minified_path).unwrap();
        assert!(!minified.contains('\n'));
        assert_eq!(minified.len(), written.minified_bytes);
    }

    #[test]
    fn creates_output_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("public").join("data");
        let written = write_snapshot(&snapshot(), &nested).unwrap();
        assert!(written.minified_path.exists());
        assert_eq!(written.pretty_path, nested.join(PRETTY_FILE));
    }

    #[test]
    fn failed_write_leaves_no_partial_pair() {
        let dir = tempdir().unwrap();
        // A directory in the way makes the minified document unwritable
        std::fs::create_dir(dir.path().join(format!("{MINIFIED_FILE}.tmp"))).unwrap();

        let err = write_snapshot(&snapshot(), dir.path()).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(!dir.path().join(PRETTY_FILE).exists());
        assert!(!dir.path().join(format!("{PRETTY_FILE}.tmp")).exists());
        assert!(!dir.path().join(MINIFIED_FILE).exists());
    }

    #[test]
    fn rewrite_replaces_previous_pair() {
        let dir = tempdir().unwrap();
        write_snapshot(&snapshot(), dir.path()).unwrap();

        let mut updated = snapshot();
        updated.valid_to = FeedDate::parse("20250630").unwrap();
        let written = write_snapshot(&updated, dir.path()).unwrap();

        assert_eq!(load_snapshot(&written.pretty_path).unwrap(), updated);
        assert_eq!(load_snapshot(&written.minified_path).unwrap(), updated);
        assert!(!dir.path().join(format!("{MINIFIED_FILE}.tmp")).exists());
    }

    #[test]
    fn load_missing_file() {
        let err = load_snapshot(Path::new("/nonexistent/schedule.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }

    #[test]
    fn load_invalid_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(MINIFIED_FILE);
        std::fs::write(&path, r#"{"stations":[]}"#).unwrap();
        assert!(matches!(
            load_snapshot(&path).unwrap_err(),
            SnapshotError::Json(_)
        ));
    }
}
