//! Compact a transit feed directory into schedule snapshot documents.
//!
//! Takes no arguments. `FEED_DIR`, `OUTPUT_DIR` and `AGENCY_NAME` override
//! the defaults.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use next_train::compactor::compact_dir;
use next_train::config::CompactorPaths;
use next_train::snapshot::write_snapshot;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let paths = CompactorPaths::from_env();
    println!("Reading feed from {}", paths.feed_dir.display());

    let compaction = match compact_dir(&paths.feed_dir, &paths.compact) {
        Ok(compaction) => compaction,
        Err(e) => {
            eprintln!("Compaction failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let written = match write_snapshot(&compaction.snapshot, &paths.output_dir) {
        Ok(written) => written,
        Err(e) => {
            eprintln!("Failed to write schedule: {e}");
            return ExitCode::FAILURE;
        }
    };

    let summary = &compaction.summary;
    println!("Stations:   {}", summary.stations);
    println!("Departures: {}", summary.departures);
    println!("Valid:      {} to {}", summary.valid_from, summary.valid_to);
    println!("Exceptions: {} holiday dates", summary.holidays);
    if summary.skipped_stop_times > 0 || summary.duplicates_removed > 0 {
        println!(
            "Dropped:    {} unresolved stop-times, {} duplicates",
            summary.skipped_stop_times, summary.duplicates_removed
        );
    }
    println!(
        "Wrote {} ({} bytes)",
        written.pretty_path.display(),
        written.pretty_bytes
    );
    println!(
        "Wrote {} ({} bytes)",
        written.minified_path.display(),
        written.minified_bytes
    );

    ExitCode::SUCCESS
}
