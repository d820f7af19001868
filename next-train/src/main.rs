use std::process::ExitCode;

use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use next_train::config::ServerConfig;
use next_train::snapshot::load_snapshot;
use next_train::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let snapshot = match load_snapshot(&config.snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Failed to load schedule: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        path = %config.snapshot_path.display(),
        stations = snapshot.stations.len(),
        departures = snapshot.departure_count(),
        holidays = snapshot.holidays.len(),
        valid_from = %snapshot.valid_from,
        valid_to = %snapshot.valid_to,
        "Loaded schedule"
    );

    let state = AppState::new(snapshot, config.query.clone());
    let today = state
        .engine
        .service_day(state.engine.local_time(&Utc::now()));
    if !state.snapshot().is_valid_on(today.date) {
        warn!(
            service_date = %today.date,
            "Today is outside the schedule's validity window; results may be stale"
        );
    }

    let app = create_router(state, &config.data_dir());

    let addr = config.bind_addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Departure board listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health          - Health check");
    println!("  GET  /api/stations    - Stations, north to south");
    println!("  GET  /api/departures  - Departures (?from=&to=[&direction=n|s][&at=RFC3339])");
    println!("  GET  /data/...        - Raw schedule documents");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
