//! Environment configuration for the binaries.
//!
//! Both binaries read their settings from environment variables. Values are
//! looked up through a closure so tests can supply their own map.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;

use crate::compactor::{CompactConfig, DEFAULT_AGENCY_NAME};
use crate::query::QueryConfig;
use crate::snapshot::MINIFIED_FILE;

/// Default feed directory for the compactor.
pub const DEFAULT_FEED_DIR: &str = "gtfs";

/// Default snapshot output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Default server listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors in environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// BIND_ADDR is not a socket address
    #[error("invalid BIND_ADDR {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    /// TRANSIT_TZ is not an IANA time zone name
    #[error("invalid TRANSIT_TZ {value:?}: not a known time zone")]
    Timezone { value: String },
}

/// Settings for the query server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Snapshot document to serve (`SNAPSHOT_PATH`).
    pub snapshot_path: PathBuf,

    /// Listen address (`BIND_ADDR`).
    pub bind_addr: SocketAddr,

    /// Query settings; the time zone comes from `TRANSIT_TZ`.
    pub query: QueryConfig,
}

impl ServerConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let snapshot_path = lookup("SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR).join(MINIFIED_FILE));

        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::BindAddr {
                value: bind.clone(),
                source,
            })?;

        let query = match lookup("TRANSIT_TZ") {
            Some(name) => QueryConfig::with_timezone(parse_timezone(&name)?),
            None => QueryConfig::default(),
        };

        Ok(Self {
            snapshot_path,
            bind_addr,
            query,
        })
    }

    /// Directory served under `/data`: the one holding the snapshot.
    pub fn data_dir(&self) -> PathBuf {
        match self.snapshot_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Settings for the compactor binary.
#[derive(Debug, Clone)]
pub struct CompactorPaths {
    /// Directory holding the feed tables (`FEED_DIR`).
    pub feed_dir: PathBuf,

    /// Directory the snapshot documents are written to (`OUTPUT_DIR`).
    pub output_dir: PathBuf,

    /// Compaction settings; the agency comes from `AGENCY_NAME`.
    pub compact: CompactConfig,
}

impl CompactorPaths {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let agency = lookup("AGENCY_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AGENCY_NAME.to_string());

        Self {
            feed_dir: lookup("FEED_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FEED_DIR)),
            output_dir: lookup("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            compact: CompactConfig::new(agency.trim()),
        }
    }
}

fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ConfigError::Timezone {
            value: name.to_string(),
        })
}
