//! Web layer for the departure query engine.
//!
//! Provides JSON endpoints for listing stations and departure boards, and
//! serves the snapshot documents as static files.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
