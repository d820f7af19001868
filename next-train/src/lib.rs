//! Commuter-rail departure boards.
//!
//! Two halves share one snapshot format: the compactor turns a transit
//! feed directory into a small JSON schedule, and the query engine answers
//! "which trains can I take from A to B, starting now?" against it.

pub mod compactor;
pub mod config;
pub mod domain;
pub mod feed;
pub mod query;
pub mod snapshot;
pub mod web;
