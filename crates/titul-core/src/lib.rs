//! Core library for the ЧикенТитул terminal client.
//!
//! Holds everything that is not UI: configuration, the wire data model,
//! the HTTP API client for the four backend endpoints, the persisted
//! session record, and logging setup.

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod types;
