//! desk-runner: request-handling layer around the complaint desk.
//!
//! Validates input, speaks line-delimited JSON, and persists the desk to
//! SQLite. The classification engine lives in `complaint_desk_core`.

pub mod commands;
pub mod config;
pub mod store;
