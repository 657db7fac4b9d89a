//! Snapshot serialization: the full complaint collection to/from JSON.
//!
//! A snapshot captures everything needed to rebuild a desk. Restoring one
//! replaces the collection wholesale.

use crate::{complaint::Complaint, error::DeskResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskSnapshot {
    pub version: u32,
    pub taken_at: DateTime<Utc>,
    /// Insertion order, oldest first.
    pub complaints: Vec<Complaint>,
}

impl DeskSnapshot {
    pub fn to_json(&self) -> DeskResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> DeskResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
