//! Runner configuration.
//!
//! Everything has a default, so the config file is optional and may name
//! only the fields it changes. CLI flags override the file.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Shortest accepted complaint, in characters, after trimming.
    pub min_complaint_len: usize,
    pub max_complaint_len: usize,
    pub default_page_limit: usize,
    pub max_page_limit: usize,
    pub recent_limit: usize,
    /// SQLite file to load from and save to. `None` keeps the desk in memory.
    pub db_path: Option<String>,
    /// Seed for reproducible complaint ids. `None` uses random v4 UUIDs.
    pub seed: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_complaint_len:  5,
            max_complaint_len:  2000,
            default_page_limit: 100,
            max_page_limit:     1000,
            recent_limit:       10,
            db_path:            None,
            seed:               None,
        }
    }
}

impl RunnerConfig {
    /// Load from a JSON file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: RunnerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_complaint_len > self.max_complaint_len {
            anyhow::bail!(
                "min_complaint_len ({}) exceeds max_complaint_len ({})",
                self.min_complaint_len,
                self.max_complaint_len
            );
        }
        if self.max_page_limit == 0 {
            anyhow::bail!("max_page_limit must be at least 1");
        }
        Ok(())
    }

    /// Clamp a requested page size into `1..=max_page_limit`.
    pub fn page_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_limit)
            .clamp(1, self.max_page_limit)
    }
}
