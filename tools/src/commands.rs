//! Request handling for the desk runner.
//!
//! Each command is one JSON object tagged by `type`. Validation happens
//! here, before anything reaches the desk; the desk itself accepts any text.

use crate::{config::RunnerConfig, store::SqliteComplaintStore};
use complaint_desk_core::{
    analyze,
    clock::SystemClock,
    rng::{IdGenerator, SeededIdGenerator, UuidGenerator},
    types::{Category, Status},
    ComplaintDesk, DeskError,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct NewComplaint {
    #[serde(default)]
    pub customer_name: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeskCommand {
    Add {
        #[serde(default)]
        customer_name: Option<String>,
        text: String,
    },
    AddBatch {
        items: Vec<NewComplaint>,
    },
    UpdateStatus {
        id: String,
        status: Status,
    },
    Get {
        id: String,
    },
    List {
        #[serde(default)]
        offset: usize,
        #[serde(default)]
        limit: Option<usize>,
    },
    ByCategory {
        category: Category,
    },
    Recent {
        #[serde(default)]
        limit: Option<usize>,
    },
    Stats,
    DetailedStats,
    Analyze {
        text: String,
    },
    Categories,
    Health,
    Reset,
    Quit,
}

impl DeskCommand {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Add { .. } | Self::AddBatch { .. } | Self::UpdateStatus { .. } | Self::Reset
        )
    }
}

/// Outcome of one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    Quit,
}

pub struct DeskRunner {
    desk:   ComplaintDesk,
    config: RunnerConfig,
    store:  Option<SqliteComplaintStore>,
}

impl DeskRunner {
    /// Build a runner. With a store, the desk starts from its contents.
    pub fn new(config: RunnerConfig, store: Option<SqliteComplaintStore>) -> anyhow::Result<Self> {
        let ids: Box<dyn IdGenerator> = match config.seed {
            Some(seed) => Box::new(SeededIdGenerator::new(seed)),
            None => Box::new(UuidGenerator),
        };
        let mut desk = ComplaintDesk::with_sources(Box::new(SystemClock), ids);
        if let Some(store) = &store {
            desk.load_from(store)?;
        }
        Ok(Self { desk, config, store })
    }

    pub fn desk(&self) -> &ComplaintDesk                  { &self.desk }
    pub fn store(&self) -> Option<&SqliteComplaintStore>  { self.store.as_ref() }

    /// Parse and run one JSON command line.
    pub fn handle_line(&mut self, line: &str) -> anyhow::Result<Reply> {
        let cmd: DeskCommand = serde_json::from_str(line)?;
        self.handle(cmd)
    }

    pub fn handle(&mut self, cmd: DeskCommand) -> anyhow::Result<Reply> {
        // Restored when the save fails, so the desk never runs ahead of the store.
        let before = (cmd.mutates() && self.store.is_some()).then(|| self.desk.snapshot());
        let reply = match cmd {
            DeskCommand::Quit => return Ok(Reply::Quit),
            DeskCommand::Add {
                customer_name,
                text,
            } => {
                let text = self.validate_text(&text)?;
                self.add(customer_name.as_deref(), &text)
            }
            DeskCommand::AddBatch { items } => {
                // Validate everything first so a bad item adds nothing.
                let texts = items
                    .iter()
                    .map(|i| self.validate_text(&i.text))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                let results: Vec<Value> = items
                    .iter()
                    .zip(&texts)
                    .map(|(item, text)| self.add(item.customer_name.as_deref(), text))
                    .collect();
                json!({ "total_processed": results.len(), "results": results })
            }
            DeskCommand::UpdateStatus { id, status } => {
                self.desk.update_status(&id, status).map_err(not_found)?;
                json!({ "id": id, "status": status })
            }
            DeskCommand::Get { id } => match self.desk.get(&id) {
                Some(c) => serde_json::to_value(c)?,
                None => anyhow::bail!("Complaint with ID {id} not found"),
            },
            DeskCommand::List { offset, limit } => {
                let limit = self.config.page_limit(limit);
                serde_json::to_value(self.desk.page(offset, limit))?
            }
            DeskCommand::ByCategory { category } => {
                let complaints = self.desk.by_category(category);
                json!({
                    "category": category,
                    "count": complaints.len(),
                    "complaints": complaints,
                })
            }
            DeskCommand::Recent { limit } => {
                let n = limit.unwrap_or(self.config.recent_limit);
                serde_json::to_value(self.desk.recent(n))?
            }
            DeskCommand::Stats => serde_json::to_value(self.desk.stats())?,
            DeskCommand::DetailedStats => serde_json::to_value(self.desk.detailed_stats())?,
            DeskCommand::Analyze { text } => {
                let text = self.validate_text(&text)?;
                serde_json::to_value(analyze(&text))?
            }
            DeskCommand::Categories => json!({
                "categories": Category::ALL,
                "total": Category::ALL.len(),
            }),
            DeskCommand::Health => json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "total_complaints_processed": self.desk.total_processed(),
            }),
            DeskCommand::Reset => {
                self.desk.reset();
                json!({ "message": "All data has been reset", "status": "success" })
            }
        };

        if let (Some(store), Some(before)) = (&self.store, before) {
            if let Err(err) = self.desk.save_to(store) {
                log::warn!(
                    "save failed, rolling back to {} complaints: {err}",
                    before.complaints.len()
                );
                self.desk.restore(before)?;
                return Err(err.into());
            }
        }
        Ok(Reply::Json(reply))
    }

    fn add(&mut self, customer_name: Option<&str>, text: &str) -> Value {
        let complaint = self.desk.add_complaint(customer_name, text).clone();
        let category_count = self.desk.by_category(complaint.category()).len();
        json!({
            "message": format!(
                "Complaint classified as '{}' with {:.0}% confidence",
                complaint.category(),
                complaint.confidence() * 100.0
            ),
            "total_complaints": self.desk.len(),
            "category_count": category_count,
            "complaint": complaint,
        })
    }

    /// Trimmed text within the configured length bounds.
    fn validate_text(&self, raw: &str) -> anyhow::Result<String> {
        let text = raw.trim();
        if text.is_empty() {
            anyhow::bail!("Complaint text cannot be empty");
        }
        let len = text.chars().count();
        if len < self.config.min_complaint_len {
            anyhow::bail!(
                "Complaint text must be at least {} characters",
                self.config.min_complaint_len
            );
        }
        if len > self.config.max_complaint_len {
            anyhow::bail!(
                "Complaint text must be at most {} characters",
                self.config.max_complaint_len
            );
        }
        Ok(text.to_string())
    }
}

fn not_found(err: DeskError) -> anyhow::Error {
    match err {
        DeskError::ComplaintNotFound { id } => anyhow::anyhow!("Complaint with ID {id} not found"),
        other => other.into(),
    }
}
