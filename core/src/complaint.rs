//! The stored complaint record.

use crate::{
    classifier::Classification,
    types::{Category, ComplaintId, Priority, Status},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A classified complaint owned by a `ComplaintDesk`.
///
/// Fields are read-only outside the crate. Only `status` ever changes after
/// creation, and only through `ComplaintDesk::update_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    id: ComplaintId,
    customer_name: Option<String>,
    text: String,
    category: Category,
    priority: Priority,
    status: Status,
    confidence: f64,
    matched_keywords: Vec<String>,
    created_at: DateTime<Utc>,
}

impl Complaint {
    pub(crate) fn new(
        id: ComplaintId,
        customer_name: Option<String>,
        text: String,
        classification: Classification,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_name,
            text,
            category: classification.category,
            priority: classification.priority,
            status: Status::Pending,
            confidence: classification.confidence,
            matched_keywords: classification.matched_keywords,
            created_at,
        }
    }

    /// Rebuild a previously stored complaint. For persistence collaborators
    /// reading records back; new complaints go through `add_complaint`.
    pub fn rehydrate(
        id: ComplaintId,
        customer_name: Option<String>,
        text: String,
        classification: Classification,
        status: Status,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut complaint = Self::new(id, customer_name, text, classification, created_at);
        complaint.status = status;
        complaint
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn matched_keywords(&self) -> &[String] {
        &self.matched_keywords
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
