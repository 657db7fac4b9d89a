//! The complaint desk: owns the classified complaint collection.
//!
//! RULES:
//!   - The collection is in insertion order, oldest first. Nothing reorders it.
//!   - Complaints are only created by `add_complaint` and only mutated by
//!     `update_status`. They are never removed individually; `reset` clears all.
//!   - Statistics are recomputed from the collection on every request.
//!   - Mutations take `&mut self`, so one writer at a time is enforced by
//!     the borrow checker. `SharedComplaintDesk` extends that across threads.

use crate::{
    classifier::classify,
    clock::{Clock, SystemClock},
    complaint::Complaint,
    error::{DeskError, DeskResult},
    persistence::ComplaintPersistence,
    rng::{IdGenerator, UuidGenerator},
    snapshot::{DeskSnapshot, SNAPSHOT_VERSION},
    stats::{compute_detailed_stats, compute_stats, ComplaintStats, DetailedStats},
    types::{Category, Status},
};
use serde::Serialize;
use std::collections::HashSet;

/// One page of complaints in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a> {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub items: Vec<&'a Complaint>,
}

pub struct ComplaintDesk {
    complaints: Vec<Complaint>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl Default for ComplaintDesk {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplaintDesk {
    /// Wall-clock timestamps and random v4 ids.
    pub fn new() -> Self {
        Self::with_sources(Box::new(SystemClock), Box::new(UuidGenerator))
    }

    /// Explicit time and id sources. Tests pass fixed ones here.
    pub fn with_sources(clock: Box<dyn Clock>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            complaints: Vec::new(),
            clock,
            ids,
        }
    }

    // ── Mutations ──────────────────────────────────────────────

    /// Classify `text`, store it as a new `Pending` complaint and return it.
    /// Never fails; validating the text is the caller's job.
    pub fn add_complaint(&mut self, customer_name: Option<&str>, text: &str) -> &Complaint {
        let classification = classify(text);
        let complaint = Complaint::new(
            self.ids.next_id(),
            customer_name.map(String::from),
            text.to_string(),
            classification,
            self.clock.now(),
        );
        log::debug!(
            "complaint {} added: category={} priority={} total={}",
            complaint.id(),
            complaint.category(),
            complaint.priority(),
            self.complaints.len() + 1,
        );
        self.complaints.push(complaint);
        &self.complaints[self.complaints.len() - 1]
    }

    /// Add each `(customer_name, text)` in order. Returns the stored records.
    pub fn add_batch<'a, I>(&mut self, items: I) -> Vec<Complaint>
    where
        I: IntoIterator<Item = (Option<&'a str>, &'a str)>,
    {
        items
            .into_iter()
            .map(|(name, text)| self.add_complaint(name, text).clone())
            .collect()
    }

    /// Overwrite the status of complaint `id`.
    /// Unknown ids are an error and leave the collection untouched.
    pub fn update_status(&mut self, id: &str, status: Status) -> DeskResult<()> {
        let Some(complaint) = self.complaints.iter_mut().find(|c| c.id() == id) else {
            log::warn!("status update for unknown complaint {id}");
            return Err(DeskError::ComplaintNotFound { id: id.to_string() });
        };
        log::debug!("complaint {id}: {} -> {status}", complaint.status());
        complaint.set_status(status);
        Ok(())
    }

    /// Drop every complaint.
    pub fn reset(&mut self) {
        log::info!("desk reset: {} complaints cleared", self.complaints.len());
        self.complaints.clear();
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn get(&self, id: &str) -> Option<&Complaint> {
        self.complaints.iter().find(|c| c.id() == id)
    }

    /// All complaints, oldest first.
    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }

    /// Up to `n` complaints, newest first.
    pub fn recent(&self, n: usize) -> Vec<&Complaint> {
        self.complaints.iter().rev().take(n).collect()
    }

    pub fn page(&self, offset: usize, limit: usize) -> Page<'_> {
        Page {
            total: self.complaints.len(),
            offset,
            limit,
            items: self.complaints.iter().skip(offset).take(limit).collect(),
        }
    }

    pub fn by_category(&self, category: Category) -> Vec<&Complaint> {
        self.complaints
            .iter()
            .filter(|c| c.category() == category)
            .collect()
    }

    pub fn stats(&self) -> ComplaintStats {
        compute_stats(&self.complaints)
    }

    pub fn detailed_stats(&self) -> DetailedStats {
        compute_detailed_stats(&self.complaints)
    }

    /// Complaints classified since the last reset or restore.
    pub fn total_processed(&self) -> usize {
        self.complaints.len()
    }

    pub fn len(&self) -> usize {
        self.complaints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complaints.is_empty()
    }

    // ── Snapshots and persistence hooks ────────────────────────

    pub fn snapshot(&self) -> DeskSnapshot {
        DeskSnapshot {
            version: SNAPSHOT_VERSION,
            taken_at: self.clock.now(),
            complaints: self.complaints.clone(),
        }
    }

    /// Replace the collection with the snapshot's.
    /// A snapshot repeating an id is rejected and the current collection kept.
    pub fn restore(&mut self, snapshot: DeskSnapshot) -> DeskResult<()> {
        ensure_unique_ids(&snapshot.complaints)?;
        log::info!(
            "desk restored from snapshot v{} ({} complaints)",
            snapshot.version,
            snapshot.complaints.len(),
        );
        self.complaints = snapshot.complaints;
        Ok(())
    }

    /// Replace the collection with whatever `store` holds.
    /// On error, including a repeated id, the current collection is kept.
    pub fn load_from(&mut self, store: &dyn ComplaintPersistence) -> DeskResult<()> {
        let loaded = store.load().map_err(DeskError::Persistence)?;
        ensure_unique_ids(&loaded)?;
        log::info!("desk loaded {} complaints", loaded.len());
        self.complaints = loaded;
        Ok(())
    }

    pub fn save_to(&self, store: &dyn ComplaintPersistence) -> DeskResult<()> {
        store
            .save(&self.complaints)
            .map_err(DeskError::Persistence)?;
        log::info!("desk saved {} complaints", self.complaints.len());
        Ok(())
    }
}

fn ensure_unique_ids(complaints: &[Complaint]) -> DeskResult<()> {
    let mut seen = HashSet::with_capacity(complaints.len());
    match complaints.iter().find(|c| !seen.insert(c.id())) {
        Some(dup) => {
            log::warn!("rejected collection: complaint id {} appears twice", dup.id());
            Err(DeskError::DuplicateComplaintId { id: dup.id().to_string() })
        }
        None => Ok(()),
    }
}
