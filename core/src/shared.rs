//! Thread-safe handle to a single `ComplaintDesk`.
//!
//! Writers take the write lock, so mutations are serialized and readers
//! never observe one half-applied. Readers share the read lock.
//! A poisoned lock is recovered: no desk mutation can leave the collection
//! inconsistent part-way through.

use crate::{
    complaint::Complaint,
    desk::ComplaintDesk,
    error::DeskResult,
    stats::{ComplaintStats, DetailedStats},
    types::Status,
};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Clone, Default)]
pub struct SharedComplaintDesk {
    inner: Arc<RwLock<ComplaintDesk>>,
}

impl SharedComplaintDesk {
    pub fn new(desk: ComplaintDesk) -> Self {
        Self {
            inner: Arc::new(RwLock::new(desk)),
        }
    }

    pub fn add_complaint(&self, customer_name: Option<&str>, text: &str) -> Complaint {
        self.write().add_complaint(customer_name, text).clone()
    }

    pub fn update_status(&self, id: &str, status: Status) -> DeskResult<()> {
        self.write().update_status(id, status)
    }

    pub fn reset(&self) {
        self.write().reset();
    }

    pub fn get(&self, id: &str) -> Option<Complaint> {
        self.read().get(id).cloned()
    }

    pub fn stats(&self) -> ComplaintStats {
        self.read().stats()
    }

    pub fn detailed_stats(&self) -> DetailedStats {
        self.read().detailed_stats()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Run `f` against the desk under the read lock.
    pub fn with_read<R>(&self, f: impl FnOnce(&ComplaintDesk) -> R) -> R {
        f(&*self.read())
    }

    /// Run `f` against the desk under the write lock. `f` is applied atomically
    /// with respect to every reader.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut ComplaintDesk) -> R) -> R {
        f(&mut *self.write())
    }

    fn read(&self) -> RwLockReadGuard<'_, ComplaintDesk> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ComplaintDesk> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
