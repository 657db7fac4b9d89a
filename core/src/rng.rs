//! Complaint identifier generation.
//!
//! Ids only need to be unique; callers must treat them as opaque.
//! `UuidGenerator` draws from the platform RNG. `SeededIdGenerator` draws
//! v4-shaped UUIDs from a `Pcg64Mcg` stream seeded explicitly, so a whole
//! run (ids included) replays byte-for-byte from the same seed.

use crate::types::ComplaintId;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::sync::Mutex;
use uuid::{Builder, Uuid};

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> ComplaintId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> ComplaintId {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic v4-shaped UUIDs from a seeded PCG stream.
pub struct SeededIdGenerator {
    inner: Mutex<Pcg64Mcg>,
}

impl SeededIdGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Mutex::new(Pcg64Mcg::seed_from_u64(seed)),
        }
    }
}

impl IdGenerator for SeededIdGenerator {
    fn next_id(&self) -> ComplaintId {
        let mut bytes = [0u8; 16];
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid().to_string()
    }
}
