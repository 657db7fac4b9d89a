//! Complaint classification and aggregation engine.
//!
//! Two entry points:
//!   - `classifier::classify` — pure text → `Classification`.
//!   - `desk::ComplaintDesk` — owns classified complaints and derives
//!     statistics from them on demand.
//!
//! The engine does no I/O. Persistence, transport and input validation
//! belong to the caller (see `persistence::ComplaintPersistence`).

pub mod classifier;
pub mod clock;
pub mod complaint;
pub mod desk;
pub mod error;
pub mod keywords;
pub mod persistence;
pub mod rng;
pub mod shared;
pub mod snapshot;
pub mod stats;
pub mod types;

pub use classifier::{analyze, classify, Analysis, Classification};
pub use complaint::Complaint;
pub use desk::ComplaintDesk;
pub use error::{DeskError, DeskResult};
pub use shared::SharedComplaintDesk;
pub use stats::{ComplaintStats, DetailedStats};
pub use types::{Category, ComplaintId, Priority, Status};
