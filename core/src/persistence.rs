//! Persistence seam.
//!
//! RULE: the desk itself does no I/O. Anything that stores complaints
//! (a database, a file, another process) implements this trait and is
//! handed to `ComplaintDesk::load_from` / `save_to` by the caller.

use crate::complaint::Complaint;

pub trait ComplaintPersistence {
    /// Every stored complaint, oldest first.
    fn load(&self) -> anyhow::Result<Vec<Complaint>>;

    /// Replace everything stored with `complaints` (oldest first).
    fn save(&self, complaints: &[Complaint]) -> anyhow::Result<()>;
}
