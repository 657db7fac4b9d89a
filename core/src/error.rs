use crate::types::ComplaintId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Complaint '{id}' not found")]
    ComplaintNotFound { id: ComplaintId },

    #[error("Duplicate complaint id '{id}'")]
    DuplicateComplaintId { id: ComplaintId },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Persistence error: {0}")]
    Persistence(#[source] anyhow::Error),
}

pub type DeskResult<T> = Result<T, DeskError>;
