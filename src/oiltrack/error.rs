use crate::model::{DraftField, RecordId};
use thiserror::Error;

/// Reasons a draft cannot be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<DraftField>),

    #[error("{field} must be a whole number, got \"{value}\"")]
    NotANumber { field: DraftField, value: String },
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Vehicle not found: {0}")]
    NotFound(RecordId),

    #[error("No vehicle matches {0}")]
    SelectorNotFound(String),

    #[error("Store unreachable: {0}")]
    Transport(String),

    #[error("Store rejected the request ({status}): {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl TrackerError {
    /// True for failures of the backing store, as opposed to local input or lookup errors.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            TrackerError::Transport(_) | TrackerError::RemoteRejected { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
