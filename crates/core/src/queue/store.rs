//! Queue storage trait and errors.

use std::fmt;

use super::{NewQueue, Queue, QueueUpdate};

/// Error type for queue operations.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueError {
    /// No queue with this uuid.
    NotFound(String),
    /// Input rejected before reaching storage.
    Validation(String),
    /// Cannot perform operation due to current state.
    InvalidState {
        uuid: String,
        operation: String,
        reason: String,
    },
    /// Database error.
    Database(String),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::NotFound(uuid) => write!(f, "Could not find queue with UUID {}", uuid),
            QueueError::Validation(msg) => write!(f, "Invalid queue: {}", msg),
            QueueError::InvalidState {
                uuid,
                operation,
                reason,
            } => write!(f, "Cannot {} queue {}: {}", operation, uuid, reason),
            QueueError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for QueueError {}

/// Trait for queue storage backends.
pub trait QueueStore: Send + Sync {
    /// Persist a new queue and return it with its generated uuid.
    fn create(&self, queue: NewQueue) -> Result<Queue, QueueError>;

    /// Get a queue by uuid, voided or not.
    fn get(&self, uuid: &str) -> Result<Option<Queue>, QueueError>;

    /// List queues ordered by name.
    fn list(&self, include_voided: bool) -> Result<Vec<Queue>, QueueError>;

    /// Apply a partial update.
    fn update(&self, uuid: &str, update: QueueUpdate) -> Result<Queue, QueueError>;

    /// Mark a queue voided with the given reason.
    fn void(&self, uuid: &str, reason: &str) -> Result<Queue, QueueError>;

    /// Permanently delete a queue.
    fn purge(&self, uuid: &str) -> Result<(), QueueError>;
}
