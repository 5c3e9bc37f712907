//! Queue service the REST resource delegates to.

use std::sync::Arc;

use tracing::info;

use super::{NewQueue, Queue, QueueError, QueueStore, QueueUpdate};
use crate::metrics::QUEUE_OPERATIONS;

/// Validating front for a [`QueueStore`].
#[derive(Clone)]
pub struct QueueService {
    store: Arc<dyn QueueStore>,
}

impl QueueService {
    pub fn new(store: Arc<dyn QueueStore>) -> Self {
        Self { store }
    }

    pub fn get_queue_by_uuid(&self, uuid: &str) -> Result<Option<Queue>, QueueError> {
        self.store.get(uuid)
    }

    pub fn get_all_queues(&self, include_voided: bool) -> Result<Vec<Queue>, QueueError> {
        self.store.list(include_voided)
    }

    pub fn create_queue(&self, queue: NewQueue) -> Result<Queue, QueueError> {
        require_non_blank("name", &queue.name)?;

        let created = self.store.create(queue)?;
        QUEUE_OPERATIONS.with_label_values(&["create"]).inc();
        info!(uuid = %created.uuid, name = %created.name, "Queue created");
        Ok(created)
    }

    pub fn update_queue(&self, uuid: &str, update: QueueUpdate) -> Result<Queue, QueueError> {
        if let Some(ref name) = update.name {
            require_non_blank("name", name)?;
        }

        let updated = self.store.update(uuid, update)?;
        QUEUE_OPERATIONS.with_label_values(&["update"]).inc();
        Ok(updated)
    }

    /// Void a queue. A reason is mandatory.
    pub fn void_queue(&self, uuid: &str, reason: &str) -> Result<Queue, QueueError> {
        require_non_blank("void reason", reason)?;

        let voided = self.store.void(uuid, reason)?;
        QUEUE_OPERATIONS.with_label_values(&["void"]).inc();
        info!(uuid, reason, "Queue voided");
        Ok(voided)
    }

    pub fn purge_queue(&self, uuid: &str) -> Result<(), QueueError> {
        self.store.purge(uuid)?;
        QUEUE_OPERATIONS.with_label_values(&["purge"]).inc();
        info!(uuid, "Queue purged");
        Ok(())
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<(), QueueError> {
    if value.trim().is_empty() {
        return Err(QueueError::Validation(format!("{} must not be blank", field)));
    }
    Ok(())
}
