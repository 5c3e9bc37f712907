//! Mock queue store for testing.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::queue::{NewQueue, Queue, QueueError, QueueStore, QueueUpdate};

/// In-memory implementation of the QueueStore trait.
///
/// Provides controllable behavior for testing:
/// - Seed queues directly with [`MockQueueStore::insert`]
/// - Count calls per operation for assertions
/// - Inject a one-shot failure with [`MockQueueStore::set_next_error`]
#[derive(Debug, Default)]
pub struct MockQueueStore {
    queues: Mutex<HashMap<String, Queue>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    next_error: Mutex<Option<QueueError>>,
}

impl MockQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a queue as-is.
    pub fn insert(&self, queue: Queue) {
        lock(&self.queues).insert(queue.uuid.clone(), queue);
    }

    /// Number of times the named operation reached the store.
    pub fn call_count(&self, operation: &str) -> usize {
        lock(&self.calls)
            .get(operation)
            .copied()
            .unwrap_or(0)
    }

    /// Configure the next operation to fail with the given error.
    pub fn set_next_error(&self, error: QueueError) {
        *lock(&self.next_error) = Some(error);
    }

    fn record(&self, operation: &'static str) -> Result<(), QueueError> {
        *lock(&self.calls).entry(operation).or_insert(0) += 1;
        match lock(&self.next_error).take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl QueueStore for MockQueueStore {
    fn create(&self, queue: NewQueue) -> Result<Queue, QueueError> {
        self.record("create")?;
        let created = Queue {
            uuid: format!("mock-queue-{}", self.call_count("create")),
            name: queue.name,
            description: queue.description,
            location: queue.location,
            date_created: Utc::now(),
            voided: false,
            void_reason: None,
            date_voided: None,
        };
        self.insert(created.clone());
        Ok(created)
    }

    fn get(&self, uuid: &str) -> Result<Option<Queue>, QueueError> {
        self.record("get")?;
        Ok(lock(&self.queues).get(uuid).cloned())
    }

    fn list(&self, include_voided: bool) -> Result<Vec<Queue>, QueueError> {
        self.record("list")?;
        let mut queues: Vec<Queue> = lock(&self.queues)
            .values()
            .filter(|q| include_voided || !q.voided)
            .cloned()
            .collect();
        queues.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(queues)
    }

    fn update(&self, uuid: &str, update: QueueUpdate) -> Result<Queue, QueueError> {
        self.record("update")?;
        let mut queues = lock(&self.queues);
        let queue = queues
            .get_mut(uuid)
            .ok_or_else(|| QueueError::NotFound(uuid.to_string()))?;
        update.apply_to(queue);
        Ok(queue.clone())
    }

    fn void(&self, uuid: &str, reason: &str) -> Result<Queue, QueueError> {
        self.record("void")?;
        let mut queues = lock(&self.queues);
        let queue = queues
            .get_mut(uuid)
            .ok_or_else(|| QueueError::NotFound(uuid.to_string()))?;
        if queue.voided {
            return Err(QueueError::InvalidState {
                uuid: uuid.to_string(),
                operation: "void".to_string(),
                reason: "queue is already voided".to_string(),
            });
        }
        queue.voided = true;
        queue.void_reason = Some(reason.to_string());
        queue.date_voided = Some(Utc::now());
        Ok(queue.clone())
    }

    fn purge(&self, uuid: &str) -> Result<(), QueueError> {
        self.record("purge")?;
        lock(&self.queues)
            .remove(uuid)
            .map(|_| ())
            .ok_or_else(|| QueueError::NotFound(uuid.to_string()))
    }
}
