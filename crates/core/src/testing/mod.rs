//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use queueboard_core::testing::{fixtures, MockQueueStore};
//!
//! let store = Arc::new(MockQueueStore::new());
//! store.insert(fixtures::queue("b5ffbb90-86f4-4d9c-8b6c-3713d748ef74", "Triage"));
//!
//! let service = QueueService::new(store.clone());
//! ```

mod mock_queue_store;

pub use mock_queue_store::MockQueueStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::Utc;

    use crate::queue::Queue;

    /// Create an active queue with the given uuid and name.
    pub fn queue(uuid: &str, name: &str) -> Queue {
        Queue {
            uuid: uuid.to_string(),
            name: name.to_string(),
            description: Some(format!("{} queue", name)),
            location: Some("Outpatient".to_string()),
            date_created: Utc::now(),
            voided: false,
            void_reason: None,
            date_voided: None,
        }
    }
}
