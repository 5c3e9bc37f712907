//! Patient queues: named, location-bound lines that tickets are issued from.

mod service;
mod sqlite_store;
mod store;
mod types;

pub use service::QueueService;
pub use sqlite_store::SqliteQueueStore;
pub use store::{QueueError, QueueStore};
pub use types::{NewQueue, Queue, QueueUpdate};
