//! Active ticket assignments shown on digital signage.
//!
//! Tracks which queue ticket is currently being called or served at each
//! service point (room, counter, window). Sign displays either poll the
//! snapshot or subscribe to pushed updates.

mod registry;
mod types;

pub use registry::{ActiveTicketRegistry, AssignmentObserver};
pub use types::{AssignmentField, SignageError, Snapshot, TicketAssignment};
