//! In-memory registry of the ticket currently called at each service point.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::{AssignmentField, SignageError, Snapshot, TicketAssignment};
use crate::metrics::{ACTIVE_ASSIGNMENTS, TICKET_ASSIGNMENTS};

/// Process-wide table of active ticket assignments.
///
/// Construct one at startup and share it behind an `Arc`. Every call takes the
/// same lock for its whole duration, so `assign` is a single serialized
/// read-modify-write and `snapshot` never observes a half-applied change.
///
/// A ticket number is held by at most one service point at a time. This is
/// kept structurally with a reverse index rather than by scanning entries.
#[derive(Default)]
pub struct ActiveTicketRegistry {
    inner: Mutex<Assignments>,
    observer: Option<Arc<dyn AssignmentObserver>>,
}

impl fmt::Debug for ActiveTicketRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveTicketRegistry")
            .field("inner", &self.inner)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Receives every accepted change to the registry.
///
/// Called while the registry lock is held, so notifications arrive in the
/// same order as the changes they describe. Implementations must not block
/// and must not call back into the registry.
pub trait AssignmentObserver: Send + Sync {
    fn assignments_changed(&self, snapshot: &Snapshot);
}

#[derive(Debug, Default)]
struct Assignments {
    by_service_point: HashMap<String, TicketAssignment>,
    by_ticket: HashMap<String, String>,
}

/// What an applied assignment displaced, for logging.
struct AssignOutcome {
    moved_from: Option<String>,
    replaced_ticket: Option<String>,
}

impl Assignments {
    fn assign(&mut self, service_point: &str, ticket_number: &str, status: &str) -> AssignOutcome {
        let mut moved_from = None;
        if let Some(previous) = self.by_ticket.remove(ticket_number) {
            self.by_service_point.remove(&previous);
            if previous != service_point {
                moved_from = Some(previous);
            }
        }

        let mut replaced_ticket = None;
        match self.by_service_point.get_mut(service_point) {
            Some(existing) => {
                self.by_ticket.remove(&existing.ticket_number);
                replaced_ticket = Some(std::mem::replace(
                    &mut existing.ticket_number,
                    ticket_number.to_string(),
                ));
                existing.status = status.to_string();
            }
            None => {
                self.by_service_point.insert(
                    service_point.to_string(),
                    TicketAssignment::new(ticket_number, status),
                );
            }
        }
        self.by_ticket
            .insert(ticket_number.to_string(), service_point.to_string());

        AssignOutcome {
            moved_from,
            replaced_ticket,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::from_map(
            self.by_service_point
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        )
    }
}

impl ActiveTicketRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that reports each accepted assignment.
    pub fn with_observer(observer: Arc<dyn AssignmentObserver>) -> Self {
        Self {
            inner: Mutex::default(),
            observer: Some(observer),
        }
    }

    /// Assign a ticket to a service point and return the resulting snapshot.
    ///
    /// Any previous assignment of the same ticket elsewhere is vacated first.
    /// If the service point already shows a ticket it is overwritten in place.
    /// Blank arguments are rejected and leave the registry untouched.
    pub fn assign(
        &self,
        service_point: &str,
        ticket_number: &str,
        status: &str,
    ) -> Result<Snapshot, SignageError> {
        if let Err(e) = validate(service_point, ticket_number, status) {
            warn!("Rejected ticket assignment: {}", e);
            TICKET_ASSIGNMENTS.with_label_values(&["rejected"]).inc();
            return Err(e);
        }

        let (outcome, snapshot) = {
            let mut assignments = self.lock();
            let outcome = assignments.assign(service_point, ticket_number, status);
            let snapshot = assignments.snapshot();
            ACTIVE_ASSIGNMENTS.set(snapshot.len() as i64);
            if let Some(observer) = &self.observer {
                observer.assignments_changed(&snapshot);
            }
            (outcome, snapshot)
        };

        match outcome.moved_from {
            Some(ref previous) => {
                TICKET_ASSIGNMENTS.with_label_values(&["moved"]).inc();
                info!(
                    ticket_number,
                    from = %previous,
                    to = service_point,
                    status,
                    "Ticket moved to new service point"
                );
            }
            None => {
                TICKET_ASSIGNMENTS.with_label_values(&["assigned"]).inc();
                debug!(ticket_number, service_point, status, "Ticket assigned");
            }
        }
        if let Some(replaced) = outcome.replaced_ticket.filter(|t| t != ticket_number) {
            debug!(service_point, replaced = %replaced, "Service point no longer shows ticket");
        }

        Ok(snapshot)
    }

    /// Current assignments without mutation.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Run `attach` and take a snapshot under one lock.
    ///
    /// A subscription opened in `attach` sees exactly the changes made after
    /// the returned snapshot.
    pub fn snapshot_with<T>(&self, attach: impl FnOnce() -> T) -> (Snapshot, T) {
        let assignments = self.lock();
        let attached = attach();
        (assignments.snapshot(), attached)
    }

    // Both maps are updated together before the guard drops.
    fn lock(&self) -> MutexGuard<'_, Assignments> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn validate(service_point: &str, ticket_number: &str, status: &str) -> Result<(), SignageError> {
    for (value, field) in [
        (service_point, AssignmentField::ServicePointName),
        (ticket_number, AssignmentField::TicketNumber),
        (status, AssignmentField::Status),
    ] {
        if value.trim().is_empty() {
            return Err(SignageError::Validation { field });
        }
    }
    Ok(())
}
