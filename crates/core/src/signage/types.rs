//! Value types shared by the registry and its consumers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// The ticket currently occupying a service point, plus its display status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketAssignment {
    pub ticket_number: String,
    pub status: String,
}

impl TicketAssignment {
    pub fn new(ticket_number: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            ticket_number: ticket_number.into(),
            status: status.into(),
        }
    }
}

/// Consistent view of every active assignment, keyed by service point.
///
/// Serializes as a plain JSON object (`{"Room A": {"status": .., "ticketNumber": ..}}`),
/// which is the shape sign displays poll for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, TicketAssignment>);

impl Snapshot {
    pub(crate) fn from_map(map: BTreeMap<String, TicketAssignment>) -> Self {
        Self(map)
    }

    /// Assignment for a service point, if any.
    pub fn get(&self, service_point: &str) -> Option<&TicketAssignment> {
        self.0.get(service_point)
    }

    /// Service point where the given ticket is currently assigned.
    pub fn service_point_of(&self, ticket_number: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, assignment)| assignment.ticket_number == ticket_number)
            .map(|(service_point, _)| service_point.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TicketAssignment)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Field of an assignment request, used to report which one was blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentField {
    ServicePointName,
    TicketNumber,
    Status,
}

impl AssignmentField {
    /// Name of the field as it appears in request bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentField::ServicePointName => "servicePointName",
            AssignmentField::TicketNumber => "ticketNumber",
            AssignmentField::Status => "status",
        }
    }
}

impl std::fmt::Display for AssignmentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignageError {
    #[error("One of the required fields is empty: {field}")]
    Validation { field: AssignmentField },
}
