//! Ticket assignment endpoints used by call consoles and sign displays.

use axum::{extract::State, http::StatusCode, Json};
use queueboard_core::{SignageError, Snapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// Request body for assigning a ticket to a service point.
///
/// Missing fields deserialize as blank so they fail validation like empty ones.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignTicketBody {
    pub service_point_name: Option<String>,
    pub ticket_number: Option<String>,
    pub status: Option<String>,
}

/// Error payload. The `"Error :"` key is what existing displays look for.
#[derive(Debug, Serialize)]
pub struct AssignmentErrorResponse {
    #[serde(rename = "Error :")]
    pub error: String,
}

impl From<SignageError> for AssignmentErrorResponse {
    fn from(err: SignageError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Assign a ticket and return every active assignment.
///
/// Connected displays are notified by the registry itself, in change order.
pub async fn assign_ticket(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AssignTicketBody>,
) -> Result<Json<Snapshot>, (StatusCode, Json<AssignmentErrorResponse>)> {
    let snapshot = state
        .registry()
        .assign(
            body.service_point_name.as_deref().unwrap_or_default(),
            body.ticket_number.as_deref().unwrap_or_default(),
            body.status.as_deref().unwrap_or_default(),
        )
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(AssignmentErrorResponse::from(e))))?;

    Ok(Json(snapshot))
}

/// Current assignments for polling displays.
pub async fn active_tickets(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.registry().snapshot())
}
