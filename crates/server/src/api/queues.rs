//! Queue REST resource.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use queueboard_core::{NewQueue, Queue, QueueError, QueueUpdate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

const RESOURCE_PATH: &str = "/api/v1/queue";

// ============================================================================
// Request/Response Types
// ============================================================================

/// How much of a queue to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// uuid, display, name, description and links
    Ref,
    /// ref fields plus location
    #[default]
    Default,
    /// default fields plus audit info
    Full,
}

#[derive(Debug, Default, Deserialize)]
pub struct RepresentationParams {
    pub v: Option<Representation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueuesParams {
    pub v: Option<Representation>,
    /// Include voided queues
    pub include_all: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQueueParams {
    /// Void reason (required unless purging)
    pub reason: Option<String>,
    /// Delete permanently instead of voiding
    pub purge: Option<bool>,
}

/// Request body for creating a queue
#[derive(Debug, Deserialize)]
pub struct CreateQueueBody {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Request body for updating a queue; absent fields are left alone
#[derive(Debug, Deserialize)]
pub struct UpdateQueueBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListQueuesResponse {
    pub results: Vec<Value>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct QueueErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<QueueErrorResponse>);

fn error_response(err: QueueError) -> ApiError {
    let status = match err {
        QueueError::NotFound(_) => StatusCode::NOT_FOUND,
        QueueError::Validation(_) => StatusCode::BAD_REQUEST,
        QueueError::InvalidState { .. } => StatusCode::CONFLICT,
        QueueError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(QueueErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Render a queue at the requested level of detail.
pub fn represent(queue: &Queue, representation: Representation) -> Value {
    let self_uri = format!("{}/{}", RESOURCE_PATH, queue.uuid);

    let mut body = json!({
        "uuid": queue.uuid,
        "display": queue.display(),
        "name": queue.name,
        "description": queue.description,
    });

    if representation != Representation::Ref {
        body["location"] = json!(queue.location);
    }

    let mut links = vec![json!({ "rel": "self", "uri": self_uri })];
    if representation == Representation::Full {
        body["voided"] = json!(queue.voided);
        body["auditInfo"] = json!({
            "dateCreated": queue.date_created.to_rfc3339(),
            "voided": queue.voided,
            "voidReason": queue.void_reason,
            "dateVoided": queue.date_voided.map(|d| d.to_rfc3339()),
        });
    } else {
        links.push(json!({ "rel": "full", "uri": format!("{}?v=full", self_uri) }));
    }
    body["links"] = Value::Array(links);

    body
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a new queue
pub async fn create_queue(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateQueueBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let queue = state
        .queues()
        .create_queue(NewQueue {
            name: body.name,
            description: body.description,
            location: body.location,
        })
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(represent(&queue, Representation::Full)),
    ))
}

/// List queues, hiding voided ones unless `includeAll=true`
pub async fn list_queues(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQueuesParams>,
) -> Result<Json<ListQueuesResponse>, ApiError> {
    let representation = params.v.unwrap_or_default();
    let queues = state
        .queues()
        .get_all_queues(params.include_all.unwrap_or(false))
        .map_err(error_response)?;

    Ok(Json(ListQueuesResponse {
        results: queues
            .iter()
            .map(|q| represent(q, representation))
            .collect(),
    }))
}

/// Get a queue by uuid
pub async fn get_queue(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
    Query(params): Query<RepresentationParams>,
) -> Result<Json<Value>, ApiError> {
    match state.queues().get_queue_by_uuid(&uuid) {
        Ok(Some(queue)) => Ok(Json(represent(&queue, params.v.unwrap_or_default()))),
        Ok(None) => Err(error_response(QueueError::NotFound(uuid))),
        Err(e) => Err(error_response(e)),
    }
}

/// Update name, description or location
pub async fn update_queue(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
    Json(body): Json<UpdateQueueBody>,
) -> Result<Json<Value>, ApiError> {
    let queue = state
        .queues()
        .update_queue(
            &uuid,
            QueueUpdate {
                name: body.name,
                description: body.description,
                location: body.location,
            },
        )
        .map_err(error_response)?;

    Ok(Json(represent(&queue, Representation::Full)))
}

/// Void a queue, or purge it with `?purge=true`
pub async fn delete_queue(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
    Query(params): Query<DeleteQueueParams>,
) -> Result<StatusCode, ApiError> {
    if params.purge.unwrap_or(false) {
        state.queues().purge_queue(&uuid).map_err(error_response)?;
    } else {
        state
            .queues()
            .void_queue(&uuid, params.reason.as_deref().unwrap_or_default())
            .map_err(error_response)?;
    }
    Ok(StatusCode::NO_CONTENT)
}
