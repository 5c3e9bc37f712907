use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{assignments, handlers, middleware::metrics_middleware, queues, ws};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Active ticket assignments (digital signage)
        .route("/queueutil/assignticket", post(assignments::assign_ticket))
        .route("/queueutil/active-tickets", get(assignments::active_tickets))
        .route("/queueutil/ws", get(ws::ws_handler))
        // Queues
        .route("/queue", post(queues::create_queue).get(queues::list_queues))
        .route(
            "/queue/{uuid}",
            get(queues::get_queue)
                .post(queues::update_queue)
                .delete(queues::delete_queue),
        );

    // Sign displays are served from other origins
    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
