//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Ticket assignments on the signage registry
//! - Queue lifecycle operations

use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, IntGauge, Opts};

// =============================================================================
// Signage Metrics
// =============================================================================

/// Ticket assignment attempts by outcome.
pub static TICKET_ASSIGNMENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "queueboard_ticket_assignments_total",
            "Ticket assignment requests handled by the signage registry",
        ),
        &["outcome"], // "assigned", "moved", "rejected"
    )
    .unwrap()
});

/// Service points currently showing a ticket.
pub static ACTIVE_ASSIGNMENTS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "queueboard_active_assignments",
        "Number of service points with an active ticket assignment",
    )
    .unwrap()
});

// =============================================================================
// Queue Metrics
// =============================================================================

/// Queue lifecycle operations by kind.
pub static QUEUE_OPERATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "queueboard_queue_operations_total",
            "Queue create/update/void/purge operations",
        ),
        &["operation"],
    )
    .unwrap()
});

/// Collect all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(TICKET_ASSIGNMENTS.clone()),
        Box::new(ACTIVE_ASSIGNMENTS.clone()),
        Box::new(QUEUE_OPERATIONS.clone()),
    ]
}
