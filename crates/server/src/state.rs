use std::sync::Arc;
use queueboard_core::{ActiveTicketRegistry, Config, QueueService, SanitizedConfig};

use crate::api::WsBroadcaster;

/// Shared application state
pub struct AppState {
    config: Config,
    registry: Arc<ActiveTicketRegistry>,
    queues: QueueService,
    ws_broadcaster: WsBroadcaster,
}

impl AppState {
    pub fn new(
        config: Config,
        registry: Arc<ActiveTicketRegistry>,
        queues: QueueService,
        ws_broadcaster: WsBroadcaster,
    ) -> Self {
        Self {
            config,
            registry,
            queues,
            ws_broadcaster,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    /// The process-wide active ticket registry.
    pub fn registry(&self) -> &ActiveTicketRegistry {
        self.registry.as_ref()
    }

    pub fn queues(&self) -> &QueueService {
        &self.queues
    }

    pub fn ws_broadcaster(&self) -> &WsBroadcaster {
        &self.ws_broadcaster
    }
}
