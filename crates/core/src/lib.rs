pub mod config;
pub mod metrics;
pub mod queue;
pub mod signage;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    LogFormat, LoggingConfig, SanitizedConfig, ServerConfig, SignageConfig,
};
pub use queue::{
    NewQueue, Queue, QueueError, QueueService, QueueStore, QueueUpdate, SqliteQueueStore,
};
pub use signage::{
    ActiveTicketRegistry, AssignmentField, AssignmentObserver, SignageError, Snapshot,
    TicketAssignment,
};
