use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Signage heartbeat interval and channel capacity are positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.signage.heartbeat_secs == 0 {
        return Err(ConfigError::ValidationError(
            "signage.heartbeat_secs must be greater than 0".to_string(),
        ));
    }

    if config.signage.channel_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "signage.channel_capacity must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
