//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Engine and service configuration.
#[derive(Debug, Clone)]
pub struct AssistConfig {
    /// Service name for identification.
    pub name: String,
    /// HTTP/WebSocket listen port.
    pub port: u16,
    /// Short pause between consecutive message appends.
    pub beat_delay: Duration,
    /// Pause between receiving free text and starting a journey.
    pub reply_delay: Duration,
    /// Pause between successive thinking-indicator steps.
    pub thinking_step_delay: Duration,
    /// Pause after the last thinking step before the indicator clears.
    pub settle_delay: Duration,
    /// Session event broadcast capacity.
    pub broadcast_capacity: usize,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            name: "fin-assist".to_string(),
            port: 8080,
            beat_delay: Duration::from_millis(400),
            reply_delay: Duration::from_millis(800),
            thinking_step_delay: Duration::from_millis(1000),
            settle_delay: Duration::from_millis(700),
            broadcast_capacity: 256,
        }
    }
}

impl AssistConfig {
    /// Build from `FIN_ASSIST_*` environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(port) = std::env::var("FIN_ASSIST_PORT") {
            config.port = port.parse().map_err(|e| ConfigError::InvalidValue {
                key: "FIN_ASSIST_PORT".into(),
                message: format!("{e}"),
            })?;
        }
        if let Ok(ms) = std::env::var("FIN_ASSIST_BEAT_MS") {
            config.beat_delay = parse_ms("FIN_ASSIST_BEAT_MS", &ms)?;
        }
        if let Ok(ms) = std::env::var("FIN_ASSIST_THINKING_MS") {
            config.thinking_step_delay = parse_ms("FIN_ASSIST_THINKING_MS", &ms)?;
        }
        Ok(config)
    }
}

fn parse_ms(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidValue {
            key: key.into(),
            message: format!("{e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AssistConfig::default();
        assert_eq!(config.name, "fin-assist");
        assert_eq!(config.port, 8080);
        assert!(config.thinking_step_delay > config.beat_delay);
        assert!(config.broadcast_capacity > 0);
    }

    #[test]
    fn parse_ms_rejects_garbage() {
        assert!(parse_ms("K", "not-a-number").is_err());
        assert_eq!(parse_ms("K", "250").unwrap(), Duration::from_millis(250));
    }
}
