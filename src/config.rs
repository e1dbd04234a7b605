//! # Configuration Module
//!
//! Startup settings read from the process environment (after `.env` is loaded).

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use teloxide::types::ChatId;
use thiserror::Error;

use crate::logging::LogFormat;

pub const DEFAULT_SESSION_IDLE_TIMEOUT_SECS: u64 = 60 * 60; // 1 hour
pub const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 5 * 60; // 5 minutes

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration of the bot
#[derive(Clone)]
pub struct BotConfig {
    pub bot_token: String,
    /// Group chat that receives customer feedback
    pub staff_chat_id: ChatId,
    /// Optional JSON file replacing the built-in menu
    pub catalog_path: Option<PathBuf>,
    pub session_idle_timeout: Duration,
    pub session_sweep_interval: Duration,
    pub log_format: LogFormat,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("staff_chat_id", &self.staff_chat_id)
            .field("catalog_path", &self.catalog_path)
            .field("session_idle_timeout", &self.session_idle_timeout)
            .field("session_sweep_interval", &self.session_sweep_interval)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bot_token = get("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))?;

        let staff_raw = get("STAFF_CHAT_ID").ok_or(ConfigError::Missing("STAFF_CHAT_ID"))?;
        let staff_chat_id = staff_raw
            .parse::<i64>()
            .map(ChatId)
            .map_err(|e| ConfigError::Invalid {
                name: "STAFF_CHAT_ID",
                value: staff_raw.clone(),
                reason: e.to_string(),
            })?;

        let seconds = |name: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match get(name) {
                None => Ok(Duration::from_secs(default)),
                Some(raw) => match raw.parse::<u64>() {
                    Ok(0) => Err(ConfigError::Invalid {
                        name,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    }),
                    Ok(secs) => Ok(Duration::from_secs(secs)),
                    Err(e) => Err(ConfigError::Invalid {
                        name,
                        value: raw,
                        reason: e.to_string(),
                    }),
                },
            }
        };

        let session_idle_timeout =
            seconds("SESSION_IDLE_TIMEOUT_SECS", DEFAULT_SESSION_IDLE_TIMEOUT_SECS)?;
        let session_sweep_interval =
            seconds("SESSION_SWEEP_INTERVAL_SECS", DEFAULT_SESSION_SWEEP_INTERVAL_SECS)?;

        let log_format = match get("LOG_FORMAT") {
            None => LogFormat::Text,
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                name: "LOG_FORMAT",
                value: raw.clone(),
                reason,
            })?,
        };

        Ok(Self {
            bot_token,
            staff_chat_id,
            catalog_path: get("MENU_CATALOG_PATH").map(PathBuf::from),
            session_idle_timeout,
            session_sweep_interval,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = BotConfig::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("STAFF_CHAT_ID", "-4779662690"),
        ]))
        .unwrap();

        assert_eq!(config.staff_chat_id, ChatId(-4779662690));
        assert_eq!(config.catalog_path, None);
        assert_eq!(
            config.session_idle_timeout,
            Duration::from_secs(DEFAULT_SESSION_IDLE_TIMEOUT_SECS)
        );
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let result = BotConfig::from_lookup(lookup(&[("STAFF_CHAT_ID", "-1")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn test_malformed_staff_chat_is_rejected() {
        let result = BotConfig::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("STAFF_CHAT_ID", "staff-group"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "STAFF_CHAT_ID", .. })
        ));
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let config = BotConfig::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "123:secret"),
            ("STAFF_CHAT_ID", "-1"),
        ]))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
    }
}
