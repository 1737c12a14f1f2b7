use std::time::Duration;

use eyre::Result;
use serde::{Deserialize, Serialize};

#[allow(unused_imports)]
use super::CONFIG;

use super::constants::{
    DEFAULT_ORIGIN, EXIT_TRANSITION_MS, LOG_FILE_PATH, PUSH_PATH, RECONNECT_DELAY_MS,
    RETENTION_WINDOW_MS, SUPPRESSION_WINDOW_MS,
};
use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub notifier: NotifierConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    #[serde(default)]
    pub file: LogFile,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFilter {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFile {
    #[serde(default = "log_file_path")]
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerConfig {
    /// Origin of the web application, e.g. `https://blog.example.com`
    #[serde(default = "origin")]
    pub origin: String,

    #[serde(default = "push_path")]
    pub path: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NotifierConfig {
    #[serde(default = "suppression_window_ms")]
    pub suppression_window_ms: u64,

    #[serde(default = "retention_window_ms")]
    pub retention_window_ms: u64,

    #[serde(default = "reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,

    #[serde(default = "exit_transition_ms")]
    pub exit_transition_ms: u64,

    /// Event types that produce a visible alert. Other recognized types only
    /// reach listeners.
    #[serde(default = "alert_types")]
    pub alert_types: Vec<String>,

    #[serde(default = "default_true")]
    pub bell: bool,

    /// Also raise operating-system notifications for alerts
    #[serde(default)]
    pub system_notifications: bool,
}

impl NotifierConfig {
    pub fn suppression_window(&self) -> Duration {
        Duration::from_millis(self.suppression_window_ms)
    }

    pub fn retention_window(&self) -> Duration {
        Duration::from_millis(self.retention_window_ms)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn exit_transition(&self) -> Duration {
        Duration::from_millis(self.exit_transition_ms)
    }

    pub fn is_alert_type(&self, kind: &str) -> bool {
        self.alert_types.iter().any(|t| t == kind)
    }
}

impl Configuration {
    #[cfg(not(test))]
    pub fn instance() -> &'static Configuration {
        CONFIG.get().expect("Config not initialized")
    }

    #[cfg(not(test))]
    pub fn init(config: Configuration) -> Result<()> {
        CONFIG
            .set(config)
            .map_err(|_| eyre::eyre!("Config already initialized"))?;
        Ok(())
    }

    #[cfg(test)]
    pub fn instance() -> &'static Configuration {
        use super::TEST_CONFIG;
        TEST_CONFIG.with(|config| *config.borrow())
    }

    #[cfg(test)]
    pub fn init(config: Configuration) -> Result<()> {
        use super::TEST_CONFIG;
        TEST_CONFIG.with(|test_config| {
            *test_config.borrow_mut() = Box::leak(Box::new(config));
        });
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: LogFile::default(),
            filters: None,
        }
    }
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            path: LOG_FILE_PATH.to_string(),
            append: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            path: PUSH_PATH.to_string(),
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            suppression_window_ms: SUPPRESSION_WINDOW_MS,
            retention_window_ms: RETENTION_WINDOW_MS,
            reconnect_delay_ms: RECONNECT_DELAY_MS,
            exit_transition_ms: EXIT_TRANSITION_MS,
            alert_types: alert_types(),
            bell: true,
            system_notifications: false,
        }
    }
}
