use crate::config::get_config_builder;
use ::config::ConfigError;
use serde::{Deserialize, Serialize};

pub mod config;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(rename = "disableStartupMessage")]
    pub disable_startup_message: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            disable_startup_message: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthConfig {
    pub port: u16,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { port: 8081 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoaderPathConfig {
    pub mapping: String,
    pub response: String,
}

impl Default for LoaderPathConfig {
    fn default() -> Self {
        Self {
            mapping: "files/mapping".into(),
            response: "files/response".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoaderConfig {
    pub path: LoaderPathConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "INFO".into(),
            format: LogFormat::Text,
        }
    }
}

/// Settings for an OpenTelemetry exporter. Wiring an actual exporter is out
/// of scope for this core (it is an external collaborator); these fields
/// only let operators express intent without the config loader rejecting
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub exporter: TelemetryExporterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TelemetryExporterConfig {
    pub protocol: String,
    pub endpoint: String,
    pub insecure: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            exporter: TelemetryExporterConfig {
                protocol: "http".into(),
                endpoint: "localhost:4318".into(),
                insecure: true,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacadeConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

pub fn load_config(paths: &[String]) -> Result<FacadeConfig, ConfigError> {
    let builder = get_config_builder(paths)?;
    let config: FacadeConfig = builder.build()?.try_deserialize()?;
    validate_config(&config)?;

    Ok(config)
}

pub fn validate_config(config: &FacadeConfig) -> Result<(), ConfigError> {
    if config.server.port == config.health.port {
        return Err(ConfigError::Message(format!(
            "server.port and health.port must differ, both are {}",
            config.server.port
        )));
    }

    if config.loader.path.mapping.trim().is_empty() {
        return Err(ConfigError::Message(
            "loader.path.mapping must not be empty".into(),
        ));
    }

    if config.loader.path.response.trim().is_empty() {
        return Err(ConfigError::Message(
            "loader.path.response must not be empty".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = FacadeConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.server.disable_startup_message);
        assert_eq!(config.health.port, 8081);
        assert_eq!(config.loader.path.mapping, "files/mapping");
        assert_eq!(config.loader.path.response, "files/response");
        assert_eq!(config.log.level, "INFO");
        assert_eq!(config.log.format, LogFormat::Text);
        assert!(!config.telemetry.enabled);
    }

    #[test]
    fn validate_rejects_identical_ports() {
        let mut config = FacadeConfig::default();
        config.health.port = config.server.port;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn validate_rejects_empty_loader_paths() {
        let mut config = FacadeConfig::default();
        config.loader.path.mapping = "".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        let config = FacadeConfig::default();
        assert!(validate_config(&config).is_ok());
    }
}
