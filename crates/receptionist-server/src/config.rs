//! Server configuration loading from file and environment variables.

use receptionist_llm::LlmConfig;
use receptionist_twiml::VoiceSettings;
use receptionist_types::BusinessProfile;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Business the receptionist answers for.
    #[serde(default)]
    pub business: BusinessProfile,

    /// Text-to-speech voice used in every response.
    #[serde(default)]
    pub voice: VoiceSettings,

    /// Chat-completion API settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "receptionist_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies overrides from the process environment.
///
/// Environment variable overrides:
/// - `RECEPTIONIST_HOST` overrides `server.host`
/// - `PORT` overrides `server.port`
/// - `RECEPTIONIST_LOG_LEVEL` overrides `logging.level`
/// - `RECEPTIONIST_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `BUSINESS_NAME` / `BUSINESS_INFO` override `business.name` / `business.info`
/// - `VOICE_NAME` / `VOICE_LANG` override `voice.name` / `voice.language`
/// - `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL` override the `llm` section
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading overrides through `env` instead of the
/// process environment.
pub fn load_config_with_env<F>(path: Option<&str>, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, env);
    Ok(config)
}

fn apply_env_overrides<F>(config: &mut Config, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = env("RECEPTIONIST_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = env("PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = env("RECEPTIONIST_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = env("RECEPTIONIST_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(name) = env("BUSINESS_NAME") {
        config.business.name = name;
    }
    if let Some(info) = env("BUSINESS_INFO") {
        config.business.info = info;
    }
    if let Some(voice) = env("VOICE_NAME") {
        config.voice.name = voice;
    }
    if let Some(language) = env("VOICE_LANG") {
        config.voice.language = language;
    }
    if let Some(key) = env("OPENAI_API_KEY") {
        config.llm.api_key = key;
    }
    if let Some(base_url) = env("OPENAI_BASE_URL") {
        config.llm.base_url = base_url;
    }
    if let Some(model) = env("OPENAI_MODEL") {
        config.llm.model = model;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_file() {
        let config = load_config_with_env(None, no_env).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.voice.name, "Polly.Joanna");
        assert_eq!(config.voice.language, "en-US");
        assert_eq!(config.business.name, "Demo Receptionist");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(!config.logging.json);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = load_config_with_env(path.to_str(), no_env).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn file_values_are_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[business]
name = "Acme Plumbing"

[voice]
name = "Polly.Matthew"

[llm]
model = "gpt-4o"
temperature = 0.7
"#
        )
        .unwrap();

        let config = load_config_with_env(file.path().to_str(), no_env).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.business.name, "Acme Plumbing");
        assert!(config.business.info.contains("Hours"));
        assert_eq!(config.voice.name, "Polly.Matthew");
        assert_eq!(config.voice.language, "en-US");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.temperature, 0.7);
    }

    #[test]
    fn env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 8080\n[business]\nname = \"File Co\"").unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "9000"),
            ("BUSINESS_NAME", "Env Co"),
            ("VOICE_LANG", "en-GB"),
            ("OPENAI_API_KEY", "sk-env"),
            ("RECEPTIONIST_LOG_JSON", "1"),
            ("RECEPTIONIST_HOST", "not-an-ip"),
        ]);
        let config = load_config_with_env(file.path().to_str(), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.business.name, "Env Co");
        assert_eq!(config.voice.language, "en-GB");
        assert_eq!(config.llm.api_key, "sk-env");
        assert!(config.logging.json);
        // Unparseable host keeps the default.
        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        let err = load_config_with_env(file.path().to_str(), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
