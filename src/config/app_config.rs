use std::path::PathBuf;

use serde::Deserialize;

use crate::infrastructure::assets::AssetConfig;
use crate::infrastructure::auth::JwtConfig;
use crate::infrastructure::chatbot::ChatbotConfig;
use crate::infrastructure::storage::StorageConfig;
use crate::infrastructure::voice::{SynthesisConfig, TranscriptionConfig};

/// Application configuration
///
/// Loaded from `config/default`, `config/local`, then `APP__`-prefixed
/// environment variables, each layer overriding the previous one. The
/// voice and chat sections are optional; without them the corresponding
/// endpoints are disabled.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub jwt: JwtConfig,
    #[serde(default)]
    pub assets: AssetConfig,
    pub transcription: Option<TranscriptionConfig>,
    pub synthesis: Option<SynthesisConfig>,
    pub chatbot: Option<ChatbotConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Directory served under `/static`
    pub fn static_dir(&self) -> PathBuf {
        self.assets.root.clone()
    }
}
