//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `VERBVOX_SERVER__PORT=8080`
/// - `VERBVOX_SPEECH__LANGUAGE=de`
/// - `VERBVOX_DICTIONARY__SERVICE_URL=http://localhost:4004/odata/v4/dictionary`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索工作目录下的 config.toml / config.local.toml
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 4080)?
        .set_default("speech.language", "en")?
        .set_default("speech.poll_interval_ms", 10)?
        .set_default("speech.poll_timeout_ms", 3000)?
        .set_default("speech.rate", 1.0)?
        .set_default("speech.pitch", 1.0)?
        .set_default("speech.espeak_bin", "espeak-ng")?
        .set_default("dictionary.entity_set", "Verbs")?
        .set_default("dictionary.update_group", "dictionaryGroup")?
        .set_default("dictionary.timeout_secs", 30)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 例如: VERBVOX_SPEECH__POLL_TIMEOUT_MS=5000
    builder = builder.add_source(
        Environment::with_prefix("VERBVOX")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(invalid("Server port cannot be 0"));
    }

    let speech = &config.speech;
    if speech.poll_interval_ms == 0 {
        return Err(invalid("Speech poll interval cannot be 0"));
    }
    if speech.poll_timeout_ms < speech.poll_interval_ms {
        return Err(invalid("Speech poll timeout must not be shorter than the poll interval"));
    }
    if !(speech.rate.is_finite() && speech.rate > 0.0) {
        return Err(invalid("Speech rate must be greater than 0"));
    }
    if !(speech.pitch.is_finite() && speech.pitch >= 0.0) {
        return Err(invalid("Speech pitch must not be negative"));
    }
    if speech.espeak_bin.trim().is_empty() {
        return Err(invalid("espeak-ng binary cannot be empty"));
    }

    let dictionary = &config.dictionary;
    if dictionary.entity_set.trim().is_empty() {
        return Err(invalid("Dictionary entity set cannot be empty"));
    }
    if dictionary.update_group.trim().is_empty() {
        return Err(invalid("Dictionary update group cannot be empty"));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Speech Language: {}", config.speech.language);
    tracing::info!(
        "Voice Polling: every {}ms, up to {}ms",
        config.speech.poll_interval_ms,
        config.speech.poll_timeout_ms
    );
    tracing::info!("espeak-ng: {}", config.speech.espeak_bin);
    match &config.dictionary.service_url {
        Some(url) => tracing::info!(
            "Dictionary Service: {} ({})",
            url,
            config.dictionary.entity_set
        ),
        None => tracing::info!("Dictionary Service: in-memory"),
    }
    tracing::info!("Update Group: {}", config.dictionary.update_group);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
