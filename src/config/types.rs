//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::application::VoiceSpeakerConfig;
use crate::domain::speech::SpeechPreferences;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 朗读配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 词典服务配置
    #[serde(default)]
    pub dictionary: DictionaryConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// 朗读配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// 启动时加载的音色语言
    #[serde(default = "default_language")]
    pub language: String,

    /// 音色注册表轮询间隔（毫秒）
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// 音色注册表轮询总预算（毫秒）
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,

    /// 初始语速
    #[serde(default = "default_rate")]
    pub rate: f32,

    /// 初始音调
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// espeak-ng 可执行文件
    #[serde(default = "default_espeak_bin")]
    pub espeak_bin: String,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_poll_interval_ms() -> u64 {
    10
}

fn default_poll_timeout_ms() -> u64 {
    3000
}

fn default_rate() -> f32 {
    1.0
}

fn default_pitch() -> f32 {
    1.0
}

fn default_espeak_bin() -> String {
    "espeak-ng".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            poll_interval_ms: default_poll_interval_ms(),
            poll_timeout_ms: default_poll_timeout_ms(),
            rate: default_rate(),
            pitch: default_pitch(),
            espeak_bin: default_espeak_bin(),
        }
    }
}

impl SpeechConfig {
    pub fn speaker_config(&self) -> VoiceSpeakerConfig {
        VoiceSpeakerConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            poll_timeout: Duration::from_millis(self.poll_timeout_ms),
        }
    }

    /// 音色尚未加载时的初始偏好
    pub fn initial_preferences(&self) -> SpeechPreferences {
        SpeechPreferences {
            rate: self.rate,
            pitch: self.pitch,
            ..Default::default()
        }
    }
}

/// 词典服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    /// OData v4 服务根地址；未设置时使用内存实现
    #[serde(default)]
    pub service_url: Option<String>,

    /// 实体集名称
    #[serde(default = "default_entity_set")]
    pub entity_set: String,

    /// 延迟提交组
    #[serde(default = "default_update_group")]
    pub update_group: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_entity_set() -> String {
    "Verbs".to_string()
}

fn default_update_group() -> String {
    "dictionaryGroup".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            entity_set: default_entity_set(),
            update_group: default_update_group(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 4080);
        assert_eq!(config.speech.language, "en");
        assert!(config.dictionary.service_url.is_none());
        assert_eq!(config.dictionary.update_group, "dictionaryGroup");
    }

    #[test]
    fn test_speaker_config() {
        let config = SpeechConfig::default().speaker_config();
        assert_eq!(config.poll_interval, Duration::from_millis(10));
        assert_eq!(config.max_polls(), 300);
    }

    #[test]
    fn test_initial_preferences() {
        let speech = SpeechConfig {
            rate: 1.5,
            ..Default::default()
        };
        let prefs = speech.initial_preferences();
        assert_eq!(prefs.rate, 1.5);
        assert_eq!(prefs.pitch, 1.0);
        assert!(prefs.selected_voice_name.is_empty());
    }
}
