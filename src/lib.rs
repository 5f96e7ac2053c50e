//! Verbvox - 不规则动词词典与朗读服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Speech Context: 音色、朗读偏好、筛选排序
//! - Dictionary Context: 动词词条与编辑工作区
//!
//! 应用层 (application/):
//! - Ports: 端口定义（VoiceRegistry, SpeechEngine, PollClock, DictionaryService）
//! - Speech: VoiceSpeaker 音色轮询加载与朗读
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 内存词典服务
//! - Adapters: espeak-ng, OData v4 客户端, Tokio 时钟

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
