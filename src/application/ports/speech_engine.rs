//! Speech Engine Port - 宿主朗读引擎抽象
//!
//! 定义朗读的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::Utterance;

/// 朗读引擎错误
#[derive(Debug, Error)]
pub enum SpeechEngineError {
    #[error("Speech engine unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to start utterance: {0}")]
    StartFailed(String),
}

/// Speech Engine Port
///
/// 同一时刻至多一个活动的 utterance：调用方在 speak 之前必须先 cancel
#[async_trait]
pub trait SpeechEnginePort: Send + Sync {
    /// 停止当前正在朗读的 utterance（没有时为空操作）
    async fn cancel(&self);

    /// 开始朗读
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechEngineError>;
}
