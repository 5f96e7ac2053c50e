//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;
use uuid::Uuid;

use crate::application::messages;
use crate::application::ports::DictionaryServiceError;
use crate::domain::dictionary::DictionaryError;
use crate::domain::speech::SpeechError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: Uuid,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 宿主音色不可用
    #[error("{0}")]
    VoicesUnavailable(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

impl From<DictionaryError> for ApplicationError {
    fn from(err: DictionaryError) -> Self {
        match err {
            DictionaryError::VerbNotFound(id) => Self::not_found("Verb", id),
            DictionaryError::NotEditable(_)
            | DictionaryError::Busy
            | DictionaryError::PendingChanges => Self::InvalidState(err.to_string()),
        }
    }
}

impl From<SpeechError> for ApplicationError {
    fn from(err: SpeechError) -> Self {
        Self::VoicesUnavailable(format!("{}: {}", messages::LOAD_VOICES_FAILED, err))
    }
}

impl From<DictionaryServiceError> for ApplicationError {
    fn from(err: DictionaryServiceError) -> Self {
        Self::ExternalServiceError(err.to_string())
    }
}
