//! Dictionary Service Port - 远程词典服务抽象
//!
//! 通用的远程资源客户端：列表查询（可带过滤）、批量提交新建/修改/删除

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::dictionary::{PendingChange, RejectedChange, Verb, VerbFilter};

/// 词典服务错误
#[derive(Debug, Error)]
pub enum DictionaryServiceError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 批量提交结果
///
/// 批次整体送达后，单条变更仍可能被服务端拒绝
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub rejected: Vec<RejectedChange>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Dictionary Service Port
#[async_trait]
pub trait DictionaryServicePort: Send + Sync {
    /// 查询词条列表
    async fn list_verbs(&self, filter: Option<&VerbFilter>)
        -> Result<Vec<Verb>, DictionaryServiceError>;

    /// 以一个批次提交更新组中的全部变更
    async fn submit_batch(
        &self,
        group: &str,
        changes: &[PendingChange],
    ) -> Result<BatchOutcome, DictionaryServiceError>;

    /// 检查服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
