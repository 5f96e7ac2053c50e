//! Voice Registry Port - 宿主音色注册表抽象
//!
//! 宿主可能在启动后异步填充音色列表，初次查询可能返回空序列

use async_trait::async_trait;

use crate::domain::speech::VoiceDescriptor;

/// Voice Registry Port
#[async_trait]
pub trait VoiceRegistryPort: Send + Sync {
    /// 返回当前可用的全部音色（可能为空）
    async fn voices(&self) -> Vec<VoiceDescriptor>;
}
