//! Speech Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// 轮询预算耗尽，宿主仍未提供任何音色
    #[error("Voice registry still empty after {attempts} polls")]
    VoicesUnavailable { attempts: u32 },
}
