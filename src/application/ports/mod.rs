//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod dictionary_service;
mod poll_clock;
mod speech_engine;
mod voice_registry;

pub use dictionary_service::{BatchOutcome, DictionaryServiceError, DictionaryServicePort};
pub use poll_clock::PollClockPort;
pub use speech_engine::{SpeechEngineError, SpeechEnginePort};
pub use voice_registry::VoiceRegistryPort;
