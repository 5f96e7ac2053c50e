//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（VoiceRegistry、SpeechEngine、PollClock、DictionaryService）
//! - speech: VoiceSpeaker 音色加载与朗读
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - session: 会话级共享状态
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod messages;
pub mod ports;
pub mod queries;
pub mod session;
pub mod speech;

// Re-exports
pub use commands::{
    // Speech commands
    ReloadVoices,
    Speak,
    UpdateSpeechPreferences,
    // Dictionary commands
    CancelChanges,
    CreateVerb,
    DeleteVerb,
    EditDictionary,
    RefreshVerbs,
    SaveChanges,
    SearchVerbs,
    UpdateVerb,
    // Handlers
    handlers::{
        CancelChangesHandler, CreateVerbHandler, CreateVerbResponse, DeleteVerbHandler,
        DictionaryOutcome, EditDictionaryHandler, RefreshVerbsHandler, ReloadVoicesHandler,
        SaveChangesHandler, SearchVerbsHandler, SpeakHandler, UpdateSpeechPreferencesHandler,
        UpdateVerbHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    BatchOutcome, DictionaryServiceError, DictionaryServicePort, PollClockPort,
    SpeechEngineError, SpeechEnginePort, VoiceRegistryPort,
};

pub use queries::{
    GetDictionaryState,
    ListVoices,
    // Handlers
    handlers::{GetDictionaryStateHandler, ListVoicesHandler, SpeechSettingsResponse},
};

pub use session::{
    shared_preferences, shared_workspace, DictionarySnapshot, SharedPreferences, SharedWorkspace,
};
pub use speech::{SpeakerPhase, VoiceSpeaker, VoiceSpeakerConfig};
