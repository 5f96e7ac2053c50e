//! Speech Adapter - 宿主语音实现

mod espeak;
mod fake;

pub use espeak::{parse_voice_list, EspeakConfig, EspeakEngine};
pub use fake::{EngineEvent, InstantClock, RecordingSpeechEngine, ScriptedVoiceRegistry};
