//! 应用层 - 朗读服务

mod voice_speaker;

pub use voice_speaker::{SpeakerPhase, VoiceSpeaker, VoiceSpeakerConfig};
