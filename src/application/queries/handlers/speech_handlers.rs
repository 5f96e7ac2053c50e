//! Speech Query Handlers

use std::sync::Arc;

use crate::application::queries::ListVoices;
use crate::application::session::SharedPreferences;
use crate::application::speech::{SpeakerPhase, VoiceSpeaker};
use crate::domain::speech::{SpeechPreferences, VoiceDescriptor};

/// 音色列表响应
#[derive(Debug, Clone)]
pub struct SpeechSettingsResponse {
    pub phase: SpeakerPhase,
    pub voices: Vec<VoiceDescriptor>,
    pub preferences: SpeechPreferences,
}

/// ListVoices Handler
pub struct ListVoicesHandler {
    speaker: Arc<VoiceSpeaker>,
    preferences: SharedPreferences,
}

impl ListVoicesHandler {
    pub fn new(speaker: Arc<VoiceSpeaker>, preferences: SharedPreferences) -> Self {
        Self {
            speaker,
            preferences,
        }
    }

    pub async fn handle(&self, _query: ListVoices) -> SpeechSettingsResponse {
        SpeechSettingsResponse {
            phase: self.speaker.phase(),
            voices: self.speaker.voices().await,
            preferences: self.preferences.read().await.clone(),
        }
    }
}
