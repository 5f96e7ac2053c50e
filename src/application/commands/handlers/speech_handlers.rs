//! Speech Command Handlers

use std::sync::Arc;

use crate::application::commands::{ReloadVoices, Speak, UpdateSpeechPreferences};
use crate::application::error::ApplicationError;
use crate::application::session::SharedPreferences;
use crate::application::speech::VoiceSpeaker;
use crate::domain::speech::{SpeechLang, SpeechPreferences, VoiceDescriptor};

// ============================================================================
// ReloadVoices
// ============================================================================

/// ReloadVoices Handler
///
/// 加载成功后，若当前选中的音色不在新列表中，则改选列表中的第一个
pub struct ReloadVoicesHandler {
    speaker: Arc<VoiceSpeaker>,
    preferences: SharedPreferences,
}

impl ReloadVoicesHandler {
    pub fn new(speaker: Arc<VoiceSpeaker>, preferences: SharedPreferences) -> Self {
        Self {
            speaker,
            preferences,
        }
    }

    pub async fn handle(
        &self,
        command: ReloadVoices,
    ) -> Result<Vec<VoiceDescriptor>, ApplicationError> {
        let language = command.language.trim();
        if language.is_empty() {
            return Err(ApplicationError::validation("Language is required"));
        }

        // 已知语言统一为小写代码，其他字符串按原样作为匹配模式
        let language = match language.parse::<SpeechLang>() {
            Ok(lang) => lang.as_str().to_string(),
            Err(_) => language.to_string(),
        };

        let voices = self.speaker.load_voices(&language).await?;

        let mut preferences = self.preferences.write().await;
        if !voices
            .iter()
            .any(|v| v.name() == preferences.selected_voice_name)
        {
            preferences.selected_voice_name = SpeechPreferences::initial(&voices).selected_voice_name;
            tracing::info!(
                selected_voice = %preferences.selected_voice_name,
                "Selected voice reset after reload"
            );
        }

        Ok(voices)
    }
}

// ============================================================================
// UpdateSpeechPreferences
// ============================================================================

/// UpdateSpeechPreferences Handler
pub struct UpdateSpeechPreferencesHandler {
    preferences: SharedPreferences,
}

impl UpdateSpeechPreferencesHandler {
    pub fn new(preferences: SharedPreferences) -> Self {
        Self { preferences }
    }

    pub async fn handle(
        &self,
        command: UpdateSpeechPreferences,
    ) -> Result<SpeechPreferences, ApplicationError> {
        let mut preferences = self.preferences.write().await;

        let mut updated = preferences.clone();
        if let Some(voice) = command.selected_voice {
            updated.selected_voice_name = voice;
        }
        if let Some(rate) = command.rate {
            updated.rate = rate;
        }
        if let Some(pitch) = command.pitch {
            updated.pitch = pitch;
        }
        updated.validate().map_err(ApplicationError::validation)?;

        *preferences = updated.clone();

        tracing::debug!(
            selected_voice = %updated.selected_voice_name,
            rate = updated.rate,
            pitch = updated.pitch,
            "Speech preferences updated"
        );

        Ok(updated)
    }
}

// ============================================================================
// Speak
// ============================================================================

/// Speak Handler
pub struct SpeakHandler {
    speaker: Arc<VoiceSpeaker>,
    preferences: SharedPreferences,
}

impl SpeakHandler {
    pub fn new(speaker: Arc<VoiceSpeaker>, preferences: SharedPreferences) -> Self {
        Self {
            speaker,
            preferences,
        }
    }

    pub async fn handle(&self, command: Speak) -> Result<(), ApplicationError> {
        let phrase = command.phrase.trim();
        if phrase.is_empty() {
            return Err(ApplicationError::validation("Phrase is required"));
        }

        let preferences = self.preferences.read().await.clone();
        self.speaker.speak(phrase, &preferences).await;
        Ok(())
    }
}
