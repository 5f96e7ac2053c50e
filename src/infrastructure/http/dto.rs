//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{
    CreateVerbResponse, DictionaryOutcome, DictionarySnapshot, SpeakerPhase,
    SpeechSettingsResponse,
};
use crate::domain::dictionary::VerbPatch;
use crate::domain::speech::{SpeechPreferences, VoiceDescriptor};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Speech DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReloadVoicesRequest {
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePreferencesRequest {
    #[serde(default)]
    pub selected_voice: Option<String>,
    #[serde(default)]
    pub rate: Option<f32>,
    #[serde(default)]
    pub pitch: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub phrase: String,
}

#[derive(Debug, Serialize)]
pub struct SpeechSettingsDto {
    pub phase: SpeakerPhase,
    pub voices: Vec<VoiceDescriptor>,
    pub preferences: SpeechPreferences,
}

impl From<SpeechSettingsResponse> for SpeechSettingsDto {
    fn from(r: SpeechSettingsResponse) -> Self {
        Self {
            phase: r.phase,
            voices: r.voices,
            preferences: r.preferences,
        }
    }
}

// ============================================================================
// Dictionary DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchVerbsRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVerbRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub patch: VerbPatch,
}

#[derive(Debug, Deserialize)]
pub struct DeleteVerbRequest {
    pub id: Uuid,
}

/// 词典视图响应
#[derive(Debug, Serialize)]
pub struct DictionaryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_id: Option<Uuid>,
    #[serde(flatten)]
    pub state: DictionarySnapshot,
}

impl From<DictionarySnapshot> for DictionaryResponse {
    fn from(state: DictionarySnapshot) -> Self {
        Self {
            message: None,
            created_id: None,
            state,
        }
    }
}

impl From<DictionaryOutcome> for DictionaryResponse {
    fn from(outcome: DictionaryOutcome) -> Self {
        Self {
            message: outcome.message.map(str::to_string),
            created_id: None,
            state: outcome.snapshot,
        }
    }
}

impl From<CreateVerbResponse> for DictionaryResponse {
    fn from(response: CreateVerbResponse) -> Self {
        Self {
            message: None,
            created_id: Some(response.verb_id),
            state: response.snapshot,
        }
    }
}
