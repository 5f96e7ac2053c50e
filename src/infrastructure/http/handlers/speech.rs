//! Speech HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ListVoices, ReloadVoices, Speak, UpdateSpeechPreferences};
use crate::infrastructure::http::dto::{
    ApiResponse, Empty, ReloadVoicesRequest, SpeakRequest, SpeechSettingsDto,
    UpdatePreferencesRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 当前音色列表与朗读设置
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<SpeechSettingsDto>> {
    let settings = state.list_voices_handler.handle(ListVoices).await;
    Json(ApiResponse::success(settings.into()))
}

/// 按语言重新加载音色
pub async fn reload_voices(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReloadVoicesRequest>,
) -> Result<Json<ApiResponse<SpeechSettingsDto>>, ApiError> {
    state
        .reload_voices_handler
        .handle(ReloadVoices {
            language: req.language,
        })
        .await?;

    let settings = state.list_voices_handler.handle(ListVoices).await;
    Ok(Json(ApiResponse::success(settings.into())))
}

/// 更新朗读设置
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdatePreferencesRequest>,
) -> Result<Json<ApiResponse<SpeechSettingsDto>>, ApiError> {
    state
        .update_preferences_handler
        .handle(UpdateSpeechPreferences {
            selected_voice: req.selected_voice,
            rate: req.rate,
            pitch: req.pitch,
        })
        .await?;

    let settings = state.list_voices_handler.handle(ListVoices).await;
    Ok(Json(ApiResponse::success(settings.into())))
}

/// 朗读一段文本
pub async fn speak(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeakRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .speak_handler
        .handle(Speak { phrase: req.phrase })
        .await?;
    Ok(Json(ApiResponse::ok()))
}
