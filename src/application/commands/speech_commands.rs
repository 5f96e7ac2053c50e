//! Speech Commands

/// 重新加载音色命令
#[derive(Debug, Clone)]
pub struct ReloadVoices {
    pub language: String,
}

/// 更新朗读偏好命令（None 字段保持不变）
#[derive(Debug, Clone, Default)]
pub struct UpdateSpeechPreferences {
    pub selected_voice: Option<String>,
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
}

/// 朗读命令
#[derive(Debug, Clone)]
pub struct Speak {
    pub phrase: String,
}
