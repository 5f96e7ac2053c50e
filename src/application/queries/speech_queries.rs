//! Speech Queries

/// 列出已加载的音色与当前朗读偏好
#[derive(Debug, Clone)]
pub struct ListVoices;
