//! Speech Context - Value Objects

use serde::{Deserialize, Serialize};

/// 宿主提供的音色描述
///
/// 不变量:
/// - name 在同一宿主内唯一
/// - 只读，由宿主语音服务提供，本系统不创建也不销毁
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceDescriptor {
    name: String,
    language_tag: String,
    /// 宿主侧的音色标识（如 espeak-ng 的 voice 文件），无独立标识时等于 name
    voice_uri: String,
}

impl VoiceDescriptor {
    pub fn new(name: impl Into<String>, language_tag: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            voice_uri: name.clone(),
            name,
            language_tag: language_tag.into(),
        }
    }

    pub fn with_uri(mut self, voice_uri: impl Into<String>) -> Self {
        self.voice_uri = voice_uri.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language_tag(&self) -> &str {
        &self.language_tag
    }

    pub fn voice_uri(&self) -> &str {
        &self.voice_uri
    }
}

/// 朗读语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechLang {
    #[default]
    En,
    De,
}

impl SpeechLang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl std::fmt::Display for SpeechLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SpeechLang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            other => Err(format!("Unsupported speech language: {}", other)),
        }
    }
}

/// 朗读偏好
///
/// 生命周期与会话一致，由用户交互修改。
/// selected_voice_name 不在最近加载的音色列表中时，朗读使用宿主默认音色。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechPreferences {
    pub selected_voice_name: String,
    /// 语速 (> 0)
    pub rate: f32,
    /// 音调 (通常 0 - 2)
    pub pitch: f32,
}

impl Default for SpeechPreferences {
    fn default() -> Self {
        Self {
            selected_voice_name: String::new(),
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

impl SpeechPreferences {
    /// 以列表中第一个音色作为初始选择
    pub fn initial(voices: &[VoiceDescriptor]) -> Self {
        Self {
            selected_voice_name: voices
                .first()
                .map(|v| v.name().to_string())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err("Rate must be greater than 0");
        }
        if !self.pitch.is_finite() || self.pitch < 0.0 {
            return Err("Pitch must not be negative");
        }
        Ok(())
    }
}

/// 一次朗读请求：文本 + 音色 + 语速 + 音调
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// None 表示使用宿主默认音色
    pub voice: Option<VoiceDescriptor>,
    pub rate: f32,
    pub pitch: f32,
}
