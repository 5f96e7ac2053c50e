//! eSpeak NG Adapter - 通过 espeak-ng 子进程实现音色注册表与朗读引擎
//!
//! 音色列表: `espeak-ng --voices`
//! 朗读:     `espeak-ng -v <voice> -s <wpm> -p <pitch> -- <text>`
//!
//! 同一时刻只保留一个子进程，cancel 会杀掉并回收它

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use crate::application::ports::{SpeechEngineError, SpeechEnginePort, VoiceRegistryPort};
use crate::domain::speech::{Utterance, VoiceDescriptor};

/// eSpeak NG 配置
#[derive(Debug, Clone)]
pub struct EspeakConfig {
    /// 可执行文件
    pub binary: String,
    /// rate = 1.0 对应的每分钟词数
    pub base_words_per_minute: u32,
    /// pitch = 1.0 对应的 espeak 音调 (0 - 99)
    pub base_pitch: u32,
}

impl Default for EspeakConfig {
    fn default() -> Self {
        Self {
            binary: "espeak-ng".to_string(),
            base_words_per_minute: 175,
            base_pitch: 50,
        }
    }
}

/// eSpeak NG 引擎
pub struct EspeakEngine {
    config: EspeakConfig,
    current: Mutex<Option<Child>>,
}

impl EspeakEngine {
    pub fn new(config: EspeakConfig) -> Self {
        tracing::info!(binary = %config.binary, "EspeakEngine initialized");
        Self {
            config,
            current: Mutex::new(None),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(EspeakConfig::default())
    }

    fn speak_args(&self, utterance: &Utterance) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(voice) = &utterance.voice {
            args.push("-v".to_string());
            args.push(voice.voice_uri().to_string());
        }
        let wpm = (utterance.rate * self.config.base_words_per_minute as f32).round();
        let pitch = (utterance.pitch * self.config.base_pitch as f32).round();
        args.push("-s".to_string());
        args.push(format!("{}", wpm.max(0.0) as u32));
        args.push("-p".to_string());
        args.push(format!("{}", pitch.max(0.0) as u32));
        args.push("--".to_string());
        args.push(utterance.text.clone());
        args
    }
}

#[async_trait]
impl VoiceRegistryPort for EspeakEngine {
    async fn voices(&self) -> Vec<VoiceDescriptor> {
        let output = Command::new(&self.config.binary)
            .arg("--voices")
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                parse_voice_list(&String::from_utf8_lossy(&output.stdout))
            }
            Ok(output) => {
                tracing::debug!(status = %output.status, "espeak-ng --voices failed");
                Vec::new()
            }
            Err(e) => {
                tracing::debug!(error = %e, "Cannot run espeak-ng");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl SpeechEnginePort for EspeakEngine {
    async fn cancel(&self) {
        if let Some(mut child) = self.current.lock().await.take() {
            // 进程可能已经自然结束，kill 的错误可以忽略
            let _ = child.kill().await;
            tracing::debug!("Utterance cancelled");
        }
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechEngineError> {
        let args = self.speak_args(&utterance);

        // 持锁完成 kill + spawn，并发的 speak 不会留下孤儿进程
        let mut current = self.current.lock().await;
        if let Some(mut previous) = current.take() {
            let _ = previous.kill().await;
        }

        let child = Command::new(&self.config.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SpeechEngineError::Unavailable(format!("{} not found", self.config.binary))
                } else {
                    SpeechEngineError::StartFailed(e.to_string())
                }
            })?;

        tracing::debug!(
            text_len = utterance.text.len(),
            voice = ?utterance.voice.as_ref().map(|v| v.voice_uri()),
            rate = utterance.rate,
            pitch = utterance.pitch,
            "Utterance started"
        );

        *current = Some(child);
        Ok(())
    }
}

/// 解析 `espeak-ng --voices` 的输出
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  en-us           --/M      English_(America)  gmw/en-US            (en 3)
/// ```
pub fn parse_voice_list(output: &str) -> Vec<VoiceDescriptor> {
    output
        .lines()
        .filter(|line| !line.trim_start().starts_with("Pty"))
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            match columns.as_slice() {
                [_pty, language, _age_gender, name, file, ..] => Some(
                    VoiceDescriptor::new(name.replace('_', " "), normalize_language_tag(language))
                        .with_uri(*file),
                ),
                _ => None,
            }
        })
        .collect()
}

/// "en-us" -> "en-US"，"en-gb-x-rp" -> "en-GB-x-rp"
fn normalize_language_tag(tag: &str) -> String {
    tag.split('-')
        .enumerate()
        .map(|(i, part)| {
            if i == 1 && part.len() == 2 {
                part.to_uppercase()
            } else {
                part.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOICES: &str = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  de              --/M      German             gmw/de
 2  en-gb           --/M      English_(Great_Britain) gmw/en            (en 2)
 5  en-us           --/M      English_(America)  gmw/en-US            (en 3)
";

    #[test]
    fn test_parse_voice_list() {
        let voices = parse_voice_list(VOICES);
        assert_eq!(voices.len(), 3);

        assert_eq!(voices[0].name(), "German");
        assert_eq!(voices[0].language_tag(), "de");
        assert_eq!(voices[0].voice_uri(), "gmw/de");

        assert_eq!(voices[1].name(), "English (Great Britain)");
        assert_eq!(voices[1].language_tag(), "en-GB");

        assert_eq!(voices[2].language_tag(), "en-US");
        assert_eq!(voices[2].voice_uri(), "gmw/en-US");
    }

    #[test]
    fn test_parse_ignores_garbage() {
        assert!(parse_voice_list("").is_empty());
        assert!(parse_voice_list("Pty Language\nnot a voice line").is_empty());
    }

    #[test]
    fn test_normalize_language_tag() {
        assert_eq!(normalize_language_tag("en-us"), "en-US");
        assert_eq!(normalize_language_tag("en-gb-x-rp"), "en-GB-x-rp");
        assert_eq!(normalize_language_tag("cmn"), "cmn");
    }

    #[test]
    fn test_speak_args() {
        let engine = EspeakEngine::with_defaults();
        let utterance = Utterance {
            text: "forgive".to_string(),
            voice: Some(VoiceDescriptor::new("English (America)", "en-US").with_uri("gmw/en-US")),
            rate: 1.2,
            pitch: 0.5,
        };
        assert_eq!(
            engine.speak_args(&utterance),
            vec!["-v", "gmw/en-US", "-s", "210", "-p", "25", "--", "forgive"]
        );

        let default_voice = Utterance {
            voice: None,
            ..utterance
        };
        assert_eq!(engine.speak_args(&default_voice)[0], "-s");
    }

    #[tokio::test]
    async fn test_missing_binary_yields_no_voices() {
        let engine = EspeakEngine::new(EspeakConfig {
            binary: "/nonexistent/espeak-ng".to_string(),
            ..Default::default()
        });
        assert!(engine.voices().await.is_empty());

        let result = engine
            .speak(Utterance {
                text: "be".to_string(),
                voice: None,
                rate: 1.0,
                pitch: 1.0,
            })
            .await;
        assert!(matches!(result, Err(SpeechEngineError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_speak_stops_previous_utterance_before_starting() {
        let engine = EspeakEngine::new(EspeakConfig {
            binary: "/nonexistent/espeak-ng".to_string(),
            ..Default::default()
        });
        let running = Command::new("sleep")
            .arg("30")
            .kill_on_drop(true)
            .spawn()
            .unwrap();
        *engine.current.lock().await = Some(running);

        let result = engine
            .speak(Utterance {
                text: "go".to_string(),
                voice: None,
                rate: 1.0,
                pitch: 1.0,
            })
            .await;

        assert!(matches!(result, Err(SpeechEngineError::Unavailable(_))));
        assert!(engine.current.lock().await.is_none());
    }
}
