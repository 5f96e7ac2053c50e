//! Fake Speech Adapters - 用于测试的注册表、引擎与时钟
//!
//! 不接触宿主，只记录调用

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    PollClockPort, SpeechEngineError, SpeechEnginePort, VoiceRegistryPort,
};
use crate::domain::speech::{Utterance, VoiceDescriptor};

/// 按脚本依次返回音色列表的注册表
///
/// 脚本用完后重复最后一个结果
pub struct ScriptedVoiceRegistry {
    script: Mutex<VecDeque<Vec<VoiceDescriptor>>>,
    last: Mutex<Vec<VoiceDescriptor>>,
    calls: AtomicUsize,
}

impl ScriptedVoiceRegistry {
    pub fn new(script: Vec<Vec<VoiceDescriptor>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// 始终返回同一列表
    pub fn always(voices: Vec<VoiceDescriptor>) -> Self {
        Self::new(vec![voices])
    }

    /// 始终为空
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// 被查询的次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoiceRegistryPort for ScriptedVoiceRegistry {
    async fn voices(&self) -> Vec<VoiceDescriptor> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(voices) = next {
            *last = voices;
        }
        last.clone()
    }
}

/// 引擎收到的调用
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Cancel,
    Speak(Utterance),
}

/// 记录调用的朗读引擎
///
/// speak 之后 utterance 视为一直处于活动状态，直到 cancel
pub struct RecordingSpeechEngine {
    events: Mutex<Vec<EngineEvent>>,
    active: AtomicUsize,
    max_active: AtomicUsize,
    fail: bool,
}

impl RecordingSpeechEngine {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// 每次 speak 都返回错误
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// 已开始的 utterance
    pub fn spoken(&self) -> Vec<Utterance> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                EngineEvent::Speak(u) => Some(u),
                EngineEvent::Cancel => None,
            })
            .collect()
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// 同时活动的 utterance 数量峰值
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    fn record(&self, event: EngineEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

impl Default for RecordingSpeechEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEnginePort for RecordingSpeechEngine {
    async fn cancel(&self) {
        self.record(EngineEvent::Cancel);
        self.active.store(0, Ordering::SeqCst);
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechEngineError> {
        if self.fail {
            return Err(SpeechEngineError::StartFailed("scripted failure".to_string()));
        }
        self.record(EngineEvent::Speak(utterance));
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);
        Ok(())
    }
}

/// 不实际等待的时钟，记录每次请求的等待时长
pub struct InstantClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PollClockPort for InstantClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(duration);
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_repeats_last_result() {
        let registry = ScriptedVoiceRegistry::new(vec![
            vec![],
            vec![VoiceDescriptor::new("Alice", "en-US")],
        ]);
        assert!(registry.voices().await.is_empty());
        assert_eq!(registry.voices().await.len(), 1);
        assert_eq!(registry.voices().await.len(), 1);
        assert_eq!(registry.calls(), 3);
    }

    #[tokio::test]
    async fn test_overlapping_speak_is_detected() {
        let engine = RecordingSpeechEngine::new();
        let utterance = Utterance {
            text: "go".to_string(),
            voice: None,
            rate: 1.0,
            pitch: 1.0,
        };
        engine.speak(utterance.clone()).await.unwrap();
        engine.speak(utterance).await.unwrap();
        assert_eq!(engine.max_active(), 2);
    }
}
