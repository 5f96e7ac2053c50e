//! VoiceSpeaker - 音色加载与朗读
//!
//! 状态只有两个: Idle 与 Polling。
//! - load_voices: Idle -> Polling，按固定间隔轮询注册表，直到拿到非空列表或预算耗尽，
//!   然后回到 Idle。无论成功、失败还是调用方丢弃 future，只结算一次且停止轮询。
//! - speak: 先 cancel 再 speak，保证至多一个活动 utterance。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::application::ports::{PollClockPort, SpeechEnginePort, VoiceRegistryPort};
use crate::domain::speech::{
    filter_and_sort, SpeechError, SpeechPreferences, Utterance, VoiceDescriptor,
};

/// 轮询配置
#[derive(Debug, Clone)]
pub struct VoiceSpeakerConfig {
    /// 轮询间隔
    pub poll_interval: Duration,
    /// 轮询总预算，超过后以 VoicesUnavailable 结算
    pub poll_timeout: Duration,
}

impl Default for VoiceSpeakerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            poll_timeout: Duration::from_millis(3000),
        }
    }
}

impl VoiceSpeakerConfig {
    /// 预算内的最大轮询次数（至少 1 次）
    pub fn max_polls(&self) -> u32 {
        if self.poll_interval.is_zero() {
            return 1;
        }
        let polls = self.poll_timeout.as_nanos() / self.poll_interval.as_nanos();
        polls.clamp(1, u32::MAX as u128) as u32
    }
}

/// VoiceSpeaker 状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeakerPhase {
    Idle,
    Polling,
}

/// 音色加载与朗读组件
///
/// 独占宿主朗读引擎句柄；最近一次成功加载（已筛选排序）的音色列表用于解析 selected_voice_name
pub struct VoiceSpeaker {
    config: VoiceSpeakerConfig,
    registry: Arc<dyn VoiceRegistryPort>,
    engine: Arc<dyn SpeechEnginePort>,
    clock: Arc<dyn PollClockPort>,
    voices: RwLock<Vec<VoiceDescriptor>>,
    polling: AtomicBool,
    /// 串行化并发的 load_voices 调用
    load_lock: Mutex<()>,
}

impl VoiceSpeaker {
    pub fn new(
        config: VoiceSpeakerConfig,
        registry: Arc<dyn VoiceRegistryPort>,
        engine: Arc<dyn SpeechEnginePort>,
        clock: Arc<dyn PollClockPort>,
    ) -> Self {
        Self {
            config,
            registry,
            engine,
            clock,
            voices: RwLock::new(Vec::new()),
            polling: AtomicBool::new(false),
            load_lock: Mutex::new(()),
        }
    }

    pub fn phase(&self) -> SpeakerPhase {
        if self.polling.load(Ordering::Acquire) {
            SpeakerPhase::Polling
        } else {
            SpeakerPhase::Idle
        }
    }

    /// 最近一次成功加载的音色列表
    pub async fn voices(&self) -> Vec<VoiceDescriptor> {
        self.voices.read().await.clone()
    }

    /// 加载指定语言的音色
    ///
    /// 首次拿到非空的原始列表时立即停止轮询并返回筛选、排序后的结果（可能为空）；
    /// 整个预算内原始列表始终为空时返回 VoicesUnavailable。
    pub async fn load_voices(&self, language: &str) -> Result<Vec<VoiceDescriptor>, SpeechError> {
        let _serial = self.load_lock.lock().await;
        let _polling = PollingGuard::enter(&self.polling);

        let max_polls = self.config.max_polls();
        tracing::debug!(
            language = %language,
            max_polls = max_polls,
            interval_ms = self.config.poll_interval.as_millis() as u64,
            "Polling voice registry"
        );

        for attempt in 1..=max_polls {
            self.clock.sleep(self.config.poll_interval).await;

            let raw = self.registry.voices().await;
            if raw.is_empty() {
                tracing::trace!(attempt = attempt, "Voice registry still empty");
                continue;
            }

            let total = raw.len();
            let voices = filter_and_sort(raw, language);
            *self.voices.write().await = voices.clone();

            tracing::info!(
                language = %language,
                attempt = attempt,
                total = total,
                matched = voices.len(),
                "Voices loaded"
            );
            return Ok(voices);
        }

        tracing::warn!(
            language = %language,
            attempts = max_polls,
            "Voice registry stayed empty, giving up"
        );
        Err(SpeechError::VoicesUnavailable {
            attempts: max_polls,
        })
    }

    /// 朗读一段文本
    ///
    /// 选中的音色不在最近加载的列表中时使用宿主默认音色；引擎错误只记录日志，不返回给调用方。
    pub async fn speak(&self, phrase: &str, preferences: &SpeechPreferences) {
        self.engine.cancel().await;

        let voice = self
            .voices
            .read()
            .await
            .iter()
            .find(|v| v.name() == preferences.selected_voice_name)
            .cloned();

        if voice.is_none() {
            tracing::debug!(
                selected_voice = %preferences.selected_voice_name,
                "Selected voice not loaded, using platform default"
            );
        }

        let utterance = Utterance {
            text: phrase.to_string(),
            voice,
            rate: preferences.rate,
            pitch: preferences.pitch,
        };

        if let Err(e) = self.engine.speak(utterance).await {
            tracing::warn!(error = %e, "Speech engine failed to speak");
        }
    }
}

/// 结算时（含 future 被丢弃）把状态复位为 Idle
struct PollingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> PollingGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self { flag }
    }
}

impl Drop for PollingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
