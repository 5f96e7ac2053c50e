//! Speech Context - 语音朗读限界上下文
//!
//! 职责:
//! - 宿主语音 (voice) 描述与筛选
//! - 朗读偏好（音色、语速、音调）
//! - Utterance 构造

mod catalog;
mod errors;
mod value_objects;

pub use catalog::{filter_and_sort, matches_language};
pub use errors::SpeechError;
pub use value_objects::{SpeechLang, SpeechPreferences, Utterance, VoiceDescriptor};
