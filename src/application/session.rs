//! 会话级共享状态
//!
//! 朗读偏好与词典工作区的生命周期与视图会话一致，由各 handler 共享

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::domain::dictionary::{
    DictionaryViewState, DictionaryWorkspace, ServiceMessage, Verb, VerbFilter,
};
use crate::domain::speech::SpeechPreferences;

pub type SharedPreferences = Arc<RwLock<SpeechPreferences>>;
pub type SharedWorkspace = Arc<Mutex<DictionaryWorkspace>>;

pub fn shared_preferences(preferences: SpeechPreferences) -> SharedPreferences {
    Arc::new(RwLock::new(preferences))
}

pub fn shared_workspace() -> SharedWorkspace {
    Arc::new(Mutex::new(DictionaryWorkspace::new()))
}

/// 词典视图快照
///
/// 捕获时取出待展示的服务消息（消息只展示一次）
#[derive(Debug, Clone, Serialize)]
pub struct DictionarySnapshot {
    pub view: DictionaryViewState,
    pub technical_errors: bool,
    pub pending_changes: usize,
    pub search: Option<String>,
    pub verbs: Vec<Verb>,
    pub messages: Vec<ServiceMessage>,
}

impl DictionarySnapshot {
    pub fn capture(workspace: &mut DictionaryWorkspace) -> Self {
        Self {
            view: workspace.view(),
            technical_errors: workspace.technical_errors(),
            pending_changes: workspace.pending_changes().len(),
            search: workspace.filter().map(VerbFilter::value).map(str::to_string),
            verbs: workspace.visible_verbs(),
            messages: workspace.take_messages(),
        }
    }
}
