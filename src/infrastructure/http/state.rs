//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CancelChangesHandler, CreateVerbHandler, DeleteVerbHandler, EditDictionaryHandler,
    RefreshVerbsHandler, ReloadVoicesHandler, SaveChangesHandler, SearchVerbsHandler,
    SpeakHandler, UpdateSpeechPreferencesHandler, UpdateVerbHandler,
    // Query handlers
    GetDictionaryStateHandler, ListVoicesHandler,
    // Session
    SharedPreferences, SharedWorkspace,
    // Ports
    DictionaryServicePort, VoiceSpeaker,
};

/// 应用状态
///
/// 一个进程对应一个朗读会话和一个词典工作区
pub struct AppState {
    // ========== Ports ==========
    pub speaker: Arc<VoiceSpeaker>,
    pub dictionary_service: Arc<dyn DictionaryServicePort>,
    pub preferences: SharedPreferences,
    pub workspace: SharedWorkspace,

    // ========== Command Handlers ==========
    pub reload_voices_handler: ReloadVoicesHandler,
    pub update_preferences_handler: UpdateSpeechPreferencesHandler,
    pub speak_handler: SpeakHandler,
    pub edit_dictionary_handler: EditDictionaryHandler,
    pub create_verb_handler: CreateVerbHandler,
    pub update_verb_handler: UpdateVerbHandler,
    pub delete_verb_handler: DeleteVerbHandler,
    pub save_changes_handler: SaveChangesHandler,
    pub cancel_changes_handler: CancelChangesHandler,
    pub search_verbs_handler: SearchVerbsHandler,
    pub refresh_verbs_handler: RefreshVerbsHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub get_dictionary_handler: GetDictionaryStateHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        speaker: Arc<VoiceSpeaker>,
        dictionary_service: Arc<dyn DictionaryServicePort>,
        preferences: SharedPreferences,
        workspace: SharedWorkspace,
        update_group: impl Into<String>,
    ) -> Self {
        Self {
            // Command handlers
            reload_voices_handler: ReloadVoicesHandler::new(speaker.clone(), preferences.clone()),
            update_preferences_handler: UpdateSpeechPreferencesHandler::new(preferences.clone()),
            speak_handler: SpeakHandler::new(speaker.clone(), preferences.clone()),
            edit_dictionary_handler: EditDictionaryHandler::new(workspace.clone()),
            create_verb_handler: CreateVerbHandler::new(workspace.clone()),
            update_verb_handler: UpdateVerbHandler::new(workspace.clone()),
            delete_verb_handler: DeleteVerbHandler::new(workspace.clone()),
            save_changes_handler: SaveChangesHandler::new(
                dictionary_service.clone(),
                workspace.clone(),
                update_group,
            ),
            cancel_changes_handler: CancelChangesHandler::new(workspace.clone()),
            search_verbs_handler: SearchVerbsHandler::new(
                dictionary_service.clone(),
                workspace.clone(),
            ),
            refresh_verbs_handler: RefreshVerbsHandler::new(
                dictionary_service.clone(),
                workspace.clone(),
            ),

            // Query handlers
            list_voices_handler: ListVoicesHandler::new(speaker.clone(), preferences.clone()),
            get_dictionary_handler: GetDictionaryStateHandler::new(workspace.clone()),

            // Ports
            speaker,
            dictionary_service,
            preferences,
            workspace,
        }
    }
}
