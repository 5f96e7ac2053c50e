//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                    GET   健康检查
//! - /api/speech/voices           GET   当前音色列表与朗读设置
//! - /api/speech/reload           POST  按语言重新加载音色
//! - /api/speech/preferences      POST  更新音色、语速、音调
//! - /api/speech/speak            POST  朗读文本（打断上一段）
//! - /api/dictionary/state        GET   词典视图快照
//! - /api/dictionary/search       POST  按关键字搜索
//! - /api/dictionary/refresh      POST  重新读取
//! - /api/dictionary/edit         POST  进入编辑模式
//! - /api/dictionary/create       POST  新建空白词条
//! - /api/dictionary/update       POST  修改词条
//! - /api/dictionary/delete       POST  标记删除
//! - /api/dictionary/save         POST  提交变更批次
//! - /api/dictionary/cancel       POST  放弃变更

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/speech", speech_routes())
        .nest("/dictionary", dictionary_routes())
}

/// Speech 路由
fn speech_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/voices", get(handlers::list_voices))
        .route("/reload", post(handlers::reload_voices))
        .route("/preferences", post(handlers::update_preferences))
        .route("/speak", post(handlers::speak))
}

/// Dictionary 路由
fn dictionary_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/state", get(handlers::dictionary_state))
        .route("/search", post(handlers::search_verbs))
        .route("/refresh", post(handlers::refresh_verbs))
        .route("/edit", post(handlers::edit_dictionary))
        .route("/create", post(handlers::create_verb))
        .route("/update", post(handlers::update_verb))
        .route("/delete", post(handlers::delete_verb))
        .route("/save", post(handlers::save_changes))
        .route("/cancel", post(handlers::cancel_changes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;
    use uuid::Uuid;

    use crate::application::{
        shared_preferences, shared_workspace, VoiceSpeaker, VoiceSpeakerConfig,
    };
    use crate::domain::dictionary::Verb;
    use crate::domain::speech::{SpeechPreferences, VoiceDescriptor};
    use crate::infrastructure::adapters::{
        InstantClock, RecordingSpeechEngine, ScriptedVoiceRegistry,
    };
    use crate::infrastructure::http::build_router;
    use crate::infrastructure::memory::InMemoryDictionaryService;

    struct Fixture {
        router: Router,
        engine: Arc<RecordingSpeechEngine>,
        service: Arc<InMemoryDictionaryService>,
    }

    fn fixture(verbs: Vec<Verb>) -> Fixture {
        let registry = Arc::new(ScriptedVoiceRegistry::always(vec![
            VoiceDescriptor::new("Zoe", "en-US"),
            VoiceDescriptor::new("alice", "en-GB"),
            VoiceDescriptor::new("Hans", "de-DE"),
        ]));
        let engine = Arc::new(RecordingSpeechEngine::new());
        let speaker = Arc::new(VoiceSpeaker::new(
            VoiceSpeakerConfig::default(),
            registry,
            engine.clone(),
            Arc::new(InstantClock::new()),
        ));
        let service = InMemoryDictionaryService::with_verbs(verbs).arc();
        let state = AppState::new(
            speaker,
            service.clone(),
            shared_preferences(SpeechPreferences::default()),
            shared_workspace(),
            "dictionaryGroup",
        );
        Fixture {
            router: build_router(Arc::new(state)),
            engine,
            service,
        }
    }

    async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> Value {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn verb(base: &str) -> Verb {
        Verb {
            id: Uuid::new_v4(),
            base: base.to_string(),
            past: String::new(),
            participle: String::new(),
            translation: String::new(),
        }
    }

    #[tokio::test]
    async fn test_ping() {
        let f = fixture(vec![]);
        let body = call(&f.router, "GET", "/api/ping", None).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["dictionary_service"], true);
    }

    #[tokio::test]
    async fn test_reload_selects_first_sorted_voice() {
        let f = fixture(vec![]);

        let body = call(&f.router, "POST", "/api/speech/reload", Some(json!({ "language": "en" }))).await;
        assert_eq!(body["errno"], 0);
        let names: Vec<&str> = body["data"]["voices"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["alice", "Zoe"]);
        assert_eq!(body["data"]["phase"], "idle");
        assert_eq!(body["data"]["preferences"]["selected_voice_name"], "alice");
    }

    #[tokio::test]
    async fn test_speak_uses_selected_voice() {
        let f = fixture(vec![]);
        call(&f.router, "POST", "/api/speech/reload", Some(json!({ "language": "en" }))).await;
        let body = call(
            &f.router,
            "POST",
            "/api/speech/preferences",
            Some(json!({ "selected_voice": "Zoe", "rate": 1.5 })),
        )
        .await;
        assert_eq!(body["errno"], 0);

        let body = call(&f.router, "POST", "/api/speech/speak", Some(json!({ "phrase": "went" }))).await;
        assert_eq!(body["errno"], 0);

        let spoken = f.engine.spoken();
        assert_eq!(spoken.len(), 1);
        assert_eq!(spoken[0].text, "went");
        assert_eq!(spoken[0].rate, 1.5);
        assert_eq!(spoken[0].voice.as_ref().map(|v| v.name()), Some("Zoe"));
    }

    #[tokio::test]
    async fn test_invalid_requests_use_errno() {
        let f = fixture(vec![]);

        let body = call(&f.router, "POST", "/api/speech/speak", Some(json!({ "phrase": "  " }))).await;
        assert_eq!(body["errno"], 400);
        assert!(body["data"].is_null());

        let body = call(
            &f.router,
            "POST",
            "/api/speech/preferences",
            Some(json!({ "rate": 0.0 })),
        )
        .await;
        assert_eq!(body["errno"], 400);
    }

    #[tokio::test]
    async fn test_update_requires_edit_mode() {
        let existing = verb("go");
        let id = existing.id;
        let f = fixture(vec![existing]);
        call(&f.router, "POST", "/api/dictionary/refresh", None).await;

        let body = call(
            &f.router,
            "POST",
            "/api/dictionary/update",
            Some(json!({ "id": id, "past": "went" })),
        )
        .await;
        assert_eq!(body["errno"], 409);

        call(&f.router, "POST", "/api/dictionary/edit", None).await;
        let body = call(
            &f.router,
            "POST",
            "/api/dictionary/update",
            Some(json!({ "id": id, "past": "went" })),
        )
        .await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["pending_changes"], 1);
        assert_eq!(body["data"]["view"]["has_ui_changes"], true);
    }

    #[tokio::test]
    async fn test_create_and_save_round_trip() {
        let f = fixture(vec![]);

        let body = call(&f.router, "POST", "/api/dictionary/create", None).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["view"]["verbs_empty"], true);
        let id = body["data"]["created_id"].as_str().unwrap().to_string();

        let body = call(
            &f.router,
            "POST",
            "/api/dictionary/update",
            Some(json!({ "id": id, "base": "swim", "past": "swam" })),
        )
        .await;
        assert_eq!(body["data"]["view"]["verbs_empty"], false);

        let body = call(&f.router, "POST", "/api/dictionary/save", None).await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["message"], "Changes were sent to the server");
        assert_eq!(body["data"]["pending_changes"], 0);
        assert_eq!(body["data"]["verbs"][0]["base"], "swim");
        assert_eq!(f.service.len(), 1);
    }

    #[tokio::test]
    async fn test_search_with_pending_changes_is_refused() {
        let f = fixture(vec![verb("go")]);
        call(&f.router, "POST", "/api/dictionary/create", None).await;

        let body = call(
            &f.router,
            "POST",
            "/api/dictionary/search",
            Some(json!({ "query": "go" })),
        )
        .await;
        assert_eq!(body["errno"], 409);

        let body = call(&f.router, "POST", "/api/dictionary/cancel", None).await;
        assert_eq!(body["data"]["pending_changes"], 0);

        let body = call(
            &f.router,
            "POST",
            "/api/dictionary/search",
            Some(json!({ "query": "go" })),
        )
        .await;
        assert_eq!(body["errno"], 0);
        assert_eq!(body["data"]["search"], "go");
        assert_eq!(body["data"]["verbs"].as_array().unwrap().len(), 1);
    }
}
