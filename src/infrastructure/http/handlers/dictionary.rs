//! Dictionary HTTP Handlers
//!
//! 每个接口都返回最新的词典视图快照

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{
    CancelChanges, CreateVerb, DeleteVerb, EditDictionary, GetDictionaryState, RefreshVerbs,
    SaveChanges, SearchVerbs, UpdateVerb,
};
use crate::infrastructure::http::dto::{
    ApiResponse, DeleteVerbRequest, DictionaryResponse, SearchVerbsRequest, UpdateVerbRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

type DictionaryResult = Result<Json<ApiResponse<DictionaryResponse>>, ApiError>;

fn respond(response: impl Into<DictionaryResponse>) -> DictionaryResult {
    Ok(Json(ApiResponse::success(response.into())))
}

/// 当前词典视图
pub async fn dictionary_state(State(state): State<Arc<AppState>>) -> DictionaryResult {
    respond(state.get_dictionary_handler.handle(GetDictionaryState).await)
}

/// 按关键字搜索
pub async fn search_verbs(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchVerbsRequest>,
) -> DictionaryResult {
    let snapshot = state
        .search_verbs_handler
        .handle(SearchVerbs { query: req.query })
        .await?;
    respond(snapshot)
}

/// 重新读取列表
pub async fn refresh_verbs(State(state): State<Arc<AppState>>) -> DictionaryResult {
    respond(state.refresh_verbs_handler.handle(RefreshVerbs).await?)
}

/// 进入编辑模式
pub async fn edit_dictionary(State(state): State<Arc<AppState>>) -> DictionaryResult {
    respond(state.edit_dictionary_handler.handle(EditDictionary).await?)
}

/// 新建空白词条
pub async fn create_verb(State(state): State<Arc<AppState>>) -> DictionaryResult {
    respond(state.create_verb_handler.handle(CreateVerb).await?)
}

/// 修改词条字段
pub async fn update_verb(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateVerbRequest>,
) -> DictionaryResult {
    let snapshot = state
        .update_verb_handler
        .handle(UpdateVerb {
            verb_id: req.id,
            patch: req.patch,
        })
        .await?;
    respond(snapshot)
}

/// 标记删除
pub async fn delete_verb(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteVerbRequest>,
) -> DictionaryResult {
    let outcome = state
        .delete_verb_handler
        .handle(DeleteVerb { verb_id: req.id })
        .await?;
    respond(outcome)
}

/// 提交所有待保存的变更
pub async fn save_changes(State(state): State<Arc<AppState>>) -> DictionaryResult {
    respond(state.save_changes_handler.handle(SaveChanges).await?)
}

/// 放弃所有待保存的变更
pub async fn cancel_changes(State(state): State<Arc<AppState>>) -> DictionaryResult {
    respond(state.cancel_changes_handler.handle(CancelChanges).await?)
}
