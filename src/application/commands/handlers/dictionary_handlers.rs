//! Dictionary Command Handlers
//!
//! 词典工作区的写操作。涉及远程服务的操作在等待网络时不持有工作区锁，
//! 以便提交期间 busy 状态对查询可见。

use std::sync::Arc;

use uuid::Uuid;

use crate::application::commands::{
    CancelChanges, CreateVerb, DeleteVerb, EditDictionary, RefreshVerbs, SaveChanges,
    SearchVerbs, UpdateVerb,
};
use crate::application::error::ApplicationError;
use crate::application::messages;
use crate::application::ports::DictionaryServicePort;
use crate::application::session::{DictionarySnapshot, SharedWorkspace};
use crate::domain::dictionary::{VerbFilter, Verb};

/// 带提示文本的命令结果
#[derive(Debug, Clone)]
pub struct DictionaryOutcome {
    pub message: Option<&'static str>,
    pub snapshot: DictionarySnapshot,
}

/// 按工作区当前过滤条件重新查询并载入；失败时记录技术消息
async fn reload_verbs(
    service: &Arc<dyn DictionaryServicePort>,
    workspace: &SharedWorkspace,
    filter: Option<VerbFilter>,
) -> Result<Vec<Verb>, ApplicationError> {
    match service.list_verbs(filter.as_ref()).await {
        Ok(verbs) => Ok(verbs),
        Err(e) => {
            tracing::error!(error = %e, "Failed to query verbs");
            workspace.lock().await.report_technical(e.to_string(), None);
            Err(e.into())
        }
    }
}

// ============================================================================
// EditDictionary / CreateVerb / UpdateVerb / DeleteVerb / CancelChanges
// ============================================================================

/// EditDictionary Handler
pub struct EditDictionaryHandler {
    workspace: SharedWorkspace,
}

impl EditDictionaryHandler {
    pub fn new(workspace: SharedWorkspace) -> Self {
        Self { workspace }
    }

    pub async fn handle(&self, _command: EditDictionary) -> Result<DictionarySnapshot, ApplicationError> {
        let mut ws = self.workspace.lock().await;
        ws.edit()?;
        Ok(DictionarySnapshot::capture(&mut ws))
    }
}

/// 新建词条响应
#[derive(Debug, Clone)]
pub struct CreateVerbResponse {
    pub verb_id: Uuid,
    pub snapshot: DictionarySnapshot,
}

/// CreateVerb Handler
pub struct CreateVerbHandler {
    workspace: SharedWorkspace,
}

impl CreateVerbHandler {
    pub fn new(workspace: SharedWorkspace) -> Self {
        Self { workspace }
    }

    pub async fn handle(&self, _command: CreateVerb) -> Result<CreateVerbResponse, ApplicationError> {
        let mut ws = self.workspace.lock().await;
        let verb_id = ws.stage_create()?;

        tracing::debug!(verb_id = %verb_id, "Verb creation staged");

        Ok(CreateVerbResponse {
            verb_id,
            snapshot: DictionarySnapshot::capture(&mut ws),
        })
    }
}

/// UpdateVerb Handler
pub struct UpdateVerbHandler {
    workspace: SharedWorkspace,
}

impl UpdateVerbHandler {
    pub fn new(workspace: SharedWorkspace) -> Self {
        Self { workspace }
    }

    pub async fn handle(&self, command: UpdateVerb) -> Result<DictionarySnapshot, ApplicationError> {
        let mut ws = self.workspace.lock().await;
        ws.stage_update(command.verb_id, command.patch)?;
        Ok(DictionarySnapshot::capture(&mut ws))
    }
}

/// DeleteVerb Handler
pub struct DeleteVerbHandler {
    workspace: SharedWorkspace,
}

impl DeleteVerbHandler {
    pub fn new(workspace: SharedWorkspace) -> Self {
        Self { workspace }
    }

    pub async fn handle(&self, command: DeleteVerb) -> Result<DictionaryOutcome, ApplicationError> {
        let mut ws = self.workspace.lock().await;
        ws.stage_delete(command.verb_id)?;

        tracing::info!(verb_id = %command.verb_id, "Verb deletion staged");

        Ok(DictionaryOutcome {
            message: Some(messages::DELETION_SUCCESS),
            snapshot: DictionarySnapshot::capture(&mut ws),
        })
    }
}

/// CancelChanges Handler
pub struct CancelChangesHandler {
    workspace: SharedWorkspace,
}

impl CancelChangesHandler {
    pub fn new(workspace: SharedWorkspace) -> Self {
        Self { workspace }
    }

    pub async fn handle(&self, _command: CancelChanges) -> Result<DictionarySnapshot, ApplicationError> {
        let mut ws = self.workspace.lock().await;
        let dropped = ws.pending_changes().len();
        ws.cancel()?;

        tracing::info!(dropped = dropped, "Pending changes discarded");

        Ok(DictionarySnapshot::capture(&mut ws))
    }
}

// ============================================================================
// SaveChanges
// ============================================================================

/// SaveChanges Handler
///
/// 将延迟更新组作为一个批次提交；提交结束后按当前过滤条件重新查询
pub struct SaveChangesHandler {
    service: Arc<dyn DictionaryServicePort>,
    workspace: SharedWorkspace,
    update_group: String,
}

impl SaveChangesHandler {
    pub fn new(
        service: Arc<dyn DictionaryServicePort>,
        workspace: SharedWorkspace,
        update_group: impl Into<String>,
    ) -> Self {
        Self {
            service,
            workspace,
            update_group: update_group.into(),
        }
    }

    pub async fn handle(&self, _command: SaveChanges) -> Result<DictionaryOutcome, ApplicationError> {
        let (batch, filter) = {
            let mut ws = self.workspace.lock().await;
            let batch = ws.begin_save()?;
            (batch, ws.filter().cloned())
        };

        tracing::info!(
            group = %self.update_group,
            changes = batch.len(),
            "Submitting batch"
        );

        let outcome = if batch.is_empty() {
            Default::default()
        } else {
            match self.service.submit_batch(&self.update_group, &batch).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(error = %e, "Batch submission failed");
                    self.workspace.lock().await.fail_save(e.to_string());
                    return Err(e.into());
                }
            }
        };

        self.workspace
            .lock()
            .await
            .finish_save(&batch, &outcome.rejected);

        if !outcome.is_success() {
            tracing::warn!(
                rejected = outcome.rejected.len(),
                "Batch partially rejected by service"
            );
        }

        // 被接受的变更已出组，无论是否有拒绝都需要重新查询
        let verbs = reload_verbs(&self.service, &self.workspace, filter).await?;
        let mut ws = self.workspace.lock().await;
        ws.load(verbs);

        Ok(DictionaryOutcome {
            message: outcome.is_success().then_some(messages::CHANGES_SENT),
            snapshot: DictionarySnapshot::capture(&mut ws),
        })
    }
}

// ============================================================================
// SearchVerbs / RefreshVerbs
// ============================================================================

/// SearchVerbs Handler
///
/// 在 base、past、participle、translation 上做 contains 的 OR 过滤
pub struct SearchVerbsHandler {
    service: Arc<dyn DictionaryServicePort>,
    workspace: SharedWorkspace,
}

impl SearchVerbsHandler {
    pub fn new(service: Arc<dyn DictionaryServicePort>, workspace: SharedWorkspace) -> Self {
        Self { service, workspace }
    }

    pub async fn handle(&self, command: SearchVerbs) -> Result<DictionarySnapshot, ApplicationError> {
        self.workspace.lock().await.ensure_refreshable()?;

        let filter = VerbFilter::search(command.query);
        let verbs = reload_verbs(&self.service, &self.workspace, filter.clone()).await?;

        tracing::debug!(
            search = ?filter.as_ref().map(VerbFilter::value),
            found = verbs.len(),
            "Verbs filtered"
        );

        let mut ws = self.workspace.lock().await;
        ws.apply_filter(filter);
        ws.load(verbs);
        Ok(DictionarySnapshot::capture(&mut ws))
    }
}

/// RefreshVerbs Handler
pub struct RefreshVerbsHandler {
    service: Arc<dyn DictionaryServicePort>,
    workspace: SharedWorkspace,
}

impl RefreshVerbsHandler {
    pub fn new(service: Arc<dyn DictionaryServicePort>, workspace: SharedWorkspace) -> Self {
        Self { service, workspace }
    }

    pub async fn handle(&self, _command: RefreshVerbs) -> Result<DictionaryOutcome, ApplicationError> {
        let filter = {
            let ws = self.workspace.lock().await;
            ws.ensure_refreshable()?;
            ws.filter().cloned()
        };

        let verbs = reload_verbs(&self.service, &self.workspace, filter).await?;

        let mut ws = self.workspace.lock().await;
        ws.load(verbs);

        tracing::info!(verbs = ws.visible_verbs().len(), "Verbs refreshed");

        Ok(DictionaryOutcome {
            message: Some(messages::REFRESH_SUCCESS),
            snapshot: DictionarySnapshot::capture(&mut ws),
        })
    }
}
