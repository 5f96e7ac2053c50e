//! Dictionary Context - Workspace
//!
//! 词典视图的工作区：最近一次查询结果、延迟更新组中的待提交变更、视图标志和服务消息。
//! 纯状态机，不做任何 IO。

use uuid::Uuid;

use super::{
    DictionaryError, DictionaryViewState, PendingChange, RejectedChange, ServiceMessage, Verb,
    VerbFilter, VerbPatch,
};

/// 词典工作区
///
/// 不变量:
/// - 每个词条在 pending 中至多一条变更
/// - busy 期间拒绝新的暂存操作
/// - technical_errors 为真时 has_ui_changes 恒为真
#[derive(Debug, Default)]
pub struct DictionaryWorkspace {
    verbs: Vec<Verb>,
    pending: Vec<PendingChange>,
    view: DictionaryViewState,
    technical_errors: bool,
    filter: Option<VerbFilter>,
    messages: Vec<ServiceMessage>,
}

impl DictionaryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== 查询结果 ==========

    /// 替换最近一次查询结果
    pub fn load(&mut self, verbs: Vec<Verb>) {
        self.verbs = verbs;
        self.refresh_verbs_empty();
    }

    pub fn apply_filter(&mut self, filter: Option<VerbFilter>) {
        self.filter = filter;
    }

    pub fn filter(&self) -> Option<&VerbFilter> {
        self.filter.as_ref()
    }

    /// 用户可见的词条：新建的在前，其后是已应用修改、去掉删除的查询结果
    pub fn visible_verbs(&self) -> Vec<Verb> {
        let mut rows: Vec<Verb> = self
            .pending
            .iter()
            .filter_map(|c| match c {
                PendingChange::Create { verb } => Some(verb.clone()),
                _ => None,
            })
            .collect();

        for verb in &self.verbs {
            match self.pending_for(verb.id) {
                Some(PendingChange::Delete { .. }) => {}
                Some(PendingChange::Update { patch, .. }) => {
                    let mut verb = verb.clone();
                    patch.apply_to(&mut verb);
                    rows.push(verb);
                }
                _ => rows.push(verb.clone()),
            }
        }
        rows
    }

    // ========== 视图标志 ==========

    pub fn view(&self) -> DictionaryViewState {
        self.view
    }

    pub fn technical_errors(&self) -> bool {
        self.technical_errors
    }

    pub fn pending_changes(&self) -> &[PendingChange] {
        &self.pending
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn edit(&mut self) -> Result<(), DictionaryError> {
        self.ensure_idle()?;
        self.view.editable = true;
        Ok(())
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.view.busy = busy;
    }

    /// 更新 has_ui_changes
    ///
    /// 存在技术错误时恒为 true；未显式指定时取是否有待提交变更。
    pub fn set_ui_changes(&mut self, has_ui_changes: Option<bool>) {
        self.view.has_ui_changes = if self.technical_errors {
            true
        } else {
            has_ui_changes.unwrap_or_else(|| self.has_pending_changes())
        };
    }

    // ========== 暂存变更 ==========

    /// 暂存一个空白新词条，返回其 ID
    pub fn stage_create(&mut self) -> Result<Uuid, DictionaryError> {
        self.ensure_idle()?;
        let verb = Verb::empty();
        let id = verb.id;
        self.pending.insert(0, PendingChange::Create { verb });

        self.set_ui_changes(None);
        self.view.verbs_empty = true;
        Ok(id)
    }

    /// 暂存修改
    ///
    /// 已有词条需处于编辑模式；新建但未提交的词条随时可改。
    pub fn stage_update(&mut self, id: Uuid, patch: VerbPatch) -> Result<(), DictionaryError> {
        self.ensure_idle()?;

        if let Some(PendingChange::Create { verb }) = self.pending_for_mut(id) {
            patch.apply_to(verb);
        } else {
            if !self.verbs.iter().any(|v| v.id == id) {
                return Err(DictionaryError::VerbNotFound(id));
            }
            if !self.view.editable {
                return Err(DictionaryError::NotEditable(id));
            }
            match self.pending_for_mut(id) {
                Some(PendingChange::Delete { .. }) => {
                    return Err(DictionaryError::VerbNotFound(id));
                }
                Some(PendingChange::Update { patch: existing, .. }) => existing.merge(patch),
                _ => {
                    if !patch.is_empty() {
                        self.pending.push(PendingChange::Update { id, patch });
                    }
                }
            }
        }

        self.set_ui_changes(None);
        self.refresh_verbs_empty();
        Ok(())
    }

    /// 暂存删除；未提交的新建词条直接丢弃
    pub fn stage_delete(&mut self, id: Uuid) -> Result<(), DictionaryError> {
        self.ensure_idle()?;

        if let Some(pos) = self
            .pending
            .iter()
            .position(|c| matches!(c, PendingChange::Create { verb } if verb.id == id))
        {
            self.pending.remove(pos);
        } else {
            if !self.verbs.iter().any(|v| v.id == id) {
                return Err(DictionaryError::VerbNotFound(id));
            }
            self.pending.retain(|c| c.verb_id() != id);
            self.pending.push(PendingChange::Delete { id });
        }

        self.set_ui_changes(Some(true));
        self.refresh_verbs_empty();
        Ok(())
    }

    /// 丢弃所有待提交变更
    pub fn reset_changes(&mut self) {
        self.pending.clear();
        self.refresh_verbs_empty();
    }

    /// 取消编辑：重置变更、清除技术错误、退出编辑模式
    pub fn cancel(&mut self) -> Result<(), DictionaryError> {
        self.ensure_idle()?;
        self.reset_changes();
        self.technical_errors = false;
        self.set_ui_changes(None);
        self.view.editable = false;
        Ok(())
    }

    pub fn ensure_refreshable(&self) -> Result<(), DictionaryError> {
        if self.has_pending_changes() {
            return Err(DictionaryError::PendingChanges);
        }
        Ok(())
    }

    // ========== 批量提交 ==========

    /// 开始提交：置 busy、退出编辑模式、清除技术错误，返回待提交变更的快照
    pub fn begin_save(&mut self) -> Result<Vec<PendingChange>, DictionaryError> {
        self.ensure_idle()?;
        self.view.busy = true;
        self.view.editable = false;
        self.technical_errors = false;
        Ok(self.pending.clone())
    }

    /// 提交完成：被接受的变更出组，被拒绝的保留并记录技术消息
    pub fn finish_save(&mut self, submitted: &[PendingChange], rejected: &[RejectedChange]) {
        self.pending.retain(|change| {
            let id = change.verb_id();
            !submitted.iter().any(|s| s.verb_id() == id)
                || rejected.iter().any(|r| r.verb_id == id)
        });

        for rejection in rejected {
            let is_delete = submitted
                .iter()
                .any(|c| c.verb_id() == rejection.verb_id && c.is_delete());
            let message = if is_delete {
                format!("{}: {}", rejection.message, rejection.verb_id)
            } else {
                rejection.message.clone()
            };
            self.report_technical(message, Some(rejection.verb_id));
        }

        self.view.busy = false;
        self.set_ui_changes(Some(false));
        self.refresh_verbs_empty();
    }

    /// 提交失败（整个批次未送达）：变更保留
    pub fn fail_save(&mut self, message: impl Into<String>) {
        self.view.busy = false;
        self.set_ui_changes(None);
        self.report_technical(message, None);
    }

    // ========== 消息 ==========

    /// 记录一条技术错误消息
    pub fn report_technical(&mut self, message: impl Into<String>, target: Option<Uuid>) {
        self.messages.push(ServiceMessage::technical(message, target));
        self.technical_errors = true;
        self.set_ui_changes(Some(true));
    }

    pub fn messages(&self) -> &[ServiceMessage] {
        &self.messages
    }

    /// 取出并清空消息
    pub fn take_messages(&mut self) -> Vec<ServiceMessage> {
        std::mem::take(&mut self.messages)
    }

    // ========== 内部 ==========

    fn ensure_idle(&self) -> Result<(), DictionaryError> {
        if self.view.busy {
            return Err(DictionaryError::Busy);
        }
        Ok(())
    }

    fn pending_for(&self, id: Uuid) -> Option<&PendingChange> {
        self.pending.iter().find(|c| c.verb_id() == id)
    }

    fn pending_for_mut(&mut self, id: Uuid) -> Option<&mut PendingChange> {
        self.pending.iter_mut().find(|c| c.verb_id() == id)
    }

    fn refresh_verbs_empty(&mut self) {
        let blank_create = self
            .pending
            .iter()
            .any(|c| matches!(c, PendingChange::Create { verb } if verb.is_blank()));
        self.view.verbs_empty = blank_create || self.visible_verbs().is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verb(base: &str) -> Verb {
        Verb {
            id: Uuid::new_v4(),
            base: base.to_string(),
            past: String::new(),
            participle: String::new(),
            translation: String::new(),
        }
    }

    fn loaded(bases: &[&str]) -> DictionaryWorkspace {
        let mut ws = DictionaryWorkspace::new();
        ws.load(bases.iter().map(|b| verb(b)).collect());
        ws
    }

    #[test]
    fn test_initial_view_state() {
        let ws = DictionaryWorkspace::new();
        assert_eq!(ws.view(), DictionaryViewState::default());
        assert!(ws.view().verbs_empty);
        assert!(!ws.has_pending_changes());
    }

    #[test]
    fn test_load_clears_verbs_empty() {
        let ws = loaded(&["go"]);
        assert!(!ws.view().verbs_empty);
    }

    #[test]
    fn test_create_marks_changes_and_verbs_empty() {
        let mut ws = loaded(&["go"]);
        let id = ws.stage_create().unwrap();

        let view = ws.view();
        assert!(view.has_ui_changes);
        assert!(view.verbs_empty);
        assert_eq!(ws.visible_verbs()[0].id, id);

        ws.stage_update(
            id,
            VerbPatch {
                base: Some("swim".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!ws.view().verbs_empty);
    }

    #[test]
    fn test_update_requires_edit_mode_for_existing() {
        let mut ws = loaded(&["go"]);
        let id = ws.visible_verbs()[0].id;
        let patch = VerbPatch {
            past: Some("went".to_string()),
            ..Default::default()
        };

        assert_eq!(
            ws.stage_update(id, patch.clone()),
            Err(DictionaryError::NotEditable(id))
        );

        ws.edit().unwrap();
        ws.stage_update(id, patch).unwrap();
        assert_eq!(ws.visible_verbs()[0].past, "went");
        assert_eq!(ws.pending_changes().len(), 1);

        ws.stage_update(
            id,
            VerbPatch {
                participle: Some("gone".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(ws.pending_changes().len(), 1);
        let row = &ws.visible_verbs()[0];
        assert_eq!((row.past.as_str(), row.participle.as_str()), ("went", "gone"));
    }

    #[test]
    fn test_update_unknown_verb() {
        let mut ws = loaded(&["go"]);
        ws.edit().unwrap();
        let unknown = Uuid::new_v4();
        assert_eq!(
            ws.stage_update(unknown, VerbPatch::default()),
            Err(DictionaryError::VerbNotFound(unknown))
        );
    }

    #[test]
    fn test_delete_staged_create_drops_it() {
        let mut ws = loaded(&["go"]);
        let id = ws.stage_create().unwrap();
        ws.stage_delete(id).unwrap();
        assert!(!ws.has_pending_changes());
        // 删除后 has_ui_changes 显式置为 true
        assert!(ws.view().has_ui_changes);
    }

    #[test]
    fn test_delete_existing_hides_row() {
        let mut ws = loaded(&["go", "be"]);
        let id = ws.visible_verbs()[0].id;
        ws.stage_delete(id).unwrap();

        assert_eq!(ws.visible_verbs().len(), 1);
        assert_eq!(ws.pending_changes(), &[PendingChange::Delete { id }]);
        assert!(ws.view().has_ui_changes);
    }

    #[test]
    fn test_cancel_resets_everything() {
        let mut ws = loaded(&["go"]);
        ws.edit().unwrap();
        ws.stage_create().unwrap();
        ws.report_technical("boom", None);

        ws.cancel().unwrap();
        let view = ws.view();
        assert!(!view.editable);
        assert!(!view.has_ui_changes);
        assert!(!ws.technical_errors());
        assert!(!ws.has_pending_changes());
    }

    #[test]
    fn test_technical_errors_force_ui_changes() {
        let mut ws = loaded(&["go"]);
        ws.report_technical("service down", None);
        ws.set_ui_changes(Some(false));
        assert!(ws.view().has_ui_changes);
        assert_eq!(ws.take_messages().len(), 1);
        assert!(ws.messages().is_empty());
    }

    #[test]
    fn test_refresh_refused_with_pending_changes() {
        let mut ws = loaded(&["go"]);
        assert!(ws.ensure_refreshable().is_ok());
        ws.stage_create().unwrap();
        assert_eq!(ws.ensure_refreshable(), Err(DictionaryError::PendingChanges));
    }

    #[test]
    fn test_save_success_clears_pending() {
        let mut ws = loaded(&["go"]);
        ws.edit().unwrap();
        ws.stage_create().unwrap();

        let batch = ws.begin_save().unwrap();
        assert!(ws.view().busy);
        assert!(!ws.view().editable);
        assert_eq!(ws.stage_create(), Err(DictionaryError::Busy));

        ws.finish_save(&batch, &[]);
        assert!(!ws.view().busy);
        assert!(!ws.view().has_ui_changes);
        assert!(!ws.has_pending_changes());
    }

    #[test]
    fn test_edit_and_cancel_refused_while_saving() {
        let mut ws = loaded(&["go"]);
        ws.stage_create().unwrap();
        let batch = ws.begin_save().unwrap();

        assert_eq!(ws.edit(), Err(DictionaryError::Busy));
        assert_eq!(ws.cancel(), Err(DictionaryError::Busy));
        assert!(!ws.view().editable);
        assert_eq!(ws.pending_changes().len(), 1);

        ws.finish_save(&batch, &[]);
        assert!(!ws.view().editable);
        assert!(ws.edit().is_ok());
    }

    #[test]
    fn test_save_rejection_keeps_change_and_reports() {
        let mut ws = loaded(&["go", "be"]);
        let keep = ws.visible_verbs()[0].id;
        let fail = ws.visible_verbs()[1].id;
        ws.stage_delete(keep).unwrap();
        ws.stage_delete(fail).unwrap();

        let batch = ws.begin_save().unwrap();
        ws.finish_save(
            &batch,
            &[RejectedChange {
                verb_id: fail,
                message: "Forbidden".to_string(),
            }],
        );

        assert_eq!(ws.pending_changes(), &[PendingChange::Delete { id: fail }]);
        assert!(ws.technical_errors());
        assert!(ws.view().has_ui_changes);
        let messages = ws.take_messages();
        assert_eq!(messages[0].message, format!("Forbidden: {}", fail));
        assert_eq!(messages[0].target, Some(fail));
    }

    #[test]
    fn test_save_transport_failure_keeps_pending() {
        let mut ws = loaded(&["go"]);
        ws.stage_create().unwrap();
        ws.begin_save().unwrap();
        ws.fail_save("connection refused");

        assert!(!ws.view().busy);
        assert!(ws.has_pending_changes());
        assert!(ws.view().has_ui_changes);
        assert!(ws.technical_errors());
    }
}
