//! Dictionary Query Handlers

use crate::application::queries::GetDictionaryState;
use crate::application::session::{DictionarySnapshot, SharedWorkspace};

/// GetDictionaryState Handler
pub struct GetDictionaryStateHandler {
    workspace: SharedWorkspace,
}

impl GetDictionaryStateHandler {
    pub fn new(workspace: SharedWorkspace) -> Self {
        Self { workspace }
    }

    pub async fn handle(&self, _query: GetDictionaryState) -> DictionarySnapshot {
        let mut ws = self.workspace.lock().await;
        DictionarySnapshot::capture(&mut ws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::shared_workspace;

    #[tokio::test]
    async fn test_messages_are_shown_once() {
        let workspace = shared_workspace();
        workspace
            .lock()
            .await
            .report_technical("Service unavailable", None);

        let handler = GetDictionaryStateHandler::new(workspace);
        let first = handler.handle(GetDictionaryState).await;
        assert_eq!(first.messages.len(), 1);
        assert!(first.technical_errors);
        assert!(first.view.has_ui_changes);

        let second = handler.handle(GetDictionaryState).await;
        assert!(second.messages.is_empty());
        assert!(second.technical_errors);
    }
}
