//! In-Memory Dictionary Service Implementation
//!
//! 未配置远程服务时使用；批次中的变更逐条应用（非原子）

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{BatchOutcome, DictionaryServiceError, DictionaryServicePort};
use crate::domain::dictionary::{PendingChange, RejectedChange, Verb, VerbFilter};

/// 内存词典服务
pub struct InMemoryDictionaryService {
    verbs: DashMap<Uuid, Verb>,
}

impl InMemoryDictionaryService {
    pub fn new() -> Self {
        Self {
            verbs: DashMap::new(),
        }
    }

    pub fn with_verbs(verbs: Vec<Verb>) -> Self {
        let service = Self::new();
        for verb in verbs {
            service.verbs.insert(verb.id, verb);
        }
        service
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn remove(&self, id: Uuid) -> Option<Verb> {
        self.verbs.remove(&id).map(|(_, verb)| verb)
    }

    fn apply(&self, change: &PendingChange) -> Result<(), String> {
        match change {
            PendingChange::Create { verb } => {
                if self.verbs.contains_key(&verb.id) {
                    return Err(format!("Verb already exists: {}", verb.id));
                }
                self.verbs.insert(verb.id, verb.clone());
            }
            PendingChange::Update { id, patch } => {
                let mut verb = self
                    .verbs
                    .get_mut(id)
                    .ok_or_else(|| "Verb not found".to_string())?;
                patch.apply_to(&mut verb);
            }
            PendingChange::Delete { id } => {
                self.verbs
                    .remove(id)
                    .ok_or_else(|| "Verb not found".to_string())?;
            }
        }
        Ok(())
    }
}

impl Default for InMemoryDictionaryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DictionaryServicePort for InMemoryDictionaryService {
    async fn list_verbs(
        &self,
        filter: Option<&VerbFilter>,
    ) -> Result<Vec<Verb>, DictionaryServiceError> {
        let mut verbs: Vec<Verb> = self
            .verbs
            .iter()
            .filter(|entry| filter.map_or(true, |f| f.matches(entry.value())))
            .map(|entry| entry.value().clone())
            .collect();
        verbs.sort_by(|a, b| a.base.cmp(&b.base).then_with(|| a.id.cmp(&b.id)));
        Ok(verbs)
    }

    async fn submit_batch(
        &self,
        group: &str,
        changes: &[PendingChange],
    ) -> Result<BatchOutcome, DictionaryServiceError> {
        let rejected: Vec<RejectedChange> = changes
            .iter()
            .filter_map(|change| {
                self.apply(change).err().map(|message| RejectedChange {
                    verb_id: change.verb_id(),
                    message,
                })
            })
            .collect();

        tracing::debug!(
            group = %group,
            submitted = changes.len(),
            rejected = rejected.len(),
            "In-memory batch applied"
        );

        Ok(BatchOutcome { rejected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dictionary::VerbPatch;

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
    async fn test_list_is_sorted_and_filtered() {
        let service = InMemoryDictionaryService::with_verbs(vec![verb("go"), verb("be")]);

        let all = service.list_verbs(None).await.unwrap();
        assert_eq!(all[0].base, "be");
        assert_eq!(all[1].base, "go");

        let filter = VerbFilter::search("g").unwrap();
        let found = service.list_verbs(Some(&filter)).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_batch_applies_changes() {
        let existing = verb("go");
        let id = existing.id;
        let service = InMemoryDictionaryService::with_verbs(vec![existing]);
        let created = verb("swim");

        let outcome = service
            .submit_batch(
                "dictionaryGroup",
                &[
                    PendingChange::Create {
                        verb: created.clone(),
                    },
                    PendingChange::Update {
                        id,
                        patch: VerbPatch {
                            past: Some("went".to_string()),
                            ..Default::default()
                        },
                    },
                ],
            )
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(service.len(), 2);
        let verbs = service.list_verbs(None).await.unwrap();
        assert_eq!(verbs[0].past, "went");
    }

    #[tokio::test]
    async fn test_batch_reports_unknown_ids() {
        let service = InMemoryDictionaryService::new();
        let missing = Uuid::new_v4();

        let outcome = service
            .submit_batch("dictionaryGroup", &[PendingChange::Delete { id: missing }])
            .await
            .unwrap();

        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].verb_id, missing);
        assert!(service.is_empty());
    }
}
