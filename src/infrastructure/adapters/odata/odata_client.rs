//! OData Client - 调用外部 OData v4 词典服务
//!
//! 实现 DictionaryServicePort trait
//!
//! 外部服务 API:
//! GET  {service}/Verbs?$filter=contains(base,'go') or contains(past,'go') ...
//!      Response: {"value": [{"ID": "...", "base": "...", ...}]}
//! POST {service}/$batch  (OData v4 JSON batch, Prefer: odata.continue-on-error)
//!      Request:  {"requests": [{"id", "method", "url", "headers", "body"}]}
//!      Response: {"responses": [{"id", "status", "body"}]}
//!
//! 批次中的请求不设 atomicityGroup，各自独立成功或失败

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::{BatchOutcome, DictionaryServiceError, DictionaryServicePort};
use crate::domain::dictionary::{PendingChange, RejectedChange, Verb, VerbFilter};

/// OData 客户端配置
#[derive(Debug, Clone)]
pub struct ODataClientConfig {
    /// 服务根 URL
    pub service_url: String,
    /// 实体集名称
    pub entity_set: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ODataClientConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:4004/odata/v4/dictionary".to_string(),
            entity_set: "Verbs".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ODataClientConfig {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self {
            service_url: service_url.into(),
            ..Default::default()
        }
    }

    pub fn with_entity_set(mut self, entity_set: impl Into<String>) -> Self {
        self.entity_set = entity_set.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 实体在线上的形态
#[derive(Debug, Serialize, Deserialize)]
struct VerbEntity {
    #[serde(rename = "ID")]
    id: Uuid,
    #[serde(default)]
    base: String,
    #[serde(default)]
    past: String,
    #[serde(default)]
    participle: String,
    #[serde(default)]
    translation: String,
}

impl From<VerbEntity> for Verb {
    fn from(e: VerbEntity) -> Self {
        Self {
            id: e.id,
            base: e.base,
            past: e.past,
            participle: e.participle,
            translation: e.translation,
        }
    }
}

impl From<&Verb> for VerbEntity {
    fn from(v: &Verb) -> Self {
        Self {
            id: v.id,
            base: v.base.clone(),
            past: v.past.clone(),
            participle: v.participle.clone(),
            translation: v.translation.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Collection<T> {
    value: Vec<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchItem {
    id: String,
    method: &'static str,
    url: String,
    headers: BTreeMap<&'static str, &'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<Value>,
}

#[derive(Debug, Serialize)]
struct BatchRequest {
    requests: Vec<BatchItem>,
}

#[derive(Debug, Deserialize)]
struct BatchResponseItem {
    id: String,
    status: u16,
    #[serde(default)]
    body: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    responses: Vec<BatchResponseItem>,
}

/// 渲染 $filter 表达式：各字段 contains 条件以 or 连接
pub fn render_filter(filter: &VerbFilter) -> String {
    let literal = format!("'{}'", filter.value().replace('\'', "''"));
    filter
        .fields()
        .iter()
        .map(|f| format!("contains({},{})", f.property(), literal))
        .collect::<Vec<_>>()
        .join(" or ")
}

fn build_batch(entity_set: &str, changes: &[PendingChange]) -> BatchRequest {
    let requests = changes
        .iter()
        .enumerate()
        .map(|(i, change)| {
            let (method, url, body) = match change {
                PendingChange::Create { verb } => (
                    "POST",
                    entity_set.to_string(),
                    serde_json::to_value(VerbEntity::from(verb)).ok(),
                ),
                PendingChange::Update { id, patch } => (
                    "PATCH",
                    format!("{}({})", entity_set, id),
                    serde_json::to_value(patch).ok(),
                ),
                PendingChange::Delete { id } => {
                    ("DELETE", format!("{}({})", entity_set, id), None)
                }
            };

            let mut headers = BTreeMap::new();
            if body.is_some() {
                headers.insert("content-type", "application/json");
            }

            BatchItem {
                id: (i + 1).to_string(),
                method,
                url,
                headers,
                body,
            }
        })
        .collect();

    BatchRequest { requests }
}

/// 把批次响应映射回变更
///
/// 状态码 >= 400 或没有响应（服务在此前中止）的请求视为被拒绝；
/// 无法对应到任何请求的失败响应使整个提交失败
fn collect_rejections(
    changes: &[PendingChange],
    response: BatchResponse,
) -> Result<BatchOutcome, DictionaryServiceError> {
    let mut items: Vec<Option<BatchResponseItem>> = changes.iter().map(|_| None).collect();

    for item in response.responses {
        let index = item
            .id
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|i| *i < changes.len());
        match index {
            Some(i) => items[i] = Some(item),
            None if item.status >= 400 => {
                return Err(DictionaryServiceError::ServiceError(format!(
                    "Batch request {} failed: {}",
                    item.id,
                    failure_message(&item)
                )));
            }
            None => tracing::debug!(id = %item.id, "Ignoring response for unknown request"),
        }
    }

    let rejected = changes
        .iter()
        .zip(items)
        .filter_map(|(change, item)| {
            let message = match item {
                Some(item) if item.status < 400 => return None,
                Some(item) => failure_message(&item),
                None => "Request was not processed".to_string(),
            };
            Some(RejectedChange {
                verb_id: change.verb_id(),
                message,
            })
        })
        .collect();

    Ok(BatchOutcome { rejected })
}

fn failure_message(item: &BatchResponseItem) -> String {
    item.body
        .as_ref()
        .and_then(|b| b.pointer("/error/message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", item.status))
}

fn map_send_error(e: reqwest::Error) -> DictionaryServiceError {
    if e.is_timeout() {
        DictionaryServiceError::Timeout
    } else if e.is_connect() {
        DictionaryServiceError::NetworkError(format!("Cannot connect to dictionary service: {}", e))
    } else {
        DictionaryServiceError::NetworkError(e.to_string())
    }
}

/// OData v4 词典服务客户端
pub struct ODataDictionaryClient {
    client: Client,
    config: ODataClientConfig,
}

impl ODataDictionaryClient {
    /// 创建新的 OData 客户端
    pub fn new(config: ODataClientConfig) -> Result<Self, DictionaryServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DictionaryServiceError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn service_root(&self) -> &str {
        self.config.service_url.trim_end_matches('/')
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.service_root(), self.config.entity_set)
    }

    fn batch_url(&self) -> String {
        format!("{}/$batch", self.service_root())
    }

    fn metadata_url(&self) -> String {
        format!("{}/$metadata", self.service_root())
    }

    async fn error_text(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(body);
        format!("HTTP {}: {}", status, message)
    }
}

#[async_trait]
impl DictionaryServicePort for ODataDictionaryClient {
    async fn list_verbs(
        &self,
        filter: Option<&VerbFilter>,
    ) -> Result<Vec<Verb>, DictionaryServiceError> {
        let mut request = self
            .client
            .get(self.collection_url())
            .header("Accept", "application/json")
            .header("OData-Version", "4.0");
        if let Some(filter) = filter {
            request = request.query(&[("$filter", render_filter(filter))]);
        }

        tracing::debug!(
            url = %self.collection_url(),
            search = ?filter.map(VerbFilter::value),
            "Querying verbs"
        );

        let response = request.send().await.map_err(map_send_error)?;
        if !response.status().is_success() {
            return Err(DictionaryServiceError::ServiceError(
                Self::error_text(response).await,
            ));
        }

        let collection: Collection<VerbEntity> = response
            .json()
            .await
            .map_err(|e| DictionaryServiceError::InvalidResponse(e.to_string()))?;

        Ok(collection.value.into_iter().map(Verb::from).collect())
    }

    async fn submit_batch(
        &self,
        group: &str,
        changes: &[PendingChange],
    ) -> Result<BatchOutcome, DictionaryServiceError> {
        let batch = build_batch(&self.config.entity_set, changes);

        tracing::debug!(
            url = %self.batch_url(),
            group = %group,
            requests = batch.requests.len(),
            "Sending batch"
        );

        let response = self
            .client
            .post(self.batch_url())
            .header("Accept", "application/json")
            .header("OData-Version", "4.0")
            .header("Prefer", "odata.continue-on-error")
            .json(&batch)
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(DictionaryServiceError::ServiceError(
                Self::error_text(response).await,
            ));
        }

        let body: BatchResponse = response
            .json()
            .await
            .map_err(|e| DictionaryServiceError::InvalidResponse(e.to_string()))?;
        let outcome = collect_rejections(changes, body)?;

        tracing::info!(
            group = %group,
            submitted = changes.len(),
            rejected = outcome.rejected.len(),
            "Batch completed"
        );

        Ok(outcome)
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.metadata_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dictionary::VerbPatch;
    use serde_json::json;

    #[test]
    fn test_config_builder() {
        let config = ODataClientConfig::new("http://example.com/odata/")
            .with_entity_set("IrregularVerbs")
            .with_timeout(5);
        assert_eq!(config.entity_set, "IrregularVerbs");
        assert_eq!(config.timeout_secs, 5);

        let client = ODataDictionaryClient::new(config).unwrap();
        assert_eq!(client.collection_url(), "http://example.com/odata/IrregularVerbs");
        assert_eq!(client.batch_url(), "http://example.com/odata/$batch");
    }

    #[test]
    fn test_render_filter_escapes_quotes() {
        let filter = VerbFilter::search("o'go").unwrap();
        assert_eq!(
            render_filter(&filter),
            "contains(base,'o''go') or contains(past,'o''go') or \
             contains(participle,'o''go') or contains(translation,'o''go')"
        );
    }

    #[test]
    fn test_build_batch_shape() {
        let mut created = Verb::empty();
        created.base = "swim".to_string();
        let updated = Uuid::new_v4();
        let deleted = Uuid::new_v4();

        let changes = vec![
            PendingChange::Create {
                verb: created.clone(),
            },
            PendingChange::Update {
                id: updated,
                patch: VerbPatch {
                    past: Some("went".to_string()),
                    ..Default::default()
                },
            },
            PendingChange::Delete { id: deleted },
        ];

        let batch = serde_json::to_value(build_batch("Verbs", &changes)).unwrap();
        let requests = batch["requests"].as_array().unwrap();
        assert_eq!(requests.len(), 3);

        assert_eq!(requests[0]["id"], "1");
        assert_eq!(requests[0]["method"], "POST");
        assert_eq!(requests[0]["url"], "Verbs");
        assert!(requests[0].get("atomicityGroup").is_none());
        assert_eq!(requests[0]["body"]["ID"], json!(created.id));
        assert_eq!(requests[0]["body"]["base"], "swim");

        assert_eq!(requests[1]["method"], "PATCH");
        assert_eq!(requests[1]["url"], format!("Verbs({})", updated));
        assert_eq!(requests[1]["body"], json!({"past": "went"}));

        assert_eq!(requests[2]["method"], "DELETE");
        assert!(requests[2].get("body").is_none());
        assert_eq!(requests[2]["headers"], json!({}));
    }

    #[test]
    fn test_collect_rejections() {
        let deleted = Uuid::new_v4();
        let changes = vec![
            PendingChange::Create { verb: Verb::empty() },
            PendingChange::Delete { id: deleted },
        ];
        let response: BatchResponse = serde_json::from_value(json!({
            "responses": [
                {"id": "1", "status": 201, "body": {}},
                {"id": "2", "status": 404, "body": {"error": {"code": "404", "message": "Not Found"}}}
            ]
        }))
        .unwrap();

        let outcome = collect_rejections(&changes, response).unwrap();
        assert_eq!(
            outcome.rejected,
            vec![RejectedChange {
                verb_id: deleted,
                message: "Not Found".to_string(),
            }]
        );
    }

    #[test]
    fn test_rejection_without_error_body() {
        let changes = vec![PendingChange::Delete { id: Uuid::new_v4() }];
        let response: BatchResponse = serde_json::from_value(json!({
            "responses": [{"id": "1", "status": 500}]
        }))
        .unwrap();

        let outcome = collect_rejections(&changes, response).unwrap();
        assert_eq!(outcome.rejected[0].message, "HTTP 500");
    }

    #[test]
    fn test_accepted_create_stays_accepted_when_delete_fails() {
        let created = Verb::empty();
        let deleted = Uuid::new_v4();
        let changes = vec![
            PendingChange::Create {
                verb: created.clone(),
            },
            PendingChange::Delete { id: deleted },
        ];
        let response: BatchResponse = serde_json::from_value(json!({
            "responses": [
                {"id": "2", "status": 403, "body": {"error": {"message": "Forbidden"}}},
                {"id": "1", "status": 201, "body": {}}
            ]
        }))
        .unwrap();

        let outcome = collect_rejections(&changes, response).unwrap();
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].verb_id, deleted);
        assert!(outcome.rejected.iter().all(|r| r.verb_id != created.id));
    }

    #[test]
    fn test_missing_response_is_rejected() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let changes = vec![
            PendingChange::Delete { id: first },
            PendingChange::Delete { id: second },
        ];
        let response: BatchResponse = serde_json::from_value(json!({
            "responses": [{"id": "1", "status": 204}]
        }))
        .unwrap();

        let outcome = collect_rejections(&changes, response).unwrap();
        assert_eq!(
            outcome.rejected,
            vec![RejectedChange {
                verb_id: second,
                message: "Request was not processed".to_string(),
            }]
        );
    }

    #[test]
    fn test_unmatched_failure_fails_the_batch() {
        let changes = vec![PendingChange::Delete { id: Uuid::new_v4() }];
        let response: BatchResponse = serde_json::from_value(json!({
            "responses": [
                {"id": "1", "status": 204},
                {"id": "batch", "status": 400, "body": {"error": {"message": "Malformed batch"}}}
            ]
        }))
        .unwrap();

        let result = collect_rejections(&changes, response);
        match result {
            Err(DictionaryServiceError::ServiceError(message)) => {
                assert!(message.contains("Malformed batch"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_success_is_ignored() {
        let changes = vec![PendingChange::Delete { id: Uuid::new_v4() }];
        let response: BatchResponse = serde_json::from_value(json!({
            "responses": [{"id": "1", "status": 204}, {"id": "7", "status": 200}]
        }))
        .unwrap();

        let outcome = collect_rejections(&changes, response).unwrap();
        assert!(outcome.is_success());
    }

    #[test]
    fn test_collection_deserialize() {
        let id = Uuid::new_v4();
        let collection: Collection<VerbEntity> = serde_json::from_value(json!({
            "@odata.context": "$metadata#Verbs",
            "value": [{"ID": id, "base": "go", "past": "went", "participle": "gone", "translation": "gehen"}]
        }))
        .unwrap();
        let verbs: Vec<Verb> = collection.value.into_iter().map(Verb::from).collect();
        assert_eq!(verbs[0].id, id);
        assert_eq!(verbs[0].participle, "gone");
    }
}
