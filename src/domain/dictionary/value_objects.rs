//! Dictionary Context - Value Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Verb;

/// 可搜索字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbField {
    Base,
    Past,
    Participle,
    Translation,
}

impl VerbField {
    pub const ALL: [VerbField; 4] = [
        VerbField::Base,
        VerbField::Past,
        VerbField::Participle,
        VerbField::Translation,
    ];

    /// 服务端属性名
    pub fn property(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Past => "past",
            Self::Participle => "participle",
            Self::Translation => "translation",
        }
    }

    pub fn value_of<'a>(&self, verb: &'a Verb) -> &'a str {
        match self {
            Self::Base => &verb.base,
            Self::Past => &verb.past,
            Self::Participle => &verb.participle,
            Self::Translation => &verb.translation,
        }
    }
}

/// 搜索过滤器：任一字段包含搜索值即命中（OR 组合）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbFilter {
    fields: Vec<VerbField>,
    value: String,
}

impl VerbFilter {
    /// 在全部字段上搜索；空搜索值返回 None（即清除过滤）
    pub fn search(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            fields: VerbField::ALL.to_vec(),
            value,
        })
    }

    pub fn fields(&self) -> &[VerbField] {
        &self.fields
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// 本地求值（忽略大小写）
    pub fn matches(&self, verb: &Verb) -> bool {
        let needle = self.value.to_lowercase();
        self.fields
            .iter()
            .any(|f| f.value_of(verb).to_lowercase().contains(&needle))
    }
}

/// 暂存在延迟更新组中的变更
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingChange {
    Create { verb: Verb },
    Update { id: Uuid, patch: super::VerbPatch },
    Delete { id: Uuid },
}

impl PendingChange {
    pub fn verb_id(&self) -> Uuid {
        match self {
            Self::Create { verb } => verb.id,
            Self::Update { id, .. } | Self::Delete { id } => *id,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete { .. })
    }
}

/// 服务端拒绝的单条变更
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedChange {
    pub verb_id: Uuid,
    pub message: String,
}

/// 视图状态标志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DictionaryViewState {
    pub busy: bool,
    pub editable: bool,
    pub has_ui_changes: bool,
    pub verbs_empty: bool,
}

impl Default for DictionaryViewState {
    fn default() -> Self {
        Self {
            busy: false,
            editable: false,
            has_ui_changes: false,
            verbs_empty: true,
        }
    }
}

/// 展示给用户的服务消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceMessage {
    pub message: String,
    pub technical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Uuid>,
    pub occurred_at: DateTime<Utc>,
}

impl ServiceMessage {
    pub fn technical(message: impl Into<String>, target: Option<Uuid>) -> Self {
        Self {
            message: message.into(),
            technical: true,
            target,
            occurred_at: Utc::now(),
        }
    }
}
