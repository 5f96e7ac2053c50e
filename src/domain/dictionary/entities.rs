//! Dictionary Context - Entities

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 不规则动词词条
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
    pub id: Uuid,
    /// 原形
    pub base: String,
    /// 过去式
    pub past: String,
    /// 过去分词
    pub participle: String,
    /// 释义
    pub translation: String,
}

impl Verb {
    /// 新建词条模板（所有字段为空）
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            base: String::new(),
            past: String::new(),
            participle: String::new(),
            translation: String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.base.trim().is_empty()
    }
}

/// 词条的部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl VerbPatch {
    pub fn is_empty(&self) -> bool {
        self.base.is_none()
            && self.past.is_none()
            && self.participle.is_none()
            && self.translation.is_none()
    }

    pub fn apply_to(&self, verb: &mut Verb) {
        if let Some(base) = &self.base {
            verb.base = base.clone();
        }
        if let Some(past) = &self.past {
            verb.past = past.clone();
        }
        if let Some(participle) = &self.participle {
            verb.participle = participle.clone();
        }
        if let Some(translation) = &self.translation {
            verb.translation = translation.clone();
        }
    }

    /// 合并另一个 patch，后者覆盖前者
    pub fn merge(&mut self, other: VerbPatch) {
        if other.base.is_some() {
            self.base = other.base;
        }
        if other.past.is_some() {
            self.past = other.past;
        }
        if other.participle.is_some() {
            self.participle = other.participle;
        }
        if other.translation.is_some() {
            self.translation = other.translation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_verb_is_blank() {
        let verb = Verb::empty();
        assert!(verb.is_blank());
        assert!(verb.translation.is_empty());
    }

    #[test]
    fn test_patch_apply_and_merge() {
        let mut patch = VerbPatch {
            base: Some("go".to_string()),
            past: Some("goed".to_string()),
            ..Default::default()
        };
        patch.merge(VerbPatch {
            past: Some("went".to_string()),
            ..Default::default()
        });

        let mut verb = Verb::empty();
        patch.apply_to(&mut verb);
        assert_eq!(verb.base, "go");
        assert_eq!(verb.past, "went");
        assert!(verb.participle.is_empty());
        assert!(!verb.is_blank());
    }
}
