//! Dictionary Commands

use uuid::Uuid;

use crate::domain::dictionary::VerbPatch;

/// 进入编辑模式
#[derive(Debug, Clone)]
pub struct EditDictionary;

/// 新建空白词条
#[derive(Debug, Clone)]
pub struct CreateVerb;

/// 修改词条
#[derive(Debug, Clone)]
pub struct UpdateVerb {
    pub verb_id: Uuid,
    pub patch: VerbPatch,
}

/// 删除词条
#[derive(Debug, Clone)]
pub struct DeleteVerb {
    pub verb_id: Uuid,
}

/// 提交更新组中的全部变更
#[derive(Debug, Clone)]
pub struct SaveChanges;

/// 放弃全部变更并退出编辑模式
#[derive(Debug, Clone)]
pub struct CancelChanges;

/// 按搜索值过滤词条，空值清除过滤
#[derive(Debug, Clone)]
pub struct SearchVerbs {
    pub query: String,
}

/// 重新查询词条
#[derive(Debug, Clone)]
pub struct RefreshVerbs;
