//! Dictionary Context - 不规则动词词典限界上下文
//!
//! 职责:
//! - 词条与部分更新
//! - 搜索过滤器
//! - 工作区：待提交变更组与视图状态

mod entities;
mod errors;
mod value_objects;
mod workspace;

pub use entities::{Verb, VerbPatch};
pub use errors::DictionaryError;
pub use value_objects::{
    DictionaryViewState, PendingChange, RejectedChange, ServiceMessage, VerbField, VerbFilter,
};
pub use workspace::DictionaryWorkspace;
