//! Dictionary Queries

/// 获取词典视图状态
#[derive(Debug, Clone)]
pub struct GetDictionaryState;
