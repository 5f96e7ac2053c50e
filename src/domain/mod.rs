//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Speech Context: 音色筛选与朗读
//! - Dictionary Context: 词条与编辑工作区

pub mod dictionary;
pub mod speech;
