//! In-Memory Implementations
//!
//! 内存实现的 Port 适配器

mod dictionary_service;

pub use dictionary_service::InMemoryDictionaryService;
