//! 音色筛选与排序

use std::cmp::Ordering;

use super::VoiceDescriptor;

/// 语言标签是否匹配请求的语言（子串匹配，"en" 匹配 "en-US"、"en-GB"）
pub fn matches_language(voice: &VoiceDescriptor, language: &str) -> bool {
    voice.language_tag().contains(language)
}

/// 按语言筛选并按名称升序排序
///
/// 排序先比较忽略大小写的名称，再按原始字节序打破平局，
/// 对固定输入集合结果确定。
pub fn filter_and_sort(voices: Vec<VoiceDescriptor>, language: &str) -> Vec<VoiceDescriptor> {
    let mut filtered: Vec<VoiceDescriptor> = voices
        .into_iter()
        .filter(|v| matches_language(v, language))
        .collect();
    filtered.sort_by(compare_names);
    filtered
}

fn compare_names(a: &VoiceDescriptor, b: &VoiceDescriptor) -> Ordering {
    a.name()
        .to_lowercase()
        .cmp(&b.name().to_lowercase())
        .then_with(|| a.name().cmp(b.name()))
}
