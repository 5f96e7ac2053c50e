//! 用户可见的提示文本

pub const CHANGES_SENT: &str = "Changes were sent to the server";
pub const DELETION_SUCCESS: &str = "Verb was marked for deletion";
pub const REFRESH_SUCCESS: &str = "Data refreshed";
pub const LOAD_VOICES_FAILED: &str = "Failed to load voices";
