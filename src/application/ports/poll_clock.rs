//! Poll Clock Port - 可注入的等待抽象
//!
//! 轮询循环通过它等待，测试中可替换为不实际休眠的实现

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait PollClockPort: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
