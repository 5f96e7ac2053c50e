//! Tokio Clock - 基于 tokio 定时器的轮询时钟

use async_trait::async_trait;
use std::time::Duration;

use crate::application::ports::PollClockPort;

/// 使用 `tokio::time::sleep` 等待
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl PollClockPort for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_advances_time() {
        let start = tokio::time::Instant::now();
        TokioClock.sleep(Duration::from_millis(10)).await;
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
