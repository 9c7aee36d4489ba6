use std::time::Duration;

use async_trait::async_trait;

/// Source of the waits between cosmetic draws.
#[async_trait]
pub trait TickSource: Send {
    async fn wait(&mut self, interval: Duration);
}

/// Real time, via the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTicks;

#[async_trait]
impl TickSource for TokioTicks {
    async fn wait(&mut self, interval: Duration) {
        tokio::time::sleep(interval).await;
    }
}

/// Returns immediately and counts the waits. Drives spins synchronously in tests
/// and batch runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateTicks {
    pub waits: u64,
}

#[async_trait]
impl TickSource for ImmediateTicks {
    async fn wait(&mut self, _interval: Duration) {
        self.waits += 1;
    }
}
