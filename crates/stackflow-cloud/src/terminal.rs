//! Terminal output and suspension seams

use async_trait::async_trait;
use std::time::Duration;

/// Sink for everything the orchestrator shows the user
///
/// Calls arrive in the order events happen; implementations must not batch
/// or reorder them.
pub trait Terminal: Send + Sync {
    fn clear(&self);

    fn write_line(&self, text: &str);

    fn start_spinner(&self, label: &str);

    fn stop_spinner(&self);

    fn write_success(&self, label: &str);
}

/// Suspension point between status polls
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
