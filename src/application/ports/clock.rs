use std::time::Duration;

use async_trait::async_trait;

/// Injected source of delay, so poll loops can be tested without waiting
/// out real intervals.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
