use std::time::Duration;

/// A trait for blocking pauses, injected so tests can run without wall-clock
/// delay.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Sleeper: Sync + Send {
    /// Pauses the caller for the given duration.
    async fn sleep(&self, duration: Duration);
}
