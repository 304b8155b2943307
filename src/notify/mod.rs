pub mod telegram;

use async_trait::async_trait;

pub use telegram::{NotifyError, TelegramNotifier};

/// One-way alert sink. Implementations swallow and log their own failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str);
}
