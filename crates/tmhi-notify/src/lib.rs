pub mod manager;
pub mod message;
pub mod notifier;
pub mod providers;

pub use manager::NotifyManager;
pub use message::{NotifyChannel, NotifyMessage, NotifyPriority};
pub use notifier::{Notifier, NotifyResult};
pub use providers::{NtfyConfig, NtfyNotifier, WebhookConfig, WebhookNotifier};
