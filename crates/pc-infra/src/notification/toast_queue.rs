use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use pc_core::ports::{ClockPort, Notification, NotificationLevel, NotificationPort};

/// A notification as it was shown, with the time it was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastRecord {
    #[serde(flatten)]
    pub notification: Notification,
    pub raised_at_ms: i64,
}

/// In-memory toast host.
///
/// Keeps every notification in arrival order until drained. A UI binding
/// renders and drains it; tests and the CLI read it back.
pub struct ToastQueue {
    clock: Arc<dyn ClockPort>,
    toasts: Mutex<Vec<ToastRecord>>,
}

impl ToastQueue {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            toasts: Mutex::new(Vec::new()),
        }
    }

    pub async fn snapshot(&self) -> Vec<ToastRecord> {
        self.toasts.lock().await.clone()
    }

    /// Take every pending toast, leaving the queue empty.
    pub async fn drain(&self) -> Vec<ToastRecord> {
        std::mem::take(&mut *self.toasts.lock().await)
    }

    pub async fn messages(&self) -> Vec<String> {
        self.toasts
            .lock()
            .await
            .iter()
            .map(|toast| toast.notification.message.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationPort for ToastQueue {
    async fn notify(&self, notification: Notification) -> anyhow::Result<()> {
        match notification.level {
            NotificationLevel::Success => info!(message = %notification.message, "toast success"),
            NotificationLevel::Error => warn!(message = %notification.message, "toast error"),
        }
        let record = ToastRecord {
            notification,
            raised_at_ms: self.clock.now_ms(),
        };
        self.toasts.lock().await.push(record);
        Ok(())
    }
}
