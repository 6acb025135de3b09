use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use pc_core::{ports::NavigationPort, wizard::NavigationTarget};

/// In-memory router: records every route the console was sent to.
#[derive(Default)]
pub struct RouteHistory {
    entries: Mutex<Vec<NavigationTarget>>,
}

impl RouteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current(&self) -> Option<NavigationTarget> {
        self.entries.lock().await.last().cloned()
    }

    pub async fn history(&self) -> Vec<NavigationTarget> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl NavigationPort for RouteHistory {
    async fn navigate(&self, target: &NavigationTarget) -> anyhow::Result<()> {
        info!(route = %target, "navigating");
        self.entries.lock().await.push(target.clone());
        Ok(())
    }
}
