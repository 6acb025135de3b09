use anyhow::Result;

use crate::wizard::NavigationTarget;

/// Router seam: terminal wizard states push a route.
#[async_trait::async_trait]
pub trait NavigationPort: Send + Sync {
    async fn navigate(&self, target: &NavigationTarget) -> Result<()>;
}
