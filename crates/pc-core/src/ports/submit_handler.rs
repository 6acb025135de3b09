use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

/// Capability registered by the active step.
///
/// `Ok(true)` means the step's work succeeded and the wizard may advance.
/// Expected validation failures return `Ok(false)`; backend or unexpected
/// failures return `Err`, which the controller surfaces like a rejection.
#[async_trait]
pub trait StepSubmitHandler: Send + Sync {
    async fn submit(&self) -> anyhow::Result<bool>;
}

pub type SharedSubmitHandler = Arc<dyn StepSubmitHandler>;

#[async_trait]
impl<F, Fut> StepSubmitHandler for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
{
    async fn submit(&self) -> anyhow::Result<bool> {
        (self)().await
    }
}
