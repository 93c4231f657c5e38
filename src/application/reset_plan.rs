use crate::domain::error::DomainError;
use crate::domain::ports::plan_store::PlanStore;
use std::sync::Arc;

pub struct ResetPlanUseCase {
    store: Arc<dyn PlanStore>,
}

impl ResetPlanUseCase {
    pub fn new(store: Arc<dyn PlanStore>) -> Self {
        Self { store }
    }

    /// Drop the stored plan entirely; the next load reports no plan.
    pub async fn execute(&self) -> Result<(), DomainError> {
        self.store.clear().await?;
        tracing::info!("plan reset");
        Ok(())
    }
}
