use crate::domain::entities::plan::PlanState;
use crate::domain::error::DomainError;
use crate::domain::ports::plan_store::PlanStore;
use std::sync::Arc;

pub struct LoadPlanUseCase {
    store: Arc<dyn PlanStore>,
}

impl LoadPlanUseCase {
    pub fn new(store: Arc<dyn PlanStore>) -> Self {
        Self { store }
    }

    /// The stored plan, or `None` when nothing valid is stored.
    pub async fn load(&self) -> Result<Option<PlanState>, DomainError> {
        let record = self.store.get().await?;
        Ok(record.and_then(|r| r.into_state()))
    }

    /// Like [`load`](Self::load) but an absent plan is an error.
    pub async fn require(&self) -> Result<PlanState, DomainError> {
        self.load().await?.ok_or(DomainError::NoPlan)
    }
}
