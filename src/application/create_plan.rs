use crate::domain::entities::plan::{PlanConfig, PlanState};
use crate::domain::error::DomainError;
use crate::domain::ports::plan_store::PlanStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct CreatePlanUseCase {
    store: Arc<dyn PlanStore>,
}

impl CreatePlanUseCase {
    pub fn new(store: Arc<dyn PlanStore>) -> Self {
        Self { store }
    }

    /// Validate the parameters and persist a fresh plan, replacing any
    /// existing one. Nothing is written when validation fails.
    pub async fn execute(
        &self,
        initial_capital: f64,
        target_capital: f64,
        duration_days: i64,
        start_date: DateTime<Utc>,
    ) -> Result<PlanState, DomainError> {
        let config = PlanConfig::new(initial_capital, target_capital, duration_days)?;
        let state = PlanState::new(config, start_date);

        self.store.put(&state.to_record()).await?;

        tracing::info!(
            plan_id = state.id(),
            initial_capital,
            target_capital,
            duration_days,
            daily_rate = state.config().daily_rate(),
            "plan created"
        );
        Ok(state)
    }
}
