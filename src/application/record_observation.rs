//! Reconciles a capital observation with the plan.
//!
//! The input convention is the absolute capital after the observation.
//! Callers holding a signed change convert it first with
//! [`PlanState::capital_after_delta`].

use crate::domain::entities::plan::PlanState;
use crate::domain::error::DomainError;
use crate::domain::ports::plan_store::PlanStore;
use crate::domain::values::status::{ProgressStatus, StatusReport};
use crate::domain::values::stop_loss::{StopLoss, StopLossMode};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct RecordObservationUseCase {
    store: Arc<dyn PlanStore>,
    stop_loss: Option<StopLoss>,
}

impl RecordObservationUseCase {
    pub fn new(store: Arc<dyn PlanStore>, stop_loss: Option<StopLoss>) -> Self {
        Self { store, stop_loss }
    }

    /// Append the observation, persist, then classify.
    ///
    /// `state` is never modified: on any failure the caller still holds the
    /// pre-observation plan, and on success receives the committed one.
    pub async fn execute(
        &self,
        state: &PlanState,
        capital_after: f64,
        date: DateTime<Utc>,
    ) -> Result<(PlanState, StatusReport), DomainError> {
        let capital_before = state.current_capital();

        let mut next = state.clone();
        let delta = next.apply(capital_after, date)?.delta;

        let stop_loss_breached = self
            .stop_loss
            .is_some_and(|sl| sl.is_breached(capital_before, capital_after));
        if stop_loss_breached {
            if let Some(sl) = self.stop_loss.filter(|sl| sl.mode() == StopLossMode::Block) {
                return Err(DomainError::InvalidObservation(format!(
                    "loss from {capital_before} to {capital_after} breaches the {}% stop-loss ({} mode)",
                    sl.threshold_pct(),
                    sl.mode()
                )));
            }
        }

        self.store.put(&next.to_record()).await?;

        let config = next.config();
        let day = next.days_elapsed();
        let days_remaining = next.days_remaining();
        let theoretical_capital = config.theoretical_capital(day);
        let drift = capital_after - theoretical_capital;
        let target_reached = capital_after >= config.target_capital();

        let report = StatusReport {
            day,
            delta,
            capital_after,
            theoretical_capital,
            drift_from_theoretical: drift,
            target_reached,
            days_remaining,
            status: ProgressStatus::classify(target_reached, drift, days_remaining),
            stop_loss_breached,
        };

        if stop_loss_breached {
            tracing::warn!(
                day,
                capital_before,
                capital_after,
                "observation breached the stop-loss threshold"
            );
        }
        tracing::info!(day, delta, drift, status = %report.status, "observation recorded");

        Ok((next, report))
    }
}
