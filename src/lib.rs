pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

use crate::application::create_plan::CreatePlanUseCase;
use crate::application::load_plan::LoadPlanUseCase;
use crate::application::record_observation::RecordObservationUseCase;
use crate::application::reset_plan::ResetPlanUseCase;
use crate::application::summary::{self, PlanSummary};
use crate::config::Settings;
use crate::domain::entities::plan::PlanState;
use crate::domain::error::DomainError;
use crate::domain::ports::chart_renderer::ChartRenderer;
use crate::domain::ports::plan_store::PlanStore;
use crate::domain::values::rate::DailyGoal;
use crate::domain::values::series::ChartData;
use crate::domain::values::status::StatusReport;
use crate::domain::values::stop_loss::StopLoss;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::plan_store::SqlitePlanStore;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::sync::Arc;

/// Entry point wiring a plan store to the plan use cases.
///
/// The caller owns the [`PlanState`] and threads it through each call;
/// nothing here caches the current plan.
pub struct Bankroll {
    create_plan_uc: CreatePlanUseCase,
    load_plan_uc: LoadPlanUseCase,
    record_uc: RecordObservationUseCase,
    reset_uc: ResetPlanUseCase,
}

impl Bankroll {
    pub fn new(settings: &Settings) -> Result<Self, DomainError> {
        let conn = Connection::open(&settings.db_path)
            .map_err(|e| DomainError::Persistence(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Persistence(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;

        let store: Arc<dyn PlanStore> = Arc::new(SqlitePlanStore::new(conn));
        Ok(Self::with_store(store, settings.stop_loss))
    }

    pub fn with_store(store: Arc<dyn PlanStore>, stop_loss: Option<StopLoss>) -> Self {
        Self {
            create_plan_uc: CreatePlanUseCase::new(store.clone()),
            load_plan_uc: LoadPlanUseCase::new(store.clone()),
            record_uc: RecordObservationUseCase::new(store.clone(), stop_loss),
            reset_uc: ResetPlanUseCase::new(store),
        }
    }

    pub async fn create_plan(
        &self,
        initial_capital: f64,
        target_capital: f64,
        duration_days: i64,
    ) -> Result<PlanState, DomainError> {
        self.create_plan_uc
            .execute(initial_capital, target_capital, duration_days, Utc::now())
            .await
    }

    pub async fn load_plan(&self) -> Result<Option<PlanState>, DomainError> {
        self.load_plan_uc.load().await
    }

    /// The stored plan; [`DomainError::NoPlan`] when there is none.
    pub async fn current_plan(&self) -> Result<PlanState, DomainError> {
        self.load_plan_uc.require().await
    }

    /// Record the capital now held (absolute total, not a change).
    pub async fn record_observation(
        &self,
        state: &PlanState,
        capital_after: f64,
    ) -> Result<(PlanState, StatusReport), DomainError> {
        self.record_observation_at(state, capital_after, Utc::now()).await
    }

    pub async fn record_observation_at(
        &self,
        state: &PlanState,
        capital_after: f64,
        date: DateTime<Utc>,
    ) -> Result<(PlanState, StatusReport), DomainError> {
        self.record_uc.execute(state, capital_after, date).await
    }

    /// Record a signed change relative to the current capital.
    pub async fn record_delta(
        &self,
        state: &PlanState,
        delta: f64,
    ) -> Result<(PlanState, StatusReport), DomainError> {
        self.record_observation(state, state.capital_after_delta(delta))
            .await
    }

    pub fn daily_goal(&self, state: &PlanState) -> DailyGoal {
        summary::daily_goal(state)
    }

    pub fn summary(&self, state: &PlanState) -> PlanSummary {
        summary::summarize(state)
    }

    pub fn chart(&self, state: &PlanState) -> ChartData {
        ChartData::from_state(state)
    }

    pub fn draw_chart(&self, state: &PlanState, renderer: &dyn ChartRenderer) -> ChartData {
        application::chart::draw(state, renderer)
    }

    pub async fn reset(&self) -> Result<(), DomainError> {
        self.reset_uc.execute().await
    }
}
