use crate::domain::entities::plan::PlanState;
use crate::domain::values::rate::{adjusted_daily_goal, DailyGoal};
use serde::Serialize;

/// What the plan asks of today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Grow by the adjusted daily goal.
    Pursue,
    TargetReached,
    /// No growth target left to pursue (plan over without reaching target).
    HoldCapital,
}

/// Snapshot of a plan's progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub plan_id: String,
    pub initial_capital: f64,
    pub current_capital: f64,
    pub target_capital: f64,
    pub daily_rate: f64,
    pub duration_days: u32,
    pub days_elapsed: u32,
    pub days_remaining: u32,
    pub daily_goal: DailyGoal,
    pub goal_status: GoalStatus,
    /// Share of the planned gain achieved, capped at 100.
    pub progress_percent: f64,
}

pub fn daily_goal(state: &PlanState) -> DailyGoal {
    adjusted_daily_goal(
        state.current_capital(),
        state.config().target_capital(),
        state.days_remaining() as i64,
    )
}

pub fn summarize(state: &PlanState) -> PlanSummary {
    let config = state.config();
    let goal = daily_goal(state);

    let goal_status = if !goal.is_zero() {
        GoalStatus::Pursue
    } else if state.current_capital() >= config.target_capital() {
        GoalStatus::TargetReached
    } else {
        GoalStatus::HoldCapital
    };

    let gained = state.current_capital() - config.initial_capital();
    let planned = config.target_capital() - config.initial_capital();
    let progress_percent = (gained / planned * 100.0).min(100.0);

    PlanSummary {
        plan_id: state.id().to_string(),
        initial_capital: config.initial_capital(),
        current_capital: state.current_capital(),
        target_capital: config.target_capital(),
        daily_rate: config.daily_rate(),
        duration_days: config.duration_days(),
        days_elapsed: state.days_elapsed(),
        days_remaining: state.days_remaining(),
        daily_goal: goal,
        goal_status,
        progress_percent,
    }
}
