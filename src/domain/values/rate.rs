//! Compound growth rates.
//!
//! A plan grows capital at a constant daily rate `r` so that
//! `target = initial · (1 + r)^n`. Rates are expressed as percentages
//! (`2.5` means 2.5% per day) everywhere in the crate.

use serde::Serialize;

use crate::domain::error::DomainError;

/// Rate and amount still needed per day to reach the target from where
/// the capital currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyGoal {
    /// Daily growth rate in percent.
    pub rate: f64,
    /// Capital to gain today at that rate.
    pub amount: f64,
}

impl DailyGoal {
    pub const ZERO: DailyGoal = DailyGoal {
        rate: 0.0,
        amount: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        self.amount <= 0.0
    }
}

/// Solve `target = initial · (1 + r)^n` for `r`, in percent.
///
/// Fails with [`DomainError::InvalidConfig`] when the duration is not
/// positive, the initial capital is not positive, or the target does not
/// exceed the initial capital.
pub fn required_daily_rate(
    initial_capital: f64,
    target_capital: f64,
    duration_days: i64,
) -> Result<f64, DomainError> {
    if !initial_capital.is_finite() || !target_capital.is_finite() {
        return Err(DomainError::InvalidConfig(
            "capital amounts must be finite numbers".into(),
        ));
    }
    if duration_days <= 0 {
        return Err(DomainError::InvalidConfig(format!(
            "duration must be at least one day, got {duration_days}"
        )));
    }
    if initial_capital <= 0.0 {
        return Err(DomainError::InvalidConfig(format!(
            "initial capital must be positive, got {initial_capital}"
        )));
    }
    if target_capital <= initial_capital {
        return Err(DomainError::InvalidConfig(format!(
            "target capital ({target_capital}) must exceed initial capital ({initial_capital})"
        )));
    }

    let total_growth = target_capital / initial_capital;
    Ok((total_growth.powf(1.0 / duration_days as f64) - 1.0) * 100.0)
}

/// Recompute the daily goal from the current capital over the days left.
///
/// Returns [`DailyGoal::ZERO`] when no days remain or when the target is
/// already met; callers report plan end or success in those cases.
pub fn adjusted_daily_goal(
    current_capital: f64,
    target_capital: f64,
    days_remaining: i64,
) -> DailyGoal {
    // Zero capital cannot compound toward anything.
    if days_remaining <= 0 || current_capital <= 0.0 || !current_capital.is_finite() {
        return DailyGoal::ZERO;
    }

    let remaining_growth = target_capital / current_capital;
    if remaining_growth <= 1.0 {
        return DailyGoal::ZERO;
    }

    let rate = (remaining_growth.powf(1.0 / days_remaining as f64) - 1.0) * 100.0;
    DailyGoal {
        rate,
        amount: current_capital * rate / 100.0,
    }
}

/// Capital on `day` when compounding `initial_capital` at `daily_rate` percent.
pub fn compound(initial_capital: f64, daily_rate: f64, day: u32) -> f64 {
    initial_capital * (1.0 + daily_rate / 100.0).powf(f64::from(day))
}
