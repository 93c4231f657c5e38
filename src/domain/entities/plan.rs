use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::values::rate::{compound, required_daily_rate};

/// Longest accepted plan, 100 years of days.
pub const MAX_DURATION_DAYS: u32 = 36_525;

/// Immutable plan parameters plus the derived daily rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanConfig {
    initial_capital: f64,
    target_capital: f64,
    duration_days: u32,
    daily_rate: f64,
}

impl PlanConfig {
    pub fn new(
        initial_capital: f64,
        target_capital: f64,
        duration_days: i64,
    ) -> Result<Self, DomainError> {
        let daily_rate = required_daily_rate(initial_capital, target_capital, duration_days)?;
        let duration_days = u32::try_from(duration_days)
            .ok()
            .filter(|days| *days <= MAX_DURATION_DAYS)
            .ok_or_else(|| {
                DomainError::InvalidConfig(format!(
                    "duration too long: {duration_days} days (max {MAX_DURATION_DAYS})"
                ))
            })?;
        Ok(Self {
            initial_capital,
            target_capital,
            duration_days,
            daily_rate,
        })
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    pub fn target_capital(&self) -> f64 {
        self.target_capital
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    /// Required daily growth rate, in percent.
    pub fn daily_rate(&self) -> f64 {
        self.daily_rate
    }

    /// Capital the fixed-rate trajectory expects on `day`.
    pub fn theoretical_capital(&self, day: u32) -> f64 {
        compound(self.initial_capital, self.daily_rate, day)
    }
}

/// One recorded capital update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub delta: f64,
    pub capital_before: f64,
    pub capital_after: f64,
    pub date: DateTime<Utc>,
}

impl Observation {
    pub fn new(capital_before: f64, capital_after: f64, date: DateTime<Utc>) -> Self {
        Self {
            delta: capital_after - capital_before,
            capital_before,
            capital_after,
            date,
        }
    }

    pub fn is_gain(&self) -> bool {
        self.delta >= 0.0
    }
}

/// Mutable progression of one plan.
///
/// `current_capital` always equals the initial capital plus the sum of
/// every observation's delta; the history is append-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanState {
    id: String,
    config: PlanConfig,
    current_capital: f64,
    history: Vec<Observation>,
    start_date: DateTime<Utc>,
}

impl PlanState {
    pub fn new(config: PlanConfig, start_date: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            current_capital: config.initial_capital(),
            config,
            history: Vec::new(),
            start_date,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn current_capital(&self) -> f64 {
        self.current_capital
    }

    pub fn history(&self) -> &[Observation] {
        &self.history
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn days_elapsed(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn days_remaining(&self) -> u32 {
        self.config.duration_days().saturating_sub(self.days_elapsed())
    }

    /// Absolute capital that a signed `delta` from the current capital lands on.
    pub fn capital_after_delta(&self, delta: f64) -> f64 {
        self.current_capital + delta
    }

    /// Append an observation moving capital to `capital_after`.
    ///
    /// Rejects non-finite or negative capital without touching the state.
    pub fn apply(
        &mut self,
        capital_after: f64,
        date: DateTime<Utc>,
    ) -> Result<&Observation, DomainError> {
        if !capital_after.is_finite() {
            return Err(DomainError::InvalidObservation(
                "capital must be a finite number".into(),
            ));
        }
        if capital_after < 0.0 {
            return Err(DomainError::InvalidObservation(format!(
                "capital cannot be negative, got {capital_after}"
            )));
        }

        let observation = Observation::new(self.current_capital, capital_after, date);
        self.current_capital = capital_after;
        self.history.push(observation);
        Ok(&self.history[self.history.len() - 1])
    }

    pub fn to_record(&self) -> PlanRecord {
        PlanRecord {
            plan_id: Some(self.id.clone()),
            initial_capital: Some(self.config.initial_capital),
            target_capital: Some(self.config.target_capital),
            duration_days: Some(self.config.duration_days as i64),
            daily_rate: Some(self.config.daily_rate),
            current_capital: Some(self.current_capital),
            history: self.history.clone(),
            start_date: Some(self.start_date),
            last_updated: None,
        }
    }
}

/// Stored form of a plan. Every field a corrupt or partial write could
/// leave out is optional; [`PlanRecord::into_state`] decides validity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub plan_id: Option<String>,
    pub initial_capital: Option<f64>,
    pub target_capital: Option<f64>,
    pub duration_days: Option<i64>,
    pub daily_rate: Option<f64>,
    pub current_capital: Option<f64>,
    #[serde(default)]
    pub history: Vec<Observation>,
    pub start_date: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl PlanRecord {
    /// Rebuild the plan, or `None` when the record cannot describe one.
    ///
    /// The current capital is recomputed from the history, which must form
    /// an unbroken chain starting at the initial capital.
    pub fn into_state(self) -> Option<PlanState> {
        let (initial, target, days) =
            match (self.initial_capital, self.target_capital, self.duration_days) {
                (Some(i), Some(t), Some(d)) => (i, t, d),
                _ => {
                    tracing::warn!("stored plan is missing configuration fields, ignoring it");
                    return None;
                }
            };

        let config = match PlanConfig::new(initial, target, days) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "stored plan has an invalid configuration, ignoring it");
                return None;
            }
        };

        let mut expected = config.initial_capital();
        for (i, obs) in self.history.iter().enumerate() {
            let chained = approx_eq(obs.capital_before, expected)
                && approx_eq(obs.capital_after, obs.capital_before + obs.delta)
                && obs.capital_after >= 0.0;
            if !chained {
                tracing::warn!(day = i + 1, "stored plan history is inconsistent, ignoring it");
                return None;
            }
            expected = obs.capital_after;
        }

        Some(PlanState {
            id: self
                .plan_id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            current_capital: expected,
            config,
            history: self.history,
            start_date: self.start_date.or(self.last_updated).unwrap_or_else(Utc::now),
        })
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> PlanState {
        PlanState::new(PlanConfig::new(1000.0, 2000.0, 10).unwrap(), Utc::now())
    }

    #[test]
    fn test_new_plan_starts_at_initial_capital() {
        let state = plan();
        assert_eq!(state.current_capital(), 1000.0);
        assert!(state.history().is_empty());
        assert_eq!(state.days_remaining(), 10);
    }

    #[test]
    fn test_duration_is_capped() {
        let longest = PlanConfig::new(1000.0, 2000.0, MAX_DURATION_DAYS as i64).unwrap();
        assert_eq!(longest.duration_days(), MAX_DURATION_DAYS);
        let last = longest.theoretical_capital(MAX_DURATION_DAYS);
        assert!((last - 2000.0).abs() < 1e-6, "got {last}");

        for days in [MAX_DURATION_DAYS as i64 + 1, 3_000_000_000, i64::MAX] {
            assert!(matches!(
                PlanConfig::new(1000.0, 2000.0, days),
                Err(DomainError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_apply_keeps_capital_invariant() {
        let mut state = plan();
        for capital in [1100.0, 950.0, 0.0, 1300.0] {
            state.apply(capital, Utc::now()).unwrap();
            let sum: f64 = state.history().iter().map(|o| o.delta).sum();
            assert!((state.current_capital() - (1000.0 + sum)).abs() < 1e-9);
        }
        let history = state.history();
        for pair in history.windows(2) {
            assert_eq!(pair[1].capital_before, pair[0].capital_after);
        }
        assert_eq!(history[0].capital_before, 1000.0);
        assert_eq!(history[1].delta, -150.0);
    }

    #[test]
    fn test_apply_rejects_negative_capital() {
        let mut state = plan();
        state.apply(1200.0, Utc::now()).unwrap();
        let before = state.clone();
        assert!(matches!(
            state.apply(-1.0, Utc::now()),
            Err(DomainError::InvalidObservation(_))
        ));
        assert!(state.apply(f64::INFINITY, Utc::now()).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_delta_and_absolute_conventions_agree() {
        let mut state = plan();
        state.apply(1250.0, Utc::now()).unwrap();

        let target = state.capital_after_delta(-300.0);
        assert_eq!(target, 950.0);

        let obs = state.apply(target, Utc::now()).unwrap();
        assert_eq!(obs.delta, -300.0);
        assert_eq!(obs.capital_before, 1250.0);
    }

    #[test]
    fn test_days_remaining_saturates() {
        let mut state = PlanState::new(PlanConfig::new(100.0, 110.0, 2).unwrap(), Utc::now());
        for _ in 0..3 {
            state.apply(105.0, Utc::now()).unwrap();
        }
        assert_eq!(state.days_elapsed(), 3);
        assert_eq!(state.days_remaining(), 0);
    }

    #[test]
    fn test_record_round_trip_restores_state() {
        let mut state = plan();
        state.apply(1100.0, Utc::now()).unwrap();
        state.apply(1050.0, Utc::now()).unwrap();

        let restored = state.to_record().into_state().unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_record_missing_config_is_no_plan() {
        let mut record = plan().to_record();
        record.target_capital = None;
        assert!(record.into_state().is_none());

        assert!(PlanRecord::default().into_state().is_none());
    }

    #[test]
    fn test_record_with_broken_chain_is_no_plan() {
        let mut state = plan();
        state.apply(1100.0, Utc::now()).unwrap();
        let mut record = state.to_record();
        record.history[0].capital_before = 900.0;
        assert!(record.into_state().is_none());
    }

    #[test]
    fn test_record_recomputes_current_capital() {
        let mut state = plan();
        state.apply(1400.0, Utc::now()).unwrap();
        let mut record = state.to_record();
        record.current_capital = Some(99_999.0);
        assert_eq!(record.into_state().unwrap().current_capital(), 1400.0);
    }
}
