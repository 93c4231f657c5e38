//! Time series for charting a plan.
//!
//! Both series share a day axis starting at day 0 (the initial capital),
//! so a renderer can overlay them directly.

use serde::Serialize;

use crate::domain::entities::plan::{PlanConfig, PlanState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub day: u32,
    pub capital: f64,
}

/// Marker colour class for a point of the actual series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// At or above the initial capital.
    Gain,
    /// Below the initial capital.
    Loss,
}

impl Marker {
    pub fn for_capital(capital: f64, initial_capital: f64) -> Self {
        if capital >= initial_capital {
            Marker::Gain
        } else {
            Marker::Loss
        }
    }
}

/// Axis ranges a renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartBounds {
    pub min_capital: f64,
    pub max_capital: f64,
    pub max_day: u32,
}

impl ChartBounds {
    /// `[min × 0.9, max(max, target) × 1.1]` over every plotted capital.
    pub fn from_series(
        actual: &[SeriesPoint],
        theoretical: &[SeriesPoint],
        target_capital: f64,
        duration_days: u32,
    ) -> Self {
        let capitals = actual.iter().chain(theoretical).map(|p| p.capital);
        let (min, max) = capitals.fold((f64::INFINITY, target_capital), |(lo, hi), c| {
            (lo.min(c), hi.max(c))
        });
        let min = if min.is_finite() { min } else { target_capital };
        Self {
            min_capital: min * 0.9,
            max_capital: max * 1.1,
            max_day: duration_days,
        }
    }
}

/// Everything a [`ChartRenderer`](crate::domain::ports::chart_renderer::ChartRenderer) draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub actual: Vec<SeriesPoint>,
    pub theoretical: Vec<SeriesPoint>,
    pub bounds: ChartBounds,
    pub initial_capital: f64,
    pub target_capital: f64,
}

impl ChartData {
    pub fn from_state(state: &PlanState) -> Self {
        let config = state.config();
        let actual = build_actual_series(state);
        let theoretical = build_theoretical_series(config);
        let bounds = ChartBounds::from_series(
            &actual,
            &theoretical,
            config.target_capital(),
            config.duration_days(),
        );
        Self {
            actual,
            theoretical,
            bounds,
            initial_capital: config.initial_capital(),
            target_capital: config.target_capital(),
        }
    }

    /// No observations recorded yet; only day 0 is known.
    pub fn is_empty(&self) -> bool {
        self.actual.len() <= 1
    }

    pub fn marker(&self, point: &SeriesPoint) -> Marker {
        Marker::for_capital(point.capital, self.initial_capital)
    }
}

/// Day 0 is the initial capital, day `i` the capital after observation `i`.
pub fn build_actual_series(state: &PlanState) -> Vec<SeriesPoint> {
    let initial = state.config().initial_capital();
    let mut capital = initial;
    std::iter::once(SeriesPoint {
        day: 0,
        capital: initial,
    })
    .chain(state.history().iter().enumerate().map(|(i, obs)| {
        capital += obs.delta;
        SeriesPoint {
            day: i as u32 + 1,
            capital,
        }
    }))
    .collect()
}

/// Fixed-rate trajectory for days `0..=duration_days`.
pub fn build_theoretical_series(config: &PlanConfig) -> Vec<SeriesPoint> {
    (0..=config.duration_days())
        .map(|day| SeriesPoint {
            day,
            capital: config.theoretical_capital(day),
        })
        .collect()
}
