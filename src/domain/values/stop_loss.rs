use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// What to do when a single observation loses more than the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopLossMode {
    /// Commit the observation and flag the breach.
    #[default]
    Warn,
    /// Reject the observation.
    Block,
}

impl fmt::Display for StopLossMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopLossMode::Warn => write!(f, "warn"),
            StopLossMode::Block => write!(f, "block"),
        }
    }
}

impl FromStr for StopLossMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warn" => Ok(StopLossMode::Warn),
            "block" => Ok(StopLossMode::Block),
            _ => Err(format!("Unknown stop-loss mode: {s}")),
        }
    }
}

/// Loss threshold as a percentage of the capital before the observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StopLoss {
    threshold_pct: f64,
    mode: StopLossMode,
}

impl StopLoss {
    pub fn new(threshold_pct: f64, mode: StopLossMode) -> Result<Self, DomainError> {
        if !(threshold_pct > 0.0 && threshold_pct <= 100.0) {
            return Err(DomainError::InvalidConfig(format!(
                "stop-loss threshold must be in (0, 100], got {threshold_pct}"
            )));
        }
        Ok(Self {
            threshold_pct,
            mode,
        })
    }

    pub fn threshold_pct(&self) -> f64 {
        self.threshold_pct
    }

    pub fn mode(&self) -> StopLossMode {
        self.mode
    }

    /// True when going from `capital_before` to `capital_after` loses at
    /// least the threshold share of `capital_before`.
    pub fn is_breached(&self, capital_before: f64, capital_after: f64) -> bool {
        let loss = capital_before - capital_after;
        loss > 0.0 && loss >= capital_before * self.threshold_pct / 100.0
    }
}
