//! Classification of an observation against the theoretical trajectory.

use serde::Serialize;
use std::fmt;

/// Where the plan stands after an observation.
///
/// Reaching the target takes precedence over drift. Otherwise the sign of
/// the drift decides, regardless of whether the last change was a gain or
/// a loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Target met, with `surplus_days` of the plan left unused.
    TargetReached { surplus_days: u32 },
    Ahead { by: f64 },
    Behind { by: f64 },
    OnTarget,
}

impl ProgressStatus {
    pub fn classify(target_reached: bool, drift: f64, days_remaining: u32) -> Self {
        if target_reached {
            ProgressStatus::TargetReached {
                surplus_days: days_remaining,
            }
        } else if drift > 0.0 {
            ProgressStatus::Ahead { by: drift.abs() }
        } else if drift < 0.0 {
            ProgressStatus::Behind { by: drift.abs() }
        } else {
            ProgressStatus::OnTarget
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressStatus::TargetReached { .. } => write!(f, "target_reached"),
            ProgressStatus::Ahead { .. } => write!(f, "ahead"),
            ProgressStatus::Behind { .. } => write!(f, "behind"),
            ProgressStatus::OnTarget => write!(f, "on_target"),
        }
    }
}

/// Outcome of one recorded observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    /// Day number of the observation (1-based, equals days elapsed).
    pub day: u32,
    pub delta: f64,
    pub capital_after: f64,
    pub theoretical_capital: f64,
    /// Actual minus theoretical capital.
    pub drift_from_theoretical: f64,
    pub target_reached: bool,
    pub days_remaining: u32,
    pub status: ProgressStatus,
    /// Set when the observation lost more than the configured stop-loss.
    pub stop_loss_breached: bool,
}

impl StatusReport {
    pub fn is_loss(&self) -> bool {
        self.delta < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_reached_wins_over_drift() {
        let status = ProgressStatus::classify(true, -120.0, 5);
        assert_eq!(status, ProgressStatus::TargetReached { surplus_days: 5 });
    }

    #[test]
    fn test_drift_sign_decides() {
        assert_eq!(
            ProgressStatus::classify(false, 50.0, 3),
            ProgressStatus::Ahead { by: 50.0 }
        );
        assert_eq!(
            ProgressStatus::classify(false, -20.0, 3),
            ProgressStatus::Behind { by: 20.0 }
        );
        assert_eq!(ProgressStatus::classify(false, 0.0, 3), ProgressStatus::OnTarget);
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let json = serde_json::to_value(ProgressStatus::Behind { by: 4.0 }).unwrap();
        assert_eq!(json["status"], "behind");
        assert_eq!(json["by"], 4.0);
    }
}
