use crate::application::summary::{GoalStatus, PlanSummary};
use crate::domain::entities::plan::PlanState;
use crate::domain::values::status::{ProgressStatus, StatusReport};
use crate::presentation::money::{format_money, format_signed_money};

/// Human-readable outcome of a recorded observation.
pub fn describe_report(report: &StatusReport, currency: &str) -> String {
    let mut msg = if report.is_loss() {
        format!(
            "Capital updated. Loss of the day: {}",
            format_money(report.delta, currency)
        )
    } else {
        format!(
            "Capital updated. Gain of the day: {}",
            format_signed_money(report.delta, currency)
        )
    };

    match report.status {
        ProgressStatus::TargetReached { surplus_days } => {
            msg.push_str("\nTarget reached!");
            if surplus_days > 0 {
                msg.push_str(&format!("\n{surplus_days} day(s) ahead of schedule."));
            }
        }
        ProgressStatus::Ahead { by } => {
            msg.push_str(&format!(" (ahead by {})", format_money(by, currency)));
        }
        ProgressStatus::Behind { by } => {
            msg.push_str(&format!(" (behind by {})", format_money(by, currency)));
        }
        ProgressStatus::OnTarget => msg.push_str(" (on target)"),
    }

    if report.stop_loss_breached {
        msg.push_str("\nWarning: this loss breaches the stop-loss threshold.");
    }
    msg
}

/// Today's goal line of the plan overview.
pub fn describe_goal(summary: &PlanSummary, currency: &str) -> String {
    match summary.goal_status {
        GoalStatus::Pursue => format!(
            "{} ({:.2}%/day)",
            format_money(summary.daily_goal.amount, currency),
            summary.daily_goal.rate
        ),
        GoalStatus::TargetReached => "Target reached!".to_string(),
        GoalStatus::HoldCapital => "Hold capital".to_string(),
    }
}

pub fn describe_summary(summary: &PlanSummary, currency: &str) -> String {
    [
        format!("Initial capital:  {}", format_money(summary.initial_capital, currency)),
        format!("Current capital:  {}", format_money(summary.current_capital, currency)),
        format!("Target capital:   {}", format_money(summary.target_capital, currency)),
        format!("Required rate:    {:.2}%/day", summary.daily_rate),
        format!("Today's goal:     {}", describe_goal(summary, currency)),
        format!(
            "Days remaining:   {} / {}",
            summary.days_remaining, summary.duration_days
        ),
        format!("Progress:         {:.1}%", summary.progress_percent),
    ]
    .join("\n")
}

/// History lines, most recent first, numbered from day 1.
pub fn describe_history(state: &PlanState, currency: &str) -> Vec<String> {
    state
        .history()
        .iter()
        .enumerate()
        .rev()
        .map(|(i, obs)| {
            format!(
                "Day {} - {}  {}  {} -> {}  {}",
                i + 1,
                obs.date.format("%Y-%m-%d"),
                if obs.is_gain() { "gain" } else { "loss" },
                format_money(obs.capital_before, currency),
                format_money(obs.capital_after, currency),
                format_signed_money(obs.delta, currency),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::plan::PlanConfig;
    use chrono::{TimeZone, Utc};

    fn report(delta: f64, status: ProgressStatus) -> StatusReport {
        StatusReport {
            day: 1,
            delta,
            capital_after: 1000.0 + delta,
            theoretical_capital: 1100.0,
            drift_from_theoretical: 1000.0 + delta - 1100.0,
            target_reached: matches!(status, ProgressStatus::TargetReached { .. }),
            days_remaining: 4,
            status,
            stop_loss_breached: false,
        }
    }

    #[test]
    fn test_gain_ahead() {
        let msg = describe_report(&report(150.0, ProgressStatus::Ahead { by: 50.0 }), "Ar");
        assert_eq!(msg, "Capital updated. Gain of the day: +150 Ar (ahead by 50 Ar)");
    }

    #[test]
    fn test_loss_behind() {
        let msg = describe_report(&report(-200.0, ProgressStatus::Behind { by: 300.0 }), "Ar");
        assert_eq!(msg, "Capital updated. Loss of the day: -200 Ar (behind by 300 Ar)");
    }

    #[test]
    fn test_target_reached_lists_surplus() {
        let msg = describe_report(
            &report(1050.0, ProgressStatus::TargetReached { surplus_days: 4 }),
            "Ar",
        );
        assert!(msg.contains("Target reached!"));
        assert!(msg.ends_with("4 day(s) ahead of schedule."));
    }

    #[test]
    fn test_history_labels_gains_and_losses() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let mut state = PlanState::new(PlanConfig::new(1000.0, 2000.0, 10).unwrap(), start);
        state.apply(1200.0, start).unwrap();
        state.apply(1150.0, start).unwrap();

        let lines = describe_history(&state, "Ar");
        assert_eq!(
            lines,
            vec![
                "Day 2 - 2024-03-01  loss  1 200 Ar -> 1 150 Ar  -50 Ar",
                "Day 1 - 2024-03-01  gain  1 000 Ar -> 1 200 Ar  +200 Ar",
            ]
        );
    }
}
