use crate::domain::error::DomainError;
use crate::domain::values::stop_loss::{StopLoss, StopLossMode};

pub const DEFAULT_DB_PATH: &str = "./bankroll.db";
pub const DEFAULT_CURRENCY: &str = "Ar";

/// Runtime settings, read from `BANKROLL_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub db_path: String,
    pub currency: String,
    pub stop_loss: Option<StopLoss>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.into(),
            currency: DEFAULT_CURRENCY.into(),
            stop_loss: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("BANKROLL_DB").unwrap_or_else(|| DEFAULT_DB_PATH.into());
        let currency = lookup("BANKROLL_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.into());

        let mode = match lookup("BANKROLL_STOP_LOSS_MODE") {
            Some(m) => m.parse::<StopLossMode>().map_err(DomainError::Parse)?,
            None => StopLossMode::default(),
        };
        let stop_loss = lookup("BANKROLL_STOP_LOSS_PCT")
            .map(|pct| {
                let pct: f64 = pct.trim().parse().map_err(|_| {
                    DomainError::Parse(format!("BANKROLL_STOP_LOSS_PCT is not a number: {pct}"))
                })?;
                StopLoss::new(pct, mode).map_err(|e| DomainError::Parse(e.to_string()))
            })
            .transpose()?;

        Ok(Self {
            db_path,
            currency,
            stop_loss,
        })
    }
}
