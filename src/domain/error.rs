use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid plan configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("No active plan. Create one with `bankroll init`")]
    NoPlan,

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Persistence(format!("Serialization failed: {e}"))
    }
}
