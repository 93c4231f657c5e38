use crate::domain::entities::plan::PlanRecord;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Durable storage for the single plan of an installation.
///
/// Implementations hold at most one record under a fixed key. Callers
/// await each call before issuing a dependent one.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// The stored record, if any. Validity is decided by the caller.
    async fn get(&self) -> Result<Option<PlanRecord>, DomainError>;

    /// Replace the stored record; returns it stamped with `last_updated`.
    async fn put(&self, record: &PlanRecord) -> Result<PlanRecord, DomainError>;

    /// Remove every stored record.
    async fn clear(&self) -> Result<(), DomainError>;
}
