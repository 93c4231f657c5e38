use crate::domain::entities::plan::PlanRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::plan_store::PlanStore;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

/// Process-local store, for embedding and tests.
#[derive(Default)]
pub struct InMemoryPlanStore {
    record: Mutex<Option<PlanRecord>>,
}

impl InMemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an arbitrary record, bypassing validation.
    pub fn with_record(record: PlanRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn get(&self) -> Result<Option<PlanRecord>, DomainError> {
        let record = self
            .record
            .lock()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        Ok(record.clone())
    }

    async fn put(&self, record: &PlanRecord) -> Result<PlanRecord, DomainError> {
        let mut committed = record.clone();
        committed.last_updated = Some(Utc::now());
        let mut slot = self
            .record
            .lock()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        *slot = Some(committed.clone());
        Ok(committed)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut slot = self
            .record
            .lock()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
