//! Shared test helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use bankroll::domain::entities::plan::PlanRecord;
use bankroll::domain::error::DomainError;
use bankroll::domain::ports::plan_store::PlanStore;
use bankroll::infrastructure::memory::plan_store::InMemoryPlanStore;
use bankroll::Bankroll;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn setup() -> Bankroll {
    Bankroll::with_store(Arc::new(InMemoryPlanStore::new()), None)
}

/// Store whose writes start failing once `fail_writes` is set.
#[derive(Default)]
pub struct FlakyStore {
    inner: InMemoryPlanStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PlanStore for FlakyStore {
    async fn get(&self) -> Result<Option<PlanRecord>, DomainError> {
        self.inner.get().await
    }

    async fn put(&self, record: &PlanRecord) -> Result<PlanRecord, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("disk full".into()));
        }
        self.inner.put(record).await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("disk full".into()));
        }
        self.inner.clear().await
    }
}
