use crate::domain::entities::plan::{Observation, PlanRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::plan_store::PlanStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

/// Key of the single plan row.
const PLAN_KEY: &str = "plan";

pub struct SqlitePlanStore {
    conn: Mutex<Connection>,
}

impl SqlitePlanStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn parse_date(s: Option<String>) -> Option<DateTime<Utc>> {
        s.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
    }

    /// `None` when the history column cannot be decoded.
    fn row_to_record(row: &rusqlite::Row) -> Result<Option<PlanRecord>, rusqlite::Error> {
        let history_json: String = row.get(6)?;
        let history: Vec<Observation> = match serde_json::from_str(&history_json) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable plan history, ignoring stored plan");
                return Ok(None);
            }
        };

        Ok(Some(PlanRecord {
            plan_id: row.get(0)?,
            initial_capital: row.get(1)?,
            target_capital: row.get(2)?,
            duration_days: row.get(3)?,
            daily_rate: row.get(4)?,
            current_capital: row.get(5)?,
            history,
            start_date: Self::parse_date(row.get(7)?),
            last_updated: Self::parse_date(row.get(8)?),
        }))
    }
}

#[async_trait]
impl PlanStore for SqlitePlanStore {
    async fn get(&self) -> Result<Option<PlanRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        conn.query_row(
            "SELECT plan_id, initial_capital, target_capital, duration_days, daily_rate, current_capital, history, start_date, last_updated
             FROM plan_records WHERE id = ?1",
            params![PLAN_KEY],
            Self::row_to_record,
        )
        .optional()
        .map(Option::flatten)
        .map_err(|e| DomainError::Persistence(format!("Failed to read plan: {e}")))
    }

    async fn put(&self, record: &PlanRecord) -> Result<PlanRecord, DomainError> {
        let mut committed = record.clone();
        committed.last_updated = Some(Utc::now());
        let history = serde_json::to_string(&committed.history)?;

        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        conn.execute(
            "INSERT OR REPLACE INTO plan_records (id, plan_id, initial_capital, target_capital, duration_days, daily_rate, current_capital, history, start_date, last_updated)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                PLAN_KEY,
                committed.plan_id,
                committed.initial_capital,
                committed.target_capital,
                committed.duration_days,
                committed.daily_rate,
                committed.current_capital,
                history,
                committed.start_date.map(|dt| dt.to_rfc3339()),
                committed.last_updated.map(|dt| dt.to_rfc3339()),
            ],
        ).map_err(|e| DomainError::Persistence(format!("Failed to save plan: {e}")))?;
        Ok(committed)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        conn.execute("DELETE FROM plan_records", [])
            .map_err(|e| DomainError::Persistence(format!("Failed to clear plans: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::migrations::run_migrations;

    fn store() -> SqlitePlanStore {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        SqlitePlanStore::new(conn)
    }

    #[tokio::test]
    async fn test_empty_store_has_no_record() {
        assert!(store().get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_stamps_last_updated_and_replaces() {
        let store = store();
        let mut record = PlanRecord {
            initial_capital: Some(100.0),
            target_capital: Some(200.0),
            duration_days: Some(5),
            ..Default::default()
        };
        let committed = store.put(&record).await.unwrap();
        assert!(committed.last_updated.is_some());

        record.target_capital = Some(300.0);
        store.put(&record).await.unwrap();

        let stored = store.get().await.unwrap().unwrap();
        assert_eq!(stored.target_capital, Some(300.0));
        assert!(stored.history.is_empty());
    }

    #[tokio::test]
    async fn test_null_columns_read_back_as_none() {
        let store = store();
        store.put(&PlanRecord::default()).await.unwrap();
        let stored = store.get().await.unwrap().unwrap();
        assert_eq!(stored.initial_capital, None);
        assert!(stored.into_state().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_history_is_no_record() {
        let store = store();
        store.put(&PlanRecord::default()).await.unwrap();
        {
            let conn = store.conn.lock().unwrap();
            conn.execute("UPDATE plan_records SET history = 'not json'", [])
                .unwrap();
        }
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_record() {
        let store = store();
        store.put(&PlanRecord::default()).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
    }
}
