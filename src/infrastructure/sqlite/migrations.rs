use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS plan_records (
            id TEXT PRIMARY KEY,
            plan_id TEXT,
            initial_capital REAL,
            target_capital REAL,
            duration_days INTEGER,
            daily_rate REAL,
            current_capital REAL,
            history TEXT NOT NULL DEFAULT '[]',
            start_date TEXT,
            last_updated TEXT NOT NULL
        );
        "
    ).map_err(|e| DomainError::Persistence(format!("Migration failed: {e}")))
}
