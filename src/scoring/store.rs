use std::collections::HashMap;
use std::sync::Mutex;

use super::domain::{Category, OverallRow, ScoreRow};

/// Error enumeration for storage failures. Backend trouble is propagated,
/// never masked as "no data".
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("reading table '{table}' failed: {message}")]
    ReadFailed { table: String, message: String },
    #[error("writing table '{table}' failed: {message}")]
    WriteFailed { table: String, message: String },
}

/// Tabular storage abstraction so the tabulation service can be exercised
/// against either backend in isolation.
///
/// Raw category tables are append-only. The derived overall table is only
/// ever replaced wholesale through [`ScoreStore::publish_overall`], so
/// readers never observe a half-written rebuild.
pub trait ScoreStore: Send + Sync {
    /// Append one raw submission row. The table is created on first write.
    fn append(&self, category: Category, row: ScoreRow) -> Result<(), StorageError>;

    /// All raw rows for a category, oldest first. An absent table reads as
    /// empty; malformed rows are skipped by the backend, not surfaced.
    fn read_all(&self, category: Category) -> Result<Vec<ScoreRow>, StorageError>;

    /// Drop every data row of a category's raw table, keeping its layout.
    fn clear_rows(&self, category: Category) -> Result<(), StorageError>;

    /// Atomically replace the derived overall standings table.
    fn publish_overall(&self, rows: Vec<OverallRow>) -> Result<(), StorageError>;

    /// Current derived overall standings, in published order.
    fn read_overall(&self) -> Result<Vec<OverallRow>, StorageError>;
}

/// Mutex-guarded in-memory tables; the default backend for tests, demos,
/// and single-event deployments that do not need durability.
#[derive(Default)]
pub struct InMemoryScoreStore {
    tables: Mutex<HashMap<Category, Vec<ScoreRow>>>,
    overall: Mutex<Vec<OverallRow>>,
}

impl ScoreStore for InMemoryScoreStore {
    fn append(&self, category: Category, row: ScoreRow) -> Result<(), StorageError> {
        let mut tables = self.tables.lock().expect("score table mutex poisoned");
        tables.entry(category).or_default().push(row);
        Ok(())
    }

    fn read_all(&self, category: Category) -> Result<Vec<ScoreRow>, StorageError> {
        let tables = self.tables.lock().expect("score table mutex poisoned");
        Ok(tables.get(&category).cloned().unwrap_or_default())
    }

    fn clear_rows(&self, category: Category) -> Result<(), StorageError> {
        let mut tables = self.tables.lock().expect("score table mutex poisoned");
        tables.remove(&category);
        Ok(())
    }

    fn publish_overall(&self, rows: Vec<OverallRow>) -> Result<(), StorageError> {
        let mut overall = self.overall.lock().expect("overall table mutex poisoned");
        *overall = rows;
        Ok(())
    }

    fn read_overall(&self) -> Result<Vec<OverallRow>, StorageError> {
        let overall = self.overall.lock().expect("overall table mutex poisoned");
        Ok(overall.clone())
    }
}
