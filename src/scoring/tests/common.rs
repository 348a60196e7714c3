use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::scoring::criteria;
use crate::scoring::domain::{CandidateNumber, Category, OverallRow, ScoreRow};
use crate::scoring::service::{ScoreSubmission, TabulationService};
use crate::scoring::store::{InMemoryScoreStore, ScoreStore, StorageError};

pub(super) fn event_night() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 19, 30, 0)
        .single()
        .expect("valid event timestamp")
}

pub(super) fn row(judge: &str, candidate: &str, total: f64, scores: &[(&str, f64)]) -> ScoreRow {
    ScoreRow {
        timestamp: event_night(),
        judge_name: judge.to_string(),
        candidate: CandidateNumber(candidate.to_string()),
        declared_total: total,
        criterion_scores: scores
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect(),
    }
}

pub(super) fn submission(
    category: &str,
    judge: &str,
    candidate: &str,
    total: f64,
    scores: &[(&str, f64)],
) -> ScoreSubmission {
    ScoreSubmission {
        category: category.to_string(),
        judge_name: judge.to_string(),
        candidate_number: candidate.to_string(),
        total_score: total,
        scores: scores
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect(),
    }
}

/// A split where each criterion receives its weight share of the declared
/// total, mirroring how the intake form's auto-total behaves.
pub(super) fn proportional_split(category: Category, total: f64) -> Vec<(&'static str, f64)> {
    criteria::criteria(category)
        .iter()
        .map(|criterion| (criterion.name, total * criterion.weight_percent / 100.0))
        .collect()
}

pub(super) fn build_service() -> (TabulationService<InMemoryScoreStore>, Arc<InMemoryScoreStore>) {
    let store = Arc::new(InMemoryScoreStore::default());
    let service = TabulationService::new(store.clone());
    (service, store)
}

/// Store whose backend is offline for every operation.
pub(super) struct UnavailableStore;

impl ScoreStore for UnavailableStore {
    fn append(&self, _category: Category, _row: ScoreRow) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("backend offline".to_string()))
    }

    fn read_all(&self, _category: Category) -> Result<Vec<ScoreRow>, StorageError> {
        Err(StorageError::Unavailable("backend offline".to_string()))
    }

    fn clear_rows(&self, _category: Category) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("backend offline".to_string()))
    }

    fn publish_overall(&self, _rows: Vec<OverallRow>) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("backend offline".to_string()))
    }

    fn read_overall(&self) -> Result<Vec<OverallRow>, StorageError> {
        Err(StorageError::Unavailable("backend offline".to_string()))
    }
}

/// Store that accepts submissions but cannot publish the derived table,
/// for exercising the swallowed-recompute-failure path.
#[derive(Default)]
pub(super) struct PublishFailStore {
    inner: InMemoryScoreStore,
}

impl ScoreStore for PublishFailStore {
    fn append(&self, category: Category, row: ScoreRow) -> Result<(), StorageError> {
        self.inner.append(category, row)
    }

    fn read_all(&self, category: Category) -> Result<Vec<ScoreRow>, StorageError> {
        self.inner.read_all(category)
    }

    fn clear_rows(&self, category: Category) -> Result<(), StorageError> {
        self.inner.clear_rows(category)
    }

    fn publish_overall(&self, _rows: Vec<OverallRow>) -> Result<(), StorageError> {
        Err(StorageError::WriteFailed {
            table: Category::Overall.table_name().to_string(),
            message: "disk full".to_string(),
        })
    }

    fn read_overall(&self) -> Result<Vec<OverallRow>, StorageError> {
        self.inner.read_overall()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
