use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::aggregate;
use super::criteria;
use super::domain::{CandidateNumber, CandidateResult, Category, OverallRow, ScoreRow};
use super::overall;
use super::recompute::RecomputeTrigger;
use super::store::{ScoreStore, StorageError};

/// One judge's submission for one candidate in one category; the wire shape
/// of the submit operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub category: String,
    pub judge_name: String,
    pub candidate_number: String,
    pub total_score: f64,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

/// Service composing validation, the score store, and the recompute trigger.
pub struct TabulationService<S> {
    store: Arc<S>,
    trigger: RecomputeTrigger<S>,
}

impl<S: ScoreStore + 'static> TabulationService<S> {
    pub fn new(store: Arc<S>) -> Self {
        let trigger = RecomputeTrigger::new(store.clone());
        Self { store, trigger }
    }

    pub fn trigger(&self) -> &RecomputeTrigger<S> {
        &self.trigger
    }

    /// Validate and append one judge's scores. A successful submission to an
    /// overall source category kicks off a best-effort standings rebuild
    /// whose outcome never affects the reported submission result.
    pub fn submit_score(&self, submission: ScoreSubmission) -> Result<(), TabulationError> {
        let category = parse_category(&submission.category)?;
        let row = validate_submission(category, submission)?;

        if category == Category::Overall {
            // Legacy clients scored the overall category directly; those
            // rows are accepted but never feed the derived standings.
            warn!(
                candidate = %row.candidate,
                "accepting direct submission to the derived overall category"
            );
        }

        self.store.append(category, row)?;

        if category.is_overall_source() {
            self.trigger.dispatch();
        }
        Ok(())
    }

    /// Ranked results for a category. Direct categories aggregate their raw
    /// rows on the fly; overall recomputes from its source categories at
    /// query time so reads never race a standings rebuild.
    pub fn results(&self, category: &str) -> Result<Vec<CandidateResult>, TabulationError> {
        let category = parse_category(category)?;

        if category == Category::Overall {
            let rows = self.fresh_overall_rows()?;
            return Ok(overall::overall_results(&rows));
        }

        let rows = self.store.read_all(category)?;
        Ok(aggregate::rank_candidates(&rows, criteria::criteria(category)))
    }

    /// Explicit full rebuild of the derived overall standings table.
    /// Returns the number of candidates written.
    pub fn recompute_overall(&self) -> Result<usize, TabulationError> {
        Ok(self.trigger.rebuild()?)
    }

    fn fresh_overall_rows(&self) -> Result<Vec<OverallRow>, StorageError> {
        let mut sources = Vec::with_capacity(Category::OVERALL_SOURCES.len());
        for category in Category::OVERALL_SOURCES {
            sources.push((category, self.store.read_all(category)?));
        }
        Ok(overall::build_overall_rows(&sources))
    }
}

fn parse_category(value: &str) -> Result<Category, TabulationError> {
    Category::parse(value).ok_or_else(|| TabulationError::InvalidCategory(value.to_string()))
}

/// Rejects a submission before any store mutation. Scores for criteria the
/// registry does not know are ignored, matching the original intake form.
fn validate_submission(
    category: Category,
    submission: ScoreSubmission,
) -> Result<ScoreRow, ValidationError> {
    let judge_name = submission.judge_name.trim().to_string();
    if judge_name.is_empty() {
        return Err(ValidationError::MissingJudgeName);
    }

    let candidate = submission.candidate_number.trim().to_string();
    if candidate.is_empty() {
        return Err(ValidationError::MissingCandidateNumber);
    }

    let total = submission.total_score;
    if !total.is_finite() || !(0.0..=100.0).contains(&total) {
        return Err(ValidationError::TotalOutOfRange { value: total });
    }

    let mut criterion_scores = BTreeMap::new();
    for criterion in criteria::criteria(category) {
        let value = submission.scores.get(criterion.name).copied().unwrap_or(0.0);
        if !value.is_finite() || value < 0.0 || value > criterion.max_score {
            return Err(ValidationError::ScoreOutOfRange {
                criterion: criterion.name.to_string(),
                value,
                max: criterion.max_score,
            });
        }
        criterion_scores.insert(criterion.name.to_string(), value);
    }

    Ok(ScoreRow {
        timestamp: Utc::now(),
        judge_name,
        candidate: CandidateNumber(candidate),
        declared_total: total,
        criterion_scores,
    })
}

/// Error raised by the tabulation service.
#[derive(Debug, thiserror::Error)]
pub enum TabulationError {
    #[error("unknown category '{0}'")]
    InvalidCategory(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Submission defects rejected before any store mutation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("judge name is required")]
    MissingJudgeName,
    #[error("candidate number is required")]
    MissingCandidateNumber,
    #[error("total score {value} is outside 0-100")]
    TotalOutOfRange { value: f64 },
    #[error("score {value} for '{criterion}' is outside 0-{max}")]
    ScoreOutOfRange {
        criterion: String,
        value: f64,
        max: f64,
    },
}
