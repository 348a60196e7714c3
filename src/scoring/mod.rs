//! Score intake, aggregation, and ranking for the judging event.
//!
//! Judges submit per-criterion scores for candidates in the direct
//! categories; the aggregation engine averages them across judges and ranks
//! candidates by weighted total. The special "overall" category is derived:
//! it combines the interview, sports wear, and gown results with a
//! cross-category impact average and is rebuilt in full whenever a source
//! category receives a new submission.

pub(crate) mod aggregate;
pub mod criteria;
pub mod csv_store;
pub mod domain;
pub(crate) mod overall;
pub mod recompute;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use csv_store::CsvScoreStore;
pub use domain::{CandidateNumber, CandidateResult, Category, Criterion, OverallRow, ScoreRow};
pub use recompute::RecomputeTrigger;
pub use router::scoring_router;
pub use service::{ScoreSubmission, TabulationError, TabulationService, ValidationError};
pub use store::{InMemoryScoreStore, ScoreStore, StorageError};
