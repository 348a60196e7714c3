//! Direct-category aggregation: group raw rows by candidate, average each
//! criterion across judges, and rank by weighted total.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use super::domain::{CandidateNumber, CandidateResult, Criterion, ScoreRow};

struct CandidateAccum {
    submissions: usize,
    criterion_sums: Vec<f64>,
}

/// Rank candidates for one direct category. Rows with a missing candidate
/// number or a non-finite declared total are skipped and logged, never
/// fatal. A judge who omitted a criterion scores 0 for it, the same as a
/// judge who awarded 0.
pub(crate) fn rank_candidates(rows: &[ScoreRow], criteria: &[Criterion]) -> Vec<CandidateResult> {
    let mut order: Vec<CandidateNumber> = Vec::new();
    let mut grouped: HashMap<CandidateNumber, CandidateAccum> = HashMap::new();

    for (index, row) in rows.iter().enumerate() {
        if row.candidate.0.trim().is_empty() {
            warn!(row = index, "skipping row with missing candidate number");
            continue;
        }
        if !row.declared_total.is_finite() {
            warn!(
                row = index,
                candidate = %row.candidate,
                "skipping row with invalid total score"
            );
            continue;
        }

        let accum = grouped.entry(row.candidate.clone()).or_insert_with(|| {
            order.push(row.candidate.clone());
            CandidateAccum {
                submissions: 0,
                criterion_sums: vec![0.0; criteria.len()],
            }
        });
        accum.submissions += 1;

        for (slot, criterion) in criteria.iter().enumerate() {
            let value = row
                .criterion_scores
                .get(criterion.name)
                .copied()
                .filter(|score| score.is_finite())
                .unwrap_or(0.0);
            accum.criterion_sums[slot] += value;
        }
    }

    let mut results: Vec<CandidateResult> = order
        .into_iter()
        .map(|candidate| {
            let accum = &grouped[&candidate];
            let mut scores = BTreeMap::new();
            let mut total_score = 0.0;
            for (slot, criterion) in criteria.iter().enumerate() {
                let average = accum.criterion_sums[slot] / accum.submissions as f64;
                total_score += average * criterion.weight_percent / 100.0;
                scores.insert(criterion.name.to_string(), average);
            }
            CandidateResult {
                candidate,
                total_score,
                scores,
                judge_count: accum.submissions,
            }
        })
        .collect();

    sort_descending(&mut results);
    results
}

/// Stable descending sort on total score: tied candidates keep the order
/// in which they were first encountered.
pub(crate) fn sort_descending(results: &mut [CandidateResult]) {
    results.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });
}
