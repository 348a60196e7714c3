//! Derived overall standings: combines the interview, sports wear, and gown
//! results with a cross-category impact average.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use tracing::warn;

use super::criteria;
use super::domain::{CandidateNumber, CandidateResult, Category, OverallRow, ScoreRow};

// Fixed tabulation policy for the overall award. Independent of the
// registry's display-only "overall" criteria list.
pub(crate) const INTERVIEW_WEIGHT: f64 = 0.45;
pub(crate) const SPORTS_WEIGHT: f64 = 0.15;
pub(crate) const GOWN_WEIGHT: f64 = 0.15;
pub(crate) const IMPACT_WEIGHT: f64 = 0.25;

#[derive(Default)]
struct SourceAccum {
    total_sum: f64,
    impact_sum: f64,
    count: usize,
}

impl SourceAccum {
    fn averages(&self) -> Option<(f64, f64)> {
        (self.count > 0).then(|| {
            (
                self.total_sum / self.count as f64,
                self.impact_sum / self.count as f64,
            )
        })
    }
}

/// Build one standings row per candidate with at least one row in any
/// source category. A candidate absent from a source category contributes
/// 0 for it; the impact average divides by the number of categories the
/// candidate was actually judged in.
pub(crate) fn build_overall_rows(sources: &[(Category, Vec<ScoreRow>)]) -> Vec<OverallRow> {
    let mut order: Vec<CandidateNumber> = Vec::new();
    let mut grouped: HashMap<CandidateNumber, HashMap<Category, SourceAccum>> = HashMap::new();

    for (category, rows) in sources {
        let impact_name = criteria::impact_criterion(*category).name;
        for (index, row) in rows.iter().enumerate() {
            if row.candidate.0.trim().is_empty() {
                warn!(category = %category, row = index, "skipping row with missing candidate number");
                continue;
            }
            if !row.declared_total.is_finite() {
                warn!(
                    category = %category,
                    row = index,
                    candidate = %row.candidate,
                    "skipping row with invalid total score"
                );
                continue;
            }

            let by_category = grouped.entry(row.candidate.clone()).or_insert_with(|| {
                order.push(row.candidate.clone());
                HashMap::new()
            });
            let accum = by_category.entry(*category).or_default();
            accum.total_sum += row.declared_total;
            accum.impact_sum += row
                .criterion_scores
                .get(impact_name)
                .copied()
                .filter(|score| score.is_finite())
                .unwrap_or(0.0);
            accum.count += 1;
        }
    }

    let timestamp = Utc::now();
    order
        .into_iter()
        .map(|candidate| {
            let by_category = &grouped[&candidate];
            let mut category_avgs = [0.0; 3];
            let mut impact_total = 0.0;
            let mut contributing = 0usize;

            for (slot, category) in Category::OVERALL_SOURCES.iter().enumerate() {
                if let Some((total_avg, impact_avg)) =
                    by_category.get(category).and_then(SourceAccum::averages)
                {
                    category_avgs[slot] = total_avg;
                    impact_total += impact_avg;
                    contributing += 1;
                }
            }

            let [interview_avg, sports_avg, gown_avg] = category_avgs;
            let avg_impact = impact_total / contributing as f64;
            let final_score = interview_avg * INTERVIEW_WEIGHT
                + sports_avg * SPORTS_WEIGHT
                + gown_avg * GOWN_WEIGHT
                + avg_impact * IMPACT_WEIGHT;

            OverallRow {
                timestamp,
                candidate,
                final_score,
                interview_avg,
                sports_avg,
                gown_avg,
                avg_impact,
            }
        })
        .collect()
}

/// Render derived standings rows as ranked results under the display
/// criteria names the admin view expects.
pub(crate) fn overall_results(rows: &[OverallRow]) -> Vec<CandidateResult> {
    let display = criteria::criteria(Category::Overall);
    let mut results: Vec<CandidateResult> = rows
        .iter()
        .map(|row| {
            let values = [
                row.interview_avg,
                row.sports_avg,
                row.gown_avg,
                row.avg_impact,
            ];
            let mut scores = BTreeMap::new();
            for (criterion, value) in display.iter().zip(values) {
                scores.insert(criterion.name.to_string(), value);
            }
            CandidateResult {
                candidate: row.candidate.clone(),
                total_score: row.final_score,
                scores,
                judge_count: 1,
            }
        })
        .collect();

    super::aggregate::sort_descending(&mut results);
    results
}
