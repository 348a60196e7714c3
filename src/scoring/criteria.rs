//! Criteria registry: the source of truth for each category's criteria,
//! weights, and table column layout.

use super::domain::{Category, Criterion};

const fn criterion(name: &'static str, weight_percent: f64) -> Criterion {
    // Judges score each criterion up to its weight share of 100, so the
    // maximum score and the weight coincide for every criterion.
    Criterion {
        name,
        weight_percent,
        max_score: weight_percent,
    }
}

const TALENT: [Criterion; 4] = [
    criterion("Stage Present", 30.0),
    criterion("Mastery", 30.0),
    criterion("Execution of Talent", 30.0),
    criterion("Audience Impact", 10.0),
];

const SPORTS: [Criterion; 4] = [
    criterion("Suitability", 30.0),
    criterion("Sports Identity", 20.0),
    criterion("Poise and Bearing", 40.0),
    criterion("Overall Impact", 10.0),
];

const GOWN: [Criterion; 4] = [
    criterion("Poise and Bearing", 40.0),
    criterion("Design and Fitting", 25.0),
    criterion("Stage Deportment", 25.0),
    criterion("Overall Impact", 10.0),
];

const PHOTOGENIC: [Criterion; 4] = [
    criterion("Natural Smile and Look", 30.0),
    criterion("Poise and Confidence", 20.0),
    criterion("Personality", 15.0),
    criterion("Beauty", 35.0),
];

const INTERVIEW: [Criterion; 4] = [
    criterion("Wit and Content", 40.0),
    criterion("Projection and Delivery", 30.0),
    criterion("Stage Presence", 20.0),
    criterion("Overall Impact", 10.0),
];

// Display-only: the derived overall standings are computed from the fixed
// weight constants in the overall module, not from this list.
const OVERALL: [Criterion; 4] = [
    criterion("Intelligence (Q&A)", 45.0),
    criterion("Sports Wear", 15.0),
    criterion("Gown", 15.0),
    criterion("Overall Impact", 25.0),
];

/// Ordered criteria for a category. Total over the closed category set;
/// unknown category strings never reach this far.
pub fn criteria(category: Category) -> &'static [Criterion] {
    match category {
        Category::Talent => &TALENT,
        Category::Sports => &SPORTS,
        Category::Gown => &GOWN,
        Category::Photogenic => &PHOTOGENIC,
        Category::Interview => &INTERVIEW,
        Category::Overall => &OVERALL,
    }
}

/// The criterion feeding the cross-category impact average: by convention
/// the last criterion of each overall source category.
pub fn impact_criterion(category: Category) -> &'static Criterion {
    let list = criteria(category);
    &list[list.len() - 1]
}

/// Fixed leading columns of every raw score table.
pub const RAW_HEADER_PREFIX: [&str; 4] =
    ["Timestamp", "Judge Name", "Candidate Number", "Total Score"];

/// Columns of the derived overall standings table.
pub const OVERALL_HEADER: [&str; 7] = [
    "Timestamp",
    "Candidate Number",
    "Final Score",
    "Interview Avg",
    "Sports Avg",
    "Gown Avg",
    "Avg Impact",
];

/// Full header row for a category's raw table, in registry column order.
pub fn table_header(category: Category) -> Vec<&'static str> {
    let mut header = RAW_HEADER_PREFIX.to_vec();
    header.extend(criteria(category).iter().map(|criterion| criterion.name));
    header
}
