use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidates. Kept as a string so numeric-looking
/// numbers ("3" vs 3) always compare the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateNumber(pub String);

impl fmt::Display for CandidateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Judged segments of the event. Fixed at deploy time; `Overall` is derived
/// from the interview, sports, and gown results rather than scored directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Talent,
    Sports,
    Gown,
    Photogenic,
    Interview,
    Overall,
}

impl Category {
    /// Categories judges score directly.
    pub const DIRECT: [Category; 5] = [
        Category::Talent,
        Category::Sports,
        Category::Gown,
        Category::Photogenic,
        Category::Interview,
    ];

    /// Categories whose rows feed the derived overall standings, in the
    /// order their contributions are tabulated.
    pub const OVERALL_SOURCES: [Category; 3] =
        [Category::Interview, Category::Sports, Category::Gown];

    pub const fn label(self) -> &'static str {
        match self {
            Category::Talent => "talent",
            Category::Sports => "sports",
            Category::Gown => "gown",
            Category::Photogenic => "photogenic",
            Category::Interview => "interview",
            Category::Overall => "overall",
        }
    }

    /// Award title shown to the audience.
    pub const fn title(self) -> &'static str {
        match self {
            Category::Talent => "Best in Talent",
            Category::Sports => "Best in Sports Wear",
            Category::Gown => "Best in Gown",
            Category::Photogenic => "Most Photogenic",
            Category::Interview => "Best in Interview",
            Category::Overall => "Overall Awards",
        }
    }

    /// Display name of the backing score table.
    pub const fn table_name(self) -> &'static str {
        match self {
            Category::Talent => "Talent Scores",
            Category::Sports => "Sports Wear Scores",
            Category::Gown => "Gown Scores",
            Category::Photogenic => "Photogenic Scores",
            Category::Interview => "Interview Scores",
            Category::Overall => "Overall Scores",
        }
    }

    pub const fn is_overall_source(self) -> bool {
        matches!(
            self,
            Category::Interview | Category::Sports | Category::Gown
        )
    }

    /// Parse a boundary-supplied category string. Unknown values are
    /// rejected here, uniformly, rather than falling back to a default.
    pub fn parse(value: &str) -> Option<Category> {
        match value.trim().to_ascii_lowercase().as_str() {
            "talent" => Some(Category::Talent),
            "sports" => Some(Category::Sports),
            "gown" => Some(Category::Gown),
            "photogenic" => Some(Category::Photogenic),
            "interview" => Some(Category::Interview),
            "overall" => Some(Category::Overall),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named sub-score within a category. The weight is a literal multiplier
/// divided by 100, never renormalized, and doubles as the maximum score a
/// judge may award for the criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Criterion {
    pub name: &'static str,
    pub weight_percent: f64,
    pub max_score: f64,
}

/// One judge's raw submission for one candidate in one category. Immutable
/// once appended; raw rows are only ever removed by a full-table clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub timestamp: DateTime<Utc>,
    pub judge_name: String,
    pub candidate: CandidateNumber,
    pub declared_total: f64,
    pub criterion_scores: BTreeMap<String, f64>,
}

/// One derived overall standings row per candidate. The whole table is
/// replaced on every recompute; rows are never appended incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRow {
    pub timestamp: DateTime<Utc>,
    pub candidate: CandidateNumber,
    pub final_score: f64,
    pub interview_avg: f64,
    pub sports_avg: f64,
    pub gown_avg: f64,
    pub avg_impact: f64,
}

/// Ranked aggregate for one candidate, computed fresh on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub candidate: CandidateNumber,
    pub total_score: f64,
    pub scores: BTreeMap<String, f64>,
    pub judge_count: usize,
}
