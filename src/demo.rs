use crate::error::AppError;
use crate::scoring::{
    criteria, Category, InMemoryScoreStore, ScoreSubmission, TabulationService,
};
use clap::Args;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only print the derived overall standings
    #[arg(long)]
    pub(crate) standings_only: bool,
}

const ROSTER: [(&str, &str, &str); 5] = [
    ("1", "Alexinoh Yamba", "ORD"),
    ("2", "Edmar Tanoy", "FAD"),
    ("3", "Vicarthur Tango-an", "MSESDD"),
    ("4", "Khalil Bigtas", "MMD"),
    ("5", "Larry Brana", "GD"),
];

const JUDGES: [&str; 3] = ["Judge Reyes", "Judge Santos", "Judge Lim"];

// Per-candidate baseline quality and per-judge lean, chosen so the seeded
// event produces distinct, realistic-looking rankings.
const QUALITY: [f64; 5] = [0.90, 0.82, 0.95, 0.76, 0.86];
const JUDGE_LEAN: [f64; 3] = [-0.03, 0.0, 0.02];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryScoreStore::default());
    let service = TabulationService::new(store);

    println!("Pageant tabulation demo");
    println!(
        "Seeding {} judges scoring {} candidates across {} categories",
        JUDGES.len(),
        ROSTER.len(),
        Category::DIRECT.len()
    );

    for category in Category::DIRECT {
        for (judge_slot, judge) in JUDGES.iter().enumerate() {
            for (candidate_slot, (number, _, _)) in ROSTER.iter().enumerate() {
                let submission =
                    seeded_submission(category, judge, judge_slot, number, candidate_slot);
                service
                    .submit_score(submission)
                    .map_err(AppError::Tabulation)?;
            }
        }
    }

    if !args.standings_only {
        for category in Category::DIRECT {
            println!("\n{} - {}", category.title(), category.label());
            let results = service
                .results(category.label())
                .map_err(AppError::Tabulation)?;
            for (rank, result) in results.iter().enumerate() {
                let (name, department) = candidate_details(&result.candidate.0);
                println!(
                    "  #{} Candidate {} ({name}, {department}): {:.2} | {} judge(s)",
                    rank + 1,
                    result.candidate,
                    result.total_score,
                    result.judge_count
                );
            }
        }
    }

    let count = service.recompute_overall().map_err(AppError::Tabulation)?;
    println!("\nDerived standings table rebuilt for {count} candidate(s)");

    println!("Overall Awards (interview 45% / sports wear 15% / gown 15% / impact 25%)");
    let standings = service.results("overall").map_err(AppError::Tabulation)?;
    for (rank, result) in standings.iter().enumerate() {
        let (name, department) = candidate_details(&result.candidate.0);
        let breakdown: Vec<String> = result
            .scores
            .iter()
            .map(|(criterion, value)| format!("{criterion} {value:.2}"))
            .collect();
        println!(
            "  #{} Candidate {} ({name}, {department}): {:.2} | {}",
            rank + 1,
            result.candidate,
            result.total_score,
            breakdown.join(" / ")
        );
    }

    Ok(())
}

fn candidate_details(number: &str) -> (&'static str, &'static str) {
    ROSTER
        .iter()
        .find(|(roster_number, _, _)| *roster_number == number)
        .map(|(_, name, department)| (*name, *department))
        .unwrap_or(("Unknown", "-"))
}

fn seeded_submission(
    category: Category,
    judge: &str,
    judge_slot: usize,
    candidate: &str,
    candidate_slot: usize,
) -> ScoreSubmission {
    let lean = QUALITY[candidate_slot] + JUDGE_LEAN[judge_slot];

    let mut scores = BTreeMap::new();
    let mut total = 0.0;
    for criterion in criteria::criteria(category) {
        // Judges enter scores in 0.1 steps up to the criterion maximum.
        let value = ((criterion.max_score * lean * 10.0).round() / 10.0)
            .clamp(0.0, criterion.max_score);
        scores.insert(criterion.name.to_string(), value);
        total += value;
    }

    ScoreSubmission {
        category: category.label().to_string(),
        judge_name: judge.to_string(),
        candidate_number: candidate.to_string(),
        total_score: total,
        scores,
    }
}
