use std::fs;

use super::common::*;
use crate::scoring::csv_store::CsvScoreStore;
use crate::scoring::domain::{CandidateNumber, Category, OverallRow};
use crate::scoring::store::{InMemoryScoreStore, ScoreStore};

fn overall_row(candidate: &str, final_score: f64) -> OverallRow {
    OverallRow {
        timestamp: event_night(),
        candidate: CandidateNumber(candidate.to_string()),
        final_score,
        interview_avg: 90.0,
        sports_avg: 85.0,
        gown_avg: 80.0,
        avg_impact: 8.5,
    }
}

#[test]
fn in_memory_append_read_and_clear() {
    let store = InMemoryScoreStore::default();

    assert!(store.read_all(Category::Talent).expect("readable").is_empty());

    store
        .append(Category::Talent, row("Judge Reyes", "1", 80.0, &[("Mastery", 24.0)]))
        .expect("append succeeds");
    store
        .append(Category::Talent, row("Judge Santos", "2", 85.0, &[("Mastery", 26.0)]))
        .expect("append succeeds");

    let rows = store.read_all(Category::Talent).expect("readable");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].judge_name, "Judge Reyes");

    store.clear_rows(Category::Talent).expect("clear succeeds");
    assert!(store.read_all(Category::Talent).expect("readable").is_empty());
}

#[test]
fn in_memory_publish_replaces_standings() {
    let store = InMemoryScoreStore::default();

    store
        .publish_overall(vec![overall_row("1", 70.0), overall_row("2", 65.0)])
        .expect("publish succeeds");
    assert_eq!(store.read_overall().expect("readable").len(), 2);

    store
        .publish_overall(vec![overall_row("3", 72.0)])
        .expect("publish succeeds");
    let standings = store.read_overall().expect("readable");
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].candidate.0, "3");
}

#[test]
fn csv_rows_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = CsvScoreStore::new(dir.path()).expect("store opens");

    let first = row(
        "Judge Reyes",
        "3",
        95.0,
        &[
            ("Wit and Content", 40.0),
            ("Projection and Delivery", 30.0),
            ("Stage Presence", 15.0),
            ("Overall Impact", 10.0),
        ],
    );
    let second = row(
        "Judge Santos",
        "1",
        87.5,
        &[
            ("Wit and Content", 35.0),
            ("Projection and Delivery", 27.5),
            ("Stage Presence", 17.0),
            ("Overall Impact", 8.0),
        ],
    );

    store
        .append(Category::Interview, first.clone())
        .expect("append succeeds");
    store
        .append(Category::Interview, second.clone())
        .expect("append succeeds");

    let rows = store.read_all(Category::Interview).expect("readable");
    assert_eq!(rows, vec![first, second]);
}

#[test]
fn csv_absent_table_reads_as_empty() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = CsvScoreStore::new(dir.path()).expect("store opens");
    assert!(store.read_all(Category::Gown).expect("readable").is_empty());
    assert!(store.read_overall().expect("readable").is_empty());
}

#[test]
fn csv_skips_malformed_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = CsvScoreStore::new(dir.path()).expect("store opens");

    store
        .append(
            Category::Gown,
            row("Judge Reyes", "2", 80.0, &[("Poise and Bearing", 32.0)]),
        )
        .expect("append succeeds");

    // Hand-damage the table: a truncated row, a non-numeric total, and a
    // row with a garbage timestamp.
    let path = dir.path().join("gown_scores.csv");
    let mut contents = fs::read_to_string(&path).expect("table readable");
    contents.push_str("only-two,fields\n");
    contents.push_str("2026-03-14T19:30:00+00:00,Judge Lim,4,not-a-number,1,2,3,4\n");
    contents.push_str("yesterday,Judge Lim,4,80,1,2,3,4\n");
    fs::write(&path, contents).expect("table writable");

    let rows = store.read_all(Category::Gown).expect("readable");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].candidate.0, "2");
}

#[test]
fn csv_clear_rows_keeps_the_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = CsvScoreStore::new(dir.path()).expect("store opens");

    store
        .append(
            Category::Sports,
            row("Judge Reyes", "5", 84.0, &[("Suitability", 25.0)]),
        )
        .expect("append succeeds");
    store.clear_rows(Category::Sports).expect("clear succeeds");

    assert!(store.read_all(Category::Sports).expect("readable").is_empty());

    let contents =
        fs::read_to_string(dir.path().join("sports_wear_scores.csv")).expect("table readable");
    assert!(contents.starts_with("Timestamp,Judge Name,Candidate Number,Total Score"));

    // Appending after a clear must not duplicate the header.
    store
        .append(
            Category::Sports,
            row("Judge Santos", "1", 90.0, &[("Suitability", 28.0)]),
        )
        .expect("append succeeds");
    assert_eq!(store.read_all(Category::Sports).expect("readable").len(), 1);
}

#[test]
fn csv_publish_overall_replaces_the_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = CsvScoreStore::new(dir.path()).expect("store opens");

    store
        .publish_overall(vec![overall_row("1", 70.25), overall_row("2", 64.5)])
        .expect("publish succeeds");
    let standings = store.read_overall().expect("readable");
    assert_eq!(standings.len(), 2);
    assert_eq!(standings[0].final_score, 70.25);

    store
        .publish_overall(vec![overall_row("2", 66.0)])
        .expect("publish succeeds");
    let standings = store.read_overall().expect("readable");
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].candidate.0, "2");

    // No leftover staging file after the rename.
    assert!(!dir.path().join("overall_scores.csv.tmp").exists());
}

#[test]
fn csv_keeps_legacy_overall_submissions_apart_from_standings() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = CsvScoreStore::new(dir.path()).expect("store opens");

    store
        .append(
            Category::Overall,
            row("Judge Reyes", "1", 90.0, &[("Intelligence (Q&A)", 42.0)]),
        )
        .expect("append succeeds");
    store
        .publish_overall(vec![overall_row("1", 70.0)])
        .expect("publish succeeds");

    assert_eq!(store.read_all(Category::Overall).expect("readable").len(), 1);
    assert_eq!(store.read_overall().expect("readable").len(), 1);
    assert!(dir.path().join("overall_direct_scores.csv").exists());
    assert!(dir.path().join("overall_scores.csv").exists());
}
