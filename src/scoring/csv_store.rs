use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use csv::StringRecord;
use tracing::warn;

use super::criteria;
use super::domain::{CandidateNumber, Category, OverallRow, ScoreRow};
use super::store::{ScoreStore, StorageError};

/// File-backed store keeping one CSV table per category under a data
/// directory, with the same column layout the event's original spreadsheet
/// used. Publishing the derived overall table writes a sibling temp file
/// and renames it into place, so readers never see a partial rebuild.
pub struct CsvScoreStore {
    data_dir: PathBuf,
}

impl CsvScoreStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|err| {
            StorageError::Unavailable(format!(
                "cannot create data directory {}: {err}",
                data_dir.display()
            ))
        })?;
        Ok(Self { data_dir })
    }

    /// Raw-table name for a category. Legacy direct submissions to the
    /// derived overall category land in their own table; the recomputed
    /// standings table keeps its own layout.
    fn raw_table_name(category: Category) -> &'static str {
        match category {
            Category::Overall => "Overall Direct Scores",
            _ => category.table_name(),
        }
    }

    fn table_path(&self, table_name: &str) -> PathBuf {
        let file = table_name.to_ascii_lowercase().replace(' ', "_");
        self.data_dir.join(format!("{file}.csv"))
    }
}

fn read_failed(table: &str) -> impl Fn(csv::Error) -> StorageError + '_ {
    move |err| StorageError::ReadFailed {
        table: table.to_string(),
        message: err.to_string(),
    }
}

fn write_failed(table: &str, err: impl ToString) -> StorageError {
    StorageError::WriteFailed {
        table: table.to_string(),
        message: err.to_string(),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn parse_score(value: Option<&str>) -> f64 {
    value
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn parse_raw_row(category: Category, record: &StringRecord) -> Option<ScoreRow> {
    if record.len() < criteria::RAW_HEADER_PREFIX.len() {
        return None;
    }

    let timestamp = parse_timestamp(record.get(0)?)?;
    let judge_name = record.get(1)?.trim().to_string();
    let candidate = CandidateNumber(record.get(2)?.trim().to_string());
    let declared_total = record.get(3)?.trim().parse::<f64>().ok()?;

    let mut criterion_scores = std::collections::BTreeMap::new();
    for (index, criterion) in criteria::criteria(category).iter().enumerate() {
        criterion_scores.insert(
            criterion.name.to_string(),
            parse_score(record.get(criteria::RAW_HEADER_PREFIX.len() + index)),
        );
    }

    Some(ScoreRow {
        timestamp,
        judge_name,
        candidate,
        declared_total,
        criterion_scores,
    })
}

fn parse_overall_row(record: &StringRecord) -> Option<OverallRow> {
    if record.len() < criteria::OVERALL_HEADER.len() {
        return None;
    }

    Some(OverallRow {
        timestamp: parse_timestamp(record.get(0)?)?,
        candidate: CandidateNumber(record.get(1)?.trim().to_string()),
        final_score: record.get(2)?.trim().parse::<f64>().ok()?,
        interview_avg: parse_score(record.get(3)),
        sports_avg: parse_score(record.get(4)),
        gown_avg: parse_score(record.get(5)),
        avg_impact: parse_score(record.get(6)),
    })
}

impl ScoreStore for CsvScoreStore {
    fn append(&self, category: Category, row: ScoreRow) -> Result<(), StorageError> {
        let table = Self::raw_table_name(category);
        let path = self.table_path(table);
        let new_table = !path.exists();

        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| write_failed(table, err))?;
        let mut writer = csv::Writer::from_writer(file);

        if new_table {
            writer
                .write_record(criteria::table_header(category))
                .map_err(|err| write_failed(table, err))?;
        }

        let mut record = vec![
            row.timestamp.to_rfc3339(),
            row.judge_name.clone(),
            row.candidate.0.clone(),
            row.declared_total.to_string(),
        ];
        for criterion in criteria::criteria(category) {
            let value = row
                .criterion_scores
                .get(criterion.name)
                .copied()
                .unwrap_or(0.0);
            record.push(value.to_string());
        }

        writer
            .write_record(&record)
            .map_err(|err| write_failed(table, err))?;
        writer.flush().map_err(|err| write_failed(table, err))?;
        Ok(())
    }

    fn read_all(&self, category: Category) -> Result<Vec<ScoreRow>, StorageError> {
        let table = Self::raw_table_name(category);
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(read_failed(table))?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    warn!(table, row = index, %err, "skipping unreadable row");
                    continue;
                }
            };
            match parse_raw_row(category, &record) {
                Some(row) => rows.push(row),
                None => warn!(table, row = index, "skipping malformed row"),
            }
        }
        Ok(rows)
    }

    fn clear_rows(&self, category: Category) -> Result<(), StorageError> {
        let table = Self::raw_table_name(category);
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(());
        }

        let tmp = path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp).map_err(|err| write_failed(table, err))?;
            writer
                .write_record(criteria::table_header(category))
                .map_err(|err| write_failed(table, err))?;
            writer.flush().map_err(|err| write_failed(table, err))?;
        }
        fs::rename(&tmp, &path).map_err(|err| write_failed(table, err))
    }

    fn publish_overall(&self, rows: Vec<OverallRow>) -> Result<(), StorageError> {
        let table = Category::Overall.table_name();
        let path = self.table_path(table);

        let tmp = path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp).map_err(|err| write_failed(table, err))?;
            writer
                .write_record(criteria::OVERALL_HEADER)
                .map_err(|err| write_failed(table, err))?;
            for row in &rows {
                writer
                    .write_record([
                        row.timestamp.to_rfc3339(),
                        row.candidate.0.clone(),
                        row.final_score.to_string(),
                        row.interview_avg.to_string(),
                        row.sports_avg.to_string(),
                        row.gown_avg.to_string(),
                        row.avg_impact.to_string(),
                    ])
                    .map_err(|err| write_failed(table, err))?;
            }
            writer.flush().map_err(|err| write_failed(table, err))?;
        }
        fs::rename(&tmp, &path).map_err(|err| write_failed(table, err))
    }

    fn read_overall(&self) -> Result<Vec<OverallRow>, StorageError> {
        let table = Category::Overall.table_name();
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(read_failed(table))?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    warn!(table, row = index, %err, "skipping unreadable row");
                    continue;
                }
            };
            match parse_overall_row(&record) {
                Some(row) => rows.push(row),
                None => warn!(table, row = index, "skipping malformed row"),
            }
        }
        Ok(rows)
    }
}
