use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use zentype_core::Snapshot;

/// The file all results are kept in, inside the results directory
pub const RESULTS_FILE: &str = "typing_results.json";

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("Failed to create results directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to read results file: {0}")]
    ReadFile(std::io::Error),

    #[error("Failed to write results file: {0}")]
    WriteFile(std::io::Error),

    #[error("Failed to parse results: {0}")]
    Parse(serde_json::Error),

    #[error("Failed to export results: {0}")]
    Export(csv::Error),
}

/// A finished test, as it is stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub timestamp: Option<DateTime<Local>>,
    pub wpm: f64,
    pub accuracy: f64,
    pub duration: f64,
    pub elapsed_time: f64,
    pub correct_chars: usize,
    pub total_chars_typed: usize,
    pub total_chars_in_test: usize,
    /// Characters of the text reached when the test ended
    #[serde(default)]
    pub cursor: usize,
}

impl TestRecord {
    /// When the test was taken, to the minute, or `unknown`
    pub fn when(&self) -> String {
        self.timestamp.map_or_else(
            || "unknown".to_string(),
            |timestamp| timestamp.format("%Y-%m-%d %H:%M").to_string(),
        )
    }
}

impl From<&Snapshot> for TestRecord {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            timestamp: None,
            wpm: snapshot.wpm,
            accuracy: snapshot.accuracy,
            duration: snapshot.duration,
            elapsed_time: snapshot.elapsed_time,
            correct_chars: snapshot.correct_chars,
            total_chars_typed: snapshot.total_chars_typed,
            total_chars_in_test: snapshot.total_chars_in_test,
            cursor: snapshot.cursor,
        }
    }
}

/// One row of a CSV export
#[derive(Debug, Serialize)]
struct CsvRow {
    timestamp: String,
    wpm: f64,
    accuracy: f64,
    duration: f64,
    correct_chars: usize,
    total_chars_typed: usize,
}

impl From<&TestRecord> for CsvRow {
    fn from(record: &TestRecord) -> Self {
        Self {
            timestamp: record
                .timestamp
                .map(|timestamp| timestamp.to_rfc3339())
                .unwrap_or_default(),
            wpm: record.wpm,
            accuracy: record.accuracy,
            duration: record.duration,
            correct_chars: record.correct_chars,
            total_chars_typed: record.total_chars_typed,
        }
    }
}

/// Aggregates over every stored result
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_tests: usize,
    pub best_wpm: f64,
    pub average_wpm: f64,
    pub average_accuracy: f64,
    pub total_chars_typed: usize,
}

impl Summary {
    fn from_records(records: &[TestRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let count = records.len() as f64;

        Self {
            total_tests: records.len(),
            best_wpm: records.iter().map(|r| r.wpm).fold(0.0, f64::max),
            average_wpm: records.iter().map(|r| r.wpm).sum::<f64>() / count,
            average_accuracy: records.iter().map(|r| r.accuracy).sum::<f64>() / count,
            total_chars_typed: records.iter().map(|r| r.total_chars_typed).sum(),
        }
    }
}

/// Stores finished tests as a JSON array on disk
#[derive(Debug)]
pub struct ResultsStore {
    path: PathBuf,
}

impl ResultsStore {
    /// Opens the store in `directory`, creating the directory and an empty results file if needed
    pub fn open(directory: &Path) -> Result<Self, ResultsError> {
        if !directory.exists() {
            fs::create_dir_all(directory).map_err(ResultsError::CreateDirectory)?;
        }

        let store = Self {
            path: directory.join(RESULTS_FILE),
        };

        if !store.path.exists() {
            store.save_results(&[])?;
        }

        Ok(store)
    }

    /// The path of the results file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every stored result, in the order they were added
    pub fn load_results(&self) -> Result<Vec<TestRecord>, ResultsError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(ResultsError::ReadFile)?;
        serde_json::from_str(&content).map_err(ResultsError::Parse)
    }

    /// Appends a result, stamping it with the current time if it has no timestamp
    pub fn add_result(&self, mut record: TestRecord) -> Result<(), ResultsError> {
        let mut results = self.load_results()?;

        record.timestamp.get_or_insert_with(Local::now);
        results.push(record);

        self.save_results(&results)?;
        debug!(total = results.len(), "Result saved");

        Ok(())
    }

    pub fn summary(&self) -> Result<Summary, ResultsError> {
        Ok(Summary::from_records(&self.load_results()?))
    }

    /// Results of tests with the given duration in seconds
    pub fn results_by_duration(&self, seconds: u64) -> Result<Vec<TestRecord>, ResultsError> {
        let seconds = seconds as f64;
        Ok(self
            .load_results()?
            .into_iter()
            .filter(|record| record.duration == seconds)
            .collect())
    }

    /// The `limit` newest results, newest first
    pub fn recent_results(&self, limit: usize) -> Result<Vec<TestRecord>, ResultsError> {
        let mut results = self.load_results()?;
        sort_newest_first(&mut results);
        results.truncate(limit);
        Ok(results)
    }

    /// Writes every result to a CSV file at `path`
    ///
    /// Returns `false` without touching `path` when there is nothing to export.
    pub fn export_csv(&self, path: &Path) -> Result<bool, ResultsError> {
        let results = self.load_results()?;
        if results.is_empty() {
            return Ok(false);
        }

        let mut writer = csv::Writer::from_path(path).map_err(ResultsError::Export)?;
        for record in &results {
            writer
                .serialize(CsvRow::from(record))
                .map_err(ResultsError::Export)?;
        }
        writer
            .flush()
            .map_err(|error| ResultsError::Export(error.into()))?;

        info!(path = %path.display(), rows = results.len(), "Exported results");
        Ok(true)
    }

    /// Removes every stored result
    pub fn clear(&self) -> Result<(), ResultsError> {
        self.save_results(&[])?;
        info!("Cleared all results");
        Ok(())
    }

    fn save_results(&self, results: &[TestRecord]) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(results).map_err(ResultsError::Parse)?;
        fs::write(&self.path, json).map_err(ResultsError::WriteFile)
    }
}

/// Sorts by timestamp, newest first. Records without a timestamp go last.
pub fn sort_newest_first(results: &mut [TestRecord]) {
    results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(wpm: f64, accuracy: f64, duration: f64) -> TestRecord {
        TestRecord {
            timestamp: None,
            wpm,
            accuracy,
            duration,
            elapsed_time: duration,
            correct_chars: (wpm * 5.0) as usize,
            total_chars_typed: 100,
            total_chars_in_test: 200,
            cursor: 100,
        }
    }

    fn at(record: TestRecord, hour: u32) -> TestRecord {
        TestRecord {
            timestamp: Local.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).single(),
            ..record
        }
    }

    #[test]
    fn test_open_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");

        let store = ResultsStore::open(&data_dir).unwrap();

        assert!(store.path().exists());
        assert_eq!(store.load_results().unwrap(), Vec::new());
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::open(dir.path()).unwrap();
        fs::remove_file(store.path()).unwrap();

        assert!(store.load_results().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::open(dir.path()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load_results(), Err(ResultsError::Parse(_))));
    }

    #[test]
    fn test_add_result_stamps_time() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::open(dir.path()).unwrap();

        store.add_result(record(40.0, 95.0, 60.0)).unwrap();
        let stamped = at(record(50.0, 90.0, 30.0), 9);
        store.add_result(stamped.clone()).unwrap();

        let results = store.load_results().unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].timestamp.is_some());
        assert_eq!(results[1], stamped);
    }

    #[test]
    fn test_record_from_snapshot() {
        let clock = zentype_core::ManualClock::new();
        let mut session = zentype_core::TypingSession::with_clock("hello", 30.0, clock.clone());
        for char in "hello".chars() {
            session.apply_keypress(char);
        }
        clock.advance(6.0);
        let snapshot = session.finish();

        let record = TestRecord::from(&snapshot);
        assert_eq!(record.timestamp, None);
        assert_eq!(record.wpm, snapshot.wpm);
        assert_eq!(record.accuracy, 100.0);
        assert_eq!(record.duration, 30.0);
        assert_eq!(record.correct_chars, 5);
        assert_eq!(record.total_chars_in_test, 5);
        assert_eq!(record.cursor, 5);
    }

    #[test]
    fn test_record_keeps_cursor_of_unfinished_text() {
        let clock = zentype_core::ManualClock::new();
        let mut session =
            zentype_core::TypingSession::with_clock("hello world", 30.0, clock.clone());
        for char in "hellp w".chars() {
            session.apply_keypress(char);
        }
        clock.advance(30.0);
        let snapshot = session.finish();

        let record = TestRecord::from(&snapshot);
        assert_eq!(record.cursor, 7);
        assert_eq!(record.correct_chars, 6);
        assert_eq!(record.total_chars_in_test, 11);
    }

    #[test]
    fn test_record_without_cursor_loads() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::open(dir.path()).unwrap();
        std::fs::write(
            store.path(),
            r#"[{"timestamp":null,"wpm":40.0,"accuracy":90.0,"duration":60.0,"elapsed_time":60.0,"correct_chars":200,"total_chars_typed":220,"total_chars_in_test":300}]"#,
        )
        .unwrap();

        let results = store.load_results().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cursor, 0);
    }

    #[test]
    fn test_when() {
        assert_eq!(record(40.0, 90.0, 60.0).when(), "unknown");
        assert_eq!(at(record(40.0, 90.0, 60.0), 9).when(), "2024-05-01 09:00");
    }

    #[test]
    fn test_summary() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::open(dir.path()).unwrap();

        assert_eq!(store.summary().unwrap(), Summary::default());

        store.add_result(record(40.0, 90.0, 60.0)).unwrap();
        store.add_result(record(60.0, 100.0, 30.0)).unwrap();

        let summary = store.summary().unwrap();
        assert_eq!(summary.total_tests, 2);
        assert_eq!(summary.best_wpm, 60.0);
        assert_eq!(summary.average_wpm, 50.0);
        assert_eq!(summary.average_accuracy, 95.0);
        assert_eq!(summary.total_chars_typed, 200);
    }

    #[test]
    fn test_filters_and_ordering() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::open(dir.path()).unwrap();

        store.add_result(at(record(30.0, 90.0, 60.0), 8)).unwrap();
        store.add_result(at(record(50.0, 90.0, 30.0), 12)).unwrap();
        store.add_result(at(record(40.0, 90.0, 60.0), 10)).unwrap();

        let by_duration = store.results_by_duration(60).unwrap();
        assert_eq!(by_duration.len(), 2);
        assert!(by_duration.iter().all(|r| r.duration == 60.0));

        let recent = store.recent_results(2).unwrap();
        let wpms: Vec<_> = recent.iter().map(|r| r.wpm).collect();
        assert_eq!(wpms, vec![50.0, 40.0]);

        assert!(store.recent_results(0).unwrap().is_empty());
    }

    #[test]
    fn test_export_csv() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::open(dir.path()).unwrap();
        let csv_path = dir.path().join("export.csv");

        assert!(!store.export_csv(&csv_path).unwrap());
        assert!(!csv_path.exists());

        store.add_result(record(42.5, 97.0, 30.0)).unwrap();
        assert!(store.export_csv(&csv_path).unwrap());

        let content = fs::read_to_string(&csv_path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,wpm,accuracy,duration,correct_chars,total_chars_typed")
        );
        let row = lines.next().unwrap();
        assert!(row.ends_with(",42.5,97.0,30.0,212,100"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultsStore::open(dir.path()).unwrap();

        store.add_result(record(40.0, 90.0, 60.0)).unwrap();
        store.clear().unwrap();

        assert!(store.load_results().unwrap().is_empty());
        assert!(store.path().exists());
    }
}
