use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MAX_HISTORY_ENTRIES;
use crate::error::StoreError;

const APP_DIR_NAME: &str = "retro-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// One finished run.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub score: u32,
    pub difficulty: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

/// Persistence collaborator for high score and run history.
pub trait ScoreStore {
    fn load_high_score(&self) -> Result<u32, StoreError>;

    /// Stores a finished run, raising the high score when it is beaten.
    fn record_run(&mut self, run: RunRecord) -> Result<(), StoreError>;

    /// Returns up to `limit` runs, best score first.
    fn list_top_runs(&self, limit: usize) -> Result<Vec<RunRecord>, StoreError>;
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
    #[serde(default)]
    history: Vec<RunRecord>,
}

impl ScoreFile {
    fn insert(&mut self, run: RunRecord) {
        self.high_score = self.high_score.max(run.score);

        // Equal scores keep insertion order, newest after older ones.
        let index = self
            .history
            .iter()
            .position(|existing| run.score > existing.score)
            .unwrap_or(self.history.len());
        self.history.insert(index, run);
        self.history.truncate(MAX_HISTORY_ENTRIES);
    }

    fn top(&self, limit: usize) -> Vec<RunRecord> {
        self.history.iter().take(limit).cloned().collect()
    }
}

/// Score store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform-correct data directory.
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ScoreFile, StoreError> {
        load_score_file(&self.path)
    }
}

impl ScoreStore for JsonScoreStore {
    fn load_high_score(&self) -> Result<u32, StoreError> {
        Ok(self.load()?.high_score)
    }

    fn record_run(&mut self, run: RunRecord) -> Result<(), StoreError> {
        let mut file = self.load()?;
        file.insert(run);
        save_score_file(&self.path, &file)?;
        log::info!(
            "saved run history ({} entries) to {}",
            file.history.len(),
            self.path.display()
        );
        Ok(())
    }

    fn list_top_runs(&self, limit: usize) -> Result<Vec<RunRecord>, StoreError> {
        Ok(self.load()?.top(limit))
    }
}

/// In-memory store for tests and `--no-save` sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    file: ScoreFile,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing high score with an empty history.
    #[must_use]
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            file: ScoreFile {
                high_score,
                history: Vec::new(),
            },
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_high_score(&self) -> Result<u32, StoreError> {
        Ok(self.file.high_score)
    }

    fn record_run(&mut self, run: RunRecord) -> Result<(), StoreError> {
        self.file.insert(run);
        Ok(())
    }

    fn list_top_runs(&self, limit: usize) -> Result<Vec<RunRecord>, StoreError> {
        Ok(self.file.top(limit))
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Current wall-clock time as Unix seconds.
#[must_use]
pub fn unix_timestamp() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}

/// Formats a run timestamp in local time, e.g. `2023-11-14 22:13`.
#[must_use]
pub fn format_date(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_owned())
}

/// Missing files read as an empty score file (first run).
fn load_score_file(path: &Path) -> Result<ScoreFile, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ScoreFile::default()),
        Err(e) => return Err(e.into()),
    };

    Ok(serde_json::from_str(&raw)?)
}

fn save_score_file(path: &Path, file: &ScoreFile) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(file)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{JsonScoreStore, MemoryScoreStore, RunRecord, ScoreStore, format_date};
    use crate::config::MAX_HISTORY_ENTRIES;
    use crate::error::StoreError;

    fn run(score: u32) -> RunRecord {
        RunRecord {
            score,
            difficulty: "medium".to_owned(),
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn recorded_runs_persist_to_disk() {
        let path = unique_test_path("persist");
        let mut store = JsonScoreStore::new(path.clone());

        store.record_run(run(40)).expect("record should succeed");
        store.record_run(run(70)).expect("record should succeed");

        let reopened = JsonScoreStore::new(path.clone());
        assert_eq!(reopened.load_high_score().expect("load should succeed"), 70);
        let scores: Vec<u32> = reopened
            .list_top_runs(10)
            .expect("list should succeed")
            .iter()
            .map(|entry| entry.score)
            .collect();
        assert_eq!(scores, vec![70, 40]);

        cleanup_test_path(&path);
    }

    #[test]
    fn missing_score_file_returns_zero() {
        let path = unique_test_path("missing");
        // Deliberately do not create the file.
        let store = JsonScoreStore::new(path);

        assert_eq!(store.load_high_score().expect("missing file is Ok"), 0);
        assert!(store.list_top_runs(5).expect("missing file is Ok").is_empty());
    }

    #[test]
    fn malformed_score_file_returns_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        let store = JsonScoreStore::new(path.clone());
        assert!(matches!(store.load_high_score(), Err(StoreError::Json(_))));

        cleanup_test_path(&path);
    }

    #[test]
    fn lower_run_does_not_lower_high_score() {
        let mut store = MemoryScoreStore::with_high_score(50);

        store.record_run(run(30)).expect("memory store never fails");

        assert_eq!(store.load_high_score().expect("memory store never fails"), 50);
    }

    #[test]
    fn history_is_sorted_and_truncated() {
        let mut store = MemoryScoreStore::new();

        for score in 0..15 {
            store.record_run(run(score * 10)).expect("memory store never fails");
        }

        let runs = store.list_top_runs(100).expect("memory store never fails");
        assert_eq!(runs.len(), MAX_HISTORY_ENTRIES);
        assert_eq!(runs[0].score, 140);
        assert!(runs.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert_eq!(store.list_top_runs(3).expect("memory store never fails").len(), 3);
    }

    #[test]
    fn run_dates_format_as_calendar_time() {
        let formatted = format_date(1_700_000_000);

        // 2023-11-14 22:13 UTC stays in 2023 in every time zone.
        assert!(formatted.starts_with("2023-11-1"), "got {formatted}");
        assert_eq!(formatted.len(), "2023-11-14 22:13".len());
    }

    #[test]
    fn out_of_range_timestamp_is_reported_as_unknown() {
        assert_eq!(format_date(u64::MAX), "unknown");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("retro-snake-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
