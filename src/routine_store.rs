use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

/// Keyed storage for routine activity names, one key per day.
pub trait RoutineStore: Send + Sync {
    /// Activity names saved for `date`, in saved order. Empty when nothing
    /// was saved for that day or the backing store does not exist yet.
    fn load(&self, date: NaiveDate) -> AppResult<Vec<String>>;

    /// Replaces every activity stored for `date` with `activities`.
    fn replace_for_key(&self, date: NaiveDate, activities: &[String]) -> AppResult<()>;

    /// Whether the store can currently be written to.
    fn is_ready(&self) -> bool;
}

#[derive(Debug, Deserialize)]
struct RoutineRow {
    date: String,
    activity: String,
}

/// Two-column `date,activity` CSV file, read and rewritten wholesale.
///
/// There is no locking: concurrent writers race and the last one wins.
#[derive(Debug, Clone)]
pub struct CsvRoutineStore {
    path: PathBuf,
}

impl CsvRoutineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> AppResult<Vec<RoutineRow>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            let row: RoutineRow = row?;
            rows.push(row);
        }
        Ok(rows)
    }
}

impl RoutineStore for CsvRoutineStore {
    fn load(&self, date: NaiveDate) -> AppResult<Vec<String>> {
        let key = date.to_string();
        let activities: Vec<String> = self
            .read_rows()?
            .into_iter()
            .filter(|r| r.date == key)
            .map(|r| r.activity)
            .collect();

        tracing::debug!(date = %key, count = activities.len(), "Loaded routine");
        Ok(activities)
    }

    fn replace_for_key(&self, date: NaiveDate, activities: &[String]) -> AppResult<()> {
        let key = date.to_string();
        let mut rows = self.read_rows()?;
        rows.retain(|r| r.date != key);

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(["date", "activity"])?;
        for row in &rows {
            writer.write_record([row.date.as_str(), row.activity.as_str()])?;
        }
        for activity in activities {
            writer.write_record([key.as_str(), activity.as_str()])?;
        }
        writer.flush()?;

        tracing::info!(
            date = %key,
            count = activities.len(),
            kept_rows = rows.len(),
            "Routine saved"
        );
        Ok(())
    }

    fn is_ready(&self) -> bool {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.is_dir(),
            _ => true,
        }
    }
}
