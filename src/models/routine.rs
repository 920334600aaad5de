use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_ACTIVITIES: [&str; 8] = [
    "Morning Meditation",
    "Journaling",
    "Light Walk or Yoga",
    "Digital Detox Time",
    "Affirmations",
    "Music Therapy",
    "Mindful Eating",
    "Meditate",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineActivity {
    pub activity: String,
    pub completed: bool,
}

/// In-memory working set of a day's routine.
///
/// Mutations here never touch storage; `names()` is what gets persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RoutineBoard {
    pub date: NaiveDate,
    pub activities: Vec<RoutineActivity>,
}

impl RoutineBoard {
    /// Builds a board from stored names. Completion always starts unchecked.
    pub fn from_names(date: NaiveDate, names: Vec<String>) -> Self {
        let mut board = Self {
            date,
            activities: Vec::with_capacity(names.len()),
        };
        for name in names {
            board.upsert(name);
        }
        board
    }

    pub fn add(&mut self, activity: &str) -> AppResult<&RoutineActivity> {
        let name = activity.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Activity name is required".into()));
        }
        let idx = self.upsert(name.to_string());
        Ok(&self.activities[idx])
    }

    pub fn toggle(&mut self, activity: &str, completed: bool) -> AppResult<&RoutineActivity> {
        let item = self
            .activities
            .iter_mut()
            .find(|a| a.activity == activity)
            .ok_or_else(|| AppError::NotFound(format!("Activity '{}' not in routine", activity)))?;
        item.completed = completed;
        Ok(&*item)
    }

    pub fn remove(&mut self, activity: &str) -> AppResult<()> {
        let before = self.activities.len();
        self.activities.retain(|a| a.activity != activity);
        if self.activities.len() == before {
            return Err(AppError::NotFound(format!(
                "Activity '{}' not in routine",
                activity
            )));
        }
        Ok(())
    }

    pub fn names(&self) -> Vec<String> {
        self.activities.iter().map(|a| a.activity.clone()).collect()
    }

    // Re-adding a known name keeps its position and clears completion.
    fn upsert(&mut self, name: String) -> usize {
        if let Some(idx) = self.activities.iter().position(|a| a.activity == name) {
            self.activities[idx].completed = false;
            return idx;
        }
        self.activities.push(RoutineActivity {
            activity: name,
            completed: false,
        });
        self.activities.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_from_names_starts_incomplete_and_dedups() {
        let board = RoutineBoard::from_names(
            day(),
            vec!["A".into(), "B".into(), "A".into()],
        );
        assert_eq!(board.names(), vec!["A", "B"]);
        assert!(board.activities.iter().all(|a| !a.completed));
    }

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut board = RoutineBoard::from_names(day(), vec![]);
        let added = board.add("  Stretch  ").unwrap();
        assert_eq!(added.activity, "Stretch");
        assert!(matches!(board.add("   "), Err(AppError::Validation(_))));
        assert_eq!(board.names(), vec!["Stretch"]);
    }

    #[test]
    fn test_readding_resets_completion_in_place() {
        let mut board = RoutineBoard::from_names(day(), vec!["A".into(), "B".into()]);
        board.toggle("A", true).unwrap();
        board.add("A").unwrap();
        assert_eq!(board.names(), vec!["A", "B"]);
        assert!(!board.activities[0].completed);
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut board = RoutineBoard::from_names(day(), vec!["A".into(), "B".into()]);
        assert!(board.toggle("B", true).unwrap().completed);
        board.remove("A").unwrap();
        assert_eq!(board.names(), vec!["B"]);
        assert!(matches!(board.remove("A"), Err(AppError::NotFound(_))));
        assert!(matches!(board.toggle("Z", true), Err(AppError::NotFound(_))));
    }
}
