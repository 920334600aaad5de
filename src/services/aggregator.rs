//! Derived views over the mood log. Everything here is recomputed on read
//! and none of it can fail.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

use crate::models::mood::{Mood, MoodEntry};

pub const DEFAULT_TREND_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: usize,
}

/// Per-mood counts, in order of each mood's first appearance in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoodSummary {
    pub total: usize,
    pub counts: Vec<MoodCount>,
}

#[cfg(test)]
impl MoodSummary {
    fn count_for(&self, mood: Mood) -> usize {
        self.counts
            .iter()
            .find(|c| c.mood == mood)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Short weekday, e.g. "Mon".
    pub day: String,
    /// "Jan 01 - Happy"
    pub label: String,
    pub mood: Mood,
    pub score: u8,
}

impl TrendPoint {
    fn from_entry(entry: &MoodEntry) -> Self {
        Self {
            date: entry.date,
            day: entry.date.format("%a").to_string(),
            label: format!("{} - {}", entry.date.format("%b %d"), entry.mood),
            mood: entry.mood,
            score: entry.mood.score(),
        }
    }
}

pub fn summarize(entries: &[MoodEntry]) -> MoodSummary {
    let mut counts: Vec<MoodCount> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|c| c.mood == entry.mood) {
            Some(c) => c.count += 1,
            None => counts.push(MoodCount {
                mood: entry.mood,
                count: 1,
            }),
        }
    }
    MoodSummary {
        total: entries.len(),
        counts,
    }
}

/// One point per distinct date among the newest `days` dates in the log.
///
/// The log is scanned newest to oldest and the first entry seen for a date
/// wins, so a day with several entries is represented by the one logged
/// last. The result is returned oldest first.
pub fn recent_trend(entries: &[MoodEntry], days: usize) -> Vec<TrendPoint> {
    let mut seen: HashSet<NaiveDate> = HashSet::with_capacity(days);
    let mut points: Vec<TrendPoint> = Vec::with_capacity(days);

    for entry in entries.iter().rev() {
        if points.len() >= days {
            break;
        }
        if seen.insert(entry.date) {
            points.push(TrendPoint::from_entry(entry));
        }
    }

    points.reverse();
    points
}

/// Headline mood for the dashboard: the newest trend point, else Neutral.
pub fn today_mood(trend: &[TrendPoint]) -> Mood {
    trend.last().map(|p| p.mood).unwrap_or(Mood::Neutral)
}
