use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mood {
    Happy,
    Neutral,
    Anxious,
    Sad,
    Angry,
    Calm,
    Motivated,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Anxious,
        Mood::Sad,
        Mood::Angry,
        Mood::Calm,
        Mood::Motivated,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Anxious => "Anxious",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Calm => "Calm",
            Mood::Motivated => "Motivated",
        }
    }

    /// Trend chart score on a 0-5 scale.
    ///
    /// Only the five tracker moods have a score of their own; every other
    /// mood sits on the neutral line.
    pub fn score(self) -> u8 {
        match self {
            Mood::Happy => 5,
            Mood::Neutral => 3,
            Mood::Anxious => 2,
            Mood::Sad => 1,
            Mood::Angry => 0,
            _ => 3,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mood: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    /// Accepts "Happy", "happy" and the emoji form "😊 Happy".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only a leading emoji token is dropped; the rest must be the label.
        let bare = s
            .trim()
            .trim_start_matches(|c: char| !c.is_ascii_alphabetic())
            .trim_end();

        Mood::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(bare))
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

impl TryFrom<String> for Mood {
    type Error = UnknownMood;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        mood.label().to_string()
    }
}

/// One mood-logging event. Entries are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: Mood,
    pub note: String,
}

impl MoodEntry {
    pub fn new(date: NaiveDate, mood: Mood, note: impl Into<String>) -> Self {
        Self {
            date,
            mood,
            note: note.into(),
        }
    }
}
