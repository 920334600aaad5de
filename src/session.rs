use chrono::NaiveDate;

use crate::models::chat::Conversation;
use crate::models::mood::{Mood, MoodEntry};
use crate::models::routine::RoutineBoard;
use crate::mood_log::MoodLog;

/// Everything the single user accumulates while the process is running.
#[derive(Debug, Clone)]
pub struct Session {
    pub mood_log: MoodLog,
    /// Mood of the latest logged entry; drives companion tone, tips and music.
    pub current_mood: Option<Mood>,
    pub conversation: Conversation,
    pub routine: Option<RoutineBoard>,
}

impl Session {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mood_log: MoodLog::new(),
            current_mood: None,
            conversation: Conversation::new(today),
            routine: None,
        }
    }

    pub fn log_mood(&mut self, entry: MoodEntry) -> MoodEntry {
        self.current_mood = Some(entry.mood);
        self.mood_log.append(entry).clone()
    }

    /// The working routine when it belongs to `date`.
    pub fn routine_for(&mut self, date: NaiveDate) -> Option<&mut RoutineBoard> {
        self.routine.as_mut().filter(|board| board.date == date)
    }
}
