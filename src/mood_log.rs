use crate::models::mood::MoodEntry;

/// Append-only mood log kept for the lifetime of the session.
#[derive(Debug, Clone, Default)]
pub struct MoodLog {
    entries: Vec<MoodEntry>,
}

impl MoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the entry at the end of the log with its note trimmed.
    pub fn append(&mut self, mut entry: MoodEntry) -> &MoodEntry {
        let trimmed = entry.note.trim();
        if trimmed.len() != entry.note.len() {
            entry.note = trimmed.to_string();
        }
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Oldest first. Callers wanting newest first reverse explicitly.
    pub fn all(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&MoodEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
