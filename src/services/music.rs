use serde::Serialize;

use crate::models::chat::ChatMessage;
use crate::models::mood::Mood;

pub fn track_for(mood: Mood) -> Option<&'static str> {
    match mood {
        Mood::Happy => Some("https://www.youtube.com/watch?v=ZbZSe6N_BXs"),
        Mood::Sad => Some("https://www.youtube.com/watch?v=ho9rZjlsyYY"),
        Mood::Angry => Some("https://www.youtube.com/watch?v=LatorN4P9aA"),
        Mood::Anxious => Some("https://www.youtube.com/watch?v=1ZYbU82GVz4"),
        Mood::Neutral => Some("magical-dramedy-orchestral-sneaky-spell-30-sec-375796.mp3"),
        Mood::Calm | Mood::Motivated => None,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MusicSuggestion {
    pub mood: Mood,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_url: Option<String>,
    pub suggestion: String,
    /// "llm" or "fallback"
    pub source: String,
}

pub fn therapist_prompt(mood: Mood) -> Vec<ChatMessage> {
    vec![ChatMessage::user(format!(
        "You're a compassionate AI music therapist. Suggest a type of music or specific song that matches the user's mood, \
         and explain in 1-2 lines how it helps improve or balance that emotional state.\n\n\
         User's mood: {}\n\n\
         Respond with:\n\
         1. Music Type or Song Suggestion\n\
         2. One sentence therapeutic reason",
        mood
    ))]
}

pub fn fallback_suggestion(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "Upbeat pop keeps the good energy moving and helps you savor the moment.",
        Mood::Sad => "Slow solo piano gives sadness room to breathe and gently lifts it over time.",
        Mood::Angry => "Driving rock lets you release tension safely before winding down.",
        Mood::Anxious => "Slow ambient music around 60 BPM encourages your breathing to settle.",
        Mood::Neutral => "Lo-fi beats make a steady, unobtrusive backdrop for focus.",
        Mood::Calm => "Soft nature soundscapes help you stay in this calm, present state.",
        Mood::Motivated => "An energetic workout playlist channels your drive into action.",
    }
}

pub fn suggestion(mood: Mood, llm_text: Option<String>) -> MusicSuggestion {
    let (suggestion, source) = match llm_text {
        Some(text) => (text, "llm"),
        None => (fallback_suggestion(mood).to_string(), "fallback"),
    };
    MusicSuggestion {
        mood,
        track_url: track_for(mood).map(str::to_string),
        suggestion,
        source: source.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_exist_for_tracker_moods_only() {
        for mood in [Mood::Happy, Mood::Sad, Mood::Angry, Mood::Anxious, Mood::Neutral] {
            assert!(track_for(mood).is_some(), "{mood} should have a track");
        }
        assert!(track_for(Mood::Calm).is_none());
        assert!(track_for(Mood::Motivated).is_none());
    }

    #[test]
    fn test_prompt_names_mood() {
        let messages = therapist_prompt(Mood::Sad);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].content.contains("User's mood: Sad"));
    }

    #[test]
    fn test_suggestion_marks_source() {
        let from_llm = suggestion(Mood::Happy, Some("Try Pharrell.".into()));
        assert_eq!(from_llm.source, "llm");
        assert_eq!(from_llm.suggestion, "Try Pharrell.");

        let fallback = suggestion(Mood::Calm, None);
        assert_eq!(fallback.source, "fallback");
        assert!(fallback.track_url.is_none());
        let json = serde_json::to_value(&fallback).unwrap();
        assert!(json.get("track_url").is_none());
    }
}
