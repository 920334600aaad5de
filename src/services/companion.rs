use crate::models::chat::ChatMessage;
use crate::models::mood::Mood;

pub const COMPANION_NAME: &str = "MindMate";
pub const DEFAULT_COMPANION_MOOD: Mood = Mood::Calm;

pub fn tone_for(mood: Option<Mood>) -> &'static str {
    match mood {
        Some(Mood::Happy) => "cheerful and enthusiastic",
        Some(Mood::Sad) => "gentle and compassionate",
        Some(Mood::Anxious) => "calming and reassuring",
        Some(Mood::Angry) => "soothing and understanding",
        Some(Mood::Calm) => "mindful and reflective",
        Some(Mood::Motivated) => "encouraging and focused",
        Some(Mood::Neutral) | None => "friendly and emotionally supportive",
    }
}

pub fn system_prompt(mood: Option<Mood>) -> String {
    format!(
        "You are {name}, a supportive AI companion who talks in a {tone} tone based on the user's mood.\n\n\
         Your job is to emotionally support the user through conversation.\n\
         You can offer motivational quotes, affirmations, or kind advice when appropriate.",
        name = COMPANION_NAME,
        tone = tone_for(mood),
    )
}

/// System prompt, then the day's history, then the new user turn.
pub fn build_messages(mood: Option<Mood>, history: &[ChatMessage], input: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt(mood)));
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage::user(input));
    messages
}

pub fn decorate_reply(text: &str) -> String {
    format!("{}: {}", COMPANION_NAME, text.trim())
}
