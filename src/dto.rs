//! # MindMate — Request/Response DTOs
//!
//! All API contract types in one module.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Query`    → deserialized from query params
//! - `*Response` → serialized to client JSON
//! - Validation is expressed via `validator` derive macros

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::chat::ChatMessage;
use crate::models::mood::Mood;
use crate::models::routine::RoutineActivity;
use crate::services::aggregator::{MoodSummary, TrendPoint};

// ============================================================================
// Moods
// ============================================================================

/// POST /api/moods
#[derive(Debug, Deserialize, Validate)]
pub struct LogMoodRequest {
    /// Day of the entry. Default: today.
    pub date: Option<NaiveDate>,

    /// "Happy", "happy" or "😊 Happy"
    pub mood: Mood,

    #[validate(length(max = 5000, message = "Note must be under 5000 characters"))]
    pub note: Option<String>,
}

/// GET /api/moods query params
#[derive(Debug, Deserialize)]
pub struct MoodListQuery {
    /// Max entries to return, newest first. Default: all.
    pub limit: Option<usize>,
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub has_data: bool,
    /// Full weekday name, e.g. "Tuesday"
    pub today: String,
    pub today_mood: Mood,
    pub trend: Vec<TrendPoint>,
    pub summary: MoodSummary,
    pub goals: Vec<String>,
    pub quote: String,
}

// ============================================================================
// Routines
// ============================================================================

/// GET /api/routines query params
#[derive(Debug, Deserialize)]
pub struct RoutineQuery {
    /// Default: today.
    pub date: Option<NaiveDate>,
}

/// POST /api/routines/activities
#[derive(Debug, Deserialize, Validate)]
pub struct AddActivityRequest {
    pub date: Option<NaiveDate>,

    #[validate(length(min = 1, max = 200, message = "Activity must be 1-200 characters"))]
    pub activity: String,
}

/// PUT /api/routines/activities/toggle
#[derive(Debug, Deserialize)]
pub struct ToggleActivityRequest {
    pub date: Option<NaiveDate>,
    pub activity: String,
    pub completed: bool,
}

/// DELETE /api/routines/activities query params
#[derive(Debug, Deserialize)]
pub struct RemoveActivityQuery {
    pub date: Option<NaiveDate>,
    pub activity: String,
}

/// POST /api/routines/save
#[derive(Debug, Default, Deserialize)]
pub struct SaveRoutineRequest {
    pub date: Option<NaiveDate>,
}

/// Working routine for a day
#[derive(Debug, Serialize)]
pub struct RoutineResponse {
    pub date: NaiveDate,
    pub activities: Vec<RoutineActivity>,
}

/// Response for POST /api/routines/save
#[derive(Debug, Serialize)]
pub struct SaveRoutineResponse {
    pub date: NaiveDate,
    pub saved: usize,
}

// ============================================================================
// Companion
// ============================================================================

/// POST /api/companion/messages
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub message: String,
}

/// Response for POST /api/companion/messages
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub mood: Mood,
    pub message_count: usize,
}

/// GET /api/companion/messages
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub day: NaiveDate,
    pub mood: Mood,
    pub tone: String,
    pub messages: Vec<ChatMessage>,
}

// ============================================================================
// Tips & Music
// ============================================================================

/// GET /api/tips query params
#[derive(Debug, Deserialize)]
pub struct TipsQuery {
    pub mood: Option<Mood>,
}

/// GET /api/tips
#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub mood: Mood,
    /// "query", "session" or "random"
    pub mood_source: String,
    pub tips: Vec<String>,
}

/// POST /api/music
#[derive(Debug, Default, Deserialize)]
pub struct MusicRequest {
    /// Default: the session's current mood, else Neutral.
    pub mood: Option<Mood>,
}

// ============================================================================
// System
// ============================================================================

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// GET /readyz
#[derive(Debug, Serialize)]
pub struct ReadyzResponse {
    pub status: String,
    pub checks: ReadyzChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadyzChecks {
    pub routine_store: bool,
    pub llm_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_mood_request_accepts_emoji_label() {
        let json = r#"{"mood":"😰 Anxious","note":"exam tomorrow"}"#;
        let req: LogMoodRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.mood, Mood::Anxious);
        assert!(req.date.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_log_mood_request_rejects_unknown_mood() {
        let json = r#"{"mood":"Bored"}"#;
        assert!(serde_json::from_str::<LogMoodRequest>(json).is_err());
    }

    #[test]
    fn test_log_mood_request_note_too_long() {
        let req = LogMoodRequest {
            date: None,
            mood: Mood::Sad,
            note: Some("x".repeat(5001)),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_add_activity_validation() {
        let empty = AddActivityRequest {
            date: None,
            activity: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_tips_query_mood_optional() {
        let q: TipsQuery = serde_json::from_str("{}").unwrap();
        assert!(q.mood.is_none());
    }
}
