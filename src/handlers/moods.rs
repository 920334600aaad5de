use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::dto::{LogMoodRequest, MoodListQuery};
use crate::error::AppResult;
use crate::handlers::today;
use crate::models::mood::MoodEntry;
use crate::services::aggregator::{summarize, MoodSummary};
use crate::AppState;

pub async fn log_mood(
    State(state): State<AppState>,
    Json(body): Json<LogMoodRequest>,
) -> AppResult<(StatusCode, Json<MoodEntry>)> {
    body.validate()?;

    let date = body.date.unwrap_or_else(today);
    let entry = MoodEntry::new(date, body.mood, body.note.unwrap_or_default());

    let mut session = state.session.lock().await;
    let stored = session.log_mood(entry);

    tracing::info!(
        date = %stored.date,
        mood = %stored.mood,
        entries = session.mood_log.len(),
        "Mood logged"
    );

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Entries newest first.
pub async fn list_moods(
    State(state): State<AppState>,
    Query(query): Query<MoodListQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let session = state.session.lock().await;
    let limit = query.limit.unwrap_or(usize::MAX);
    let entries = session
        .mood_log
        .all()
        .iter()
        .rev()
        .take(limit)
        .cloned()
        .collect();
    Ok(Json(entries))
}

pub async fn mood_summary(State(state): State<AppState>) -> AppResult<Json<MoodSummary>> {
    let session = state.session.lock().await;
    Ok(Json(summarize(session.mood_log.all())))
}
