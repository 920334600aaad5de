use axum::{
    extract::{Query, State},
    Json,
};

use crate::dto::{TipsQuery, TipsResponse};
use crate::error::AppResult;
use crate::services::tips::{random_tip_mood, tips_for};
use crate::AppState;

/// Mood precedence: query param, then the session's current mood, then random.
pub async fn get_tips(
    State(state): State<AppState>,
    Query(query): Query<TipsQuery>,
) -> AppResult<Json<TipsResponse>> {
    let session_mood = state.session.lock().await.current_mood;

    let mut rng = rand::thread_rng();
    let (mood, source) = match (query.mood, session_mood) {
        (Some(mood), _) => (mood, "query"),
        (None, Some(mood)) => (mood, "session"),
        (None, None) => (random_tip_mood(&mut rng), "random"),
    };
    let tips = tips_for(mood, &mut rng)
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Json(TipsResponse {
        mood,
        mood_source: source.into(),
        tips,
    }))
}
