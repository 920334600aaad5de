use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};

use crate::dto::MusicRequest;
use crate::error::AppResult;
use crate::handlers::optional_json;
use crate::models::mood::Mood;
use crate::services::music::{suggestion, therapist_prompt, MusicSuggestion};
use crate::AppState;

pub async fn suggest_music(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<MusicRequest>, JsonRejection>,
) -> AppResult<Json<MusicSuggestion>> {
    let requested = optional_json(&headers, body)?.mood;
    let mood = match requested {
        Some(mood) => mood,
        None => state
            .session
            .lock()
            .await
            .current_mood
            .unwrap_or(Mood::Neutral),
    };

    let llm_text = if state.llm.is_configured() {
        match state
            .llm
            .complete(&therapist_prompt(mood), state.config.music_temperature)
            .await
        {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(error = %e, mood = %mood, "LLM unavailable, using fallback music suggestion");
                None
            }
        }
    } else {
        None
    };

    Ok(Json(suggestion(mood, llm_text)))
}
