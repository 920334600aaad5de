use axum::{extract::State, Json};

use crate::dto::DashboardResponse;
use crate::error::AppResult;
use crate::services::aggregator::{recent_trend, summarize, today_mood};
use crate::services::tips::{random_quote, DAILY_GOALS};
use crate::AppState;

pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardResponse>> {
    let (has_data, trend, summary) = {
        let session = state.session.lock().await;
        let entries = session.mood_log.all();
        (
            !session.mood_log.is_empty(),
            recent_trend(entries, state.config.trend_days),
            summarize(entries),
        )
    };

    let quote = random_quote(&mut rand::thread_rng()).to_string();

    Ok(Json(DashboardResponse {
        has_data,
        today: chrono::Local::now().format("%A").to_string(),
        today_mood: today_mood(&trend),
        trend,
        summary,
        goals: DAILY_GOALS.iter().map(|g| g.to_string()).collect(),
        quote,
    }))
}
