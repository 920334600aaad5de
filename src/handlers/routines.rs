use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::HeaderMap,
    Json,
};
use chrono::NaiveDate;
use validator::Validate;

use crate::dto::{
    AddActivityRequest, RemoveActivityQuery, RoutineQuery, RoutineResponse, SaveRoutineRequest,
    SaveRoutineResponse, ToggleActivityRequest,
};
use crate::error::{AppError, AppResult};
use crate::handlers::{optional_json, today};
use crate::models::routine::{RoutineBoard, DEFAULT_ACTIVITIES};
use crate::session::Session;
use crate::AppState;

/// Working board for `date`, loading the saved names on first use.
///
/// Switching to another date drops the previous unsaved working set.
async fn board_for<'a>(
    state: &AppState,
    session: &'a mut Session,
    date: NaiveDate,
) -> AppResult<&'a mut RoutineBoard> {
    if session.routine_for(date).is_none() {
        let store = state.routines.clone();
        let names = tokio::task::spawn_blocking(move || store.load(date))
            .await
            .map_err(anyhow::Error::from)??;
        session.routine = Some(RoutineBoard::from_names(date, names));
    }
    session
        .routine_for(date)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("routine board for {} not loaded", date)))
}

fn response(board: &RoutineBoard) -> Json<RoutineResponse> {
    Json(RoutineResponse {
        date: board.date,
        activities: board.activities.clone(),
    })
}

pub async fn get_routine(
    State(state): State<AppState>,
    Query(query): Query<RoutineQuery>,
) -> AppResult<Json<RoutineResponse>> {
    let date = query.date.unwrap_or_else(today);
    let mut session = state.session.lock().await;
    let board = board_for(&state, &mut session, date).await?;
    Ok(response(board))
}

pub async fn list_suggestions() -> Json<Vec<String>> {
    Json(DEFAULT_ACTIVITIES.iter().map(|a| a.to_string()).collect())
}

pub async fn add_activity(
    State(state): State<AppState>,
    Json(body): Json<AddActivityRequest>,
) -> AppResult<Json<RoutineResponse>> {
    body.validate()?;
    let date = body.date.unwrap_or_else(today);

    let mut session = state.session.lock().await;
    let board = board_for(&state, &mut session, date).await?;
    let added = board.add(&body.activity)?;
    tracing::debug!(date = %date, activity = %added.activity, "Routine activity added");

    Ok(response(board))
}

pub async fn toggle_activity(
    State(state): State<AppState>,
    Json(body): Json<ToggleActivityRequest>,
) -> AppResult<Json<RoutineResponse>> {
    let date = body.date.unwrap_or_else(today);

    let mut session = state.session.lock().await;
    let board = board_for(&state, &mut session, date).await?;
    board.toggle(&body.activity, body.completed)?;

    Ok(response(board))
}

pub async fn remove_activity(
    State(state): State<AppState>,
    Query(query): Query<RemoveActivityQuery>,
) -> AppResult<Json<RoutineResponse>> {
    let date = query.date.unwrap_or_else(today);

    let mut session = state.session.lock().await;
    let board = board_for(&state, &mut session, date).await?;
    board.remove(&query.activity)?;

    Ok(response(board))
}

/// Persists the activity names of the working board. Completion is not saved.
pub async fn save_routine(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<SaveRoutineRequest>, JsonRejection>,
) -> AppResult<Json<SaveRoutineResponse>> {
    let body = optional_json(&headers, body)?;
    let date = body.date.unwrap_or_else(today);

    let mut session = state.session.lock().await;
    let names = board_for(&state, &mut session, date).await?.names();
    let saved = names.len();

    let store = state.routines.clone();
    tokio::task::spawn_blocking(move || store.replace_for_key(date, &names))
        .await
        .map_err(anyhow::Error::from)??;

    Ok(Json(SaveRoutineResponse { date, saved }))
}
