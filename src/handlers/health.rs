use axum::{extract::State, http::StatusCode, Json};

use crate::dto::{HealthResponse, ReadyzChecks, ReadyzResponse};
use crate::AppState;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        service: "mindmate-api".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadyzResponse>) {
    let checks = ReadyzChecks {
        routine_store: state.routines.is_ready(),
        llm_configured: state.llm.is_configured(),
    };

    // The LLM is optional; only storage gates readiness.
    if checks.routine_store {
        (
            StatusCode::OK,
            Json(ReadyzResponse {
                status: "ready".into(),
                checks,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyzResponse {
                status: "not_ready".into(),
                checks,
            }),
        )
    }
}
