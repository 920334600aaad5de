use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::{AppError, AppResult};
use crate::services::report::{render, render_daily, Report, ReportOptions};
use crate::AppState;

const MOOD_LOG_FILENAME: &str = "MindMate_Mood_Log.txt";
const DAILY_FILENAME: &str = "mood_report.txt";

fn attachment(report: &Report, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        report.to_text(),
    )
        .into_response()
}

pub async fn mood_log_report(State(state): State<AppState>) -> AppResult<Response> {
    let options = ReportOptions {
        wrap_width: state.config.report_wrap_width,
    };
    let generated_at = chrono::Local::now().naive_local();

    let report = {
        let session = state.session.lock().await;
        render(session.mood_log.all(), generated_at, options)
    };

    tracing::info!(
        entries = report.entry_count,
        pages = report.pages.len(),
        "Mood log report rendered"
    );

    Ok(attachment(&report, MOOD_LOG_FILENAME))
}

/// Report for the most recently logged entry.
pub async fn daily_report(State(state): State<AppState>) -> AppResult<Response> {
    let options = ReportOptions {
        wrap_width: state.config.report_wrap_width,
    };

    let report = {
        let session = state.session.lock().await;
        let latest = session
            .mood_log
            .latest()
            .ok_or_else(|| AppError::NotFound("No mood logged yet".into()))?;
        render_daily(latest, options)
    };

    Ok(attachment(&report, DAILY_FILENAME))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, Method, StatusCode};
    use serde_json::json;

    use crate::test_utils::{get, get_text, send_json, test_app};

    #[tokio::test]
    async fn test_empty_report_has_header_and_zero_summary() {
        let app = test_app();
        let (status, headers, text) = get_text(&app.router, "/api/reports/mood-log").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("MindMate_Mood_Log.txt"));
        assert!(text.starts_with("MindMate Mood Log Report"));
        assert!(text.contains("Total Entries: 0"));
        assert!(!text.contains(" — "));
    }

    #[tokio::test]
    async fn test_report_lists_logged_entries() {
        let app = test_app();
        send_json(
            &app.router,
            Method::POST,
            "/api/moods",
            json!({ "date": "2024-02-01", "mood": "Calm", "note": "quiet evening" }),
        )
        .await;
        send_json(
            &app.router,
            Method::POST,
            "/api/moods",
            json!({ "date": "2024-02-02", "mood": "Angry" }),
        )
        .await;

        let (_, _, text) = get_text(&app.router, "/api/reports/mood-log").await;
        let first = text.find("1. 2024-02-02 — Angry").unwrap();
        let second = text.find("2. 2024-02-01 — Calm").unwrap();
        assert!(first < second);
        assert!(text.contains("📝 quiet evening"));
    }

    #[tokio::test]
    async fn test_daily_report_requires_an_entry() {
        let app = test_app();
        let (status, body) = get(&app.router, "/api/reports/daily").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], 404);

        send_json(
            &app.router,
            Method::POST,
            "/api/moods",
            json!({ "date": "2024-02-03", "mood": "Happy", "note": "good run" }),
        )
        .await;
        let (status, _, text) = get_text(&app.router, "/api/reports/daily").await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("Mood: Happy"));
        assert!(text.contains("Note: good run"));
    }
}
