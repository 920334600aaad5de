use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod dto;
mod error;
mod handlers;
mod llm;
mod models;
mod mood_log;
mod rate_limit;
mod routine_store;
mod services;
mod session;
#[cfg(test)]
mod test_utils;

use config::Config;
use llm::LlmClient;
use rate_limit::RateLimitState;
use routine_store::{CsvRoutineStore, RoutineStore};
use session::Session;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<Mutex<Session>>,
    pub routines: Arc<dyn RoutineStore>,
    pub llm: LlmClient,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        routines: Arc<dyn RoutineStore>,
        llm: LlmClient,
    ) -> Self {
        Self {
            config,
            session: Arc::new(Mutex::new(Session::new(handlers::today()))),
            routines,
            llm,
            rate_limiter: RateLimitState::new(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Applied only to the methods that call the hosted LLM
    let llm_limit = middleware::from_fn_with_state(state.clone(), rate_limit::rate_limit_llm);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        // Mood log
        .route(
            "/api/moods",
            post(handlers::moods::log_mood).get(handlers::moods::list_moods),
        )
        .route("/api/moods/summary", get(handlers::moods::mood_summary))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        // Reports
        .route(
            "/api/reports/mood-log",
            get(handlers::reports::mood_log_report),
        )
        .route("/api/reports/daily", get(handlers::reports::daily_report))
        // Routines
        .route("/api/routines", get(handlers::routines::get_routine))
        .route(
            "/api/routines/suggestions",
            get(handlers::routines::list_suggestions),
        )
        .route(
            "/api/routines/activities",
            post(handlers::routines::add_activity).delete(handlers::routines::remove_activity),
        )
        .route(
            "/api/routines/activities/toggle",
            put(handlers::routines::toggle_activity),
        )
        .route("/api/routines/save", post(handlers::routines::save_routine))
        // Companion, tips, music
        .route(
            "/api/companion/messages",
            post(handlers::companion::send_message)
                .layer(llm_limit.clone())
                .get(handlers::companion::list_messages),
        )
        .route("/api/tips", get(handlers::tips::get_tips))
        .route(
            "/api/music",
            post(handlers::music::suggest_music).layer(llm_limit),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindmate_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let store = CsvRoutineStore::new(&config.routine_file);
    tracing::info!(path = %store.path().display(), ready = store.is_ready(), "Routine store configured");
    let routines: Arc<dyn RoutineStore> = Arc::new(store);

    let llm = LlmClient::new(&config).expect("Failed to build LLM HTTP client");
    if !config.llm_enabled() {
        tracing::warn!("LLM_API_KEY not set; companion chat is disabled and music uses fallback suggestions");
    }

    let state = AppState::new(config.clone(), routines, llm);
    rate_limit::spawn_cleanup_worker(state.rate_limiter.clone());

    let allowed_origins: Vec<axum::http::HeaderValue> = {
        let mut origins = Vec::new();
        if let Ok(hv) = config.frontend_url.parse::<axum::http::HeaderValue>() {
            origins.push(hv);
        }
        if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
            for o in extra.split(',') {
                if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                    origins.push(hv);
                }
            }
        }
        origins
    };
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    let app = build_router(state).layer(cors);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    // Client IP feeds the LLM rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .expect("Server error");
}
