use axum::{extract::State, Json};
use validator::Validate;

use crate::dto::{ChatRequest, ChatResponse, ConversationResponse};
use crate::error::{AppError, AppResult};
use crate::handlers::today;
use crate::models::chat::ChatMessage;
use crate::services::companion::{build_messages, decorate_reply, tone_for, DEFAULT_COMPANION_MOOD};
use crate::AppState;

pub async fn list_messages(State(state): State<AppState>) -> AppResult<Json<ConversationResponse>> {
    let mut session = state.session.lock().await;
    if session.conversation.roll_over(today()) {
        tracing::info!("Companion conversation reset for a new day");
    }

    let mood = session.current_mood.unwrap_or(DEFAULT_COMPANION_MOOD);
    Ok(Json(ConversationResponse {
        day: session.conversation.day,
        mood,
        tone: tone_for(Some(mood)).to_string(),
        messages: session.conversation.messages.clone(),
    }))
}

pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    body.validate()?;
    let input = body.message.trim().to_string();
    if input.is_empty() {
        return Err(AppError::Validation("Message is required".into()));
    }

    // Snapshot, then release the session while the LLM call is in flight
    let (mood, messages) = {
        let mut session = state.session.lock().await;
        session.conversation.roll_over(today());
        let mood = session.current_mood.unwrap_or(DEFAULT_COMPANION_MOOD);
        let messages = build_messages(Some(mood), &session.conversation.messages, &input);
        (mood, messages)
    };

    let text = state
        .llm
        .complete(&messages, state.config.companion_temperature)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;
    let reply = decorate_reply(&text);

    let mut session = state.session.lock().await;
    session.conversation.roll_over(today());
    session.conversation.messages.push(ChatMessage::user(input));
    session
        .conversation
        .messages
        .push(ChatMessage::assistant(reply.clone()));

    tracing::debug!(
        mood = %mood,
        messages = session.conversation.messages.len(),
        "Companion replied"
    );

    Ok(Json(ChatResponse {
        reply,
        mood,
        message_count: session.conversation.messages.len(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::test_utils::{get, send_json, test_app, test_app_with, test_app_with_llm};

    fn completion(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }]
        }))
    }

    #[tokio::test]
    async fn test_chat_uses_mood_tone_and_keeps_history() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("gentle and compassionate"))
            .respond_with(completion("I'm here for you."))
            .mount(&server)
            .await;

        let app = test_app_with_llm(&server.uri());
        send_json(&app.router, Method::POST, "/api/moods", json!({ "mood": "Sad" })).await;

        let (status, body) = send_json(
            &app.router,
            Method::POST,
            "/api/companion/messages",
            json!({ "message": "rough day" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "MindMate: I'm here for you.");
        assert_eq!(body["mood"], "Sad");
        assert_eq!(body["message_count"], 2);

        let (_, convo) = get(&app.router, "/api/companion/messages").await;
        let messages = convo["messages"].as_array().unwrap();
        assert_eq!(messages[0], json!({ "role": "user", "content": "rough day" }));
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(convo["tone"], "gentle and compassionate");
    }

    #[tokio::test]
    async fn test_default_mood_is_calm() {
        let app = test_app();
        let (_, convo) = get(&app.router, "/api/companion/messages").await;
        assert_eq!(convo["mood"], "Calm");
        assert_eq!(convo["tone"], "mindful and reflective");
        assert!(convo["messages"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_llm_failure_is_bad_gateway_and_history_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = test_app_with_llm(&server.uri());
        let (status, body) = send_json(
            &app.router,
            Method::POST,
            "/api/companion/messages",
            json!({ "message": "hello" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], 502);

        let session = app.state.session.lock().await;
        assert!(session.conversation.messages.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_llm_is_bad_gateway() {
        let app = test_app();
        let (status, _) = send_json(
            &app.router,
            Method::POST,
            "/api/companion/messages",
            json!({ "message": "hello" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_chat_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(completion("ok"))
            .mount(&server)
            .await;

        let uri = server.uri();
        let app = test_app_with(move |config| {
            config.llm_base_url = uri;
            config.llm_api_key = "test-key".into();
            config.llm_rate_limit_per_minute = 1;
        });

        let (first, _) = send_json(
            &app.router,
            Method::POST,
            "/api/companion/messages",
            json!({ "message": "one" }),
        )
        .await;
        assert_eq!(first, StatusCode::OK);

        let (second, _) = send_json(
            &app.router,
            Method::POST,
            "/api/companion/messages",
            json!({ "message": "two" }),
        )
        .await;
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);

        // Reading history is not limited
        let (status, _) = get(&app.router, "/api/companion/messages").await;
        assert_eq!(status, StatusCode::OK);
    }
}
