//! HTTP endpoint hosting the skill.
//!
//! `POST /skill` runs one request envelope through the dispatcher and returns
//! the response envelope. `GET /health` reports uptime and loaded languages.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use hello_core::config::ApiConfig;
use hello_core::dispatch::Skill;
use hello_core::envelope::{RequestEnvelope, ResponseEnvelope};
use hello_core::error::SkillError;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    skill: Arc<Skill>,
    api_key: Option<String>,
    uptime: Instant,
}

impl ApiState {
    pub fn new(skill: Arc<Skill>, config: &ApiConfig) -> Self {
        let api_key = if config.api_key.is_empty() {
            None
        } else {
            Some(config.api_key.clone())
        };
        Self {
            skill,
            api_key,
            uptime: Instant::now(),
        }
    }
}

/// Constant-time string comparison to prevent timing attacks on API token validation.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Check bearer token auth. Returns `None` if authorized, `Some(response)` if rejected.
fn check_auth(headers: &HeaderMap, api_key: &Option<String>) -> Option<(StatusCode, Json<Value>)> {
    let key = match api_key {
        Some(k) => k,
        None => return None,
    };

    let value = match headers.get("authorization").map(|h| h.to_str()) {
        Some(Ok(v)) => v,
        Some(Err(_)) => {
            return Some((
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "invalid Authorization header"})),
            ));
        }
        None => {
            return Some((
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "missing Authorization header"})),
            ));
        }
    };

    match value.strip_prefix("Bearer ") {
        Some(token) if constant_time_eq(token, key) => None,
        _ => Some((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid token"})),
        )),
    }
}

/// `GET /health`: uptime and loaded languages.
async fn health(
    headers: HeaderMap,
    State(state): State<ApiState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if let Some(err) = check_auth(&headers, &state.api_key) {
        return Err(err);
    }

    Ok(Json(json!({
        "status": "ok",
        "uptime_secs": state.uptime.elapsed().as_secs(),
        "languages": state.skill.catalog().languages(),
    })))
}

/// `POST /skill`: dispatch one request envelope.
async fn skill_request(
    headers: HeaderMap,
    State(state): State<ApiState>,
    body: Result<Json<RequestEnvelope>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<ResponseEnvelope>, (StatusCode, Json<Value>)> {
    if let Some(err) = check_auth(&headers, &state.api_key) {
        return Err(err);
    }

    let Json(envelope) = body.map_err(|e| {
        warn!("rejected request envelope: {e}");
        (
            e.status(),
            Json(json!({"error": format!("invalid request: {e}")})),
        )
    })?;

    let span = info_span!("invocation", id = %Uuid::new_v4());
    match state.skill.invoke(envelope).instrument(span).await {
        Ok(response) => Ok(Json(response)),
        Err(e @ SkillError::SkillIdMismatch { .. }) => {
            warn!("{e}");
            Err((
                StatusCode::BAD_REQUEST,
                Json(json!({"error": e.to_string()})),
            ))
        }
        Err(e) => {
            error!("unhandled skill fault: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            ))
        }
    }
}

/// Build the axum router with shared state.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/skill", post(skill_request))
        .layer(axum::extract::DefaultBodyLimit::max(1024 * 1024)) // 1 MB max request body
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &ApiConfig, skill: Arc<Skill>) -> anyhow::Result<()> {
    let app = build_router(ApiState::new(skill, config));
    let addr = format!("{}:{}", config.host, config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind to {addr}: {e}"))?;

    info!("skill endpoint listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::build_skill;
    use crate::i18n::bundled_catalog;
    use axum::body::Body;
    use axum::http::Request;
    use hello_core::config::SkillConfig;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router(api_key: &str, skill_id: Option<&str>) -> Router {
        let skill_cfg = SkillConfig {
            skill_id: skill_id.map(str::to_string),
            ..Default::default()
        };
        let skill = build_skill(bundled_catalog("en").unwrap(), &skill_cfg).unwrap();
        let api_cfg = ApiConfig {
            api_key: api_key.to_string(),
            ..Default::default()
        };
        build_router(ApiState::new(Arc::new(skill), &api_cfg))
    }

    fn hello_body() -> String {
        json!({
            "version": "1.0",
            "context": {"System": {"application": {"applicationId": "amzn1.ask.skill.test"}}},
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.1",
                "locale": "en-US",
                "intent": {"name": "HelloWorldIntent"}
            }
        })
        .to_string()
    }

    fn post_skill(body: String) -> Request<Body> {
        Request::post("/skill")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    /// Parse response body as JSON.
    async fn body_json(resp: axum::http::Response<Body>) -> Value {
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("secret", "secret"));
        assert!(!constant_time_eq("secret", "secreT"));
        assert!(!constant_time_eq("secret", "secret!"));
    }

    #[tokio::test]
    async fn test_health() {
        let resp = test_router("", None)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert!(json["languages"]
            .as_array()
            .unwrap()
            .contains(&Value::from("en")));
    }

    #[tokio::test]
    async fn test_skill_request() {
        let resp = test_router("", None)
            .oneshot(post_skill(hello_body()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["version"], "1.0");
        assert_eq!(
            json["response"]["outputSpeech"]["ssml"],
            "<speak>Hello World!</speak>"
        );
    }

    #[tokio::test]
    async fn test_invalid_body() {
        let resp = test_router("", None)
            .oneshot(post_skill("{not json".to_string()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().starts_with("invalid request"));
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let padding = "x".repeat(1024 * 1024 + 1);
        let body = json!({
            "request": {
                "type": "IntentRequest",
                "locale": "en-US",
                "intent": {"name": padding}
            }
        })
        .to_string();
        let resp = test_router("", None)
            .oneshot(post_skill(body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().starts_with("invalid request"));
    }

    #[tokio::test]
    async fn test_skill_id_mismatch() {
        let resp = test_router("", Some("amzn1.ask.skill.other"))
            .oneshot(post_skill(hello_body()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("skill id mismatch"));
    }

    #[tokio::test]
    async fn test_skill_id_match() {
        let resp = test_router("", Some("amzn1.ask.skill.test"))
            .oneshot(post_skill(hello_body()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_auth_missing_header() {
        let resp = test_router("secret", None)
            .oneshot(post_skill(hello_body()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(resp).await;
        assert_eq!(json["error"], "missing Authorization header");
    }

    #[tokio::test]
    async fn test_auth_wrong_token() {
        let req = Request::post("/skill")
            .header("content-type", "application/json")
            .header("Authorization", "Bearer wrong")
            .body(Body::from(hello_body()))
            .unwrap();
        let resp = test_router("secret", None).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_valid_token() {
        let req = Request::post("/skill")
            .header("content-type", "application/json")
            .header("Authorization", "Bearer secret")
            .body(Body::from(hello_body()))
            .unwrap();
        let resp = test_router("secret", None).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
