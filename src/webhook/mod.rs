//! # Webhook
//!
//! HTTP endpoint that lets external callers post a roll into a channel.
//!
//! - `GET /health` - liveness probe
//! - `POST /roll` - roll an expression and send it to `channel_id`
//!
//! Requests to `/roll` must carry the shared secret in `X-Webhook-Secret`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0
//! - **Toggleable**: true (disabled when WEBHOOK_ADDR is unset)
//!
//! ## Changelog
//! - 1.0.0: Initial release

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{deliver, ChannelSender};
use crate::features::dice;

/// Header carrying the shared secret
pub const SECRET_HEADER: &str = "x-webhook-secret";

/// Shared webhook state
#[derive(Clone)]
pub struct WebhookState {
    secret: Arc<str>,
    sender: Arc<dyn ChannelSender>,
}

impl WebhookState {
    pub fn new(secret: impl Into<Arc<str>>, sender: Arc<dyn ChannelSender>) -> Self {
        Self {
            secret: secret.into(),
            sender,
        }
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| constant_time_eq(v.as_bytes(), self.secret.as_bytes()))
    }
}

/// Compare secrets without short-circuiting on the first mismatch
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Debug, Deserialize)]
pub struct RollRequest {
    pub channel_id: u64,
    pub expression: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RollResponse {
    pub messages: usize,
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build the webhook router
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/roll", post(roll))
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn serve(addr: SocketAddr, state: WebhookState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🪝 Webhook listening on {addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

async fn roll(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();

    if !state.authorized(&headers) {
        warn!("[{request_id}] Webhook call rejected: bad or missing secret");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "unauthorized".to_string(),
            }),
        )
            .into_response();
    }

    // Unauthenticated callers never reach the body parser
    let request: RollRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("[{request_id}] Webhook body rejected: {e}");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("invalid request body: {e}"),
                }),
            )
                .into_response();
        }
    };

    info!(
        "[{request_id}] Webhook roll | Expression: '{}' | Channel: {}",
        request.expression, request.channel_id
    );

    let outcome = {
        let mut rng = rand::rng();
        dice::roll_expression(&request.expression, &mut rng)
    };
    let formatted = match outcome {
        Ok(formatted) => formatted,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };
    let segments = dice::split(&formatted);

    match deliver(state.sender.as_ref(), request.channel_id, &segments).await {
        Ok(messages) => {
            info!("[{request_id}] ✅ Webhook roll sent in {messages} message(s)");
            (
                StatusCode::OK,
                Json(RollResponse {
                    messages,
                    total: formatted.total,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("[{request_id}] Webhook delivery failed: {e:#}");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "delivery failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::delivery::tests::RecordingSender;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app(sender: Arc<RecordingSender>) -> Router {
        router(WebhookState::new("s3cret", sender))
    }

    fn roll_request(secret: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/roll")
            .header("content-type", "application/json");
        if let Some(secret) = secret {
            builder = builder.header("X-Webhook-Secret", secret);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Arc::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_roll_posts_to_channel() {
        let sender = Arc::new(RecordingSender::default());
        let response = app(sender.clone())
            .oneshot(roll_request(
                Some("s3cret"),
                r#"{"channel_id": 42, "expression": "3d6 + 1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: RollResponse = body_json(response).await;
        assert_eq!(body.messages, 1);
        assert!((4..=19).contains(&body.total));

        let sent = sender.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 42);
        assert!(sent[0].1.starts_with("`[3d6 + 1]` Rolagem: `["));
        assert!(sent[0].1.ends_with(&format!("Resultado: {}", body.total)));
    }

    #[tokio::test]
    async fn test_large_roll_sent_in_parts() {
        let sender = Arc::new(RecordingSender::default());
        let response = app(sender.clone())
            .oneshot(roll_request(
                Some("s3cret"),
                r#"{"channel_id": 1, "expression": "500d1000"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let sent = sender.sent.lock().await;
        assert!(sent.len() >= 4);
        assert_eq!(sent[0].1, "`[500d1000]`");
        assert!(sent.last().unwrap().1.starts_with("Resultado: "));
    }

    #[tokio::test]
    async fn test_wrong_secret_rejected() {
        let sender = Arc::new(RecordingSender::default());
        for secret in [None, Some("wrong"), Some("s3cret2")] {
            let response = app(sender.clone())
                .oneshot(roll_request(
                    secret,
                    r#"{"channel_id": 1, "expression": "1d20"}"#,
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_secret_checked_before_body() {
        let sender = Arc::new(RecordingSender::default());
        for body in ["not json", "", r#"{"channel_id": "x"}"#] {
            let response = app(sender.clone())
                .oneshot(roll_request(None, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "body {body:?}");
        }
        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let sender = Arc::new(RecordingSender::default());
        for body in ["not json", r#"{"channel_id": 1}"#, r#"{"channel_id": -1, "expression": "1d6"}"#] {
            let response = app(sender.clone())
                .oneshot(roll_request(Some("s3cret"), body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body:?}");

            let error: ErrorResponse = body_json(response).await;
            assert!(error.error.starts_with("invalid request body"));
        }
        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_expression_is_bad_request() {
        let sender = Arc::new(RecordingSender::default());
        let response = app(sender.clone())
            .oneshot(roll_request(
                Some("s3cret"),
                r#"{"channel_id": 1, "expression": "501d6"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = body_json(response).await;
        assert_eq!(body.error, "Quantidade de dados inválida (1–500).");
        assert!(sender.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_bad_gateway() {
        let sender = Arc::new(RecordingSender {
            fail_after: Some(0),
            ..Default::default()
        });
        let response = app(sender)
            .oneshot(roll_request(
                Some("s3cret"),
                r#"{"channel_id": 1, "expression": "1d20"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
