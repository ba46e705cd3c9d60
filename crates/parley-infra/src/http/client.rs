//! HttpChatBackend -- concrete [`ChatBackend`] implementation over HTTP.
//!
//! Posts the JSON request body to `{endpoint}{chat_path}` and expects
//! `{"bot_response": "..."}` back. The health probe hits `GET {endpoint}/`.

use std::time::Duration;

use parley_core::backend::provider::ChatBackend;
use parley_types::config::ClientConfig;
use parley_types::error::BackendError;
use parley_types::wire::{ChatReply, ChatRequest, HealthStatus};

/// Chat backend speaking JSON over HTTP.
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
    chat_path: String,
}

impl HttpChatBackend {
    /// Build a backend from client configuration.
    ///
    /// Fails with [`BackendError::InvalidEndpoint`] when the endpoint is not
    /// an `http://` or `https://` URL.
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let base_url = normalize_endpoint(&config.endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to create HTTP client: {e}")))?;

        let chat_path = if config.chat_path.starts_with('/') {
            config.chat_path.clone()
        } else {
            format!("/{}", config.chat_path)
        };

        Ok(Self {
            client,
            base_url,
            chat_path,
        })
    }

    /// The endpoint origin this backend talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the chat route.
    pub fn chat_url(&self) -> String {
        self.url(&self.chat_path)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_endpoint(endpoint: &str) -> Result<String, BackendError> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(BackendError::InvalidEndpoint(endpoint.to_string()));
    }
    Ok(trimmed.to_string())
}

impl ChatBackend for HttpChatBackend {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        let url = self.chat_url();
        tracing::debug!(url = %url, "Posting chat request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatReply = response.json().await.map_err(|e| {
            BackendError::MalformedResponse(format!("failed to parse response: {e}"))
        })?;

        tracing::debug!(chars = reply.bot_response.len(), "Chat reply received");
        Ok(reply)
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let response = self
            .client
            .get(self.url("/"))
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            BackendError::MalformedResponse(format!("failed to parse health response: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use parley_types::wire::{RequestShape, WireMessage, WireRole};
    use serde_json::{Value, json};

    use super::*;

    type Captured = Arc<Mutex<Vec<Value>>>;

    /// Serve `app` on an ephemeral port and return its origin.
    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn echo_app(captured: Captured) -> Router {
        async fn chat(State(captured): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
            captured.lock().unwrap().push(body);
            Json(json!({ "bot_response": "Hi! How can I help?" }))
        }
        async fn root() -> Json<Value> {
            Json(json!({ "status": "ok" }))
        }
        Router::new()
            .route("/", get(root))
            .route("/chat", post(chat))
            .with_state(captured)
    }

    fn backend_for(endpoint: String) -> HttpChatBackend {
        HttpChatBackend::new(&ClientConfig {
            endpoint,
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_send_full_history_body() {
        let captured = Captured::default();
        let backend = backend_for(spawn_server(echo_app(captured.clone())).await);

        let request = ChatRequest::History {
            messages: vec![
                WireMessage::new(WireRole::System, "You are a helpful assistant."),
                WireMessage::new(WireRole::User, "hello"),
            ],
        };
        let reply = backend.send(&request).await.unwrap();

        assert_eq!(reply.bot_response, "Hi! How can I help?");
        let bodies = captured.lock().unwrap();
        assert_eq!(
            bodies[0],
            json!({
                "messages": [
                    { "role": "system", "content": "You are a helpful assistant." },
                    { "role": "user", "content": "hello" }
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_send_single_turn_body() {
        let captured = Captured::default();
        let backend = backend_for(spawn_server(echo_app(captured.clone())).await);

        let request = ChatRequest::SingleTurn {
            user_message: "hello".to_string(),
        };
        backend.send(&request).await.unwrap();

        assert_eq!(captured.lock().unwrap()[0], json!({ "user_message": "hello" }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let app = Router::new().route(
            "/chat",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        );
        let backend = backend_for(spawn_server(app).await);

        let err = backend
            .send(&ChatRequest::SingleTurn {
                user_message: "hello".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            BackendError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "model crashed");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_body_without_bot_response_is_malformed() {
        let app = Router::new().route("/chat", post(|| async { Json(json!({ "reply": "hi" })) }));
        let backend = backend_for(spawn_server(app).await);

        let err = backend
            .send(&ChatRequest::SingleTurn {
                user_message: "hello".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let app = Router::new().route("/chat", post(|| async { "<html>oops</html>" }));
        let backend = backend_for(spawn_server(app).await);

        let err = backend
            .send(&ChatRequest::SingleTurn {
                user_message: "hello".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = backend_for(format!("http://{addr}"));
        let err = backend
            .send(&ChatRequest::SingleTurn {
                user_message: "hello".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::Transport(_)));
    }

    #[tokio::test]
    async fn test_health_ok() {
        let backend = backend_for(spawn_server(echo_app(Captured::default())).await);
        let health = backend.health().await.unwrap();
        assert!(health.is_ok());
    }

    #[tokio::test]
    async fn test_health_missing_route_is_status_error() {
        let app = Router::new().route("/chat", post(|| async { "unused" }));
        let backend = backend_for(spawn_server(app).await);

        let err = backend.health().await.unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 404, .. }));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = ClientConfig {
            endpoint: "localhost:8000".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpChatBackend::new(&config),
            Err(BackendError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_urls_are_normalized() {
        let backend = HttpChatBackend::new(&ClientConfig {
            endpoint: "http://localhost:8000/".to_string(),
            chat_path: "chat".to_string(),
            request_shape: RequestShape::FullHistory,
            ..ClientConfig::default()
        })
        .unwrap();

        assert_eq!(backend.name(), "http://localhost:8000");
        assert_eq!(backend.chat_url(), "http://localhost:8000/chat");
    }
}
