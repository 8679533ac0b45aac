use crate::models::{
    Feedback, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, SentimentFilter,
    SentimentResponse, SentimentSummary,
};
use crate::notify::{Message, Notifier};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

pub const API_PREFIX: &str = "/api";
pub const NETWORK_ERROR_MESSAGE: &str = "An unexpected network error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is the server's `error` field or
    /// `HTTP Error {status}`.
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
}

/// One request/response round trip.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// reqwest-backed transport rooted at the backend's base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, request.path));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

pub struct ApiClient<T> {
    transport: T,
    notifier: Arc<dyn Notifier + Send + Sync>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, notifier: Arc<dyn Notifier + Send + Sync>) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    pub fn notifier(&self) -> Arc<dyn Notifier + Send + Sync> {
        Arc::clone(&self.notifier)
    }

    /// Sends `payload` to `/api{endpoint}` and returns the JSON body of a 2xx
    /// response. A failure is shown once in the message area and never
    /// retried. A body that is not JSON reads as `{}`.
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<Value>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest {
            method,
            path: format!("{API_PREFIX}{endpoint}"),
            body: payload,
        };
        debug!(?method, path = %request.path, "api request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!("api call {method:?} {endpoint} failed: {err}");
                self.notifier.notify(Message::error(NETWORK_ERROR_MESSAGE));
                return Err(ApiError::Network(err.0));
            }
        };

        let body = parse_body(&response.body);
        if !(200..300).contains(&response.status) {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_owned)
                .unwrap_or_else(|| format!("HTTP Error {}", response.status));
            warn!(status = response.status, "api call {method:?} {endpoint} rejected: {message}");
            self.notifier.notify(Message::error(message.clone()));
            return Err(ApiError::Http {
                status: response.status,
                message,
            });
        }

        Ok(body)
    }

    pub async fn register(&self, form: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        let payload = json!({
            "name": form.name,
            "email": form.email,
            "password": form.password,
            "role": form.role,
        });
        self.call(Method::Post, "/register", Some(payload))
            .await
            .map(decode)
    }

    pub async fn login(&self, form: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let payload = json!({ "email": form.email, "password": form.password });
        self.call(Method::Post, "/login", Some(payload))
            .await
            .map(decode)
    }

    pub async fn submit_feedback(
        &self,
        message: &str,
        user_id: Option<u64>,
    ) -> Result<SentimentResponse, ApiError> {
        let payload = json!({ "message": message, "user_id": user_id });
        self.call(Method::Post, "/feedback", Some(payload))
            .await
            .map(decode)
    }

    pub async fn history(&self, user_id: u64) -> Result<Vec<Feedback>, ApiError> {
        self.call(Method::Get, &format!("/feedback/history/{user_id}"), None)
            .await
            .map(decode_rows)
    }

    pub async fn summary(&self) -> Result<SentimentSummary, ApiError> {
        self.call(Method::Get, "/summary", None).await.map(decode)
    }

    pub async fn all_feedback(&self, filter: SentimentFilter) -> Result<Vec<Feedback>, ApiError> {
        self.call(Method::Get, &format!("/all_feedback{}", filter.query()), None)
            .await
            .map(decode_rows)
    }

    pub async fn delete_feedback(&self, id: u64) -> Result<MessageResponse, ApiError> {
        self.call(Method::Delete, &format!("/feedback/{id}"), None)
            .await
            .map(decode)
    }
}

fn parse_body(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::Object(Map::new()))
}

fn decode<D: DeserializeOwned + Default>(value: Value) -> D {
    serde_json::from_value(value).unwrap_or_else(|err| {
        debug!("response did not match the expected shape, using defaults: {err}");
        D::default()
    })
}

/// Decodes a feedback listing row by row; rows outside the model are skipped.
fn decode_rows(value: Value) -> Vec<Feedback> {
    let Value::Array(items) = value else {
        debug!("expected a feedback list, got {value}");
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value(item)
                .map_err(|err| warn!("skipping feedback row: {err}"))
                .ok()
        })
        .collect()
}
