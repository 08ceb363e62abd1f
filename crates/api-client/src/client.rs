//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::ReviewsApi;
use crate::error::{ApiError, ApiResult};
use crate::payload::Payload;
use crate::request::{ApiRequest, HttpMethod};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn, Span};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Yotpo API client
///
/// Owns the base URL, default headers, timeout and JSON handling. Each call
/// issues exactly one HTTP request; responses come back as untyped JSON so
/// callers decide how much of Yotpo's schema they care about.
#[derive(Clone)]
pub struct YotpoClient {
    inner: Client,
    config: Arc<ClientConfig>,
}

impl YotpoClient {
    /// Create a new client with configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::config("user_agent is not a valid header value"))?;
        default_headers.insert(USER_AGENT, user_agent);

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Access review endpoints
    #[must_use]
    pub fn reviews(&self) -> ReviewsApi {
        ReviewsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // HTTP primitives
    // -------------------------------------------------------------------------

    /// Perform a GET request, sending `query` as the query string
    pub async fn get(&self, path: &str, query: Option<&Payload>) -> ApiResult<Value> {
        self.execute(HttpMethod::Get, path, query).await
    }

    /// Perform a POST request with a JSON body
    pub async fn post(&self, path: &str, body: &Payload) -> ApiResult<Value> {
        self.execute(HttpMethod::Post, path, Some(body)).await
    }

    /// Perform a PUT request with a JSON body
    pub async fn put(&self, path: &str, body: &Payload) -> ApiResult<Value> {
        self.execute(HttpMethod::Put, path, Some(body)).await
    }

    /// Perform a DELETE request, sending `query` as the query string
    pub async fn delete(&self, path: &str, query: Option<&Payload>) -> ApiResult<Value> {
        self.execute(HttpMethod::Delete, path, query).await
    }

    /// Send a prepared request descriptor
    pub async fn send(&self, request: &ApiRequest) -> ApiResult<Value> {
        self.execute(request.method, &request.path, request.params.as_ref())
            .await
    }

    #[instrument(skip(self, params), fields(request_id))]
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&Payload>,
    ) -> ApiResult<Value> {
        let url = self.config.url_for(path);
        let url = Url::parse(&url).map_err(|e| ApiError::InvalidUrl(format!("{url}: {e}")))?;

        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());

        let mut request = self
            .inner
            .request(method.as_reqwest(), url)
            .header(X_REQUEST_ID, &request_id);

        if let Some(params) = params {
            request = if method.has_body() {
                request.json(params)
            } else {
                request.query(params)
            };
        }

        debug!(request_id = %request_id, "Sending request");
        let start = Instant::now();
        let response = request.send().await?;
        let result = self.handle_response(response).await;

        if result.is_ok() {
            debug!(
                request_id = %request_id,
                elapsed_ms = start.elapsed().as_millis(),
                "Request succeeded"
            );
        }
        result
    }

    /// Handle HTTP response and parse the body as JSON
    async fn handle_response(&self, response: Response) -> ApiResult<Value> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&body)?)
        } else {
            warn!(status = status.as_u16(), "Yotpo returned an error status");
            Err(ApiError::api_response(status.as_u16(), body))
        }
    }
}
