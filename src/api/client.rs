use super::constants::headers;
use super::error::{ApiError, ApiResult};
use super::logging::{ApiLogger, MonitoringConfig};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Authenticated HTTP transport shared by the YouTube and Sheets clients
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted and keeps
/// its connection pool across clones.
#[derive(Clone)]
pub struct GoogleClient {
    http_client: reqwest::Client,
    access_token: String,
    api_logger: ApiLogger,
}

impl GoogleClient {
    pub fn new(access_token: String, monitoring: MonitoringConfig) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("subsheets/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_custom_client(access_token, http_client, monitoring))
    }

    /// Create a client around an existing HTTP client
    pub fn with_custom_client(
        access_token: String,
        http_client: reqwest::Client,
        monitoring: MonitoringConfig,
    ) -> Self {
        Self {
            http_client,
            access_token,
            api_logger: ApiLogger::new(monitoring),
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        service: &str,
        operation: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        self.execute(Method::GET, service, operation, url, query, None)
            .await
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        service: &str,
        operation: &str,
        url: &str,
        query: &[(&str, String)],
        body: &Value,
    ) -> ApiResult<T> {
        self.execute(Method::POST, service, operation, url, query, Some(body))
            .await
    }

    pub async fn put_json<T: DeserializeOwned>(
        &self,
        service: &str,
        operation: &str,
        url: &str,
        query: &[(&str, String)],
        body: &Value,
    ) -> ApiResult<T> {
        self.execute(Method::PUT, service, operation, url, query, Some(body))
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        service: &str,
        operation: &str,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> ApiResult<T> {
        let logger = &self.api_logger;
        let context = logger.start_operation(service, operation);

        let mut request_headers = HashMap::new();
        request_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.access_token),
        );
        request_headers.insert(
            headers::X_CORRELATION_ID.to_string(),
            context.correlation_id.clone(),
        );
        if body.is_some() {
            request_headers.insert(
                "Content-Type".to_string(),
                headers::CONTENT_TYPE_JSON.to_string(),
            );
        }
        logger.log_request(&context, method.as_str(), url, &request_headers);

        let mut request = self
            .http_client
            .request(method, url)
            .bearer_auth(&self.access_token)
            .header(headers::X_CORRELATION_ID, &context.correlation_id)
            .query(query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let request_start = Instant::now();
        let result = match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                logger.log_response(&context, status, request_start.elapsed());
                Self::parse_response(response).await
            }
            Err(error) => Err(ApiError::from(error)),
        };

        let metrics = match &result {
            Ok(_) => context.create_metrics(true, None, None),
            Err(error) => context.create_metrics(false, error.status, Some(error.message.clone())),
        };
        logger.complete_operation(&context, &metrics);

        result
    }

    /// Decode a success body or classify a failure body
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            // Empty bodies (204, some Drive calls) decode as JSON null
            let body = if text.trim().is_empty() { "null" } else { text.as_str() };
            Ok(serde_json::from_str(body)?)
        } else {
            Err(ApiError::from_response(status.as_u16(), &text))
        }
    }
}
