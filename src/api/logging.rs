//! Structured request logging with correlation tracking
//!
//! Each remote call gets a correlation id that is sent as a header and repeated in
//! every log event for that call, so a single request can be followed in the log file.

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Monitoring and logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default = "default_true")]
    pub request_logging: bool,
    #[serde(default = "default_true")]
    pub performance_metrics: bool,
    #[serde(default)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_true() -> bool {
    true
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            request_logging: true,
            performance_metrics: true,
            log_level: LogLevel::Info,
        }
    }
}

impl MonitoringConfig {
    /// No request or metrics logging (tests, quiet runs)
    pub fn disabled() -> Self {
        Self {
            request_logging: false,
            performance_metrics: false,
            log_level: LogLevel::Error,
        }
    }
}

/// Structured logger shared by the API clients
#[derive(Debug, Clone, Default)]
pub struct ApiLogger {
    config: MonitoringConfig,
}

/// Tracking state for one remote call
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub correlation_id: String,
    /// Short operation name, e.g. `subscriptions.list`
    pub operation: String,
    /// Service the call goes to (youtube, sheets, drive, oauth)
    pub service: String,
    pub start_time: Instant,
}

/// Outcome of one remote call
#[derive(Debug, Clone)]
pub struct OperationMetrics {
    pub duration: Duration,
    pub success: bool,
    pub status_code: Option<u16>,
    pub error_message: Option<String>,
}

impl ApiLogger {
    pub fn new(config: MonitoringConfig) -> Self {
        Self { config }
    }

    /// Start tracking a call with a fresh correlation id
    pub fn start_operation(&self, service: &str, operation: &str) -> OperationContext {
        let context = OperationContext {
            correlation_id: uuid::Uuid::new_v4().to_string(),
            operation: operation.to_string(),
            service: service.to_string(),
            start_time: Instant::now(),
        };

        if self.config.request_logging && self.should_log(LogLevel::Debug) {
            let log_data = json!({
                "event": "operation_started",
                "correlation_id": context.correlation_id,
                "service": context.service,
                "operation": context.operation,
                "timestamp": chrono::Utc::now().to_rfc3339()
            });
            debug!("API Operation Started: {}", log_data);
        }

        context
    }

    pub fn log_request(
        &self,
        context: &OperationContext,
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
    ) {
        if !self.config.request_logging || !self.should_log(LogLevel::Debug) {
            return;
        }

        let log_data = json!({
            "event": "http_request",
            "correlation_id": context.correlation_id,
            "operation": context.operation,
            "method": method,
            "url": url,
            "headers": sanitize_headers(headers),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        debug!("HTTP Request: {}", log_data);
    }

    pub fn log_response(&self, context: &OperationContext, status_code: u16, duration: Duration) {
        if !self.config.request_logging || !self.should_log(LogLevel::Debug) {
            return;
        }

        let log_data = json!({
            "event": "http_response",
            "correlation_id": context.correlation_id,
            "operation": context.operation,
            "status_code": status_code,
            "duration_ms": duration.as_millis(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if status_code >= 400 {
            warn!("HTTP Response (Error): {}", log_data);
        } else {
            debug!("HTTP Response: {}", log_data);
        }
    }

    /// Complete a call and log its metrics
    pub fn complete_operation(&self, context: &OperationContext, metrics: &OperationMetrics) {
        if !self.config.performance_metrics {
            return;
        }

        let log_data = json!({
            "event": "operation_completed",
            "correlation_id": context.correlation_id,
            "service": context.service,
            "operation": context.operation,
            "duration_ms": metrics.duration.as_millis(),
            "success": metrics.success,
            "status_code": metrics.status_code,
            "error_message": metrics.error_message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if metrics.success {
            if self.should_log(LogLevel::Info) {
                info!("API Operation Completed: {}", log_data);
            }
        } else if self.should_log(LogLevel::Error) {
            error!("API Operation Failed: {}", log_data);
        }
    }

    fn should_log(&self, level: LogLevel) -> bool {
        level <= self.config.log_level
    }
}

impl OperationContext {
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn create_metrics(
        &self,
        success: bool,
        status_code: Option<u16>,
        error_message: Option<String>,
    ) -> OperationMetrics {
        OperationMetrics {
            duration: self.elapsed(),
            success,
            status_code,
            error_message,
        }
    }
}

/// Redact credentials before they reach the log file
fn sanitize_headers(headers: &HashMap<String, String>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(key, value)| {
            let key_lower = key.to_lowercase();
            if key_lower.contains("authorization") || key_lower.contains("token") || key_lower.contains("key") {
                (key.clone(), "[REDACTED]".to_string())
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_context_creation() {
        let logger = ApiLogger::new(MonitoringConfig::default());
        let context = logger.start_operation("youtube", "subscriptions.list");

        assert_eq!(context.operation, "subscriptions.list");
        assert_eq!(context.service, "youtube");
        assert_eq!(context.correlation_id.len(), 36);

        let other = logger.start_operation("youtube", "subscriptions.list");
        assert_ne!(context.correlation_id, other.correlation_id);
    }

    #[test]
    fn test_header_sanitization() {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer secret-token".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("X-Goog-Api-Key".to_string(), "secret-key".to_string());

        let sanitized = sanitize_headers(&headers);

        assert_eq!(sanitized.get("Authorization"), Some(&"[REDACTED]".to_string()));
        assert_eq!(sanitized.get("Content-Type"), Some(&"application/json".to_string()));
        assert_eq!(sanitized.get("X-Goog-Api-Key"), Some(&"[REDACTED]".to_string()));
    }

    #[test]
    fn test_log_level_filtering() {
        let logger = ApiLogger::new(MonitoringConfig {
            request_logging: true,
            performance_metrics: true,
            log_level: LogLevel::Warn,
        });

        assert!(logger.should_log(LogLevel::Error));
        assert!(logger.should_log(LogLevel::Warn));
        assert!(!logger.should_log(LogLevel::Info));
        assert!(!logger.should_log(LogLevel::Debug));
        assert!(!logger.should_log(LogLevel::Trace));
    }

    #[test]
    fn test_metrics_from_context() {
        let logger = ApiLogger::new(MonitoringConfig::disabled());
        let context = logger.start_operation("sheets", "values.update");
        let metrics = context.create_metrics(false, Some(403), Some("denied".to_string()));

        assert!(!metrics.success);
        assert_eq!(metrics.status_code, Some(403));
        assert_eq!(metrics.error_message.as_deref(), Some("denied"));
    }
}
