//! Remote error taxonomy
//!
//! Google APIs report failures as `{"error": {"code", "message", "errors": [{"reason"}]}}`.
//! Every non-success response is turned into an [`ApiError`] carrying a structured
//! [`ErrorKind`], so callers branch on the kind instead of matching message text.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classified failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// No source data to work with
    EmptyResult,
    /// Sheet has no rows beyond the header
    EmptySheet,
    /// Sheet rows contained no usable channel ids
    NoValidIdentifiers,
    /// Bad identifier, missing channel or document, or forbidden target
    NotFound,
    /// Quota or rate limit exhausted on the remote side
    QuotaExceeded,
    /// Caller is already subscribed to the channel
    DuplicateSubscription,
    /// Token rejected or missing scopes
    Authorization,
    /// Anything we could not categorise
    GenericRemoteFailure,
}

impl ErrorKind {
    /// Per-item failures that must not stop a batch
    pub fn is_skippable(self) -> bool {
        matches!(self, ErrorKind::DuplicateSubscription | ErrorKind::NotFound)
    }

    /// Failures that must stop a batch immediately
    pub fn is_critical(self) -> bool {
        matches!(self, ErrorKind::QuotaExceeded)
    }

    /// Map a Google `errors[].reason` code
    pub fn from_reason(reason: &str) -> Option<Self> {
        let kind = match reason {
            "subscriptionDuplicate" => ErrorKind::DuplicateSubscription,
            "quotaExceeded" | "dailyLimitExceeded" | "rateLimitExceeded"
            | "userRateLimitExceeded" => ErrorKind::QuotaExceeded,
            "publisherNotFound" | "channelNotFound" | "subscriptionForbidden" | "forbidden"
            | "notFound" | "subscriberNotFound" => ErrorKind::NotFound,
            "authError" | "insufficientPermissions" | "unauthorized" | "accessNotConfigured" => {
                ErrorKind::Authorization
            }
            _ => return None,
        };
        Some(kind)
    }

    /// Fallback mapping from HTTP status when no known reason is present
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Authorization,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::QuotaExceeded,
            _ => ErrorKind::GenericRemoteFailure,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorKind::EmptyResult => "empty result",
            ErrorKind::EmptySheet => "empty sheet",
            ErrorKind::NoValidIdentifiers => "no valid identifiers",
            ErrorKind::NotFound => "not found",
            ErrorKind::QuotaExceeded => "quota exceeded",
            ErrorKind::DuplicateSubscription => "already subscribed",
            ErrorKind::Authorization => "authorization error",
            ErrorKind::GenericRemoteFailure => "remote failure",
        };
        f.write_str(text)
    }
}

/// A failed call against one of the remote services
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub reason: Option<String>,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            reason: None,
            message: message.into(),
        }
    }

    /// Build an error from a non-success HTTP response body
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();

        let reason = parsed.as_ref().and_then(|envelope| {
            envelope
                .error
                .errors
                .iter()
                .find_map(|detail| detail.reason.clone())
        });

        let message = parsed
            .as_ref()
            .and_then(|envelope| envelope.error.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("Request failed with status {}", status)
                } else {
                    body.trim().to_string()
                }
            });

        // Sheets/Drive report RESOURCE_EXHAUSTED in `status` rather than a reason
        let status_kind = parsed
            .as_ref()
            .and_then(|envelope| envelope.error.status.as_deref())
            .and_then(|s| match s {
                "RESOURCE_EXHAUSTED" => Some(ErrorKind::QuotaExceeded),
                "NOT_FOUND" => Some(ErrorKind::NotFound),
                "PERMISSION_DENIED" | "UNAUTHENTICATED" => Some(ErrorKind::Authorization),
                _ => None,
            });

        let kind = reason
            .as_deref()
            .and_then(ErrorKind::from_reason)
            .or(status_kind)
            .unwrap_or_else(|| ErrorKind::from_status(status));

        Self {
            kind,
            status: Some(status),
            reason,
            message,
        }
    }

    pub fn is_skippable(&self) -> bool {
        self.kind.is_skippable()
    }

    pub fn is_critical(&self) -> bool {
        self.kind.is_critical()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        let status = error.status().map(|s| s.as_u16());
        let kind = status
            .map(ErrorKind::from_status)
            .unwrap_or(ErrorKind::GenericRemoteFailure);
        Self {
            kind,
            status,
            reason: None,
            message: format!("HTTP request failed: {}", error),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::new(
            ErrorKind::GenericRemoteFailure,
            format!("Unexpected response format: {}", error),
        )
    }
}
