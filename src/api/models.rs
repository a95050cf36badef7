use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::SystemTime;

/// Credentials used to obtain an access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSet {
    /// Installed-app OAuth client plus a long-lived refresh token
    RefreshToken {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
    /// Pre-issued short-lived access token
    AccessToken { access_token: String },
}

/// Cached token information
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub access_token: String,
    pub expires_at: Option<SystemTime>,
}

impl TokenInfo {
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|at| at <= SystemTime::now())
            .unwrap_or(false)
    }
}

/// One entry of the caller's subscription list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub channel_id: String,
    pub title: String,
}

impl Subscription {
    pub fn new(channel_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            title: title.into(),
        }
    }

    /// Row written to the sheet: id, display name, canonical URL
    pub fn to_row(&self) -> Vec<Value> {
        vec![
            Value::String(self.channel_id.clone()),
            Value::String(self.title.clone()),
            Value::String(super::constants::channel_url(&self.channel_id)),
        ]
    }
}

/// One page returned by `subscriptions.list`
#[derive(Debug, Clone, Default)]
pub struct SubscriptionPage {
    pub items: Vec<Subscription>,
    pub next_page_token: Option<String>,
    pub total_results: Option<u64>,
}

/// The caller's own channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A spreadsheet created or copied by us
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRef {
    pub id: String,
    pub url: String,
}

/// An opened spreadsheet, addressed through its first worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetHandle {
    pub spreadsheet_id: String,
    pub title: String,
    /// Title of the first worksheet, used in A1 ranges
    pub sheet_title: String,
    /// Numeric grid id of the first worksheet, used in formatting requests
    pub sheet_id: i64,
}

/// Rows of raw cell values
pub type Grid = Vec<Vec<Value>>;

/// Link-sharing policy applied to exported documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharingPolicy {
    /// Anyone with the link can view
    AnyoneWithLinkReader,
}

impl SharingPolicy {
    /// Drive `permissions.create` request body
    pub fn permission_body(self) -> Value {
        match self {
            SharingPolicy::AnyoneWithLinkReader => serde_json::json!({
                "type": "anyone",
                "role": "reader",
                "allowFileDiscovery": false
            }),
        }
    }
}

/// String form of a raw cell, `None` for blanks
pub fn cell_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}
