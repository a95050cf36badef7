//! YouTube Data API v3: subscription directory and caller identity

use super::client::GoogleClient;
use super::constants::{self, USERINFO_ENDPOINT};
use super::error::{ApiError, ApiResult, ErrorKind};
use super::models::{ChannelProfile, Subscription, SubscriptionPage};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

/// The caller's subscription list
#[async_trait]
pub trait SubscriptionDirectory: Send + Sync {
    /// Fetch one page of the caller's subscriptions
    async fn list_page(&self, page_size: u32, page_token: Option<&str>) -> ApiResult<SubscriptionPage>;

    /// Subscribe the caller to a channel
    async fn insert(&self, channel_id: &str) -> ApiResult<()>;
}

/// Who the caller is
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn email(&self) -> ApiResult<String>;

    async fn channel_profile(&self) -> ApiResult<ChannelProfile>;
}

const SERVICE: &str = "youtube";

const LIST_FIELDS: &str =
    "items(snippet(title,resourceId/channelId)),nextPageToken,pageInfo/totalResults";

#[derive(Clone)]
pub struct YouTubeClient {
    client: GoogleClient,
}

impl YouTubeClient {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubscriptionDirectory for YouTubeClient {
    async fn list_page(&self, page_size: u32, page_token: Option<&str>) -> ApiResult<SubscriptionPage> {
        let mut query = vec![
            ("part", "snippet".to_string()),
            ("mine", "true".to_string()),
            ("maxResults", page_size.to_string()),
            ("order", "alphabetical".to_string()),
            ("fields", LIST_FIELDS.to_string()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response: SubscriptionListResponse = self
            .client
            .get_json(SERVICE, "subscriptions.list", &constants::subscriptions_endpoint(), &query)
            .await?;

        Ok(response.into_page())
    }

    async fn insert(&self, channel_id: &str) -> ApiResult<()> {
        let body = json!({
            "snippet": {
                "resourceId": {
                    "kind": "youtube#channel",
                    "channelId": channel_id
                }
            }
        });

        let _: Value = self
            .client
            .post_json(
                SERVICE,
                "subscriptions.insert",
                &constants::subscriptions_endpoint(),
                &[("part", "snippet".to_string())],
                &body,
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for YouTubeClient {
    async fn email(&self) -> ApiResult<String> {
        let info: UserInfo = self
            .client
            .get_json("oauth", "userinfo", USERINFO_ENDPOINT, &[])
            .await?;

        info.email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ApiError::new(ErrorKind::Authorization, "Token has no email scope"))
    }

    async fn channel_profile(&self) -> ApiResult<ChannelProfile> {
        let query = [
            ("part", "snippet,statistics".to_string()),
            ("mine", "true".to_string()),
        ];
        let response: ChannelListResponse = self
            .client
            .get_json(SERVICE, "channels.list", &constants::channels_endpoint(), &query)
            .await?;

        response
            .into_profile()
            .ok_or_else(|| ApiError::new(ErrorKind::NotFound, "No channel found for this account"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionListResponse {
    #[serde(default)]
    items: Vec<SubscriptionItem>,
    next_page_token: Option<String>,
    page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionItem {
    snippet: Option<SubscriptionSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionSnippet {
    #[serde(default)]
    title: String,
    resource_id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    total_results: Option<u64>,
}

impl SubscriptionListResponse {
    fn into_page(self) -> SubscriptionPage {
        let items = self
            .items
            .into_iter()
            .filter_map(|item| {
                let snippet = item.snippet?;
                let channel_id = snippet.resource_id?.channel_id?;
                Some(Subscription::new(channel_id, snippet.title))
            })
            .collect();

        SubscriptionPage {
            items,
            next_page_token: self.next_page_token.filter(|t| !t.is_empty()),
            total_results: self.page_info.and_then(|p| p.total_results),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
    snippet: Option<Value>,
    statistics: Option<Value>,
}

impl ChannelListResponse {
    fn into_profile(self) -> Option<ChannelProfile> {
        let item = self.items.into_iter().next()?;
        let snippet = item.snippet.unwrap_or(Value::Null);

        // subscriberCount arrives as a string
        let subscriber_count = item
            .statistics
            .as_ref()
            .and_then(|s| s.get("subscriberCount"))
            .and_then(|c| c.as_str().and_then(|s| s.parse().ok()).or_else(|| c.as_u64()));

        Some(ChannelProfile {
            id: item.id,
            title: snippet["title"].as_str().unwrap_or_default().to_string(),
            subscriber_count,
            avatar_url: snippet["thumbnails"]["default"]["url"]
                .as_str()
                .map(|s| s.to_string()),
        })
    }
}
