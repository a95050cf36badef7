use super::constants::TOKEN_ENDPOINT;
use super::models::{CredentialSet, TokenInfo};
use std::time::{Duration, SystemTime};

/// Turns a credential set into a usable access token
pub struct AuthManager {
    credentials: CredentialSet,
    token: Option<TokenInfo>,
}

impl AuthManager {
    pub fn new(credentials: CredentialSet) -> Self {
        Self {
            credentials,
            token: None,
        }
    }

    pub fn credentials(&self) -> &CredentialSet {
        &self.credentials
    }

    /// Return a valid access token, refreshing it when missing or expired
    pub async fn access_token(&mut self) -> anyhow::Result<String> {
        if let Some(token) = &self.token {
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
            log::debug!("Cached access token expired, refreshing");
        }

        let token = self.authenticate().await?;
        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    async fn authenticate(&self) -> anyhow::Result<TokenInfo> {
        match &self.credentials {
            CredentialSet::AccessToken { access_token } => {
                log::info!("Using pre-issued access token");
                Ok(TokenInfo {
                    access_token: access_token.clone(),
                    expires_at: None,
                })
            }
            CredentialSet::RefreshToken {
                client_id,
                client_secret,
                refresh_token,
            } => {
                log::info!("Refreshing access token at {}", TOKEN_ENDPOINT);

                let client = reqwest::Client::new();
                let response = client
                    .post(TOKEN_ENDPOINT)
                    .form(&[
                        ("grant_type", "refresh_token"),
                        ("client_id", client_id.as_str()),
                        ("client_secret", client_secret.as_str()),
                        ("refresh_token", refresh_token.as_str()),
                    ])
                    .send()
                    .await?;

                log::debug!("Token request status: {}", response.status());

                if response.status().is_success() {
                    let token_data: serde_json::Value = response.json().await?;
                    parse_token_response(&token_data)
                } else {
                    let error_text = response.text().await?;
                    anyhow::bail!("Authentication failed: {}", error_text)
                }
            }
        }
    }
}

fn parse_token_response(token_data: &serde_json::Value) -> anyhow::Result<TokenInfo> {
    let access_token = token_data
        .get("access_token")
        .and_then(|t| t.as_str())
        .ok_or_else(|| anyhow::anyhow!("No access token in response"))?;

    // Default to 1 hour if not provided; refresh a minute early
    let expires_in = token_data
        .get("expires_in")
        .and_then(|e| e.as_u64())
        .unwrap_or(3600)
        .saturating_sub(60);

    Ok(TokenInfo {
        access_token: access_token.to_string(),
        expires_at: Some(SystemTime::now() + Duration::from_secs(expires_in)),
    })
}
