use super::auth::AuthManager;
use super::client::GoogleClient;
use super::logging::MonitoringConfig;
use super::models::CredentialSet;
use super::sheets::SheetsClient;
use super::youtube::YouTubeClient;
use crate::session::Session;
use std::sync::Arc;

/// Builds authenticated clients from a credential set
pub struct ClientManager {
    auth_manager: AuthManager,
    monitoring: MonitoringConfig,
}

impl ClientManager {
    pub fn new(credentials: CredentialSet, monitoring: MonitoringConfig) -> Self {
        Self {
            auth_manager: AuthManager::new(credentials),
            monitoring,
        }
    }

    /// Authenticated transport for the current token
    pub async fn get_client(&mut self) -> anyhow::Result<GoogleClient> {
        let access_token = self.auth_manager.access_token().await?;
        Ok(GoogleClient::new(access_token, self.monitoring.clone())?)
    }

    /// Authenticate and assemble a session over the real Google services
    pub async fn connect(&mut self) -> anyhow::Result<Session> {
        let client = self.get_client().await?;
        let youtube = Arc::new(YouTubeClient::new(client.clone()));
        let sheets = Arc::new(SheetsClient::new(client));

        log::debug!("Connected session with YouTube and Sheets clients");
        Ok(Session::new(youtube.clone(), sheets, youtube))
    }
}
