use crate::api::CredentialSet;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

pub const CLIENT_ID_VAR: &str = "GOOGLE_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "GOOGLE_CLIENT_SECRET";
pub const REFRESH_TOKEN_VAR: &str = "GOOGLE_REFRESH_TOKEN";
pub const ACCESS_TOKEN_VAR: &str = "GOOGLE_ACCESS_TOKEN";

/// Where a resolved credential set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    EnvFile,
    Config,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::EnvFile => write!(f, ".env file"),
            CredentialSource::Config => write!(f, "config file"),
        }
    }
}

/// Build a credential set from variable lookups
///
/// A complete refresh-token triple wins over a bare access token.
pub fn from_lookup<F>(lookup: F) -> Option<CredentialSet>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let (Some(client_id), Some(client_secret), Some(refresh_token)) =
        (var(CLIENT_ID_VAR), var(CLIENT_SECRET_VAR), var(REFRESH_TOKEN_VAR))
    {
        return Some(CredentialSet::RefreshToken {
            client_id,
            client_secret,
            refresh_token,
        });
    }

    var(ACCESS_TOKEN_VAR).map(|access_token| CredentialSet::AccessToken { access_token })
}

pub fn from_env() -> Option<CredentialSet> {
    debug!("Looking for credentials in environment variables");
    from_lookup(|name| std::env::var(name).ok())
}

/// Load a .env file into the process environment, then read credentials from it
pub fn from_env_file(path: &Path) -> Result<CredentialSet> {
    info!("Loading credentials from .env file: {:?}", path);

    if !path.exists() {
        anyhow::bail!("Environment file not found: {:?}", path);
    }

    dotenvy::from_path(path).with_context(|| format!("Failed to load .env file {:?}", path))?;

    from_env().with_context(|| {
        format!(
            "No credentials in {:?}: set {}, {} and {}, or {}",
            path, CLIENT_ID_VAR, CLIENT_SECRET_VAR, REFRESH_TOKEN_VAR, ACCESS_TOKEN_VAR
        )
    })
}

/// Pick credentials: explicit env file, then the environment (including a `.env` in the
/// working directory), then the config file
pub fn resolve(
    env_file: Option<&Path>,
    stored: Option<&CredentialSet>,
) -> Result<(CredentialSet, CredentialSource)> {
    if let Some(path) = env_file {
        return Ok((from_env_file(path)?, CredentialSource::EnvFile));
    }

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded {:?}", path);
    }

    if let Some(credentials) = from_env() {
        return Ok((credentials, CredentialSource::Environment));
    }

    if let Some(credentials) = stored {
        return Ok((credentials.clone(), CredentialSource::Config));
    }

    anyhow::bail!(
        "No credentials configured. Set {}, {} and {} (or {}), or run 'subsheets auth set'",
        CLIENT_ID_VAR,
        CLIENT_SECRET_VAR,
        REFRESH_TOKEN_VAR,
        ACCESS_TOKEN_VAR
    )
}
