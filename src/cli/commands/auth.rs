//! Credential management commands

use crate::api::constants::SCOPES;
use crate::api::{ClientManager, CredentialSet};
use crate::auth::{self, credentials};
use crate::cli::output::{OutputFormat, print_error, print_json, print_success, print_warning};
use crate::cli::ui::with_spinner;
use crate::config::Config;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use is_terminal::IsTerminal;
use log::info;
use serde_json::json;
use std::path::Path;

#[derive(Args)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommands,
}

#[derive(Subcommand)]
pub enum AuthSubcommands {
    /// Store credentials in the config file
    Set {
        /// OAuth client ID
        #[arg(long)]
        client_id: Option<String>,
        /// OAuth client secret
        #[arg(long)]
        client_secret: Option<String>,
        /// OAuth refresh token
        #[arg(long)]
        refresh_token: Option<String>,
        /// Short-lived access token instead of a refresh token
        #[arg(long, conflicts_with_all = ["client_id", "client_secret", "refresh_token"])]
        access_token: Option<String>,
        /// Copy credentials from the environment or --env-file
        #[arg(long)]
        from_env: bool,
    },
    /// Show which credentials are in use and whether they work
    Status,
    /// Remove stored credentials
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub struct SetOptions {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
    pub from_env: bool,
}

pub async fn auth_command(
    args: AuthCommands,
    config: &mut Config,
    env_file: Option<&Path>,
    format: OutputFormat,
) -> Result<bool> {
    match args.command {
        AuthSubcommands::Set {
            client_id,
            client_secret,
            refresh_token,
            access_token,
            from_env,
        } => {
            let options = SetOptions {
                client_id,
                client_secret,
                refresh_token,
                access_token,
                from_env,
            };
            set_command(options, config, env_file).await
        }
        AuthSubcommands::Status => status_command(config, env_file, format).await,
        AuthSubcommands::Clear { force } => clear_command(config, force),
    }
}

async fn set_command(options: SetOptions, config: &mut Config, env_file: Option<&Path>) -> Result<bool> {
    let credentials = if options.from_env {
        match env_file {
            Some(path) => credentials::from_env_file(path)?,
            None => credentials::from_env()
                .ok_or_else(|| anyhow::anyhow!("No credentials found in environment variables"))?,
        }
    } else if let Some(access_token) = options.access_token {
        CredentialSet::AccessToken { access_token }
    } else {
        CredentialSet::RefreshToken {
            client_id: value_or_prompt(options.client_id, "OAuth client ID", false)?,
            client_secret: value_or_prompt(options.client_secret, "OAuth client secret", true)?,
            refresh_token: value_or_prompt(options.refresh_token, "Refresh token", true)?,
        }
    };

    let mut manager = ClientManager::new(credentials.clone(), config.monitoring.clone());
    let verified = with_spinner("Checking credentials...", manager.get_client()).await;
    if let Err(e) = verified {
        print_warning(&format!("Could not obtain an access token: {}", e));
        if !std::io::stdin().is_terminal()
            || !Confirm::new()
                .with_prompt("Save credentials anyway?")
                .default(false)
                .interact()?
        {
            return Ok(false);
        }
    }

    config.set_credentials(credentials)?;
    print_success(&format!(
        "Credentials saved to {}",
        Config::get_config_path()?.display()
    ));
    Ok(true)
}

fn value_or_prompt(value: Option<String>, prompt: &str, secret: bool) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("{} is required", prompt);
    }

    let value = if secret {
        rpassword::prompt_password(format!("{}: ", prompt))?
    } else {
        Input::<String>::new().with_prompt(prompt).interact_text()?
    };
    Ok(value.trim().to_string())
}

async fn status_command(config: &Config, env_file: Option<&Path>, format: OutputFormat) -> Result<bool> {
    let (credentials, source) = match auth::resolve(env_file, config.credentials.as_ref()) {
        Ok(resolved) => resolved,
        Err(e) => {
            match format {
                OutputFormat::Json => print_json(&json!({ "success": false, "error": e.to_string() })),
                OutputFormat::Text => print_error(&e.to_string()),
            }
            return Ok(false);
        }
    };

    let kind = match credentials {
        CredentialSet::RefreshToken { .. } => "refresh token",
        CredentialSet::AccessToken { .. } => "access token",
    };
    info!("Checking {} credentials from {}", kind, source);

    let mut manager = ClientManager::new(credentials, config.monitoring.clone());
    let token = with_spinner("Checking credentials...", manager.get_client()).await;

    match format {
        OutputFormat::Json => print_json(&json!({
            "success": token.is_ok(),
            "source": source.to_string(),
            "credentialType": kind,
            "error": token.as_ref().err().map(|e| e.to_string()),
        })),
        OutputFormat::Text => {
            println!("{}", "Authentication status".bold());
            println!("  Source:      {}", source.to_string().cyan());
            println!("  Credentials: {}", kind);
            match &token {
                Ok(_) => println!("  Token:       {}", "valid".bright_green()),
                Err(e) => {
                    println!("  Token:       {} ({})", "invalid".bright_red(), e);
                    println!();
                    println!("The refresh token must grant these scopes:");
                    for scope in SCOPES {
                        println!("  {}", scope.dimmed());
                    }
                }
            }
        }
    }

    Ok(token.is_ok())
}

fn clear_command(config: &mut Config, force: bool) -> Result<bool> {
    if config.credentials.is_none() {
        print_warning("No stored credentials");
        return Ok(true);
    }

    if !force
        && std::io::stdin().is_terminal()
        && !Confirm::new()
            .with_prompt("Remove stored credentials?")
            .default(false)
            .interact()?
    {
        println!("Cancelled");
        return Ok(true);
    }

    config.clear_credentials()?;
    print_success("Stored credentials removed");
    Ok(true)
}
