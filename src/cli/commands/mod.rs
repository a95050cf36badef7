pub mod account;
pub mod auth;
pub mod transfer;

pub use auth::{AuthCommands, auth_command};

use crate::api::ClientManager;
use crate::cli::app::{Cli, Commands};
use crate::cli::ui::with_spinner;
use crate::config::Config;
use crate::service::SubscriptionService;
use anyhow::Result;
use log::info;
use std::path::Path;

/// Resolve credentials, authenticate and build the service
pub async fn connect(config: &Config, env_file: Option<&Path>) -> Result<SubscriptionService> {
    let (credentials, source) = crate::auth::resolve(env_file, config.credentials.as_ref())?;
    info!("Using credentials from {}", source);

    let mut manager = ClientManager::new(credentials, config.monitoring.clone());
    let session = with_spinner("Authenticating...", manager.connect()).await?;
    Ok(SubscriptionService::new(session, config.settings.clone()))
}

/// Run the parsed command; `Ok(false)` means the operation reported failure
pub async fn dispatch(cli: Cli, mut config: Config) -> Result<bool> {
    let format = cli.format;
    let env_file = cli.env_file.as_deref();

    let ok = match cli.command {
        Commands::Auth(args) => return auth_command(args, &mut config, env_file, format).await,
        Commands::ShareMessage { url, count } => transfer::share_message_command(&url, count, format),
        Commands::Whoami => account::whoami_command(&connect(&config, env_file).await?, format).await,
        Commands::Email => account::email_command(&connect(&config, env_file).await?, format).await,
        Commands::Count => account::count_command(&connect(&config, env_file).await?, format).await,
        Commands::Export => transfer::export_command(&connect(&config, env_file).await?, format).await,
        Commands::Append { sheet_id } => {
            let service = connect(&config, env_file).await?;
            transfer::append_command(&service, &sheet_id, format).await
        }
        Commands::Fetch { sheet_id } => {
            let service = connect(&config, env_file).await?;
            transfer::fetch_command(&service, &sheet_id, format).await
        }
        Commands::Import { sheet_id, yes } => {
            let service = connect(&config, env_file).await?;
            transfer::import_command(&service, &sheet_id, yes, format).await?
        }
        Commands::Subscribe { channel_id } => {
            let service = connect(&config, env_file).await?;
            transfer::subscribe_command(&service, &channel_id, format).await
        }
        Commands::Validate { sheet_id } => {
            let service = connect(&config, env_file).await?;
            transfer::validate_command(&service, &sheet_id, format).await
        }
    };
    Ok(ok)
}
