use super::commands::AuthCommands;
use super::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "subsheets", version)]
#[command(about = "Export YouTube subscriptions to Google Sheets and import them back")]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    /// Read credentials from this .env file
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the signed-in account and its channel
    Whoami,
    /// Show the signed-in account's email
    Email,
    /// Count your subscriptions
    Count,
    /// Export your subscriptions to a new spreadsheet
    Export,
    /// Copy a spreadsheet and append your subscriptions it does not list yet
    Append {
        /// Spreadsheet to copy
        sheet_id: String,
    },
    /// List the channel IDs in a spreadsheet
    Fetch {
        /// Spreadsheet to read
        sheet_id: String,
    },
    /// Subscribe to every channel listed in a spreadsheet
    Import {
        /// Spreadsheet to read
        sheet_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Subscribe to a single channel
    Subscribe {
        /// Channel ID (starts with UC)
        channel_id: String,
    },
    /// Print a message for sharing an exported spreadsheet
    ShareMessage {
        /// Spreadsheet URL
        url: String,
        /// Number of subscriptions in it
        count: u64,
    },
    /// Check a spreadsheet is reachable
    Validate {
        /// Spreadsheet to check
        sheet_id: String,
    },
    /// Credential management
    Auth(AuthCommands),
}
