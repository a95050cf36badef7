use crate::service::Response;
use colored::*;
use serde::Serialize;

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a boundary response and report whether it succeeded
///
/// `render` draws the success payload in text mode.
pub fn emit<T, F>(format: OutputFormat, response: &Response<T>, render: F) -> bool
where
    T: Serialize,
    F: FnOnce(&T),
{
    match format {
        OutputFormat::Json => print_json(response),
        OutputFormat::Text => match (&response.data, &response.error) {
            (Some(data), _) if response.success => render(data),
            (_, error) => print_error(error.as_deref().unwrap_or("Unknown error")),
        },
    }
    response.success
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => print_error(&format!("Failed to serialize output: {}", e)),
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".bright_red(), message);
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".bright_green(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "!".bright_yellow(), message);
}
