use crate::cli::output::{OutputFormat, emit, print_error, print_json, print_success, print_warning};
use crate::cli::ui::with_spinner;
use crate::service::SubscriptionService;
use crate::transfer::{Diagnostic, SubscribeOutcome, share};
use anyhow::Result;
use colored::*;
use dialoguer::Confirm;
use is_terminal::IsTerminal;
use serde_json::json;

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        print_warning(&format!("{} skipped: {}", diagnostic.step, diagnostic.message));
    }
}

pub async fn export_command(service: &SubscriptionService, format: OutputFormat) -> bool {
    let response = with_spinner(
        "Exporting subscriptions...",
        service.export_subscriptions_to_sheet(),
    )
    .await;

    emit(format, &response, |result| {
        print_success(&format!("Exported {} subscriptions", result.count));
        println!("  {}", result.sheet_url.bright_cyan());
        print_diagnostics(&result.diagnostics);
        println!();
        println!("Share it with: subsheets share-message {} {}", result.sheet_url, result.count);
    })
}

pub async fn append_command(service: &SubscriptionService, sheet_id: &str, format: OutputFormat) -> bool {
    let response = with_spinner(
        "Copying spreadsheet and appending subscriptions...",
        service.copy_and_append_to_sheet(sheet_id),
    )
    .await;

    emit(format, &response, |result| {
        print_success(&format!(
            "Added {} new channels ({} already listed)",
            result.new_count, result.duplicates
        ));
        println!("  {}", result.sheet_url.bright_cyan());
        print_diagnostics(&result.diagnostics);
    })
}

pub async fn fetch_command(service: &SubscriptionService, sheet_id: &str, format: OutputFormat) -> bool {
    let response = with_spinner("Reading spreadsheet...", service.fetch_from_sheet(sheet_id)).await;

    emit(format, &response, |result| {
        for channel_id in &result.channel_ids {
            println!("{}", channel_id);
        }
        eprintln!("{} channel IDs", result.count);
    })
}

pub async fn import_command(
    service: &SubscriptionService,
    sheet_id: &str,
    yes: bool,
    format: OutputFormat,
) -> Result<bool> {
    if !yes && std::io::stdout().is_terminal() && format == OutputFormat::Text {
        let preview = with_spinner("Reading spreadsheet...", service.fetch_from_sheet(sheet_id)).await;
        let count = match &preview.data {
            Some(ids) if preview.success => ids.count,
            _ => return Ok(emit(format, &preview, |_| {})),
        };

        let confirmed = Confirm::new()
            .with_prompt(format!("Subscribe to {} channels?", count))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled");
            return Ok(true);
        }
    }

    let response = service
        .import_from_sheet_with_progress(sheet_id, |index, outcome| {
            if format == OutputFormat::Text {
                print_outcome(index, outcome);
            }
        })
        .await;

    let ok = emit(format, &response, |result| {
        println!();
        print_success(&format!(
            "{} subscribed, {} already subscribed, {} failed",
            result.succeeded, result.duplicates, result.failed
        ));
        if result.halted {
            print_warning(&format!(
                "Stopped early: quota exhausted with {} channels left",
                result.total - result.attempted
            ));
        }
    });

    let halted = response.data.as_ref().is_some_and(|result| result.halted);
    Ok(ok && !halted)
}

fn print_outcome(index: usize, outcome: &SubscribeOutcome) {
    let position = format!("[{}]", index + 1).dimmed();
    if outcome.success {
        println!("{} {} {}", position, "✓".bright_green(), outcome.channel_id);
    } else if outcome.skippable {
        println!(
            "{} {} {} {}",
            position,
            "-".yellow(),
            outcome.channel_id,
            outcome.error.as_deref().unwrap_or_default().dimmed()
        );
    } else {
        println!(
            "{} {} {} {}",
            position,
            "✗".bright_red(),
            outcome.channel_id,
            outcome.error.as_deref().unwrap_or_default()
        );
    }
}

pub async fn subscribe_command(service: &SubscriptionService, channel_id: &str, format: OutputFormat) -> bool {
    let outcome = with_spinner("Subscribing...", service.subscribe_to_channel(channel_id)).await;

    match format {
        OutputFormat::Json => print_json(&outcome),
        OutputFormat::Text if outcome.success => {
            print_success(&format!("Subscribed to {}", outcome.channel_id))
        }
        OutputFormat::Text => print_error(outcome.error.as_deref().unwrap_or("Subscribe failed")),
    }
    outcome.success
}

pub fn share_message_command(url: &str, count: u64, format: OutputFormat) -> bool {
    let message = share::share_message(url, count);
    match format {
        OutputFormat::Json => print_json(&json!({ "success": true, "message": message })),
        OutputFormat::Text => print!("{}", message),
    }
    true
}

pub async fn validate_command(service: &SubscriptionService, sheet_id: &str, format: OutputFormat) -> bool {
    let response = with_spinner("Opening spreadsheet...", service.validate_spreadsheet(sheet_id)).await;
    emit(format, &response, |info| {
        print_success(&format!("'{}' is accessible", info.title));
        println!("  {}", info.spreadsheet_id.dimmed());
    })
}
