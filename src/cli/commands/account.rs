use crate::cli::output::{OutputFormat, emit};
use crate::cli::ui::with_spinner;
use crate::service::SubscriptionService;
use colored::*;

pub async fn whoami_command(service: &SubscriptionService, format: OutputFormat) -> bool {
    let response = with_spinner("Looking up account...", service.get_current_user()).await;
    emit(format, &response, |user| {
        println!("{} {}", "Email:".bold(), user.email);
        match &user.channel {
            Some(channel) => {
                println!("{} {} ({})", "Channel:".bold(), channel.title, channel.id.dimmed());
                if let Some(count) = channel.subscriber_count {
                    println!("{} {}", "Subscribers:".bold(), count);
                }
            }
            None => println!("{} {}", "Channel:".bold(), "none".dimmed()),
        }
    })
}

pub async fn email_command(service: &SubscriptionService, format: OutputFormat) -> bool {
    let response = with_spinner("Looking up account...", service.get_user_email()).await;
    emit(format, &response, |user| println!("{}", user.email))
}

pub async fn count_command(service: &SubscriptionService, format: OutputFormat) -> bool {
    let response = with_spinner("Counting subscriptions...", service.get_subscription_count()).await;
    emit(format, &response, |result| {
        println!("You are subscribed to {} channels", result.count.to_string().bright_cyan())
    })
}
