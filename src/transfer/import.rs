//! Subscribing the caller to a list of channels
//!
//! Each channel is one insert call. Duplicates and missing channels are skipped,
//! quota exhaustion stops the batch before any further call is made.

use super::source::ChannelId;
use crate::api::{ErrorKind, SubscriptionDirectory};
use log::{info, warn};
use serde::Serialize;
use std::time::Duration;

/// Result of one subscribe call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeOutcome {
    pub success: bool,
    pub channel_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skippable: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub critical: bool,
}

impl SubscribeOutcome {
    fn subscribed(channel_id: &str) -> Self {
        Self {
            success: true,
            channel_id: channel_id.to_string(),
            message: Some("Successfully subscribed".to_string()),
            error: None,
            error_kind: None,
            skippable: false,
            critical: false,
        }
    }

    pub fn failed(channel_id: &str, kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            channel_id: channel_id.to_string(),
            message: None,
            error: Some(error.into()),
            error_kind: Some(kind),
            skippable: kind.is_skippable(),
            critical: kind.is_critical(),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.error_kind == Some(ErrorKind::DuplicateSubscription)
    }
}

/// Subscribe to one channel and classify the outcome
pub async fn subscribe_one(directory: &dyn SubscriptionDirectory, channel_id: &str) -> SubscribeOutcome {
    match directory.insert(channel_id).await {
        Ok(()) => SubscribeOutcome::subscribed(channel_id),
        Err(error) => {
            let text = match error.kind {
                ErrorKind::DuplicateSubscription => "Already subscribed to this channel".to_string(),
                ErrorKind::QuotaExceeded => {
                    "API quota exceeded. Please try again tomorrow.".to_string()
                }
                ErrorKind::NotFound => "Channel not found or unavailable".to_string(),
                _ => error.message.clone(),
            };
            SubscribeOutcome::failed(channel_id, error.kind, text)
        }
    }
}

/// A channel that could not be subscribed to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    pub channel_id: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// Tally of an import pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub total: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub duplicates: usize,
    pub failures: Vec<ImportFailure>,
    pub halted: bool,
}

impl ImportReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Ids never attempted because the batch halted
    pub fn remaining(&self) -> usize {
        self.total - self.attempted
    }

    fn record(&mut self, outcome: &SubscribeOutcome) {
        self.attempted += 1;
        if outcome.success {
            self.succeeded += 1;
        } else if outcome.is_duplicate() {
            self.duplicates += 1;
        } else {
            self.failures.push(ImportFailure {
                channel_id: outcome.channel_id.clone(),
                kind: outcome.error_kind.unwrap_or(ErrorKind::GenericRemoteFailure),
                message: outcome.error.clone().unwrap_or_default(),
            });
        }
    }
}

/// Sequential subscribe loop
pub struct ImportDriver<'a> {
    directory: &'a dyn SubscriptionDirectory,
    interval: Duration,
}

impl<'a> ImportDriver<'a> {
    pub fn new(directory: &'a dyn SubscriptionDirectory) -> Self {
        Self {
            directory,
            interval: Duration::ZERO,
        }
    }

    /// Pause between consecutive calls
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Subscribe to every id in order, stopping at the first critical failure
    ///
    /// `on_progress` sees each outcome with its 0-based position.
    pub async fn run<F>(&self, channel_ids: &[ChannelId], mut on_progress: F) -> ImportReport
    where
        F: FnMut(usize, &SubscribeOutcome),
    {
        let mut report = ImportReport {
            total: channel_ids.len(),
            ..Default::default()
        };

        for (index, channel_id) in channel_ids.iter().enumerate() {
            if index > 0 && !self.interval.is_zero() {
                tokio::time::sleep(self.interval).await;
            }

            let outcome = subscribe_one(self.directory, channel_id.as_str()).await;
            report.record(&outcome);
            on_progress(index, &outcome);

            if outcome.critical {
                warn!(
                    "Stopping import after {} of {} channels: {}",
                    report.attempted,
                    report.total,
                    outcome.error.as_deref().unwrap_or_default()
                );
                report.halted = true;
                break;
            }
        }

        info!(
            "Import finished: {} subscribed, {} duplicates, {} failed, halted: {}",
            report.succeeded,
            report.duplicates,
            report.failed(),
            report.halted
        );
        report
    }
}
