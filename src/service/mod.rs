//! Caller-facing operations
//!
//! Every method returns a serialisable response and never an error: faults are
//! folded into `{success: false, error}`.

pub mod responses;

pub use responses::{
    AppendResult, CurrentUser, ExportResult, FetchedIdentifiers, ImportResult, Response,
    SpreadsheetInfo, SubscriptionCount, UserEmail,
};

use crate::api::ErrorKind;
use crate::config::Settings;
use crate::session::Session;
use crate::transfer::import::subscribe_one;
use crate::transfer::source::read_identifiers;
use crate::transfer::{ImportDriver, SubscribeOutcome, TransferError, TransferPipeline, share};
use log::{info, warn};
use std::time::Duration;

pub struct SubscriptionService {
    session: Session,
    settings: Settings,
}

impl SubscriptionService {
    pub fn new(session: Session, settings: Settings) -> Self {
        Self { session, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn pipeline(&self) -> TransferPipeline {
        TransferPipeline::new(self.session.clone(), self.settings.clone())
    }

    /// Email plus channel profile; the profile is dropped if it cannot be fetched
    pub async fn get_current_user(&self) -> Response<CurrentUser> {
        let email = match self.session.identity.email().await {
            Ok(email) => email,
            Err(error) => return Response::from(TransferError::from(error)),
        };

        let channel = match self.session.identity.channel_profile().await {
            Ok(profile) => Some(profile),
            Err(error) => {
                warn!("Channel profile unavailable ({}): {}", error.kind, error.message);
                None
            }
        };

        Response::ok(CurrentUser { email, channel })
    }

    pub async fn get_user_email(&self) -> Response<UserEmail> {
        self.session
            .identity
            .email()
            .await
            .map(|email| UserEmail { email })
            .into()
    }

    pub async fn export_subscriptions_to_sheet(&self) -> Response<ExportResult> {
        self.pipeline().export().await.map(ExportResult::from).into()
    }

    pub async fn copy_and_append_to_sheet(&self, source_sheet_id: &str) -> Response<AppendResult> {
        self.pipeline()
            .copy_and_append(source_sheet_id)
            .await
            .map(AppendResult::from)
            .into()
    }

    pub async fn get_subscription_count(&self) -> Response<SubscriptionCount> {
        self.pipeline()
            .count()
            .await
            .map(|count| SubscriptionCount { count })
            .into()
    }

    pub async fn fetch_from_sheet(&self, spreadsheet_id: &str) -> Response<FetchedIdentifiers> {
        read_identifiers(self.session.sink.as_ref(), spreadsheet_id)
            .await
            .map(FetchedIdentifiers::from)
            .into()
    }

    pub async fn subscribe_to_channel(&self, channel_id: &str) -> SubscribeOutcome {
        let channel_id = channel_id.trim();
        if channel_id.is_empty() {
            return SubscribeOutcome::failed(channel_id, ErrorKind::NoValidIdentifiers, "Channel ID is required");
        }
        subscribe_one(self.session.directory.as_ref(), channel_id).await
    }

    pub async fn import_from_sheet(&self, spreadsheet_id: &str) -> Response<ImportResult> {
        self.import_from_sheet_with_progress(spreadsheet_id, |_, _| {}).await
    }

    /// Read ids from the sheet and subscribe to each, reporting every outcome
    pub async fn import_from_sheet_with_progress<F>(
        &self,
        spreadsheet_id: &str,
        on_progress: F,
    ) -> Response<ImportResult>
    where
        F: FnMut(usize, &SubscribeOutcome),
    {
        let channel_ids = match read_identifiers(self.session.sink.as_ref(), spreadsheet_id).await {
            Ok(ids) => ids,
            Err(error) => return error.into(),
        };
        info!("Importing {} channels from {}", channel_ids.len(), spreadsheet_id);

        let report = ImportDriver::new(self.session.directory.as_ref())
            .with_interval(Duration::from_millis(self.settings.subscribe_interval_ms))
            .run(&channel_ids, on_progress)
            .await;

        Response::ok(ImportResult::from(report))
    }

    pub fn get_share_message(&self, sheet_url: &str, count: u64) -> String {
        share::share_message(sheet_url, count)
    }

    /// Check the document is reachable with the current credentials
    pub async fn validate_spreadsheet(&self, spreadsheet_id: &str) -> Response<SpreadsheetInfo> {
        self.session
            .sink
            .open(spreadsheet_id)
            .await
            .map(|handle| SpreadsheetInfo {
                spreadsheet_id: handle.spreadsheet_id,
                title: handle.title,
            })
            .into()
    }
}
