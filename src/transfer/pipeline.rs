//! Export and copy-and-append
//!
//! Both operations fetch the caller's subscriptions (bounded, fail open), then write
//! them into a document the caller owns. Header formatting and the sharing change are
//! best-effort: their failures end up in the summary's diagnostics.

use super::batch::write_rows;
use super::diagnostics::{self, Diagnostic};
use super::error::TransferError;
use super::pager::{fetch, fetch_all};
use super::TransferLimits;
use crate::api::constants::EXPORT_HEADER;
use crate::api::models::cell_text;
use crate::api::{a1, ApiResult, SharingPolicy, SheetHandle, SheetRef, Subscription};
use crate::config::Settings;
use crate::session::Session;
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Outcome of exporting into a fresh document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub sheet: SheetRef,
    pub count: usize,
    /// Always 0; export does not dedupe
    pub duplicates: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of appending into a copy of an existing document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendSummary {
    pub sheet: SheetRef,
    /// Subscriptions fetched from the directory
    pub count: usize,
    /// Rows actually appended
    pub new_count: usize,
    pub duplicates: usize,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct TransferPipeline {
    session: Session,
    settings: Settings,
}

impl TransferPipeline {
    pub fn new(session: Session, settings: Settings) -> Self {
        Self { session, settings }
    }

    pub fn limits(&self) -> TransferLimits {
        TransferLimits::from(&self.settings)
    }

    /// Title for a document created today
    pub fn document_name(&self) -> String {
        format!(
            "{} {}",
            self.settings.export_title_prefix,
            chrono::Local::now().format("%Y-%m-%d")
        )
    }

    /// Export every subscription into a new spreadsheet
    pub async fn export(&self) -> Result<ExportSummary, TransferError> {
        let subscriptions = self.collect().await?;
        let sink = self.session.sink.as_ref();

        let sheet = sink.create(&self.document_name()).await?;
        info!("Created spreadsheet {}", sheet.id);
        let handle = sink.open(&sheet.id).await?;

        let mut diagnostics = Vec::new();
        self.write_header(&handle, &mut diagnostics).await?;
        let rows = to_rows(&subscriptions);
        let calls = write_rows(sink, &handle, 2, &rows, self.limits().batch_size).await?;
        debug!("Wrote {} rows in {} calls", rows.len(), calls);

        self.share(&sheet.id, &mut diagnostics).await;

        info!("Exported {} subscriptions to {}", subscriptions.len(), sheet.url);
        Ok(ExportSummary {
            sheet,
            count: subscriptions.len(),
            duplicates: 0,
            diagnostics,
        })
    }

    /// Copy `source_id` and append the subscriptions its column A does not list yet
    pub async fn copy_and_append(&self, source_id: &str) -> Result<AppendSummary, TransferError> {
        let subscriptions = self.collect().await?;
        let sink = self.session.sink.as_ref();

        let sheet = sink.copy(source_id, &self.document_name()).await?;
        info!("Copied {} to {}", source_id, sheet.id);
        let handle = sink.open(&sheet.id).await?;
        let last_row = sink.last_row(&handle).await?;

        let mut diagnostics = Vec::new();
        let mut seen = HashSet::new();
        let start_row = if last_row == 0 {
            self.write_header(&handle, &mut diagnostics).await?;
            2
        } else {
            if last_row >= 2 {
                let range = a1::range(&handle.sheet_title, 2, 1, last_row, 1);
                let existing = sink.read_range(&handle, &range).await?;
                seen.extend(
                    existing
                        .iter()
                        .filter_map(|row| row.first())
                        .filter_map(cell_text),
                );
            }
            last_row + 1
        };
        debug!("Copy already lists {} channel ids", seen.len());

        let fresh: Vec<&Subscription> = subscriptions
            .iter()
            .filter(|subscription| seen.insert(subscription.channel_id.trim().to_string()))
            .collect();
        let rows: Vec<Vec<Value>> = fresh.iter().map(|subscription| subscription.to_row()).collect();
        write_rows(sink, &handle, start_row, &rows, self.limits().batch_size).await?;

        self.share(&sheet.id, &mut diagnostics).await;

        let new_count = rows.len();
        info!(
            "Appended {} of {} subscriptions to {}",
            new_count,
            subscriptions.len(),
            sheet.url
        );
        Ok(AppendSummary {
            sheet,
            count: subscriptions.len(),
            new_count,
            duplicates: subscriptions.len() - new_count,
            diagnostics,
        })
    }

    /// Total subscriptions as reported by the directory
    ///
    /// Without `totalResults` the list is paged through, so the count is bounded by
    /// the page cap.
    pub async fn count(&self) -> ApiResult<u64> {
        let directory = self.session.directory.as_ref();
        let page = directory.list_page(1, None).await?;
        match page.total_results {
            Some(total) => Ok(total),
            None => {
                debug!("No totalResults in response, counting pages");
                Ok(fetch_all(directory, self.limits()).await.len() as u64)
            }
        }
    }

    async fn collect(&self) -> Result<Vec<Subscription>, TransferError> {
        let fetched = fetch(self.session.directory.as_ref(), self.limits()).await;
        let subscriptions = match (fetched.subscriptions.is_empty(), fetched.error) {
            // Nothing came back because the first page failed
            (true, Some(error)) => return Err(error.into()),
            (true, None) => return Err(TransferError::EmptyResult),
            (false, _) => fetched.subscriptions,
        };
        info!("Fetched {} subscriptions", subscriptions.len());
        Ok(subscriptions)
    }

    async fn write_header(
        &self,
        handle: &SheetHandle,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), TransferError> {
        let sink = self.session.sink.as_ref();
        let header: Vec<Vec<Value>> = vec![EXPORT_HEADER.iter().map(|title| Value::from(*title)).collect()];
        sink.write_range(handle, 1, 1, &header).await?;

        diagnostics::collect(
            diagnostics,
            "format_header",
            sink.format_header(handle, EXPORT_HEADER.len()).await,
        );
        Ok(())
    }

    async fn share(&self, file_id: &str, diagnostics: &mut Vec<Diagnostic>) {
        if !self.settings.share_publicly {
            debug!("Public sharing disabled, leaving {} private", file_id);
            return;
        }
        diagnostics::collect(
            diagnostics,
            "share",
            self.session
                .sink
                .set_sharing(file_id, SharingPolicy::AnyoneWithLinkReader)
                .await,
        );
    }
}

fn to_rows(subscriptions: &[Subscription]) -> Vec<Vec<Value>> {
    subscriptions.iter().map(Subscription::to_row).collect()
}
