//! JSON-serialisable response bodies of the service boundary

use crate::api::{ChannelProfile, ErrorKind};
use crate::transfer::{AppendSummary, ChannelId, Diagnostic, ExportSummary, ImportFailure, ImportReport, TransferError};
use serde::Serialize;

/// `{success, ...data}` on success, `{success: false, error, errorKind}` otherwise
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl<T> Response<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_kind: None,
        }
    }

    pub fn fail(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            error_kind: Some(kind),
        }
    }
}

impl<T> From<TransferError> for Response<T> {
    fn from(error: TransferError) -> Self {
        Self::fail(error.kind(), error.to_string())
    }
}

impl<T, E: Into<TransferError>> From<Result<T, E>> for Response<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::from(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserEmail {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub sheet_url: String,
    pub sheet_id: String,
    pub count: usize,
    pub duplicates: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl From<ExportSummary> for ExportResult {
    fn from(summary: ExportSummary) -> Self {
        Self {
            sheet_url: summary.sheet.url,
            sheet_id: summary.sheet.id,
            count: summary.count,
            duplicates: summary.duplicates,
            diagnostics: summary.diagnostics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResult {
    pub sheet_url: String,
    pub sheet_id: String,
    pub count: usize,
    pub new_count: usize,
    pub duplicates: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl From<AppendSummary> for AppendResult {
    fn from(summary: AppendSummary) -> Self {
        Self {
            sheet_url: summary.sheet.url,
            sheet_id: summary.sheet.id,
            count: summary.count,
            new_count: summary.new_count,
            duplicates: summary.duplicates,
            diagnostics: summary.diagnostics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionCount {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedIdentifiers {
    pub channel_ids: Vec<ChannelId>,
    pub count: usize,
}

impl From<Vec<ChannelId>> for FetchedIdentifiers {
    fn from(channel_ids: Vec<ChannelId>) -> Self {
        Self {
            count: channel_ids.len(),
            channel_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub total: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub duplicates: usize,
    pub failed: usize,
    pub failures: Vec<ImportFailure>,
    pub halted: bool,
}

impl From<ImportReport> for ImportResult {
    fn from(report: ImportReport) -> Self {
        Self {
            failed: report.failed(),
            total: report.total,
            attempted: report.attempted,
            succeeded: report.succeeded,
            duplicates: report.duplicates,
            failures: report.failures,
            halted: report.halted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetInfo {
    pub spreadsheet_id: String,
    pub title: String,
}
