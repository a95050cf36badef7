//! Moving subscriptions between the directory and spreadsheets
//!
//! Export and copy-and-append live in [`pipeline`], the reverse direction in
//! [`source`] and [`import`].

pub mod batch;
pub mod diagnostics;
pub mod error;
pub mod import;
pub mod pager;
pub mod pipeline;
pub mod share;
pub mod source;

pub use diagnostics::{BestEffort, Diagnostic};
pub use error::TransferError;
pub use import::{ImportDriver, ImportFailure, ImportReport, SubscribeOutcome};
pub use pipeline::{AppendSummary, ExportSummary, TransferPipeline};
pub use source::ChannelId;

use crate::api::constants::limits;
use crate::config::Settings;

/// Paging and batching bounds for one transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferLimits {
    pub page_size: u32,
    pub max_pages: usize,
    pub batch_size: usize,
}

impl Default for TransferLimits {
    fn default() -> Self {
        Self {
            page_size: limits::PAGE_SIZE,
            max_pages: limits::MAX_PAGES,
            batch_size: limits::WRITE_BATCH_SIZE,
        }
    }
}

impl From<&Settings> for TransferLimits {
    fn from(settings: &Settings) -> Self {
        Self {
            page_size: settings.page_size.max(1),
            max_pages: settings.max_pages.max(1),
            batch_size: settings.write_batch_size.max(1),
        }
    }
}
