//! Channel identifiers read from a spreadsheet's first column

use super::TransferError;
use crate::api::models::cell_text;
use crate::api::{Grid, TabularSink, a1};
use log::{debug, info};
use serde::Serialize;
use std::fmt;

/// Prefixes of channel ids we accept; `HC` is the legacy form
pub const VALID_PREFIXES: [&str; 2] = ["UC", "HC"];

/// A trimmed channel id starting with `UC` or `HC`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if VALID_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix)) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Valid ids from the first cell of each row, in row order
pub fn extract_identifiers(grid: &Grid) -> Vec<ChannelId> {
    grid.iter()
        .filter_map(|row| row.first())
        .filter_map(cell_text)
        .filter_map(|text| ChannelId::parse(&text))
        .collect()
}

/// Read column A (below the header) of a spreadsheet's first worksheet
pub async fn read_identifiers(
    sink: &dyn TabularSink,
    spreadsheet_id: &str,
) -> Result<Vec<ChannelId>, TransferError> {
    let handle = sink.open(spreadsheet_id).await?;
    let last_row = sink.last_row(&handle).await?;
    debug!("Sheet '{}' has {} rows", handle.sheet_title, last_row);

    if last_row < 2 {
        return Err(TransferError::EmptySheet);
    }

    let range = a1::range(&handle.sheet_title, 2, 1, last_row, 1);
    let grid = sink.read_range(&handle, &range).await?;
    let identifiers = extract_identifiers(&grid);

    if identifiers.is_empty() {
        return Err(TransferError::NoValidIdentifiers);
    }

    info!(
        "Read {} valid channel ids from {} data rows of {}",
        identifiers.len(),
        last_row - 1,
        spreadsheet_id
    );
    Ok(identifiers)
}
