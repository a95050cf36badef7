use once_cell::sync::Lazy;
use regex::Regex;

/// Shown in place of the document id when the URL has none
pub const PLACEHOLDER_SHEET_ID: &str = "YOUR_SHEET_ID";

static SHEET_ID_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)").ok());

/// Document id embedded in a spreadsheet URL
pub fn extract_sheet_id(url: &str) -> Option<&str> {
    SHEET_ID_PATTERN
        .as_ref()?
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// Text a user can paste to share an export with friends
pub fn share_message(sheet_url: &str, count: u64) -> String {
    let sheet_id = extract_sheet_id(sheet_url).unwrap_or(PLACEHOLDER_SHEET_ID);
    format!(
        "I just exported my {count} YouTube subscriptions!\n\
         \n\
         View the list: {sheet_url}\n\
         \n\
         To subscribe to all of these channels yourself, run:\n\
         \n\
         \x20   subsheets import {sheet_id}\n"
    )
}
