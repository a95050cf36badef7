//! API constants and endpoint builders for the Google services we talk to

/// OAuth 2.0 token endpoint used for the refresh-token grant
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// OpenID userinfo endpoint, returns the caller's email
pub const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// YouTube Data API v3 base path
pub const YOUTUBE_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Google Sheets API v4 base path
pub const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Google Drive API v3 base path
pub const DRIVE_BASE: &str = "https://www.googleapis.com/drive/v3/files";

/// Public document URL prefix, the spreadsheet id follows `/d/`
pub const SHEET_URL_PREFIX: &str = "https://docs.google.com/spreadsheets/d";

/// Canonical channel URL prefix
pub const CHANNEL_URL_PREFIX: &str = "https://www.youtube.com/channel";

/// Scopes the refresh token must have been granted
///
/// Full `drive` rather than `drive.file`: copy-and-append copies spreadsheets shared
/// by other people, which `drive.file` cannot see.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/youtube",
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/userinfo.email",
];

/// Transfer defaults
pub mod limits {
    /// Subscriptions requested per list call (API maximum)
    pub const PAGE_SIZE: u32 = 50;

    /// Pages fetched before the pipeline stops paginating
    pub const MAX_PAGES: usize = 20;

    /// Rows per values.update call
    pub const WRITE_BATCH_SIZE: usize = 100;
}

/// Standard headers
pub mod headers {
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Correlation header attached to every request for log matching
    pub const X_CORRELATION_ID: &str = "X-Correlation-Id";
}

/// Header row written at the top of every exported sheet
pub const EXPORT_HEADER: [&str; 3] = ["Channel ID", "Channel Name", "Channel URL"];

/// `subscriptions` collection endpoint
pub fn subscriptions_endpoint() -> String {
    format!("{}/subscriptions", YOUTUBE_BASE)
}

/// `channels` collection endpoint
pub fn channels_endpoint() -> String {
    format!("{}/channels", YOUTUBE_BASE)
}

/// Spreadsheet resource endpoint
pub fn spreadsheet_endpoint(spreadsheet_id: &str) -> String {
    format!("{}/{}", SHEETS_BASE, spreadsheet_id)
}

/// Values endpoint for a single A1 range
pub fn values_endpoint(spreadsheet_id: &str, range: &str) -> String {
    format!(
        "{}/{}/values/{}",
        SHEETS_BASE,
        spreadsheet_id,
        urlencoding::encode(range)
    )
}

/// batchUpdate endpoint used for formatting requests
pub fn batch_update_endpoint(spreadsheet_id: &str) -> String {
    format!("{}/{}:batchUpdate", SHEETS_BASE, spreadsheet_id)
}

/// Drive copy endpoint
pub fn drive_copy_endpoint(file_id: &str) -> String {
    format!("{}/{}/copy", DRIVE_BASE, file_id)
}

/// Drive permissions endpoint
pub fn drive_permissions_endpoint(file_id: &str) -> String {
    format!("{}/{}/permissions", DRIVE_BASE, file_id)
}

/// Browser URL for a spreadsheet
pub fn sheet_url(spreadsheet_id: &str) -> String {
    format!("{}/{}/edit", SHEET_URL_PREFIX, spreadsheet_id)
}

/// Canonical URL for a channel
pub fn channel_url(channel_id: &str) -> String {
    format!("{}/{}", CHANNEL_URL_PREFIX, channel_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_endpoint_encodes_range() {
        let url = values_endpoint("abc", "'Sheet 1'!A2:A");
        assert_eq!(
            url,
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/%27Sheet%201%27%21A2%3AA"
        );
    }

    #[test]
    fn test_urls() {
        assert_eq!(sheet_url("XYZ"), "https://docs.google.com/spreadsheets/d/XYZ/edit");
        assert_eq!(channel_url("UC1"), "https://www.youtube.com/channel/UC1");
        assert_eq!(drive_copy_endpoint("f1"), "https://www.googleapis.com/drive/v3/files/f1/copy");
    }

    #[test]
    fn test_scopes_allow_copying_shared_files() {
        assert!(SCOPES.contains(&"https://www.googleapis.com/auth/drive"));
        assert!(!SCOPES.contains(&"https://www.googleapis.com/auth/drive.file"));
    }
}
