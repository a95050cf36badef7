//! Google Sheets v4 / Drive v3 tabular sink

use super::a1;
use super::client::GoogleClient;
use super::constants;
use super::error::{ApiError, ApiResult, ErrorKind};
use super::models::{Grid, SharingPolicy, SheetHandle, SheetRef};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

/// Spreadsheet storage the transfer pipeline writes into and reads from
#[async_trait]
pub trait TabularSink: Send + Sync {
    async fn create(&self, name: &str) -> ApiResult<SheetRef>;

    /// Copy a document into the caller's Drive under a new name
    async fn copy(&self, source_id: &str, new_name: &str) -> ApiResult<SheetRef>;

    async fn open(&self, id: &str) -> ApiResult<SheetHandle>;

    /// Index of the last row holding any value, 0 for an empty sheet
    async fn last_row(&self, handle: &SheetHandle) -> ApiResult<usize>;

    async fn read_range(&self, handle: &SheetHandle, range: &str) -> ApiResult<Grid>;

    /// Write `grid` with its top-left cell at (`start_row`, `start_col`), both 1-based
    async fn write_range(&self, handle: &SheetHandle, start_row: usize, start_col: usize, grid: &[Vec<Value>]) -> ApiResult<()>;

    /// Bold and shade row 1, freeze it, auto-size the first `columns` columns
    async fn format_header(&self, handle: &SheetHandle, columns: usize) -> ApiResult<()>;

    async fn set_sharing(&self, file_id: &str, policy: SharingPolicy) -> ApiResult<()>;
}

/// Title given to the single worksheet of an exported document
pub const DEFAULT_WORKSHEET: &str = "Subscriptions";

#[derive(Clone)]
pub struct SheetsClient {
    client: GoogleClient,
}

impl SheetsClient {
    pub fn new(client: GoogleClient) -> Self {
        Self { client }
    }

    async fn get_values(&self, spreadsheet_id: &str, range: &str) -> ApiResult<Grid> {
        let query = [
            ("majorDimension", "ROWS".to_string()),
            ("valueRenderOption", "UNFORMATTED_VALUE".to_string()),
        ];
        let response: ValueRange = self
            .client
            .get_json(
                "sheets",
                "values.get",
                &constants::values_endpoint(spreadsheet_id, range),
                &query,
            )
            .await?;
        Ok(response.values)
    }
}

#[async_trait]
impl TabularSink for SheetsClient {
    async fn create(&self, name: &str) -> ApiResult<SheetRef> {
        let body = json!({
            "properties": { "title": name },
            "sheets": [{ "properties": { "title": DEFAULT_WORKSHEET } }]
        });
        let created: CreatedSpreadsheet = self
            .client
            .post_json("sheets", "spreadsheets.create", constants::SHEETS_BASE, &[], &body)
            .await?;

        let url = created
            .spreadsheet_url
            .unwrap_or_else(|| constants::sheet_url(&created.spreadsheet_id));
        Ok(SheetRef {
            id: created.spreadsheet_id,
            url,
        })
    }

    async fn copy(&self, source_id: &str, new_name: &str) -> ApiResult<SheetRef> {
        let body = json!({ "name": new_name });
        let copied: DriveFile = self
            .client
            .post_json(
                "drive",
                "files.copy",
                &constants::drive_copy_endpoint(source_id),
                &[("fields", "id".to_string())],
                &body,
            )
            .await?;

        Ok(SheetRef {
            url: constants::sheet_url(&copied.id),
            id: copied.id,
        })
    }

    async fn open(&self, id: &str) -> ApiResult<SheetHandle> {
        let query = [(
            "fields",
            "spreadsheetId,properties.title,sheets.properties(sheetId,title)".to_string(),
        )];
        let spreadsheet: SpreadsheetMetadata = self
            .client
            .get_json("sheets", "spreadsheets.get", &constants::spreadsheet_endpoint(id), &query)
            .await?;

        let first = spreadsheet
            .sheets
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::new(ErrorKind::NotFound, format!("Spreadsheet {} has no worksheets", id)))?;

        Ok(SheetHandle {
            spreadsheet_id: spreadsheet.spreadsheet_id,
            title: spreadsheet.properties.map(|p| p.title).unwrap_or_default(),
            sheet_title: first.properties.title,
            sheet_id: first.properties.sheet_id,
        })
    }

    async fn last_row(&self, handle: &SheetHandle) -> ApiResult<usize> {
        // values.get trims trailing empty rows, so the row count is the last used row
        let values = self
            .get_values(&handle.spreadsheet_id, &a1::whole_sheet(&handle.sheet_title))
            .await?;
        Ok(values.len())
    }

    async fn read_range(&self, handle: &SheetHandle, range: &str) -> ApiResult<Grid> {
        self.get_values(&handle.spreadsheet_id, range).await
    }

    async fn write_range(&self, handle: &SheetHandle, start_row: usize, start_col: usize, grid: &[Vec<Value>]) -> ApiResult<()> {
        if grid.is_empty() {
            return Ok(());
        }
        let width = grid.iter().map(|row| row.len()).max().unwrap_or(1).max(1);
        let range = a1::range(
            &handle.sheet_title,
            start_row,
            start_col,
            start_row + grid.len() - 1,
            start_col + width - 1,
        );

        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": grid
        });
        let _: Value = self
            .client
            .put_json(
                "sheets",
                "values.update",
                &constants::values_endpoint(&handle.spreadsheet_id, &range),
                &[("valueInputOption", "RAW".to_string())],
                &body,
            )
            .await?;
        Ok(())
    }

    async fn format_header(&self, handle: &SheetHandle, columns: usize) -> ApiResult<()> {
        let body = header_format_requests(handle.sheet_id, columns);
        let _: Value = self
            .client
            .post_json(
                "sheets",
                "spreadsheets.batchUpdate",
                &constants::batch_update_endpoint(&handle.spreadsheet_id),
                &[],
                &body,
            )
            .await?;
        Ok(())
    }

    async fn set_sharing(&self, file_id: &str, policy: SharingPolicy) -> ApiResult<()> {
        let _: Value = self
            .client
            .post_json(
                "drive",
                "permissions.create",
                &constants::drive_permissions_endpoint(file_id),
                &[],
                &policy.permission_body(),
            )
            .await?;
        Ok(())
    }
}

/// batchUpdate body: header styling, frozen first row, auto-sized columns
fn header_format_requests(sheet_id: i64, columns: usize) -> Value {
    json!({
        "requests": [
            {
                "repeatCell": {
                    "range": {
                        "sheetId": sheet_id,
                        "startRowIndex": 0,
                        "endRowIndex": 1,
                        "startColumnIndex": 0,
                        "endColumnIndex": columns
                    },
                    "cell": {
                        "userEnteredFormat": {
                            "textFormat": { "bold": true },
                            "backgroundColor": { "red": 0.85, "green": 0.85, "blue": 0.85 }
                        }
                    },
                    "fields": "userEnteredFormat(textFormat,backgroundColor)"
                }
            },
            {
                "updateSheetProperties": {
                    "properties": {
                        "sheetId": sheet_id,
                        "gridProperties": { "frozenRowCount": 1 }
                    },
                    "fields": "gridProperties.frozenRowCount"
                }
            },
            {
                "autoResizeDimensions": {
                    "dimensions": {
                        "sheetId": sheet_id,
                        "dimension": "COLUMNS",
                        "startIndex": 0,
                        "endIndex": columns
                    }
                }
            }
        ]
    })
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Grid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedSpreadsheet {
    spreadsheet_id: String,
    spreadsheet_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpreadsheetMetadata {
    spreadsheet_id: String,
    properties: Option<SpreadsheetProperties>,
    #[serde(default)]
    sheets: Vec<Worksheet>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct Worksheet {
    properties: WorksheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorksheetProperties {
    #[serde(default)]
    sheet_id: i64,
    title: String,
}
