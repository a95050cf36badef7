//! In-memory stand-ins for the Google services

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use subsheets::Session;
use subsheets::api::{
    ApiError, ApiResult, ChannelProfile, ErrorKind, Grid, IdentityProvider, SharingPolicy,
    SheetHandle, SheetRef, Subscription, SubscriptionDirectory, SubscriptionPage, TabularSink,
};

pub fn subscriptions(ids: &[&str]) -> Vec<Subscription> {
    ids.iter()
        .map(|id| Subscription::new(*id, format!("Channel {}", id)))
        .collect()
}

pub fn numbered(count: usize) -> Vec<Subscription> {
    (0..count)
        .map(|i| Subscription::new(format!("UC{:04}", i), format!("Channel {}", i)))
        .collect()
}

pub fn quota_error() -> ApiError {
    ApiError::from_response(
        403,
        r#"{"error":{"code":403,"message":"quota","errors":[{"reason":"quotaExceeded"}]}}"#,
    )
}

pub fn duplicate_error() -> ApiError {
    ApiError::from_response(
        400,
        r#"{"error":{"code":400,"message":"dup","errors":[{"reason":"subscriptionDuplicate"}]}}"#,
    )
}

#[derive(Default)]
pub struct FakeDirectory {
    pub subscriptions: Vec<Subscription>,
    pub total_results: Option<u64>,
    /// 0-based list call that fails
    pub fail_on_call: Option<usize>,
    /// Error returned by the failing call, a 500 when unset
    pub list_error: Option<ApiError>,
    pub insert_errors: HashMap<String, ApiError>,
    pub list_calls: Mutex<Vec<(u32, Option<String>)>>,
    pub inserted: Mutex<Vec<String>>,
}

impl FakeDirectory {
    pub fn new(subscriptions: Vec<Subscription>) -> Self {
        Self {
            subscriptions,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn failing_with(mut self, call: usize, error: ApiError) -> Self {
        self.fail_on_call = Some(call);
        self.list_error = Some(error);
        self
    }

    pub fn insert_error(mut self, channel_id: &str, error: ApiError) -> Self {
        self.insert_errors.insert(channel_id.to_string(), error);
        self
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    pub fn inserted(&self) -> Vec<String> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriptionDirectory for FakeDirectory {
    async fn list_page(&self, page_size: u32, page_token: Option<&str>) -> ApiResult<SubscriptionPage> {
        let call = {
            let mut calls = self.list_calls.lock().unwrap();
            calls.push((page_size, page_token.map(str::to_string)));
            calls.len() - 1
        };
        if self.fail_on_call == Some(call) {
            return Err(self
                .list_error
                .clone()
                .unwrap_or_else(|| ApiError::from_response(500, "backend error")));
        }

        let offset: usize = page_token.map(|t| t.parse().unwrap()).unwrap_or(0);
        let end = (offset + page_size as usize).min(self.subscriptions.len());
        let items = self.subscriptions[offset.min(end)..end].to_vec();
        let next_page_token = (end < self.subscriptions.len()).then(|| end.to_string());

        Ok(SubscriptionPage {
            items,
            next_page_token,
            total_results: self.total_results,
        })
    }

    async fn insert(&self, channel_id: &str) -> ApiResult<()> {
        self.inserted.lock().unwrap().push(channel_id.to_string());
        match self.insert_errors.get(channel_id) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub spreadsheet_id: String,
    pub start_row: usize,
    pub start_col: usize,
    pub rows: Grid,
}

#[derive(Default)]
pub struct FakeSink {
    pub documents: Mutex<HashMap<String, Grid>>,
    pub created: Mutex<Vec<String>>,
    pub copied: Mutex<Vec<(String, String)>>,
    pub writes: Mutex<Vec<Write>>,
    pub shared: Mutex<Vec<String>>,
    pub formatted: Mutex<Vec<String>>,
    pub sharing_error: Option<ApiError>,
    pub format_error: Option<ApiError>,
}

impl FakeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, id: &str, rows: Grid) -> Self {
        self.documents.lock().unwrap().insert(id.to_string(), rows);
        self
    }

    /// A document whose first column holds `cells`, below a header row
    pub fn with_column(self, id: &str, cells: &[&str]) -> Self {
        let mut rows = vec![vec![json!("Channel ID")]];
        rows.extend(cells.iter().map(|cell| vec![json!(cell)]));
        self.with_document(id, rows)
    }

    pub fn failing_sharing(mut self, error: ApiError) -> Self {
        self.sharing_error = Some(error);
        self
    }

    pub fn failing_format(mut self, error: ApiError) -> Self {
        self.format_error = Some(error);
        self
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    /// Writes that start below the header row
    pub fn data_writes(&self) -> Vec<Write> {
        self.writes().into_iter().filter(|w| w.start_row > 1).collect()
    }

    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn document(&self, id: &str) -> Option<Grid> {
        self.documents.lock().unwrap().get(id).cloned()
    }

    pub fn column_a(&self, id: &str) -> Vec<String> {
        self.document(id)
            .unwrap_or_default()
            .iter()
            .map(|row| row.first().and_then(Value::as_str).unwrap_or_default().to_string())
            .collect()
    }

    fn next_id(&self, prefix: &str) -> String {
        let documents = self.documents.lock().unwrap();
        format!("{}-{}", prefix, documents.len() + 1)
    }
}

fn url(id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}/edit", id)
}

/// Row numbers of an A1 range such as `'Sheet'!A2:A10`
fn range_rows(range: &str) -> (usize, usize) {
    let cells = range.rsplit('!').next().unwrap();
    let mut bounds = cells.split(':').map(|cell| {
        cell.chars()
            .filter(char::is_ascii_digit)
            .collect::<String>()
            .parse::<usize>()
            .unwrap_or(usize::MAX)
    });
    let start = bounds.next().unwrap();
    let end = bounds.next().unwrap_or(start);
    (start, end)
}

#[async_trait]
impl TabularSink for FakeSink {
    async fn create(&self, name: &str) -> ApiResult<SheetRef> {
        let id = self.next_id("created");
        self.created.lock().unwrap().push(name.to_string());
        self.documents.lock().unwrap().insert(id.clone(), Vec::new());
        Ok(SheetRef { url: url(&id), id })
    }

    async fn copy(&self, source_id: &str, new_name: &str) -> ApiResult<SheetRef> {
        let source = self
            .document(source_id)
            .ok_or_else(|| ApiError::new(ErrorKind::NotFound, "File not found"))?;
        let id = self.next_id("copy");
        self.copied
            .lock()
            .unwrap()
            .push((source_id.to_string(), new_name.to_string()));
        self.documents.lock().unwrap().insert(id.clone(), source);
        Ok(SheetRef { url: url(&id), id })
    }

    async fn open(&self, id: &str) -> ApiResult<SheetHandle> {
        if self.document(id).is_none() {
            return Err(ApiError::from_response(404, "Requested entity was not found."));
        }
        Ok(SheetHandle {
            spreadsheet_id: id.to_string(),
            title: format!("Document {}", id),
            sheet_title: "Sheet1".to_string(),
            sheet_id: 0,
        })
    }

    async fn last_row(&self, handle: &SheetHandle) -> ApiResult<usize> {
        Ok(self.document(&handle.spreadsheet_id).unwrap_or_default().len())
    }

    async fn read_range(&self, handle: &SheetHandle, range: &str) -> ApiResult<Grid> {
        let grid = self.document(&handle.spreadsheet_id).unwrap_or_default();
        let (start, end) = range_rows(range);
        Ok(grid
            .into_iter()
            .enumerate()
            .filter(|(index, _)| index + 1 >= start && index + 1 <= end)
            .map(|(_, row)| row.into_iter().take(1).collect())
            .collect())
    }

    async fn write_range(
        &self,
        handle: &SheetHandle,
        start_row: usize,
        start_col: usize,
        grid: &[Vec<Value>],
    ) -> ApiResult<()> {
        self.writes.lock().unwrap().push(Write {
            spreadsheet_id: handle.spreadsheet_id.clone(),
            start_row,
            start_col,
            rows: grid.to_vec(),
        });

        let mut documents = self.documents.lock().unwrap();
        let document = documents.entry(handle.spreadsheet_id.clone()).or_default();
        for (offset, row) in grid.iter().enumerate() {
            let index = start_row - 1 + offset;
            if document.len() <= index {
                document.resize(index + 1, Vec::new());
            }
            document[index] = row.clone();
        }
        Ok(())
    }

    async fn format_header(&self, handle: &SheetHandle, _columns: usize) -> ApiResult<()> {
        if let Some(error) = &self.format_error {
            return Err(error.clone());
        }
        self.formatted.lock().unwrap().push(handle.spreadsheet_id.clone());
        Ok(())
    }

    async fn set_sharing(&self, file_id: &str, _policy: SharingPolicy) -> ApiResult<()> {
        if let Some(error) = &self.sharing_error {
            return Err(error.clone());
        }
        self.shared.lock().unwrap().push(file_id.to_string());
        Ok(())
    }
}

pub struct FakeIdentity {
    pub email: ApiResult<String>,
    pub profile: ApiResult<ChannelProfile>,
}

impl FakeIdentity {
    pub fn new(email: &str) -> Self {
        Self {
            email: Ok(email.to_string()),
            profile: Ok(ChannelProfile {
                id: "UCme".to_string(),
                title: "My Channel".to_string(),
                subscriber_count: Some(10),
                avatar_url: None,
            }),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn email(&self) -> ApiResult<String> {
        self.email.clone()
    }

    async fn channel_profile(&self) -> ApiResult<ChannelProfile> {
        self.profile.clone()
    }
}

pub struct Fixture {
    pub directory: Arc<FakeDirectory>,
    pub sink: Arc<FakeSink>,
    pub identity: Arc<FakeIdentity>,
}

impl Fixture {
    pub fn new(directory: FakeDirectory, sink: FakeSink) -> Self {
        Self::with_identity(directory, sink, FakeIdentity::new("me@example.com"))
    }

    pub fn with_identity(directory: FakeDirectory, sink: FakeSink, identity: FakeIdentity) -> Self {
        Self {
            directory: Arc::new(directory),
            sink: Arc::new(sink),
            identity: Arc::new(identity),
        }
    }

    pub fn session(&self) -> Session {
        Session::new(self.directory.clone(), self.sink.clone(), self.identity.clone())
    }
}
