mod common;

use common::{FakeDirectory, FakeIdentity, FakeSink, Fixture, duplicate_error, numbered, quota_error, subscriptions};
use serde_json::{Value, json};
use subsheets::SubscriptionService;
use subsheets::api::{ApiError, ErrorKind};
use subsheets::config::Settings;

fn service(fixture: &Fixture) -> SubscriptionService {
    SubscriptionService::new(fixture.session(), Settings::default())
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}

#[tokio::test]
async fn test_export_response() {
    let fixture = Fixture::new(FakeDirectory::new(numbered(3)), FakeSink::new());

    let response = to_json(&service(&fixture).export_subscriptions_to_sheet().await);

    assert_eq!(response["success"], json!(true));
    assert_eq!(response["count"], json!(3));
    assert_eq!(response["duplicates"], json!(0));
    assert_eq!(response["sheetId"], json!("created-1"));
    assert_eq!(
        response["sheetUrl"],
        json!("https://docs.google.com/spreadsheets/d/created-1/edit")
    );
}

#[tokio::test]
async fn test_export_with_no_subscriptions_fails() {
    let fixture = Fixture::new(FakeDirectory::new(Vec::new()), FakeSink::new());

    let response = to_json(&service(&fixture).export_subscriptions_to_sheet().await);

    assert_eq!(response["success"], json!(false));
    assert_eq!(response["errorKind"], json!("emptyResult"));
    assert!(response["error"].is_string());
    assert!(fixture.sink.created().is_empty());
}

#[tokio::test]
async fn test_copy_and_append_response() {
    let sink = FakeSink::new().with_column("source", &["UC1", "UC2"]);
    let fixture = Fixture::new(FakeDirectory::new(subscriptions(&["UC1", "UC3"])), sink);

    let response = to_json(&service(&fixture).copy_and_append_to_sheet("source").await);

    assert_eq!(response["success"], json!(true));
    assert_eq!(response["count"], json!(2));
    assert_eq!(response["newCount"], json!(1));
    assert_eq!(response["duplicates"], json!(1));
}

#[tokio::test]
async fn test_fetch_from_sheet_response() {
    let sink = FakeSink::new().with_column("sheet", &["", "UCabc", "  UCxyz  ", "XYZ123"]);
    let fixture = Fixture::new(FakeDirectory::default(), sink);

    let response = to_json(&service(&fixture).fetch_from_sheet("sheet").await);

    assert_eq!(
        response,
        json!({ "success": true, "channelIds": ["UCabc", "UCxyz"], "count": 2 })
    );
}

#[tokio::test]
async fn test_fetch_from_empty_sheet() {
    let sink = FakeSink::new().with_column("sheet", &[]);
    let fixture = Fixture::new(FakeDirectory::default(), sink);

    let response = service(&fixture).fetch_from_sheet("sheet").await;

    assert!(!response.success);
    assert_eq!(response.error_kind, Some(ErrorKind::EmptySheet));
}

#[tokio::test]
async fn test_subscribe_duplicate_response() {
    let directory = FakeDirectory::default().insert_error("UCdup", duplicate_error());
    let fixture = Fixture::new(directory, FakeSink::new());

    let response = to_json(&service(&fixture).subscribe_to_channel("UCdup").await);

    assert_eq!(response["success"], json!(false));
    assert_eq!(response["skippable"], json!(true));
    assert_eq!(response["error"], json!("Already subscribed to this channel"));
}

#[tokio::test]
async fn test_subscribe_quota_response() {
    let directory = FakeDirectory::default().insert_error("UCq", quota_error());
    let fixture = Fixture::new(directory, FakeSink::new());

    let response = to_json(&service(&fixture).subscribe_to_channel("UCq").await);

    assert_eq!(response["success"], json!(false));
    assert_eq!(response["critical"], json!(true));
}

#[tokio::test]
async fn test_subscribe_blank_id_makes_no_call() {
    let fixture = Fixture::new(FakeDirectory::default(), FakeSink::new());

    let outcome = service(&fixture).subscribe_to_channel("   ").await;

    assert!(!outcome.success);
    assert!(fixture.directory.inserted().is_empty());
}

#[tokio::test]
async fn test_import_from_sheet_halts_on_quota() {
    let sink = FakeSink::new().with_column("sheet", &["UC1", "UC2", "bad", "UC3", "UC4"]);
    let directory = FakeDirectory::default()
        .insert_error("UC2", duplicate_error())
        .insert_error("UC3", quota_error());
    let fixture = Fixture::new(directory, sink);

    let response = to_json(&service(&fixture).import_from_sheet("sheet").await);

    assert_eq!(response["success"], json!(true));
    assert_eq!(response["succeeded"], json!(1));
    assert_eq!(response["duplicates"], json!(1));
    assert_eq!(response["failed"], json!(1));
    assert_eq!(response["halted"], json!(true));
    assert_eq!(response["failures"][0]["channelId"], json!("UC3"));
    assert_eq!(response["failures"][0]["kind"], json!("quotaExceeded"));
    assert_eq!(fixture.directory.inserted(), vec!["UC1", "UC2", "UC3"]);
}

#[tokio::test]
async fn test_import_reports_progress() {
    let sink = FakeSink::new().with_column("sheet", &["UC1", "UC2"]);
    let fixture = Fixture::new(FakeDirectory::default(), sink);

    let mut progress = Vec::new();
    let response = service(&fixture)
        .import_from_sheet_with_progress("sheet", |index, outcome| {
            progress.push((index, outcome.channel_id.clone()))
        })
        .await;

    assert!(response.success);
    assert_eq!(progress, vec![(0, "UC1".to_string()), (1, "UC2".to_string())]);
}

#[tokio::test]
async fn test_import_from_invalid_sheet() {
    let sink = FakeSink::new().with_column("sheet", &["nope"]);
    let fixture = Fixture::new(FakeDirectory::default(), sink);

    let response = service(&fixture).import_from_sheet("sheet").await;

    assert!(!response.success);
    assert_eq!(response.error_kind, Some(ErrorKind::NoValidIdentifiers));
    assert!(fixture.directory.inserted().is_empty());
}

#[tokio::test]
async fn test_count_response() {
    let mut directory = FakeDirectory::new(numbered(2));
    directory.total_results = Some(77);
    let fixture = Fixture::new(directory, FakeSink::new());

    let response = to_json(&service(&fixture).get_subscription_count().await);

    assert_eq!(response, json!({ "success": true, "count": 77 }));
}

#[tokio::test]
async fn test_current_user_with_channel() {
    let fixture = Fixture::new(FakeDirectory::default(), FakeSink::new());

    let response = to_json(&service(&fixture).get_current_user().await);

    assert_eq!(response["success"], json!(true));
    assert_eq!(response["email"], json!("me@example.com"));
    assert_eq!(response["channel"]["title"], json!("My Channel"));
    assert_eq!(response["channel"]["subscriberCount"], json!(10));
}

#[tokio::test]
async fn test_current_user_without_channel() {
    let mut identity = FakeIdentity::new("me@example.com");
    identity.profile = Err(ApiError::from_response(404, ""));
    let fixture = Fixture::with_identity(FakeDirectory::default(), FakeSink::new(), identity);

    let response = to_json(&service(&fixture).get_current_user().await);

    assert_eq!(response, json!({ "success": true, "email": "me@example.com" }));
}

#[tokio::test]
async fn test_user_email_failure() {
    let mut identity = FakeIdentity::new("me@example.com");
    identity.email = Err(ApiError::from_response(401, "Invalid Credentials"));
    let fixture = Fixture::with_identity(FakeDirectory::default(), FakeSink::new(), identity);

    let response = service(&fixture).get_user_email().await;

    assert!(!response.success);
    assert_eq!(response.error_kind, Some(ErrorKind::Authorization));
}

#[tokio::test]
async fn test_validate_spreadsheet() {
    let sink = FakeSink::new().with_column("sheet", &["UC1"]);
    let fixture = Fixture::new(FakeDirectory::default(), sink);
    let service = service(&fixture);

    let response = to_json(&service.validate_spreadsheet("sheet").await);
    assert_eq!(
        response,
        json!({ "success": true, "spreadsheetId": "sheet", "title": "Document sheet" })
    );

    let response = service.validate_spreadsheet("missing").await;
    assert!(!response.success);
    assert_eq!(response.error_kind, Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_share_message() {
    let fixture = Fixture::new(FakeDirectory::default(), FakeSink::new());
    let service = service(&fixture);

    let message = service.get_share_message("https://docs.google.com/spreadsheets/d/ABC123/edit", 5);
    assert!(message.contains("ABC123"));

    let message = service.get_share_message("garbage", 5);
    assert!(message.contains("YOUR_SHEET_ID"));
}
