//! Bounded subscription paging
//!
//! [`pages`] is a lazy stream that yields at most `max_pages` pages and ends after
//! the first error. Each call starts from the first page again.

use super::TransferLimits;
use crate::api::{ApiError, ApiResult, Subscription, SubscriptionDirectory};
use futures::stream::{self, Stream, StreamExt};
use log::{debug, warn};

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Stream of subscription pages, capped at `limits.max_pages`
pub fn pages<'a>(
    directory: &'a dyn SubscriptionDirectory,
    limits: TransferLimits,
) -> impl Stream<Item = ApiResult<Vec<Subscription>>> + 'a {
    stream::unfold(Cursor::Start, move |cursor| async move {
        let token = match cursor {
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
            Cursor::Done => return None,
        };

        match directory.list_page(limits.page_size, token.as_deref()).await {
            Ok(page) => {
                let next = match page.next_page_token {
                    Some(token) => Cursor::Next(token),
                    None => Cursor::Done,
                };
                Some((Ok(page.items), next))
            }
            Err(error) => Some((Err(error), Cursor::Done)),
        }
    })
    .take(limits.max_pages)
}

/// Subscriptions gathered by [`fetch`] and the error that ended paging early, if any
#[derive(Debug, Default)]
pub struct Fetched {
    pub subscriptions: Vec<Subscription>,
    pub error: Option<ApiError>,
}

/// Collect every page, keeping what was fetched before an error
pub async fn fetch(directory: &dyn SubscriptionDirectory, limits: TransferLimits) -> Fetched {
    let mut stream = Box::pin(pages(directory, limits));
    let mut fetched = Fetched::default();
    let mut page_count = 0;

    while let Some(page) = stream.next().await {
        match page {
            Ok(items) => {
                page_count += 1;
                debug!("Fetched page {} with {} subscriptions", page_count, items.len());
                fetched.subscriptions.extend(items);
            }
            Err(error) => {
                warn!(
                    "Subscription paging stopped after {} pages ({}): {}",
                    page_count, error.kind, error.message
                );
                fetched.error = Some(error);
                break;
            }
        }
    }

    if page_count == limits.max_pages {
        debug!("Reached page cap of {}", limits.max_pages);
    }

    fetched
}

/// Like [`fetch`], dropping the error
pub async fn fetch_all(directory: &dyn SubscriptionDirectory, limits: TransferLimits) -> Vec<Subscription> {
    fetch(directory, limits).await.subscriptions
}
