//! Google API layer
//!
//! Thin clients over the YouTube Data API (subscription directory, identity) and the
//! Sheets/Drive APIs (tabular sink). Every remote failure leaves this module as an
//! [`ApiError`] with a classified [`ErrorKind`].

pub mod a1;
pub mod auth;
pub mod client;
pub mod constants;
pub mod error;
pub mod logging;
pub mod manager;
pub mod models;
pub mod sheets;
pub mod youtube;

pub use auth::AuthManager;
pub use client::GoogleClient;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use logging::{ApiLogger, LogLevel, MonitoringConfig, OperationContext, OperationMetrics};
pub use manager::ClientManager;
pub use models::{
    ChannelProfile, CredentialSet, Grid, SharingPolicy, SheetHandle, SheetRef, Subscription,
    SubscriptionPage, TokenInfo,
};
pub use sheets::{SheetsClient, TabularSink};
pub use youtube::{IdentityProvider, SubscriptionDirectory, YouTubeClient};
