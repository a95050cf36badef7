pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod service;
pub mod session;
pub mod transfer;

pub use service::SubscriptionService;
pub use session::Session;
