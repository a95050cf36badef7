pub mod app;
pub mod commands;
pub mod output;
pub mod ui;

pub use app::Cli;
