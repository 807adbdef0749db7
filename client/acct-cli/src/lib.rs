//! acct - account session CLI
//!
//! Exposes the command runner so it can be exercised without a terminal.

pub mod app;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod messages;
pub mod prompt_provider;


pub use app::{execute, home_view, render};
pub use cli::Cli;
pub use commands::Commands;
pub use error::{CliError, Result as CliResult};
pub use prompt_provider::PromptProvider;
