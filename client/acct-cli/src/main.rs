//! acct - account session CLI
//!
//! # Examples
//!
//! ```bash
//! # Create an account
//! acct register --email a@x.com --password 'Abc12345!' --confirm-password 'Abc12345!' \
//!     --name "Ali Hassan" --name-arabic "علي حسن" --birth-date 1990-01-01 --phone 0501234567
//!
//! # Who is signed in?
//! acct whoami --pretty
//! ```

use acct_cli::{Cli, CliResult, PromptProvider, execute, logger, messages, render};
use acct_config::Config;
use acct_firebase::FirebaseBackend;
use acct_gateway::{AuthGateway, GatewayOptions};
use acct_session::SessionStore;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{debug, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let gateway = match bootstrap(&cli).await {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match execute(&gateway, &cli.command, cli.pretty).await {
        Ok(value) => match render(&value, cli.pretty) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("{}", messages::failure_message(&cli.command, &e));
            eprintln!("Error [{}]: {e}", e.error_code());
            ExitCode::FAILURE
        }
    }
}

/// Load configuration, start logging and resume any saved session.
async fn bootstrap(cli: &Cli) -> CliResult<AuthGateway> {
    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;
    config.log_summary();

    let backend = Arc::new(FirebaseBackend::new(
        &config.firebase,
        config.session_path()?,
    )?);

    match backend.restore().await {
        Ok(Some(user)) => debug!("Resumed session of {}", user.uid),
        Ok(None) => debug!("No saved session"),
        Err(e) => warn!("Saved session could not be resumed: {e}"),
    }

    let id_token = match &cli.command {
        acct_cli::Commands::SignInGoogle { id_token } => id_token.clone(),
        _ => None,
    };

    Ok(AuthGateway::new(
        backend.clone(),
        backend,
        Arc::new(PromptProvider::new(id_token)),
        Arc::new(SessionStore::new()),
        GatewayOptions::from_config(&config),
    ))
}
