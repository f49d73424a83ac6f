//! Salesjournal command-line converter
//!
//! Reads a sales report workbook and writes the client's journal entries.

mod cli;
mod run;

use std::process::ExitCode;

use clap::Parser;
use salesjournal_shared::AppError;
use tracing::error;
use tracing_subscriber::fmt;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match run::execute(&cli) {
        Ok(code) => code,
        Err(err) => {
            let app_error = err.downcast_ref::<AppError>();
            error!(
                code = app_error.map_or("INTERNAL_ERROR", AppError::error_code),
                "{err:#}"
            );
            eprintln!("error: {err:#}");
            let status = app_error.map_or(70, AppError::exit_code);
            ExitCode::from(u8::try_from(status).unwrap_or(1))
        }
    }
}

/// Logs go to stderr so that stdout carries only the journal.
fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "salesjournal=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}
