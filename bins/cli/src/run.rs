//! One conversion, from workbook to journal file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;
use salesjournal_core::accounts::AccountMapping;
use salesjournal_core::export::{ExportError, ExportFormat, ExportOptions};
use salesjournal_core::journal::{JournalService, PostingOptions, RunContext};
use salesjournal_core::source::SourceReport;
use salesjournal_shared::{AppConfig, AppError};
use salesjournal_workbook::{WorkbookError, read_workbook};
use tracing::info;

use crate::cli::Cli;

/// Status returned by `--strict` runs whose journal does not balance.
const UNBALANCED_EXIT: u8 = 1;

/// Runs a conversion and returns the process status.
pub fn execute(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load_from(&cli.config_dir).context("loading configuration")?;

    let mapping: AccountMapping = config.clients.load(&cli.client)?;
    info!(client = %cli.client, families = mapping.families().len(), "client mapping loaded");

    let workbook = read_workbook(&cli.input).map_err(workbook_error)?;
    let report = SourceReport::from_workbook(&workbook, &config.source)
        .map_err(|e| AppError::Source(format!("{} ({})", e, e.error_code())))?;

    let options = PostingOptions {
        journal_code: cli
            .journal_code
            .clone()
            .unwrap_or_else(|| config.journal.code.clone()),
        label_prefix: config.journal.label_prefix.clone(),
        label: cli.label.clone(),
        date: cli.date,
    };
    let ctx = RunContext::new(operator(cli), cli.client.as_str(), mapping, options);

    let today = chrono::Local::now().date_naive();
    let run = JournalService::run(&ctx, &report, today);

    let export_options = ExportOptions::from_config(&config.export).map_err(export_error)?;
    let format = ExportFormat::from(cli.format);
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(AppError::from)
                .with_context(|| format!("creating {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            format
                .write(&mut writer, &run.entries, &export_options)
                .map_err(export_error)?;
            writer.flush().map_err(AppError::from)?;
            info!(run_id = %ctx.run_id, path = %path.display(), %format, "journal written");
        }
        None => {
            let stdout = io::stdout();
            format
                .write(stdout.lock(), &run.entries, &export_options)
                .map_err(export_error)?;
        }
    }

    eprintln!("{}", run.balance);

    if cli.strict && !run.balance.is_balanced() {
        return Ok(ExitCode::from(UNBALANCED_EXIT));
    }
    Ok(ExitCode::SUCCESS)
}

fn operator(cli: &Cli) -> String {
    cli.operator
        .clone()
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "unknown".to_string())
}

fn workbook_error(err: WorkbookError) -> AppError {
    match err {
        WorkbookError::NotFound(path) => {
            AppError::NotFound(format!("workbook {}", path.display()))
        }
        other => AppError::Source(format!("{other} ({})", other.error_code())),
    }
}

fn export_error(err: ExportError) -> AppError {
    match err {
        ExportError::InvalidOption(msg) => AppError::Validation(msg),
        ExportError::Io(io) => AppError::Io(io),
        other => AppError::Export(format!("{other} ({})", other.error_code())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use rust_decimal_macros::dec;
    use salesjournal_core::accounts::{AccountResolver, PaymentMethod};
    use salesjournal_shared::config::ClientsConfig;

    fn repo_config() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config")
    }

    #[test]
    fn test_repository_config_loads() {
        let config = AppConfig::load_from(&repo_config()).unwrap();
        assert_eq!(config.journal.code, "VE");
        assert_eq!(config.export.delimiter, ";");
        assert_eq!(config.source.sheets.vat, "ANALYSE TVA");
    }

    #[test]
    fn test_example_client_mapping() {
        let clients = ClientsConfig {
            dir: repo_config().join("clients"),
        };
        let mapping: AccountMapping = clients.load("example").unwrap();
        let resolver = AccountResolver::new(&mapping);

        assert_eq!(resolver.family("BOISSONS").as_str(), "707100000");
        assert_eq!(resolver.family("TABAC").as_str(), "707000000");
        assert_eq!(resolver.vat(dec!(0.055)).map(|a| a.as_str()), Some("445710060"));
        assert_eq!(resolver.vat(dec!(0.2)).map(|a| a.as_str()), Some("445710080"));
        let (method, account) = resolver.payment("CARTE BLEUE");
        assert_eq!(method, Some(PaymentMethod::Card));
        assert_eq!(account.as_str(), "411100003");
        assert_eq!(resolver.disbursement().as_str(), "467700000");
    }

    #[test]
    fn test_unknown_client_is_not_found() {
        let clients = ClientsConfig {
            dir: repo_config().join("clients"),
        };
        let err = clients.load::<AccountMapping>("nobody").unwrap_err();
        assert_eq!(err.exit_code(), 66);
    }

    #[test]
    fn test_workbook_errors_map_to_exit_codes() {
        let err = workbook_error(WorkbookError::NotFound(PathBuf::from("ventes.xlsx")));
        assert_eq!(err.exit_code(), 66);
    }

    #[test]
    fn test_export_errors_map_to_exit_codes() {
        let err = export_error(ExportError::InvalidOption("bad delimiter".into()));
        assert_eq!(err.exit_code(), 64);

        let err = export_error(ExportError::Io(io::Error::other("disk full")));
        assert_eq!(err.exit_code(), 74);
    }
}
