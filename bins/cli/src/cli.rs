//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use salesjournal_core::export::ExportFormat;

/// Output format flag.
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum Format {
    /// Delimited text.
    #[default]
    Csv,
    /// JSON array of rows.
    Json,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
        }
    }
}

/// Converts a monthly sales report into journal entries.
#[derive(Parser, Debug)]
#[command(name = "salesjournal", version, about)]
pub struct Cli {
    /// Client id; its account mapping is read from `{clients.dir}/{client}.toml`.
    #[arg(short = 'c', long)]
    pub client: String,

    /// Sales report workbook (.xlsx, .xls, .ods).
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Output file (stdout by default).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Journal code (overrides `journal.code`).
    #[arg(long)]
    pub journal_code: Option<String>,

    /// Posting label replacing `"{prefix} MM-YYYY"`.
    #[arg(long)]
    pub label: Option<String>,

    /// Posting date, YYYY-MM-DD (defaults to the last day of the report month).
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Name recorded in the run logs.
    #[arg(long)]
    pub operator: Option<String>,

    /// Exit with status 1 when debits and credits differ.
    #[arg(long)]
    pub strict: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,

    /// Directory holding `default.toml` and `{RUN_MODE}.toml`.
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_minimal_arguments() {
        let cli = Cli::try_parse_from(["salesjournal", "--client", "tabac", "--input", "ventes.xlsx"])
            .unwrap();
        assert_eq!(cli.client, "tabac");
        assert_eq!(cli.input, PathBuf::from("ventes.xlsx"));
        assert!(cli.output.is_none());
        assert!(matches!(cli.format, Format::Csv));
        assert!(!cli.strict);
        assert_eq!(cli.config_dir, PathBuf::from("config"));
    }

    #[test]
    fn test_all_arguments() {
        let cli = Cli::try_parse_from([
            "salesjournal",
            "-c",
            "tabac",
            "-i",
            "ventes.xlsx",
            "-o",
            "journal.json",
            "--format",
            "json",
            "--journal-code",
            "VT",
            "--label",
            "Ventes septembre",
            "--date",
            "2024-09-30",
            "--operator",
            "alice",
            "--strict",
            "--log-json",
        ])
        .unwrap();
        assert!(matches!(cli.format, Format::Json));
        assert_eq!(cli.journal_code.as_deref(), Some("VT"));
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2024, 9, 30));
        assert!(cli.strict);
        assert!(cli.log_json);
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let result = Cli::try_parse_from([
            "salesjournal",
            "--client",
            "tabac",
            "--input",
            "ventes.xlsx",
            "--date",
            "30/09/2024",
        ]);
        assert!(result.is_err());
    }
}
