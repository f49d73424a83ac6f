//! Application configuration management.
//!
//! Settings come from `config/default.toml`, then `config/{RUN_MODE}.toml`,
//! then `SALESJOURNAL__*` environment variables. Per-client account mappings
//! live in their own TOML files under [`ClientsConfig::dir`].

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Journal posting defaults.
    pub journal: JournalConfig,
    /// Export file settings.
    pub export: ExportConfig,
    /// Source workbook layout.
    pub source: SourceConfig,
    /// Per-client configuration store.
    pub clients: ClientsConfig,
}

/// Journal posting defaults, adjustable per run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Journal code written on every line.
    pub code: String,
    /// Prefix of the generated posting label (`"{prefix} MM-YYYY"`).
    pub label_prefix: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            code: "VE".to_string(),
            label_prefix: "CA".to_string(),
        }
    }
}

/// Export file settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Field delimiter (a single ASCII character).
    pub delimiter: String,
    /// Decimal separator used for amounts (a single character).
    pub decimal_separator: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
            decimal_separator: ",".to_string(),
        }
    }
}

impl ExportConfig {
    /// Returns the delimiter as a byte for the CSV writer.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the delimiter is not one ASCII character.
    pub fn delimiter_byte(&self) -> AppResult<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(AppError::Validation(format!(
                "export.delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ))),
        }
    }

    /// Returns the decimal separator character.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the separator is not exactly one character.
    pub fn decimal_char(&self) -> AppResult<char> {
        let mut chars = self.decimal_separator.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(AppError::Validation(format!(
                "export.decimal_separator must be a single character, got {:?}",
                self.decimal_separator
            ))),
        }
    }
}

/// Source workbook layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Names of the four report sheets.
    pub sheets: SheetNames,
    /// Cell holding the reporting period on the family-sales sheet.
    pub period_cell: CellRef,
}

/// Names of the four report sheets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    /// Family sales analysis.
    pub families: String,
    /// VAT analysis.
    pub vat: String,
    /// Cash drawer receipts.
    pub drawer: String,
    /// Miscellaneous disbursements.
    pub disbursements: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            families: "ANALYSE FAMILLES".to_string(),
            vat: "ANALYSE TVA".to_string(),
            drawer: "Solde tiroir".to_string(),
            disbursements: "Point comptable".to_string(),
        }
    }
}

/// A 1-based cell position (`row = 1, column = 1` is `A1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CellRef {
    /// Row number, starting at 1.
    pub row: usize,
    /// Column number, starting at 1.
    pub column: usize,
}

impl Default for CellRef {
    fn default() -> Self {
        Self { row: 1, column: 1 }
    }
}

impl CellRef {
    /// Returns the zero-based `(row, column)` indices.
    #[must_use]
    pub fn indices(&self) -> (usize, usize) {
        (self.row.saturating_sub(1), self.column.saturating_sub(1))
    }
}

/// Per-client configuration store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientsConfig {
    /// Directory holding one `{client}.toml` file per client.
    pub dir: PathBuf,
}

impl Default for ClientsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("config/clients"),
        }
    }
}

impl ClientsConfig {
    /// Returns the configuration file path for a client.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the client id is empty or contains
    /// anything other than ASCII letters, digits, `-` and `_`.
    pub fn path_for(&self, client: &str) -> AppResult<PathBuf> {
        let valid = !client.is_empty()
            && client
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AppError::Validation(format!("invalid client id: {client:?}")));
        }
        Ok(self.dir.join(format!("{client}.toml")))
    }

    /// Loads and deserializes a client's configuration file.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the client has no file, and `Config` when the
    /// file cannot be parsed into `T`.
    pub fn load<T: DeserializeOwned>(&self, client: &str) -> AppResult<T> {
        let path = self.path_for(client)?;
        if !path.is_file() {
            return Err(AppError::NotFound(format!(
                "no configuration for client {client} at {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_path()).format(config::FileFormat::Toml))
            .build()?;

        settings.try_deserialize().map_err(|e| {
            AppError::Config(format!("client {client} ({}): {e}", path.display()))
        })
    }
}

impl AppConfig {
    /// Loads configuration from the `config/` directory and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> AppResult<Self> {
        Self::load_from(Path::new("config"))
    }

    /// Loads configuration from the given directory and environment.
    ///
    /// Missing files are not an error; every setting has a default.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed or a value is invalid.
    pub fn load_from(config_dir: &Path) -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::from(config_dir.join("default")).required(false))
            .add_source(config::File::from(config_dir.join(run_mode)).required(false))
            .add_source(config::Environment::with_prefix("SALESJOURNAL").separator("__"))
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Checks values that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns a validation error describing the first invalid value.
    pub fn validate(&self) -> AppResult<()> {
        self.export.delimiter_byte()?;
        self.export.decimal_char()?;
        if self.journal.code.trim().is_empty() {
            return Err(AppError::Validation("journal.code must not be empty".into()));
        }
        if self.source.period_cell.row == 0 || self.source.period_cell.column == 0 {
            return Err(AppError::Validation(
                "source.period_cell row and column start at 1".into(),
            ));
        }
        Ok(())
    }
}
