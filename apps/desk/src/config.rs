//! # Desk Configuration
//!
//! Settings for one installation: who the seller is, how invoices are
//! numbered and displayed, where data and exports go.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults                 DeskConfig::default()                      │
//! │  2. Config file              <config dir>/config.toml                   │
//! │                              (or the path passed to load)               │
//! │  3. Environment variables    GEO_BUSINESS_NAME, GEO_CURRENCY_SYMBOL,    │
//! │                              GEO_INVOICE_PREFIX, GEO_DATABASE_PATH,     │
//! │                              GEO_EXPORT_DIR                             │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! [business]
//! name = "Geo Fashion"
//! address = "123 Fashion Street, Dhaka, Bangladesh"
//! phone = "+880 1712 345678"
//! email = "contact@geofashion.com"
//!
//! [invoice]
//! prefix = "INV-"
//! next_number = 1001
//! default_due_days = 15
//!
//! [currency]
//! symbol = "৳"
//! code = "BDT"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use geo_core::numbering::{DEFAULT_INVOICE_PREFIX, DEFAULT_NEXT_NUMBER};
use geo_core::validation::validate_invoice_number;
use geo_core::{BusinessProfile, CurrencyFormat, InvoiceNumbering, DEFAULT_DUE_DAYS};
use geo_render::DEFAULT_ARTIFACT_PREFIX;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "geo-invoice.db";
const EXPORT_DIR: &str = "exports";

/// Longest payment term accepted, in days.
pub const MAX_DUE_DAYS: u32 = 365;

// =============================================================================
// Errors
// =============================================================================

/// Configuration load/save errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[invoice]`: numbering, terms and document defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceSettings {
    /// Prefix of generated invoice numbers.
    pub prefix: String,

    /// Counter of the next generated number.
    pub next_number: u64,

    /// Days between invoice date and due date on new invoices.
    pub default_due_days: u32,

    /// Notes pre-filled on new invoices.
    pub default_notes: String,

    /// File name prefix of downloaded PDFs.
    pub pdf_prefix: String,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        InvoiceSettings {
            prefix: DEFAULT_INVOICE_PREFIX.to_string(),
            next_number: DEFAULT_NEXT_NUMBER,
            default_due_days: DEFAULT_DUE_DAYS,
            default_notes: String::new(),
            pdf_prefix: DEFAULT_ARTIFACT_PREFIX.to_string(),
        }
    }
}

/// `[storage]`: where records live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite file. Defaults to the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Keep everything in memory; nothing survives a restart.
    pub in_memory: bool,
}

/// `[export]`: where downloads and print pages go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Defaults to `exports/` under the platform data directory.
    pub directory: Option<PathBuf>,
}

// =============================================================================
// DeskConfig
// =============================================================================

/// Complete desk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Seller identity printed on documents.
    #[serde(default)]
    pub business: BusinessProfile,

    #[serde(default)]
    pub invoice: InvoiceSettings,

    /// Money display.
    #[serde(default)]
    pub currency: CurrencyFormat,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

impl DeskConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading desk config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load desk config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads and parses one TOML file, without overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        info!(?path, "Desk config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.business.name.trim().is_empty() {
            return Err(ConfigError::Invalid("business.name must not be empty".into()));
        }

        if self.invoice.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "invoice.prefix must not contain spaces, got: '{}'",
                self.invoice.prefix
            )));
        }

        let first = InvoiceNumbering::new(self.invoice.prefix.clone(), self.invoice.next_number).peek();
        validate_invoice_number(&first)
            .map_err(|e| ConfigError::Invalid(format!("invoice.prefix: {e}")))?;

        if self.invoice.default_due_days > MAX_DUE_DAYS {
            return Err(ConfigError::Invalid(format!(
                "invoice.default_due_days must be at most {MAX_DUE_DAYS}"
            )));
        }

        if self
            .invoice
            .pdf_prefix
            .chars()
            .any(|c| matches!(c, '/' | '\\'))
        {
            return Err(ConfigError::Invalid(
                "invoice.pdf_prefix must not contain path separators".into(),
            ));
        }

        if self.currency.decimals > 2 {
            return Err(ConfigError::Invalid("currency.decimals must be 0, 1 or 2".into()));
        }

        if self.currency.symbol.is_empty() && self.currency.code.is_empty() {
            return Err(ConfigError::Invalid(
                "currency needs a symbol or a code".into(),
            ));
        }

        Ok(())
    }

    /// Applies `GEO_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("GEO_BUSINESS_NAME") {
            debug!(name = %name, "Overriding business name from environment");
            self.business.name = name;
        }

        if let Some(symbol) = lookup("GEO_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(prefix) = lookup("GEO_INVOICE_PREFIX") {
            debug!(prefix = %prefix, "Overriding invoice prefix from environment");
            self.invoice.prefix = prefix;
        }

        if let Some(path) = lookup("GEO_DATABASE_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("GEO_EXPORT_DIR") {
            self.export.directory = Some(PathBuf::from(dir));
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "geofashion", "invoice")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolved SQLite file path.
    pub fn database_path(&self) -> PathBuf {
        self.storage.database_path.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
                .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
        })
    }

    /// Resolved directory for downloads and print pages.
    pub fn export_dir(&self) -> PathBuf {
        self.export.directory.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().join(EXPORT_DIR))
                .unwrap_or_else(|| PathBuf::from(EXPORT_DIR))
        })
    }

    /// Invoice number sequence as configured.
    pub fn numbering(&self) -> InvoiceNumbering {
        InvoiceNumbering::new(self.invoice.prefix.clone(), self.invoice.next_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = DeskConfig::default();
        assert_eq!(config.business.name, "Geo Fashion");
        assert_eq!(config.invoice.prefix, "INV-");
        assert_eq!(config.invoice.next_number, 1001);
        assert_eq!(config.invoice.default_due_days, 15);
        assert_eq!(config.invoice.pdf_prefix, "Invoice-");
        assert_eq!(config.numbering().peek(), "INV-1001");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: DeskConfig = toml::from_str(
            r#"
            [invoice]
            prefix = "GF-"
            next_number = 5000

            [currency]
            symbol = "Tk"
            separator = " "
            grouping = "indian"
            "#,
        )
        .unwrap();

        assert_eq!(config.numbering().peek(), "GF-5000");
        assert_eq!(config.invoice.default_due_days, 15);
        assert_eq!(config.currency.symbol, "Tk");
        assert_eq!(config.currency.code, "BDT");
        assert_eq!(config.business, BusinessProfile::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = DeskConfig::default();

        config.business.name = "  ".to_string();
        assert!(config.validate().is_err());

        config.business.name = "Geo Fashion".to_string();
        config.invoice.prefix = "INV ".to_string();
        assert!(config.validate().is_err());

        config.invoice.prefix = "INV-".to_string();
        config.invoice.default_due_days = 400;
        assert!(config.validate().is_err());

        config.invoice.default_due_days = 30;
        config.invoice.pdf_prefix = "../".to_string();
        assert!(config.validate().is_err());

        config.invoice.pdf_prefix = "Invoice-".to_string();
        config.currency.decimals = 3;
        assert!(config.validate().is_err());

        config.currency.decimals = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("GEO_BUSINESS_NAME", "Geo Fashion Outlet"),
            ("GEO_INVOICE_PREFIX", "OUT-"),
            ("GEO_DATABASE_PATH", "/data/geo.db"),
        ]
        .into_iter()
        .collect();

        let mut config = DeskConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.business.name, "Geo Fashion Outlet");
        assert_eq!(config.numbering().peek(), "OUT-1001");
        assert_eq!(config.database_path(), PathBuf::from("/data/geo.db"));
        assert_eq!(config.currency, CurrencyFormat::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = DeskConfig::default();
        config.business.tax_id = Some("TAX-123456".to_string());
        config.invoice.default_notes = "Exchange within 7 days".to_string();
        config.currency = CurrencyFormat::bdt_code();

        let saved = config.save(Some(path.clone())).unwrap();
        assert_eq!(saved, path);

        let reloaded = DeskConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_broken_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[invoice\nprefix = ").unwrap();

        assert!(matches!(DeskConfig::from_file(&path), Err(ConfigError::Parse(_))));
        assert_eq!(
            DeskConfig::load_or_default(Some(path)).invoice,
            InvoiceSettings::default()
        );
    }
}
