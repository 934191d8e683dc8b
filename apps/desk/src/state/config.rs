//! # Desk Configuration
//!
//! Everything the desk reads at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. `--endpoint` on the command line
//! 2. Environment variables (`PHARMACY_*`)
//! 3. Config file (`--config`, else `PHARMACY_CONFIG`, else `desk.toml` in
//!    the platform config directory)
//! 4. Defaults (this file)
//!
//! ## File Format
//! ```toml
//! [store]
//! endpoint = "https://sheetdb.io/api/v1/fltl2wbu69rkj"
//! # timeout_secs = 10
//!
//! [display]
//! currency_symbol = "₹"
//! store_name = "Pharmacy"
//!
//! [printer]
//! kind = "console"        # or "command"
//! # command = "lp"
//! # args = ["-d", "counter"]
//! ```
//!
//! Configuration is read-only after startup, so no mutex is needed.

use std::path::PathBuf;

use pharmacy_core::invoice::ReceiptStyle;
use pharmacy_core::DEFAULT_CURRENCY_SYMBOL;
use pharmacy_store::{StoreConfig, StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Environment variable naming the config file.
pub const ENV_CONFIG_PATH: &str = "PHARMACY_CONFIG";

/// Environment variable overriding the currency symbol.
pub const ENV_CURRENCY_SYMBOL: &str = "PHARMACY_CURRENCY_SYMBOL";

/// Environment variable selecting an external print command.
pub const ENV_PRINT_COMMAND: &str = "PHARMACY_PRINT_COMMAND";

/// Complete desk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Remote store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// How amounts and receipts look.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Where receipts go.
    #[serde(default)]
    pub printer: PrinterConfig,
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Prefix for every amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// First line of every receipt; empty to omit.
    #[serde(default = "default_store_name")]
    pub store_name: String,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_store_name() -> String {
    "Pharmacy".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            currency_symbol: default_currency_symbol(),
            store_name: default_store_name(),
        }
    }
}

/// Printer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterConfig {
    /// Printer type
    #[serde(default)]
    pub kind: PrinterKind,

    /// Program receiving the receipt on stdin (`kind = "command"` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Arguments passed to `command`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// Supported printer types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterKind {
    /// Receipt is written to the console
    #[default]
    Console,

    /// Receipt is piped to an external program such as `lp`
    Command,
}

impl DeskConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`DeskConfig::load`] with the environment layer resolved by `var`.
    pub fn load_with<F>(config_path: Option<PathBuf>, var: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::from_file(config_path)?;
        config.apply_overrides(var);
        config.validate()?;

        Ok(config)
    }

    /// Defaults plus the config file, without the environment layer.
    ///
    /// This is what `init-config` writes back, so one-off `PHARMACY_*`
    /// variables never end up in the file.
    pub fn from_file(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let Some(path) = config_path.or_else(Self::default_config_path) else {
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading desk config from file");
        let contents = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Desk config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        self.store.validate()?;

        if self.display.currency_symbol.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        if self.printer.kind == PrinterKind::Command
            && self
                .printer
                .command
                .as_deref()
                .map_or(true, |c| c.trim().is_empty())
        {
            return Err(StoreError::InvalidConfig(
                "printer kind \"command\" needs a command".into(),
            ));
        }

        Ok(())
    }

    /// Applies the `PHARMACY_*` overrides as resolved by `var`.
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.store.apply_overrides(&var);

        if let Some(symbol) = var(ENV_CURRENCY_SYMBOL) {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.display.currency_symbol = symbol;
        }

        if let Some(command) = var(ENV_PRINT_COMMAND) {
            debug!(command = %command, "Overriding print command from environment");
            self.printer.kind = PrinterKind::Command;
            self.printer.command = Some(command);
        }
    }

    /// Returns the config file path from `PHARMACY_CONFIG` or the platform
    /// config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "pharmacy", "desk")
            .map(|dirs| dirs.config_dir().join("desk.toml"))
    }

    /// Receipt styling derived from the display section.
    pub fn receipt_style(&self) -> ReceiptStyle {
        ReceiptStyle {
            currency_symbol: self.display.currency_symbol.clone(),
            store_name: self.display.store_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("pharmacy-desk-{}-{}", std::process::id(), name))
            .join("desk.toml")
    }

    #[test]
    fn test_default_config() {
        let config = DeskConfig::default();
        assert_eq!(config.display.currency_symbol, "₹");
        assert_eq!(config.printer.kind, PrinterKind::Console);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: DeskConfig = toml::from_str(
            r#"
            [display]
            store_name = "City Pharmacy"

            [printer]
            kind = "command"
            command = "lp"
            args = ["-d", "counter"]
            "#,
        )
        .unwrap();

        assert_eq!(config.display.store_name, "City Pharmacy");
        assert_eq!(config.display.currency_symbol, "₹");
        assert_eq!(config.printer.kind, PrinterKind::Command);
        assert_eq!(config.printer.args, vec!["-d", "counter"]);
        assert_eq!(config.store, StoreConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = DeskConfig::default();
        config.display.currency_symbol = " ".into();
        assert!(matches!(config.validate(), Err(StoreError::InvalidConfig(_))));

        let mut config = DeskConfig::default();
        config.printer.kind = PrinterKind::Command;
        assert!(matches!(config.validate(), Err(StoreError::InvalidConfig(_))));

        let mut config = DeskConfig::default();
        config.store.endpoint = "sheet.example.com".into();
        assert!(matches!(config.validate(), Err(StoreError::InvalidUrl(_))));
    }

    #[test]
    fn test_save_then_read_back() {
        let path = temp_path("save");
        let mut config = DeskConfig::default();
        config.display.store_name = "Night Chemist".into();
        config.store.timeout_secs = Some(8);

        let written = config.save(Some(path.clone())).unwrap();
        assert_eq!(written, path);

        let text = std::fs::read_to_string(&path).unwrap();
        let back: DeskConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_file_is_load_error() {
        let path = write_config("invalid", "[display\ncurrency_symbol = ");

        let err = DeskConfig::load_with(Some(path.clone()), |_| None).unwrap_err();
        assert!(matches!(err, StoreError::ConfigLoadFailed(_)));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = temp_path(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    const FILE: &str = r#"
        [store]
        endpoint = "https://sheetdb.io/api/v1/file"

        [display]
        store_name = "City Pharmacy"
    "#;

    #[test]
    fn test_environment_overrides_file() {
        let path = write_config("env", FILE);

        let config = DeskConfig::load_with(Some(path.clone()), |key| match key {
            "PHARMACY_STORE_URL" => Some("http://127.0.0.1:9000/api".to_string()),
            ENV_CURRENCY_SYMBOL => Some("Rs ".to_string()),
            ENV_PRINT_COMMAND => Some("lp".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.store.endpoint, "http://127.0.0.1:9000/api");
        assert_eq!(config.display.currency_symbol, "Rs ");
        assert_eq!(config.display.store_name, "City Pharmacy");
        assert_eq!(config.printer.kind, PrinterKind::Command);
        assert_eq!(config.printer.command.as_deref(), Some("lp"));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_override_fails_load() {
        let path = write_config("bad-env", FILE);

        let err = DeskConfig::load_with(Some(path.clone()), |key| {
            (key == "PHARMACY_STORE_URL").then(|| "sheet.example.com".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, StoreError::InvalidUrl(_)));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_from_file_skips_environment_layer() {
        let path = write_config("file-only", FILE);

        let from_file = DeskConfig::from_file(Some(path.clone())).unwrap();
        let loaded = DeskConfig::load_with(Some(path.clone()), |_| None).unwrap();

        assert_eq!(from_file, loaded);
        assert_eq!(from_file.store.endpoint, "https://sheetdb.io/api/v1/file");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let path = temp_path("missing");
        assert_eq!(DeskConfig::from_file(Some(path)).unwrap(), DeskConfig::default());
    }

    #[test]
    fn test_receipt_style_from_display() {
        let mut config = DeskConfig::default();
        config.display.currency_symbol = "Rs ".into();
        let style = config.receipt_style();
        assert_eq!(style.currency_symbol, "Rs ");
        assert_eq!(style.store_name, "Pharmacy");
    }
}
