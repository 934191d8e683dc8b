//! # Pharmacy Desk Library
//!
//! Everything behind the `pharmacy-desk` binary: configuration, the desk
//! controller, the operator console and the receipt printer.
//!
//! ## Module Organization
//! ```text
//! pharmacy_desk/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Command line arguments
//! ├── desk.rs         ◄─── Desk controller (reload, create, delete, sell)
//! ├── console.rs      ◄─── Line parser and stdin loop
//! ├── printer.rs      ◄─── Console / external command printing
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── inventory.rs◄─── In-memory products (Arc<Mutex>)
//! │   ├── invoice.rs  ◄─── Last invoice slot (Arc<Mutex>)
//! │   └── config.rs   ◄─── DeskConfig (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── list / reload / add / remove
//! │   └── sale.rs     ◄─── sell / invoice / print
//! └── error.rs        ◄─── API error type
//! ```

pub mod cli;
pub mod commands;
pub mod console;
pub mod desk;
pub mod error;
pub mod printer;
pub mod state;

use std::io::Write;
use std::path::PathBuf;

use pharmacy_store::{SheetStore, StoreResult};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use console::Console;
use desk::Desk;
use printer::ReceiptPrinter;
use state::DeskConfig;

/// Runs the desk.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Desk Startup                                      │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → desk.toml → PHARMACY_* env → --endpoint                │
/// │                                                                         │
/// │  2. Build Store Client ───────────────────────────────────────────────► │
/// │     • reqwest, optional timeout                                         │
/// │                                                                         │
/// │  3. Run Command ──────────────────────────────────────────────────────► │
/// │     • console:     load inventory, read commands from stdin             │
/// │     • inventory:   load inventory, print table, exit                    │
/// │     • init-config: write file settings plus --endpoint back to the file │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.selected() == Command::InitConfig {
        let path = init_config(&cli)?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let mut config = DeskConfig::load(cli.config.clone())?;
    apply_endpoint_flag(&mut config, &cli)?;
    info!(endpoint = %config.store.endpoint, "Configuration loaded");

    let store = SheetStore::new(&config.store)?;
    let desk = Desk::new(store);
    let style = config.receipt_style();
    let stdout = std::io::stdout();

    match cli.selected() {
        Command::Inventory => {
            desk.reload().await?;
            let mut out = stdout.lock();
            write!(out, "{}", commands::product::list_products(&desk, &style))?;
            out.flush()?;
        }
        Command::Console | Command::InitConfig => {
            let printer = ReceiptPrinter::from_config(&config.printer);
            info!(printer = %printer.describe(), "Starting operator console");

            let console = Console::new(desk, style, printer);
            let input = BufReader::new(tokio::io::stdin());
            console.run(input, &mut stdout.lock()).await?;
        }
    }

    Ok(())
}

/// Writes the config file for `init-config`.
///
/// Starts from defaults and any existing file, then applies `--endpoint`.
/// `PHARMACY_*` variables are not applied, so a one-off override is never
/// written to disk.
pub fn init_config(cli: &Cli) -> StoreResult<PathBuf> {
    let mut config = DeskConfig::from_file(cli.config.clone())?;
    apply_endpoint_flag(&mut config, cli)?;
    config.validate()?;
    config.save(cli.config.clone())
}

fn apply_endpoint_flag(config: &mut DeskConfig, cli: &Cli) -> StoreResult<()> {
    if let Some(endpoint) = &cli.endpoint {
        config.store.endpoint = endpoint.clone();
        config.validate()?;
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with receipts on stdout.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pharmacy=trace` - Show trace for pharmacy crates only
/// - Default: `info,pharmacy=debug,reqwest=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pharmacy=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn temp_config(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("pharmacy-desk-lib-{}-{}", std::process::id(), name))
            .join("desk.toml")
    }

    #[test]
    fn test_init_config_writes_file_settings_and_endpoint_flag() {
        let path = temp_config("init");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[display]\nstore_name = \"City Pharmacy\"\n").unwrap();

        let cli = Cli::parse_from([
            "pharmacy-desk",
            "init-config",
            "--config",
            path.to_str().unwrap(),
            "--endpoint",
            "http://127.0.0.1:9000/api",
        ]);
        let written = init_config(&cli).unwrap();
        assert_eq!(written, path);

        let saved = DeskConfig::from_file(Some(path.clone())).unwrap();
        assert_eq!(saved.display.store_name, "City Pharmacy");
        assert_eq!(saved.store.endpoint, "http://127.0.0.1:9000/api");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_init_config_rejects_bad_endpoint_flag() {
        let path = temp_config("init-bad");
        let cli = Cli::parse_from([
            "pharmacy-desk",
            "init-config",
            "--config",
            path.to_str().unwrap(),
            "--endpoint",
            "sheet.example.com",
        ]);

        assert!(init_config(&cli).is_err());
        assert!(!path.exists());
    }
}
