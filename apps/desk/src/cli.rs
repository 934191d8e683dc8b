//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pharmacy counter: inventory, billing and receipts backed by a
/// spreadsheet API.
#[derive(Debug, Parser)]
#[command(name = "pharmacy-desk", version, about)]
pub struct Cli {
    /// Config file (default: $PHARMACY_CONFIG or desk.toml in the user
    /// config directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Spreadsheet API endpoint, overriding config and environment
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive operator console (default)
    Console,

    /// Load the inventory once, print it and exit
    Inventory,

    /// Write the effective configuration to the config file
    InitConfig,
}

impl Cli {
    pub fn selected(&self) -> Command {
        self.command.unwrap_or(Command::Console)
    }
}
