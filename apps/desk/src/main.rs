//! # Pharmacy Desk Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pharmacy Desk                                    │
//! │                                                                         │
//! │  main.rs ────► parses arguments, starts logging                         │
//! │                                                                         │
//! │  lib.rs ─────► loads config, builds the store client, runs the command  │
//! │                                                                         │
//! │  stdin ──────► console ──► desk ──► spreadsheet API                     │
//! │                   │                                                     │
//! │                   └──────► stdout (replies, receipts)                   │
//! │                                                                         │
//! │  stderr ◄──── tracing                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use pharmacy_desk::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    pharmacy_desk::init_tracing();
    pharmacy_desk::run(cli).await
}
