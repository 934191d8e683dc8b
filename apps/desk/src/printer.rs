//! # Receipt Printer
//!
//! Where a rendered receipt ends up.
//!
//! - `Console`: written to the console output, same as any reply
//! - `Command`: piped to an external program (`lp -d counter`) on stdin
//!
//! A command that cannot be started or exits non-zero is a `PrintFailed`
//! error; the receipt is not retried.

use std::io::Write;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::state::{PrinterConfig, PrinterKind};

/// Configured receipt destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptPrinter {
    Console,
    Command { program: String, args: Vec<String> },
}

impl ReceiptPrinter {
    /// Builds the printer described by `config`.
    pub fn from_config(config: &PrinterConfig) -> Self {
        match (config.kind, config.command.as_deref()) {
            (PrinterKind::Command, Some(program)) if !program.trim().is_empty() => {
                ReceiptPrinter::Command {
                    program: program.trim().to_string(),
                    args: config.args.clone(),
                }
            }
            _ => ReceiptPrinter::Console,
        }
    }

    /// Short description for the operator.
    pub fn describe(&self) -> String {
        match self {
            ReceiptPrinter::Console => "console".to_string(),
            ReceiptPrinter::Command { program, args } if args.is_empty() => program.clone(),
            ReceiptPrinter::Command { program, args } => format!("{} {}", program, args.join(" ")),
        }
    }

    /// Prints `receipt`; console output goes to `out`.
    pub async fn print<W: Write>(&self, receipt: &str, out: &mut W) -> Result<(), ApiError> {
        match self {
            ReceiptPrinter::Console => {
                out.write_all(receipt.as_bytes())
                    .and_then(|_| out.flush())
                    .map_err(|e| ApiError::print_failed(format!("Console write failed: {}", e)))?;
                debug!(bytes = receipt.len(), "Receipt written to console");
                Ok(())
            }
            ReceiptPrinter::Command { program, args } => {
                run_print_command(program, args, receipt).await
            }
        }
    }
}

async fn run_print_command(program: &str, args: &[String], receipt: &str) -> Result<(), ApiError> {
    debug!(program, ?args, "Spawning print command");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            error!(program, error = %e, "Could not start print command");
            ApiError::print_failed(format!("Could not start '{}': {}", program, e))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(receipt.as_bytes())
            .await
            .map_err(|e| ApiError::print_failed(format!("Could not send receipt: {}", e)))?;
        // Dropping stdin closes the pipe so the program sees EOF.
    }

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| ApiError::print_failed(format!("Print command failed: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!(program, status = %output.status, stderr = %stderr.trim(), "Print command failed");
        return Err(ApiError::print_failed(format!(
            "'{}' exited with {}",
            program, output.status
        )));
    }

    info!(program, "Receipt sent to printer");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_from_config() {
        assert_eq!(
            ReceiptPrinter::from_config(&PrinterConfig::default()),
            ReceiptPrinter::Console
        );

        let config = PrinterConfig {
            kind: PrinterKind::Command,
            command: Some("lp".into()),
            args: vec!["-d".into(), "counter".into()],
        };
        let printer = ReceiptPrinter::from_config(&config);
        assert_eq!(printer.describe(), "lp -d counter");
    }

    #[tokio::test]
    async fn test_console_printer_writes_receipt() {
        let mut out = Vec::new();
        ReceiptPrinter::Console
            .print("Invoice\nTotal Amount: ₹270.00\n", &mut out)
            .await
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Invoice\nTotal Amount: ₹270.00\n");
    }

    #[tokio::test]
    async fn test_missing_program_is_print_failure() {
        let printer = ReceiptPrinter::Command {
            program: "pharmacy-desk-no-such-printer".into(),
            args: Vec::new(),
        };
        let err = printer.print("Invoice\n", &mut Vec::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PrintFailed);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_printer_exit_status() {
        let ok = ReceiptPrinter::Command {
            program: "cat".into(),
            args: Vec::new(),
        };
        assert!(ok.print("Invoice\n", &mut Vec::new()).await.is_ok());

        let failing = ReceiptPrinter::Command {
            program: "false".into(),
            args: Vec::new(),
        };
        let err = failing.print("Invoice\n", &mut Vec::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PrintFailed);
    }
}
