//! # Operator Console
//!
//! Line-oriented front end: reads commands, runs them against the desk,
//! prints replies. Errors are printed with a `!` prefix and the session
//! continues.
//!
//! ## Commands
//! ```text
//! list                                      show the inventory
//! reload                                    reload from the remote store
//! add <name…> <price> <discount> <stock>    add a product (name may have spaces)
//! remove <id>                               delete a product
//! sell <id> <qty>                           sell and show the invoice
//! invoice                                   show the last invoice
//! print                                     print the last invoice
//! help                                      this list
//! quit | exit                               leave
//! ```

use std::io::{self, Write};

use pharmacy_core::invoice::ReceiptStyle;
use pharmacy_core::validation::ProductDraft;
use pharmacy_store::RemoteStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::commands::{product, sale};
use crate::desk::Desk;
use crate::error::ApiError;
use crate::printer::ReceiptPrinter;

const HELP: &str = "\
Commands:
  list                                      show the inventory
  reload                                    reload from the remote store
  add <name...> <price> <discount> <stock>  add a product
  remove <id>                               delete a product
  sell <id> <qty>                           sell and show the invoice
  invoice                                   show the last invoice
  print                                     print the last invoice
  help                                      this list
  quit | exit                               leave
";

const PROMPT: &str = "> ";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed console line. Arguments stay as typed; the commands
/// validate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Empty,
    List,
    Reload,
    Add(ProductDraft),
    Remove { id: String },
    Sell { id: String, quantity: String },
    Invoice,
    Print,
    Help,
    Quit,
}

fn usage(text: &str) -> ApiError {
    ApiError::validation(format!("Usage: {}", text))
}

impl ConsoleCommand {
    /// Parses one input line.
    ///
    /// For `add`, the last three words are price, discount and stock and
    /// everything before them is the name.
    pub fn parse(line: &str) -> Result<Self, ApiError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(ConsoleCommand::Empty);
        };
        let args: Vec<&str> = words.collect();

        match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => Ok(ConsoleCommand::List),
            "reload" | "refresh" => Ok(ConsoleCommand::Reload),
            "add" => {
                if args.len() < 4 {
                    return Err(usage("add <name...> <price> <discount> <stock>"));
                }
                let split = args.len() - 3;
                Ok(ConsoleCommand::Add(ProductDraft::new(
                    args[..split].join(" "),
                    args[split],
                    args[split + 1],
                    args[split + 2],
                )))
            }
            "remove" | "rm" | "delete" => match args.as_slice() {
                [id] => Ok(ConsoleCommand::Remove { id: id.to_string() }),
                _ => Err(usage("remove <id>")),
            },
            "sell" => match args.as_slice() {
                [id, quantity] => Ok(ConsoleCommand::Sell {
                    id: id.to_string(),
                    quantity: quantity.to_string(),
                }),
                _ => Err(usage("sell <id> <qty>")),
            },
            "invoice" => Ok(ConsoleCommand::Invoice),
            "print" => Ok(ConsoleCommand::Print),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(ApiError::validation(format!(
                "Unknown command '{}'. Type 'help' for commands.",
                other
            ))),
        }
    }
}

// =============================================================================
// Console
// =============================================================================

/// What the console does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Silent,
    Quit,
}

/// The desk plus how receipts look and where they go.
#[derive(Debug)]
pub struct Console<S> {
    desk: Desk<S>,
    style: ReceiptStyle,
    printer: ReceiptPrinter,
}

impl<S: RemoteStore> Console<S> {
    pub fn new(desk: Desk<S>, style: ReceiptStyle, printer: ReceiptPrinter) -> Self {
        Console {
            desk,
            style,
            printer,
        }
    }

    pub fn desk(&self) -> &Desk<S> {
        &self.desk
    }

    /// Runs one command. Console printing writes the receipt to `out`.
    pub async fn execute<W: Write>(
        &self,
        command: ConsoleCommand,
        out: &mut W,
    ) -> Result<Reply, ApiError> {
        debug!(?command, "Executing console command");

        let text = match command {
            ConsoleCommand::Empty => return Ok(Reply::Silent),
            ConsoleCommand::Quit => return Ok(Reply::Quit),
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::List => product::list_products(&self.desk, &self.style),
            ConsoleCommand::Reload => product::reload_inventory(&self.desk).await?,
            ConsoleCommand::Add(draft) => product::add_product(&self.desk, draft).await?,
            ConsoleCommand::Remove { id } => product::remove_product(&self.desk, &id).await?,
            ConsoleCommand::Sell { id, quantity } => {
                sale::sell(&self.desk, &id, &quantity, &self.style)?
            }
            ConsoleCommand::Invoice => sale::show_invoice(&self.desk, &self.style)?,
            ConsoleCommand::Print => {
                sale::print_invoice(&self.desk, &self.style, &self.printer, out).await?
            }
        };
        Ok(Reply::Text(text))
    }

    /// Parses and runs one line, printing the reply or the error.
    ///
    /// Returns false once the operator asked to quit.
    pub async fn handle_line<W: Write>(&self, line: &str, out: &mut W) -> io::Result<bool> {
        let result = match ConsoleCommand::parse(line) {
            Ok(command) => self.execute(command, out).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(Reply::Quit) => return Ok(false),
            Ok(Reply::Silent) => {}
            Ok(Reply::Text(text)) => {
                write!(out, "{}", text)?;
                if !text.ends_with('\n') {
                    writeln!(out)?;
                }
            }
            Err(e) => writeln!(out, "! {}", e.message)?,
        }
        Ok(true)
    }

    /// Loads the inventory, then reads commands until `quit` or end of input.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        match product::reload_inventory(&self.desk).await {
            Ok(reply) => writeln!(out, "{}", reply)?,
            Err(e) => writeln!(out, "! {}", e.message)?,
        }
        writeln!(out, "Type 'help' for commands.")?;

        let mut lines = input.lines();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };
            if !self.handle_line(&line, out).await? {
                break;
            }
        }

        debug!("Console session ended");
        Ok(())
    }
}
