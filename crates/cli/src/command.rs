//! Command protocol: one command per line, whitespace-separated tokens.

use thiserror::Error;

use cellstock_core::DomainError;
use cellstock_warehouse::{AddStock, RemoveStock};

pub const ADD_USAGE: &str = "ADD <product> <quantity> <address (A-1-1-1)>";
pub const REMOVE_USAGE: &str = "REMOVE <product> <quantity> <address (A-1-1-1)>";

/// Command list shown in the banner and by `HELP`.
pub fn help() -> String {
    format!(
        "Available commands:\n{ADD_USAGE}\n{REMOVE_USAGE}\n\
         INFO - warehouse report\n\
         HELP - this list\n\
         EXIT - quit"
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddStock),
    Remove(RemoveStock),
    Info,
    Help,
    Exit,
}

/// Anything that stops a line from being carried out.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("invalid command format, expected: {usage}")]
    Usage { usage: &'static str },

    #[error("invalid quantity: '{0}'")]
    Quantity(String),

    #[error("invalid format: input line is not valid UTF-8")]
    Encoding,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// Command words are case-sensitive. `INFO`, `HELP` and `EXIT` ignore any
/// trailing tokens.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&word, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match word {
        "ADD" => {
            let (product, quantity, address) = stock_args(args, ADD_USAGE)?;
            Command::Add(AddStock {
                product,
                quantity,
                address,
            })
        }
        "REMOVE" => {
            let (product, quantity, address) = stock_args(args, REMOVE_USAGE)?;
            Command::Remove(RemoveStock {
                product,
                quantity,
                address,
            })
        }
        "INFO" => Command::Info,
        "HELP" => Command::Help,
        "EXIT" => Command::Exit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn stock_args(args: &[&str], usage: &'static str) -> Result<(String, i64, String), CommandError> {
    let [product, quantity, address] = args else {
        return Err(CommandError::Usage { usage });
    };
    let quantity = quantity
        .parse::<i64>()
        .map_err(|_| CommandError::Quantity(quantity.to_string()))?;
    Ok((product.to_string(), quantity, address.to_string()))
}
