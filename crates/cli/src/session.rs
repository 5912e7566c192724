//! Interactive command loop.
//!
//! Reads one command per line, carries it out against an owned [`Warehouse`],
//! and writes confirmations/reports to `out` and error messages to `err`.
//! Every command failure is reported and the loop moves on; only an input or
//! output failure ends a session early.

use std::io::{self, BufRead, Write};

use cellstock_core::Aggregate;
use cellstock_warehouse::{CellStore, InMemoryCellStore, InventoryCommand, InventoryEvent, Warehouse};

use crate::command::{Command, CommandError, help, parse_line};
use crate::config::{CliConfig, ReportFormat};

const BANNER: &str = "WAREHOUSE INVENTORY";
const PROMPT: &str = "> ";

/// Whether the loop should keep reading.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

#[derive(Debug)]
pub struct Session<S = InMemoryCellStore> {
    warehouse: Warehouse<S>,
    config: CliConfig,
}

impl Session<InMemoryCellStore> {
    /// Session over an empty, standard-layout warehouse.
    pub fn new(config: CliConfig) -> Self {
        Self::with_warehouse(Warehouse::new(), config)
    }
}

impl<S: CellStore> Session<S> {
    pub fn with_warehouse(warehouse: Warehouse<S>, config: CliConfig) -> Self {
        Self { warehouse, config }
    }

    pub fn warehouse(&self) -> &Warehouse<S> {
        &self.warehouse
    }

    /// Run until `EXIT` or end of input.
    pub fn run<R, W, E>(&mut self, mut input: R, mut out: W, mut err: E) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        tracing::info!(interactive = self.config.interactive, "session started");
        if self.config.interactive {
            writeln!(out, "{BANNER}")?;
            writeln!(out, "{}", help())?;
        }

        let mut buf = Vec::new();
        loop {
            if self.config.interactive {
                write!(out, "\n{PROMPT}")?;
                out.flush()?;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                tracing::info!("end of input");
                break;
            }

            let Ok(line) = std::str::from_utf8(&buf) else {
                let e = CommandError::Encoding;
                tracing::debug!(bytes = buf.len(), error = %e, "command rejected");
                writeln!(err, "error: {e}")?;
                continue;
            };

            if self.process_line(line, &mut out, &mut err)? == Outcome::Exit {
                break;
            }
        }

        out.flush()?;
        tracing::info!(applied_events = self.warehouse.version(), "session ended");
        Ok(())
    }

    /// Carry out a single input line.
    pub fn process_line<W, E>(&mut self, line: &str, out: &mut W, err: &mut E) -> io::Result<Outcome>
    where
        W: Write,
        E: Write,
    {
        let result = parse_line(line).and_then(|command| match command {
            Some(command) => self.execute(command),
            None => Ok(Reply::Nothing),
        });

        match result {
            Ok(Reply::Nothing) => Ok(Outcome::Continue),
            Ok(Reply::Text(text)) => {
                writeln!(out, "{text}")?;
                Ok(Outcome::Continue)
            }
            Ok(Reply::Exit) => Ok(Outcome::Exit),
            Err(e) => {
                tracing::debug!(line = line.trim_end(), error = %e, "command rejected");
                writeln!(err, "error: {e}")?;
                Ok(Outcome::Continue)
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<Reply, CommandError> {
        let reply = match command {
            Command::Add(cmd) => self.apply_inventory(InventoryCommand::AddStock(cmd))?,
            Command::Remove(cmd) => self.apply_inventory(InventoryCommand::RemoveStock(cmd))?,
            Command::Info => Reply::Text(self.render_report()),
            Command::Help => Reply::Text(help()),
            Command::Exit => Reply::Exit,
        };
        Ok(reply)
    }

    fn apply_inventory(&mut self, command: InventoryCommand) -> Result<Reply, CommandError> {
        let events = self.warehouse.execute(&command)?;
        let lines: Vec<String> = events.iter().map(InventoryEvent::to_string).collect();
        Ok(Reply::Text(lines.join("\n")))
    }

    fn render_report(&self) -> String {
        let report = self.warehouse.report();
        match self.config.report_format {
            ReportFormat::Text => report.to_string(),
            ReportFormat::Json => report.to_json().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to encode report as JSON; using text");
                report.to_string()
            }),
        }
    }
}

enum Reply {
    Nothing,
    Text(String),
    Exit,
}
