//! Line-oriented command interface for the warehouse inventory.

pub mod command;
pub mod config;
pub mod session;

pub use command::{Command, CommandError, parse_line};
pub use config::{CliConfig, ConfigError, ReportFormat};
pub use session::{Outcome, Session};
