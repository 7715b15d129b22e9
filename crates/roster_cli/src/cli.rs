//! Command-line arguments.
//!
//! Every option can also come from the environment so the record file and
//! log location can be pinned per shell.

use clap::{Parser, Subcommand};
use roster_core::{default_log_level, LogConfig, DEFAULT_DATA_FILE};
use std::path::{Path, PathBuf};

/// Roster - terminal employee record keeper
///
/// Creates, edits, deletes and lists employee and manager records stored in
/// a delimited text file.
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Record file to load and save
    #[arg(short, long, env = "ROSTER_FILE", default_value = DEFAULT_DATA_FILE)]
    pub file: PathBuf,

    /// Log level (trace, debug, info, warn, error); defaults by build mode
    #[arg(long, env = "ROSTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files; defaults to ./logs
    #[arg(long, env = "ROSTER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Also print warnings and errors from the log to stderr
    #[arg(long)]
    pub echo_warnings: bool,

    /// Disable file logging
    #[arg(long)]
    pub no_log: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the interactive menu (default)
    Menu,
    /// Print every record and exit
    List,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Menu)
    }

    /// Resolves logger settings; relative directories are taken from `cwd`.
    ///
    /// Returns `None` when logging is disabled.
    pub fn log_config(&self, cwd: &Path) -> Option<LogConfig> {
        if self.no_log {
            return None;
        }
        let level = self
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = match &self.log_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join("logs"),
        };
        Some(LogConfig::new(level, log_dir).with_stderr_echo(self.echo_warnings))
    }
}
