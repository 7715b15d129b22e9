//! Terminal entry point for the roster record keeper.
//!
//! # Responsibility
//! - Resolve arguments, start logging and open the record file.
//! - Hand the session to the interactive menu, or print a listing.

mod app;
mod cli;
mod console;
mod view;

use app::App;
use clap::Parser;
use cli::{Cli, Command};
use console::Console;
use log::error;
use roster_core::{
    init_logging, CsvRecordStore, ErrorCategory, ReadOnlyStore, RecordStore, RosterError,
    RosterService,
};
use std::error::Error;
use std::io::{self, StdinLock, Stdout, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().unwrap_or_default();
    if let Some(config) = cli.log_config(&cwd) {
        if let Err(err) = init_logging(&config) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let store = CsvRecordStore::new(&cli.file);
    let opened = RosterService::open(store.clone());

    match cli.command() {
        Command::List => {
            let (service, _) = opened?;
            let mut stdout = io::stdout().lock();
            if service.is_empty() {
                writeln!(stdout, "No employees found.")?;
            } else {
                let title = format!("All Employees ({} total)", service.len());
                write!(stdout, "{}", view::render_table(service.records(), &title))?;
            }
        }
        Command::Menu => match opened {
            Ok((service, status)) => run_menu(service, |app| app.announce(status))?,
            // An undecodable file is kept as found: the session starts empty
            // and every save is refused.
            Err(RosterError::Store(err)) if err.category() == ErrorCategory::MalformedData => {
                let service = RosterService::new(ReadOnlyStore::new(store), Vec::new());
                run_menu(service, |app| app.announce_unreadable(&err))?;
            }
            Err(err) => return Err(err.into()),
        },
    }
    Ok(())
}

fn run_menu<S: RecordStore>(
    service: RosterService<S>,
    announce: impl FnOnce(&mut App<S, StdinLock<'static>, Stdout>) -> io::Result<()>,
) -> io::Result<()> {
    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut app = App::new(service, console);
    announce(&mut app)?;
    app.run()
}
