//! Core CLI loop plumbing: dispatch, error reporting, and shared helpers.

use std::io;

use chrono::NaiveDate;
use strsim::levenshtein;

use crate::config::Paths;
use crate::domain::{self, CategoryRegistry, Transaction};
use crate::errors::{CliError, TrackerError};
use crate::storage::TransactionStore;

use super::commands;
use super::io as cli_io;
pub use crate::cli::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_paths(mode, Paths::resolve())
    }

    /// Builds a context against an explicit data directory. The category
    /// registry is loaded here, once; a missing or malformed registry is
    /// the one unrecoverable startup failure.
    pub fn with_paths(mode: CliMode, paths: Paths) -> Result<Self, CliError> {
        let registry = commands::CommandRegistry::new(commands::all_definitions());
        let categories = CategoryRegistry::load(&paths.categories_file())?;
        let store = TransactionStore::new(paths.transactions_file());

        Ok(ShellContext {
            mode,
            registry,
            paths,
            categories,
            store,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        String::from("tally> ")
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.get(command).map(|def| def.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    /// Reports a command-level failure and keeps the loop alive. Nothing a
    /// command does escalates past this point.
    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }

    /// Tolerant read of the full transaction set; surfaces the store's
    /// recovery warnings before handing the records to the caller.
    pub(crate) fn load_transactions(&self) -> Vec<Transaction> {
        let report = self.store.load_tolerant();
        for warning in &report.warnings {
            self.print_warning(warning);
        }
        report.transactions
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    domain::parse_date(input).ok_or_else(|| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use DD-MM-YYYY)", input))
    })
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("exit requested")]
    ExitRequested,
}

#[cfg(test)]
pub(crate) fn process_script(context: &mut ShellContext, lines: &[&str]) {
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err).expect("report never fails"),
        }
    }
}
