use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Context as ReadlineContext, Editor, Helper,
};
use shell_words::split;

use crate::cli::core::{CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::{self, info as output_info, OutputPreferences};
use crate::domain::TransactionKind;
use crate::errors::CliError;

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("TALLY_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    // Script output must be byte-stable; NO_COLOR opts interactive runs out
    // of styling too.
    output::set_preferences(OutputPreferences {
        plain_mode: mode == CliMode::Script || std::env::var_os("NO_COLOR").is_some(),
    });

    let mut context = ShellContext::new(mode)?;

    match context.mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::from_context(context)));

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                output_info("Interrupted. Type `quit` or `q` to exit.");
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.to_string());
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

const VIEW_SUBCOMMANDS: [&str; 4] = ["all", "date", "type", "category"];
const KIND_TOKENS: [&str; 2] = ["income", "expense"];

/// Completion and hinting over the command surface: command names at the
/// first word, then `view` subcommands, transaction types, and category
/// labels at the argument positions that accept them.
struct CommandHelper {
    commands: Vec<(String, &'static str)>,
    expense_labels: Vec<String>,
    income_labels: Vec<String>,
}

impl CommandHelper {
    fn from_context(context: &ShellContext) -> Self {
        Self {
            commands: context
                .registry
                .iter()
                .map(|definition| (definition.name.to_string(), definition.usage))
                .collect(),
            expense_labels: context
                .categories
                .labels_for(TransactionKind::Expense)
                .to_vec(),
            income_labels: context
                .categories
                .labels_for(TransactionKind::Income)
                .to_vec(),
        }
    }

    fn union_labels(&self) -> Vec<String> {
        self.expense_labels
            .iter()
            .chain(self.income_labels.iter())
            .cloned()
            .collect()
    }

    /// Candidate tokens for the word at `index`, given the completed words
    /// before it. Free-text positions (dates, amounts, descriptions) yield
    /// nothing.
    fn candidates(&self, words: &[&str], index: usize) -> Vec<String> {
        match (words.first().copied(), index) {
            (_, 0) => self.commands.iter().map(|(name, _)| name.clone()).collect(),
            (Some("view"), 1) => VIEW_SUBCOMMANDS.iter().map(|s| s.to_string()).collect(),
            (Some("view"), 2) => match words.get(1).copied() {
                Some("type") => KIND_TOKENS.iter().map(|s| s.to_string()).collect(),
                Some("category") => self.union_labels(),
                _ => Vec::new(),
            },
            (Some("add"), 2) => KIND_TOKENS.iter().map(|s| s.to_string()).collect(),
            (Some("add"), 4) => match words.get(2).and_then(|t| TransactionKind::parse_strict(t)) {
                Some(TransactionKind::Expense) => self.expense_labels.clone(),
                Some(TransactionKind::Income) => self.income_labels.clone(),
                None => self.union_labels(),
            },
            _ => Vec::new(),
        }
    }

    /// The remaining usage for a bare command name, or nothing once
    /// arguments follow.
    fn usage_hint(&self, line: &str) -> Option<String> {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return None;
        }
        self.commands
            .iter()
            .find(|(name, _)| name.as_str() == trimmed)
            .and_then(|(name, usage)| usage.strip_prefix(name.as_str()))
            .filter(|rest| !rest.is_empty())
            .map(|rest| rest.to_string())
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = prefix[start..].to_lowercase();
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();

        let candidates = self
            .candidates(&words, words.len())
            .into_iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&needle))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    /// Shows the remaining usage once a bare command name has been typed.
    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, shell_words::ParseError> {
    split(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> CommandHelper {
        CommandHelper {
            commands: vec![
                (
                    "add".into(),
                    "add <dd-mm-yyyy> <income|expense> <amount> <category> [\"description\"]",
                ),
                ("view".into(), "view all | view date <|>|= <dd-mm-yyyy>"),
                ("quit".into(), "quit"),
            ],
            expense_labels: vec!["groceries".into(), "rent".into()],
            income_labels: vec!["salary".into()],
        }
    }

    #[test]
    fn first_word_completes_command_names() {
        let candidates = helper().candidates(&[], 0);
        assert_eq!(candidates, vec!["add", "view", "quit"]);
    }

    #[test]
    fn view_completes_its_subcommands() {
        let candidates = helper().candidates(&["view"], 1);
        assert_eq!(candidates, vec!["all", "date", "type", "category"]);
    }

    #[test]
    fn view_category_completes_the_label_union() {
        let candidates = helper().candidates(&["view", "category"], 2);
        assert_eq!(candidates, vec!["groceries", "rent", "salary"]);
    }

    #[test]
    fn add_category_completion_is_scoped_to_the_typed_kind() {
        let candidates = helper().candidates(&["add", "01-01-2024", "income", "1000"], 4);
        assert_eq!(candidates, vec!["salary"]);

        let candidates = helper().candidates(&["add", "01-01-2024", "expense", "42.5"], 4);
        assert_eq!(candidates, vec!["groceries", "rent"]);
    }

    #[test]
    fn free_text_positions_complete_nothing() {
        let helper = helper();
        assert!(helper.candidates(&["add"], 1).is_empty());
        assert!(helper.candidates(&["add", "01-01-2024", "income"], 3).is_empty());
        assert!(helper.candidates(&["view", "date"], 2).is_empty());
    }

    #[test]
    fn bare_command_hints_its_remaining_usage() {
        let helper = helper();
        let hint = helper.usage_hint("add").unwrap();
        assert!(hint.starts_with(" <dd-mm-yyyy>"));
        // `quit` has no arguments and therefore no hint.
        assert_eq!(helper.usage_hint("quit"), None);
        // Once arguments follow, the hint gets out of the way.
        assert_eq!(helper.usage_hint("add 01-01-2024"), None);
    }
}
