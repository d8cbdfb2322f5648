//! The `add` command: validate one transaction and persist it.

use crate::cli::core::{self, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::domain::{Transaction, TransactionKind};

use super::CommandDefinition;

const USAGE: &str = "add <dd-mm-yyyy> <income|expense> <amount> <category> [\"description\"]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "add",
        "Record an income or expense transaction",
        USAGE,
        handle_add,
    )]
}

/// Validation runs in a fixed order and stops at the first failure: count,
/// date, type, amount, category. Only then is the record persisted.
fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 4 || args.len() > 5 {
        return Err(CommandError::InvalidArguments(format!(
            "invalid amount of arguments (usage: {USAGE})"
        )));
    }

    let date = core::parse_date(args[0])?;

    let kind = TransactionKind::parse_strict(args[1]).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "invalid type `{}` (valid types: income, expense)",
            args[1]
        ))
    })?;

    let amount: f64 = args[2].parse().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid amount `{}`", args[2]))
    })?;

    let category = args[3];
    if !context.categories.contains(kind, category) {
        let mut message = format!(
            "invalid {} category `{}` (valid categories: {})",
            kind,
            category,
            context.categories.labels_for(kind).join(", ")
        );
        if let Some(best) = context.categories.suggest_for(kind, category) {
            message.push_str(&format!(". Did you mean `{best}`?"));
        }
        return Err(CommandError::InvalidArguments(message));
    }

    let description = args.get(4).copied().unwrap_or_default();
    let transaction = Transaction::new(date, kind, amount, category, description);

    let report = context.store.append(transaction).map_err(CommandError::Core)?;
    for warning in &report.warnings {
        context.print_warning(warning);
    }
    io::print_success(format!(
        "Transaction saved to {} ({} recorded).",
        context.store.path().display(),
        report.total
    ));
    Ok(())
}
