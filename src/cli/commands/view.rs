//! The `view` command: list transactions, optionally through one filter.

use crate::cli::core::{self, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::ui::table::{Alignment, Table, TableColumn};
use crate::domain::{Transaction, TransactionKind, DATE_FORMAT};
use crate::query::{DateOp, TransactionFilter};

use super::CommandDefinition;

const USAGE: &str =
    "view all | view date <|>|= <dd-mm-yyyy> | view type <income|expense> | view category <name>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "view",
        "List transactions, optionally filtered by date, type, or category",
        USAGE,
        handle_view,
    )]
}

fn handle_view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = build_filter(context, args)?;

    let transactions = context.load_transactions();
    if transactions.is_empty() {
        io::print_info(format!(
            "No transactions recorded in {}.",
            context.store.path().display()
        ));
        return Ok(());
    }

    let selected = filter.select(&transactions);
    if selected.is_empty() {
        io::print_info("No transactions match.");
        return Ok(());
    }

    print_table(&selected);
    Ok(())
}

/// Exactly one filter dimension per invocation; subcommands enforce their
/// exact token counts, except `view all` which ignores trailing tokens.
fn build_filter(context: &ShellContext, args: &[&str]) -> Result<TransactionFilter, CommandError> {
    let Some(subcommand) = args.first() else {
        return Err(CommandError::InvalidArguments(format!(
            "invalid arguments (usage: {USAGE})"
        )));
    };

    match subcommand.to_lowercase().as_str() {
        "all" => Ok(TransactionFilter::All),
        "date" => {
            if args.len() != 3 {
                return Err(CommandError::InvalidArguments(
                    "invalid amount of arguments (usage: view date <|>|= <dd-mm-yyyy>)".into(),
                ));
            }
            // Count, then date, then operator.
            let date = core::parse_date(args[2])?;
            let op = DateOp::parse(args[1]).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "invalid operator `{}` (valid operators: <, >, =)",
                    args[1]
                ))
            })?;
            Ok(TransactionFilter::Date { op, date })
        }
        "type" => {
            if args.len() != 2 {
                return Err(CommandError::InvalidArguments(
                    "invalid amount of arguments (usage: view type <income|expense>)".into(),
                ));
            }
            let kind = TransactionKind::parse_ci(args[1]).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "invalid type `{}` (valid types: income, expense)",
                    args[1]
                ))
            })?;
            Ok(TransactionFilter::Kind(kind))
        }
        "category" => {
            if args.len() != 2 {
                return Err(CommandError::InvalidArguments(
                    "invalid amount of arguments (usage: view category <name>)".into(),
                ));
            }
            let label = args[1];
            if !context.categories.contains_any_ci(label) {
                let valid: Vec<_> = context.categories.all_labels().collect();
                let mut message = format!(
                    "invalid category `{}` (valid categories: {})",
                    label,
                    valid.join(", ")
                );
                if let Some(best) = context.categories.suggest(label) {
                    message.push_str(&format!(". Did you mean `{best}`?"));
                }
                return Err(CommandError::InvalidArguments(message));
            }
            Ok(TransactionFilter::Category(label.to_string()))
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown view subcommand `{other}` (usage: {USAGE})"
        ))),
    }
}

fn print_table(rows: &[(usize, &Transaction)]) {
    let columns = vec![
        TableColumn::new("#", Alignment::Right),
        TableColumn::new("Date", Alignment::Left),
        TableColumn::new("Type", Alignment::Left),
        TableColumn::new("Amount", Alignment::Right),
        TableColumn::new("Category", Alignment::Left),
        TableColumn::new("Description", Alignment::Left).with_max_width(32),
    ];

    let data = rows
        .iter()
        .map(|(index, transaction)| {
            vec![
                index.to_string(),
                transaction.date.format(DATE_FORMAT).to_string(),
                transaction.kind.to_string(),
                format!("{:.2}", transaction.amount),
                transaction.category.clone(),
                transaction.description.clone(),
            ]
        })
        .collect();

    let table = Table::new(columns, data);
    println!("{}", table.render());
}
