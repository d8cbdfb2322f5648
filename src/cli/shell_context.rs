use crate::config::Paths;
use crate::domain::CategoryRegistry;
use crate::storage::TransactionStore;

use super::commands::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler needs: the command registry, the category
/// registry loaded once at startup, and the transaction store. Passed
/// explicitly to every handler; there is no global state.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub paths: Paths,
    pub categories: CategoryRegistry,
    pub store: TransactionStore,
    pub running: bool,
}
