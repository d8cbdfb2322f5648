use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::utils::build_info;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new("quit", "Exit the tracker", "quit", cmd_quit),
        CommandDefinition::new("q", "Exit the tracker", "q", cmd_quit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(definition) = context.registry.get(&command) {
            help::print_command(definition);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Tally {}", meta.version));
    io::print_info(format!("  CLI version  {}", build_info::CLI_VERSION));
    io::print_info(format!("  Build hash   {} ({})", meta.git_hash, meta.git_status));
    io::print_info(format!("  Built at     {}", meta.timestamp));
    io::print_info(format!("  Target       {}", meta.target));
    io::print_info(format!("  Profile      {}", meta.profile));
    io::print_info(format!("  Rustc        {}", meta.rustc));
    Ok(())
}

fn cmd_quit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
