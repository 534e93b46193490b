pub mod alias;
pub mod ast;
pub mod commands;
pub mod context;
pub mod error;
pub mod executor;
pub mod factory;
pub mod jobs;
pub mod parser;
pub mod process;
pub mod signals;

use context::ShellContext;
use executor::execute;
use factory::create_command;

#[cfg(test)]
mod tests;

/// Interprets one input line. Errors are reported, never propagated.
pub fn run_command_line(line: &str, ctx: &mut ShellContext) {
    if let Some(command) = create_command(line, ctx) {
        execute(command, ctx);
    }
}
