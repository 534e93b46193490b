mod cli;
mod config;
mod handlers;
mod shell;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use handlers::{oneshot, repl};
use shell::context::ShellContext;
use shell::signals;
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = config::load_config(cli.config.as_deref())?;
    let mut ctx = ShellContext::with_config(&config);
    if let Some(prompt) = cli.prompt {
        ctx.prompt = prompt;
    }
    signals::install(Arc::clone(&ctx.signals))?;

    match cli.command {
        Some(line) => oneshot::handle_oneshot(&line, &mut ctx),
        None => repl::handle_repl(&mut ctx),
    }
}
