use anyhow::{Context, Result};
use crate::shell::context::ShellContext;
use crate::shell::run_command_line;
use log::debug;
use std::io::{self, BufRead, Write};

/// Prompt, read one line, run it. Stops on `quit` or end of input.
pub fn handle_repl(ctx: &mut ShellContext) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    while ctx.proceed {
        ctx.signals.print_notices();
        print!("{}> ", ctx.prompt);
        io::stdout().flush().context("Failed to write prompt")?;

        line.clear();
        // SIGINT does not interrupt this read; an idle ctrl-C is reported
        // before the prompt that follows the next line.
        let read = input.read_line(&mut line).context("Failed to read command line")?;
        if read == 0 {
            debug!("end of input, shutting down");
            println!();
            break;
        }

        run_command_line(&line, ctx);
    }

    let killed = ctx.jobs.kill_all();
    debug!("killed {} remaining jobs", killed);
    Ok(())
}
