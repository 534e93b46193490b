use anyhow::Result;
use crate::shell::context::ShellContext;
use crate::shell::run_command_line;
use log::debug;

/// `smash -c LINE`: runs the line once, then cleans up like `quit`.
pub fn handle_oneshot(line: &str, ctx: &mut ShellContext) -> Result<()> {
    debug!("running one-shot line: {}", line);
    run_command_line(line, ctx);
    ctx.signals.print_notices();

    let killed = ctx.jobs.kill_all();
    debug!("killed {} remaining jobs", killed);
    Ok(())
}
