// Quit command

use crate::shell::commands::Executable;
use crate::shell::context::ShellContext;
use crate::shell::error::ShellResult;
use std::io::Write;

/// Stops the prompt loop. Live jobs never outlive the shell; `quit kill`
/// lists them before they are killed.
pub struct QuitCommand;
impl Executable for QuitCommand {
    fn execute(&self, args: &[String], ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
        if ctx.in_helper() {
            // Ends the helper only; the jobs belong to the interactive shell.
            ctx.proceed = false;
            return Ok(());
        }
        if args.get(1).is_some_and(|arg| arg == "kill") {
            writeln!(out, "smash: sending SIGKILL signal to {} jobs:", ctx.jobs.running())?;
            ctx.jobs.write_list_with_pid(out)?;
        }
        ctx.jobs.kill_all();
        ctx.proceed = false;
        Ok(())
    }
}
