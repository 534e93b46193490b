// Showpid command

use crate::shell::commands::Executable;
use crate::shell::context::ShellContext;
use crate::shell::error::ShellResult;
use std::io::Write;

pub struct ShowPidCommand;
impl Executable for ShowPidCommand {
    fn execute(&self, _args: &[String], ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
        writeln!(out, "smash pid is {}", ctx.shell_pid)?;
        Ok(())
    }
}
