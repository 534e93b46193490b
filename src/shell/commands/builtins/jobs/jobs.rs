// Jobs command

use crate::shell::commands::Executable;
use crate::shell::context::ShellContext;
use crate::shell::error::ShellResult;
use std::io::Write;

pub struct JobsCommand;
impl Executable for JobsCommand {
    fn execute(&self, _args: &[String], ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
        ctx.jobs.reap_finished();
        ctx.jobs.write_list(out)?;
        Ok(())
    }
}
