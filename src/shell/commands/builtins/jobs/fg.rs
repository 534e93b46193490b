// Fg command

use crate::shell::commands::Executable;
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellError, ShellResult};
use crate::shell::executor::wait_foreground;
use std::io::Write;

/// Moves a background job to the foreground and waits for it.
pub struct ForegroundCommand;
impl Executable for ForegroundCommand {
    fn execute(&self, args: &[String], ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
        if ctx.in_helper() {
            return Err(ShellError::invalid("fg", "cannot be used in a pipeline or redirection"));
        }

        let job_id = match args {
            [_] => {
                ctx.jobs
                    .last_job()
                    .ok_or_else(|| ShellError::invalid("fg", "jobs list is empty"))?
                    .id
            }
            [_, id] => {
                let id: i64 = id
                    .parse()
                    .map_err(|_| ShellError::invalid("fg", "invalid arguments"))?;
                usize::try_from(id)
                    .ok()
                    .filter(|id| ctx.jobs.get_by_id(*id).is_some())
                    .ok_or_else(|| ShellError::not_found("fg", format!("job-id {} does not exist", id)))?
            }
            _ => return Err(ShellError::invalid("fg", "invalid arguments")),
        };

        let job = ctx
            .jobs
            .remove_by_id(job_id)
            .ok_or_else(|| ShellError::not_found("fg", format!("job-id {} does not exist", job_id)))?;

        writeln!(out, "{} {}", job.command.original, job.pid)?;
        out.flush()?;
        wait_foreground(job.pid, ctx)
    }
}
