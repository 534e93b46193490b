// Kill command

use crate::shell::commands::Executable;
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellError, ShellResult};
use nix::sys::signal::{Signal, kill};
use std::io::Write;

const MAX_SIGNAL: i32 = 31;

/// `kill -<signum> <job-id>`, signum in 1..=31.
pub struct KillCommand;
impl Executable for KillCommand {
    fn execute(&self, args: &[String], ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
        let invalid = || ShellError::invalid("kill", "invalid arguments");

        let [_, signal_arg, job_arg] = args else {
            return Err(invalid());
        };

        let job_id: i64 = job_arg.parse().map_err(|_| invalid())?;
        let pid = usize::try_from(job_id)
            .ok()
            .and_then(|id| ctx.jobs.get_by_id(id))
            .map(|job| job.pid)
            .ok_or_else(|| ShellError::not_found("kill", format!("job-id {} does not exist", job_id)))?;

        let signum = signal_arg
            .strip_prefix('-')
            .and_then(|n| n.parse::<i32>().ok())
            .filter(|n| (1..=MAX_SIGNAL).contains(n))
            .ok_or_else(invalid)?;
        let signal = Signal::try_from(signum).map_err(|_| invalid())?;

        kill(pid, signal).map_err(|e| ShellError::sys("kill", e))?;
        writeln!(out, "signal number {} was sent to pid {}", signum, pid)?;
        Ok(())
    }
}
