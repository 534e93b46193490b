// Pipeline: "cmd1 | cmd2" or "cmd1 |& cmd2"
use crate::shell::ast::CommandKind;
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellError, ShellResult};
use crate::shell::parser::{find_unescaped, trim};
use crate::shell::process::{Forked, run_in_child, spawn_isolated, wait_for};
use crate::shell::run_command_line;
use nix::libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO};
use nix::unistd::{dup2, pipe};
use std::os::fd::AsRawFd;

/// Splits at the first unescaped `|`. `|&` feeds stderr instead of stdout.
pub fn parse(line: &str) -> Option<CommandKind> {
    let idx = find_unescaped(line, '|')?;
    let route_stderr = line[idx + 1..].starts_with('&');
    let skip = if route_stderr { 2 } else { 1 };

    Some(CommandKind::Pipeline {
        left: trim(&line[..idx]).to_string(),
        right: trim(&line[idx + skip..]).to_string(),
        route_stderr,
    })
}

/// Forks a writer and a reader joined by one pipe and waits for both.
///
/// The parent drops both ends before waiting, so no descriptor outlives the call.
pub fn run(left: &str, right: &str, route_stderr: bool, ctx: &mut ShellContext) -> ShellResult<()> {
    let (read_end, write_end) = pipe().map_err(|e| ShellError::sys("pipe", e))?;
    let source = if route_stderr { STDERR_FILENO } else { STDOUT_FILENO };

    let writer = match spawn_isolated()? {
        Forked::Child => run_in_child(|| {
            dup2(write_end.as_raw_fd(), source).map_err(|e| ShellError::sys("dup2", e))?;
            drop(read_end);
            drop(write_end);
            run_command_line(left, ctx);
            Ok(())
        }),
        Forked::Parent(pid) => pid,
    };

    let reader = match spawn_isolated() {
        Ok(Forked::Child) => run_in_child(|| {
            dup2(read_end.as_raw_fd(), STDIN_FILENO).map_err(|e| ShellError::sys("dup2", e))?;
            drop(read_end);
            drop(write_end);
            run_command_line(right, ctx);
            Ok(())
        }),
        Ok(Forked::Parent(pid)) => Ok(pid),
        Err(e) => Err(e),
    };

    drop(read_end);
    drop(write_end);

    let waited = wait_for(writer);
    let reader = reader?;
    wait_for(reader)?;
    waited.map(|_| ())
}
