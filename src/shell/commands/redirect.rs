// Redirection: "cmd > file" or "cmd >> file"
use crate::shell::ast::CommandKind;
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellError, ShellResult};
use crate::shell::parser::{find_unescaped, trim};
use crate::shell::process::{Forked, run_in_child, spawn_isolated, wait_for};
use crate::shell::run_command_line;
use nix::fcntl::{OFlag, open};
use nix::libc::STDOUT_FILENO;
use nix::sys::stat::Mode;
use nix::unistd::{close, dup2};
use std::path::Path;

/// Splits at the first unescaped `>`; a second `>` right after it means append.
pub fn parse(line: &str) -> Option<CommandKind> {
    let idx = find_unescaped(line, '>')?;
    let append = line[idx + 1..].starts_with('>');
    let skip = if append { 2 } else { 1 };

    Some(CommandKind::Redirection {
        inner: trim(&line[..idx]).to_string(),
        target: trim(&line[idx + skip..]).to_string(),
        append,
    })
}

/// Runs `inner` in a child whose stdout is the target file.
///
/// If the file cannot be opened the child reports it and exits; `inner` never runs.
pub fn run(inner: &str, target: &str, append: bool, ctx: &mut ShellContext) -> ShellResult<()> {
    match spawn_isolated()? {
        Forked::Child => run_in_child(|| {
            let mode = if append { OFlag::O_APPEND } else { OFlag::O_TRUNC };
            let fd = open(
                Path::new(target),
                OFlag::O_WRONLY | OFlag::O_CREAT | mode,
                Mode::from_bits_truncate(0o644),
            )
            .map_err(|e| ShellError::sys("open", e))?;

            dup2(fd, STDOUT_FILENO).map_err(|e| ShellError::sys("dup2", e))?;
            if fd != STDOUT_FILENO {
                close(fd).map_err(|e| ShellError::sys("close", e))?;
            }
            run_command_line(inner, ctx);
            Ok(())
        }),
        Forked::Parent(pid) => wait_for(pid).map(|_| ()),
    }
}
