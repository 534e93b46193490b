use crate::shell::ast::{Command, CommandKind};
use crate::shell::commands::builtins;
use crate::shell::commands::{alias, external, pipe, redirect, watch};
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellResult, report};
use crate::shell::process::{Forked, run_in_child, spawn_isolated, wait_for};
use log::debug;
use nix::unistd::Pid;
use std::io;

/// Runs one command: in-process for built-ins, in a forked child otherwise.
///
/// A background child is handed to the job table together with its command;
/// a foreground child is waited for with its pid published to the signal
/// controller for the duration of the wait.
pub fn execute(command: Command, ctx: &mut ShellContext) {
    ctx.jobs.reap_finished();

    if !command.is_external() {
        if let Err(e) = run(&command, ctx) {
            report(&e);
        }
        return;
    }

    match spawn_isolated() {
        Err(e) => report(&e),
        Ok(Forked::Child) => run_in_child(|| run(&command, ctx)),
        Ok(Forked::Parent(pid)) => {
            if command.background {
                let id = ctx.jobs.add(command, pid, false);
                debug!("dispatched job [{}] as pid {}", id, pid);
            } else if let Err(e) = wait_foreground(pid, ctx) {
                report(&e);
            }
        }
    }
}

/// Blocks on `pid` as the foreground process.
pub fn wait_foreground(pid: Pid, ctx: &mut ShellContext) -> ShellResult<()> {
    ctx.signals.set_foreground(pid);
    let result = wait_for(pid);
    ctx.signals.clear_foreground();
    ctx.signals.print_notices();
    result.map(|_| ())
}

fn run(command: &Command, ctx: &mut ShellContext) -> ShellResult<()> {
    let mut out = io::stdout();
    match &command.kind {
        CommandKind::Builtin(builtin) => builtins::run(*builtin, &command.args(), ctx, &mut out),
        CommandKind::External => external::run(&command.text),
        CommandKind::Pipeline { left, right, route_stderr } => {
            pipe::run(left, right, *route_stderr, ctx)
        }
        CommandKind::Redirection { inner, target, append } => {
            redirect::run(inner, target, *append, ctx)
        }
        CommandKind::Watch(spec) => watch::run(spec, ctx, &mut out),
        CommandKind::AliasDeclaration(declaration) => {
            alias::declare(declaration.as_deref(), ctx, &mut out)
        }
        CommandKind::AliasRemoval(names) => alias::remove(names, ctx),
    }
}
