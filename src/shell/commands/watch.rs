// Watch: "watch [-]<interval> <command>"
use crate::shell::ast::{CommandKind, WatchSpec};
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellError, ShellResult};
use crate::shell::executor::execute;
use crate::shell::factory::create_command;
use crate::shell::parser::{head_of, trim};
use chrono::Local;
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(100);
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Parses the arguments following `watch`.
///
/// A leading token that looks numeric (optionally `-` prefixed) is the interval
/// and has to be a positive integer.
pub fn parse(args: &str, default_interval: u64) -> ShellResult<WatchSpec> {
    let args = trim(args);
    let first = head_of(args);
    let digits = first.strip_prefix('-').unwrap_or(first);
    let is_interval = first.starts_with('-') || (!first.is_empty() && first.chars().all(|c| c.is_ascii_digit()));

    let (interval, command) = if is_interval {
        let interval = digits
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ShellError::invalid("watch", "invalid interval"))?;
        (interval, trim(&args[first.len()..]))
    } else {
        (default_interval, args)
    };

    if command.is_empty() {
        return Err(ShellError::invalid("watch", "command not specified"));
    }
    Ok(WatchSpec {
        interval,
        command: command.to_string(),
    })
}

/// Clears the screen and runs the command every `interval` seconds until ctrl-C.
pub fn run(spec: &ShellResult<WatchSpec>, ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
    let spec = spec.as_ref().map_err(Clone::clone)?;

    ctx.signals.begin_watch();
    while !ctx.signals.stop_requested() {
        write!(out, "{}", CLEAR_SCREEN)?;
        writeln!(
            out,
            "Every {}s: {}    {}\n",
            spec.interval,
            spec.command,
            Local::now().format("%a %b %e %H:%M:%S %Y")
        )?;
        out.flush()?;

        if let Some(mut command) = create_command(&spec.command, ctx) {
            if matches!(command.kind, CommandKind::Watch(_)) {
                ctx.signals.end_watch();
                return Err(ShellError::invalid("watch", "cannot watch another watch"));
            }
            command.background = false;
            execute(command, ctx);
        }

        sleep_unless_stopped(spec.interval, ctx);
    }
    ctx.signals.end_watch();
    Ok(())
}

fn sleep_unless_stopped(interval: u64, ctx: &ShellContext) {
    let deadline = Instant::now() + Duration::from_secs(interval);
    while !ctx.signals.stop_requested() {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        thread::sleep(TICK.min(deadline - now));
    }
}
