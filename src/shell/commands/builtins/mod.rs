pub mod env;
pub mod fs;
pub mod jobs;

use crate::shell::ast::Builtin;
use crate::shell::commands::Executable;
use crate::shell::context::ShellContext;
use crate::shell::error::ShellResult;
use std::io::Write;

/// Dispatches a built-in keyword to its body.
pub fn run(builtin: Builtin, args: &[String], ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
    match builtin {
        Builtin::ChangePrompt => env::chprompt::ChangePromptCommand.execute(args, ctx, out),
        Builtin::ShowPid => env::showpid::ShowPidCommand.execute(args, ctx, out),
        Builtin::Pwd => env::pwd::PwdCommand.execute(args, ctx, out),
        Builtin::ChangeDir => env::cd::CdCommand.execute(args, ctx, out),
        Builtin::Quit => env::quit::QuitCommand.execute(args, ctx, out),
        Builtin::Jobs => jobs::jobs::JobsCommand.execute(args, ctx, out),
        Builtin::Foreground => jobs::fg::ForegroundCommand.execute(args, ctx, out),
        Builtin::Kill => jobs::kill::KillCommand.execute(args, ctx, out),
        Builtin::ListDir => fs::listdir::ListDirCommand.execute(args, ctx, out),
        Builtin::GetUser => fs::getuser::GetUserCommand.execute(args, ctx, out),
    }
}
