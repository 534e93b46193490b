// Cd command

use crate::shell::commands::Executable;
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellError, ShellResult};
use std::env;
use std::io::Write;
use std::path::PathBuf;

pub struct CdCommand;
impl Executable for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut ShellContext, _out: &mut dyn Write) -> ShellResult<()> {
        // args[0] is "cd". args[1] is path.
        let target = match args {
            [_] => return Ok(()),
            [_, path] if path == "-" => ctx
                .last_dir
                .clone()
                .ok_or_else(|| ShellError::invalid("cd", "OLDPWD not set"))?,
            [_, path] => PathBuf::from(path),
            _ => return Err(ShellError::invalid("cd", "too many arguments")),
        };

        let current = env::current_dir().map_err(|e| ShellError::io("getcwd", &e))?;
        env::set_current_dir(&target).map_err(|e| ShellError::io("chdir", &e))?;
        ctx.last_dir = Some(current);
        Ok(())
    }
}
