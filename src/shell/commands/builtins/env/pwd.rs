// Pwd command

use crate::shell::commands::Executable;
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellError, ShellResult};
use std::env;
use std::io::Write;

pub struct PwdCommand;
impl Executable for PwdCommand {
    fn execute(&self, _args: &[String], _ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
        let cwd = env::current_dir().map_err(|e| ShellError::io("getcwd", &e))?;
        writeln!(out, "{}", cwd.display())?;
        Ok(())
    }
}
