// Chprompt command

use crate::shell::commands::Executable;
use crate::shell::context::{DEFAULT_PROMPT, ShellContext};
use crate::shell::error::ShellResult;
use std::io::Write;

pub struct ChangePromptCommand;
impl Executable for ChangePromptCommand {
    fn execute(&self, args: &[String], ctx: &mut ShellContext, _out: &mut dyn Write) -> ShellResult<()> {
        // No argument resets the prompt
        ctx.prompt = args.get(1).map(String::as_str).unwrap_or(DEFAULT_PROMPT).to_string();
        Ok(())
    }
}
