// alias / unalias
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellError, ShellResult};
use std::io::Write;

/// `alias` lists the table, `alias name='text'` declares one entry.
pub fn declare(declaration: Option<&str>, ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
    match declaration {
        None => {
            for line in ctx.aliases.listing() {
                writeln!(out, "{}", line)?;
            }
            Ok(())
        }
        Some(declaration) => ctx.aliases.declare_line(declaration),
    }
}

/// Removes names in order, stopping at the first unknown one.
pub fn remove(names: &[String], ctx: &mut ShellContext) -> ShellResult<()> {
    if names.is_empty() {
        return Err(ShellError::invalid("unalias", "not enough arguments"));
    }
    for name in names {
        ctx.aliases.remove(name)?;
    }
    Ok(())
}
