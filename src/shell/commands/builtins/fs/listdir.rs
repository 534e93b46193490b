// Listdir command

use crate::shell::commands::Executable;
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellError, ShellResult};
use std::fs;
use std::io::Write;

/// Files first, then directories, each group sorted by name.
pub struct ListDirCommand;
impl Executable for ListDirCommand {
    fn execute(&self, args: &[String], _ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
        let dir = match args {
            [_] => ".",
            [_, dir] => dir.as_str(),
            _ => return Err(ShellError::invalid("listdir", "too many arguments")),
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| ShellError::io("open", &e))? {
            let entry = entry.map_err(|e| ShellError::io("getdents", &e))?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            entries.push((is_dir, entry.file_name().to_string_lossy().into_owned()));
        }
        entries.sort();

        for (is_dir, name) in entries {
            let label = if is_dir { "directory" } else { "file" };
            writeln!(out, "{}: {}", label, name)?;
        }
        Ok(())
    }
}
