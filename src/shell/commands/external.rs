// External command
use crate::shell::error::{ShellError, ShellResult};
use crate::shell::parser::{is_complex, split_args};
use nix::unistd::execvp;
use std::ffi::CString;

/// Replaces the current (child) process image with the program named by `text`.
///
/// Wildcard lines are left to bash. Only returns on failure.
pub fn run(text: &str) -> ShellResult<()> {
    let argv = if is_complex(text) {
        vec!["bash".to_string(), "-c".to_string(), text.to_string()]
    } else {
        split_args(text)
    };
    if argv.is_empty() {
        return Ok(());
    }

    let argv = argv
        .into_iter()
        .map(CString::new)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ShellError::invalid("execvp", "argument contains a NUL byte"))?;

    match execvp(&argv[0], &argv) {
        Ok(never) => match never {},
        Err(e) => Err(ShellError::sys("execvp", e)),
    }
}
