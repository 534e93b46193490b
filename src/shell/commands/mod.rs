pub mod alias;
pub mod builtins;
pub mod external;
pub mod pipe;
pub mod redirect;
pub mod watch;

use crate::shell::context::ShellContext;
use crate::shell::error::ShellResult;
use std::io::Write;

/// A command body that runs inside the current process.
pub trait Executable {
    fn execute(&self, args: &[String], ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()>;
}
