use nix::errno::Errno;
use thiserror::Error;

pub type ShellResult<T> = std::result::Result<T, ShellError>;

/// Everything a command can fail with. The rendered text is what the user sees.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShellError {
    /// Malformed arguments or declarations.
    #[error("smash error: {subsystem}: {detail}")]
    Invalid { subsystem: &'static str, detail: String },

    /// Unknown job, alias or process.
    #[error("smash error: {subsystem}: {detail}")]
    NotFound { subsystem: &'static str, detail: String },

    /// A system call refused to cooperate.
    #[error("smash error: {call} failed: {}", .errno.desc())]
    Sys { call: &'static str, errno: Errno },
}

impl ShellError {
    pub fn invalid(subsystem: &'static str, detail: impl Into<String>) -> Self {
        Self::Invalid { subsystem, detail: detail.into() }
    }

    pub fn not_found(subsystem: &'static str, detail: impl Into<String>) -> Self {
        Self::NotFound { subsystem, detail: detail.into() }
    }

    pub fn sys(call: &'static str, errno: Errno) -> Self {
        Self::Sys { call, errno }
    }

    /// Maps a std I/O failure onto the errno it carries.
    pub fn io(call: &'static str, err: &std::io::Error) -> Self {
        let errno = err.raw_os_error().map(Errno::from_raw).unwrap_or(Errno::EIO);
        Self::Sys { call, errno }
    }

    /// Status a forked child exits with after reporting this error.
    pub fn exit_status(&self) -> i32 {
        match self {
            Self::Sys { call: "execvp", .. } => 127,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        Self::io("write", &err)
    }
}

/// Prints the error the way every smash diagnostic is printed.
pub fn report(err: &ShellError) {
    eprintln!("{}", err);
}
