use crate::shell::error::ShellResult;
use crate::shell::parser::split_args;

/// Keywords no alias may shadow.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "chprompt", "showpid", "pwd", "cd", "quit", "alias", "unalias", "jobs", "fg", "kill",
    "listdir", "getuser", "watch",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

/// Built-ins that run inside the shell process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    ChangePrompt,
    ShowPid,
    Pwd,
    ChangeDir,
    Quit,
    Jobs,
    Foreground,
    Kill,
    ListDir,
    GetUser,
}

impl Builtin {
    pub fn from_keyword(head: &str) -> Option<Self> {
        let builtin = match head {
            "chprompt" => Self::ChangePrompt,
            "showpid" => Self::ShowPid,
            "pwd" => Self::Pwd,
            "cd" => Self::ChangeDir,
            "quit" => Self::Quit,
            "jobs" => Self::Jobs,
            "fg" => Self::Foreground,
            "kill" => Self::Kill,
            "listdir" => Self::ListDir,
            "getuser" => Self::GetUser,
            _ => return None,
        };
        Some(builtin)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchSpec {
    pub interval: u64,
    pub command: String,
}

#[derive(Debug, PartialEq)]
pub enum CommandKind {
    Builtin(Builtin),
    // Anything else: exec'd in a child
    External,
    // "ls | wc" or "make |& grep error"
    Pipeline {
        left: String,
        right: String,
        route_stderr: bool,
    },
    // "echo logs > file.txt" or "echo more >> file.txt"
    Redirection {
        inner: String,
        target: String,
        append: bool,
    },
    // Interval errors surface when the command runs
    Watch(ShellResult<WatchSpec>),
    // None lists the table
    AliasDeclaration(Option<String>),
    AliasRemoval(Vec<String>),
}

/// A parsed command line.
#[derive(Debug, PartialEq)]
pub struct Command {
    /// The line as typed, shown by `jobs` and `fg`.
    pub original: String,
    /// Alias-expanded text without the background marker.
    pub text: String,
    pub background: bool,
    pub kind: CommandKind,
}

impl Command {
    /// Whether the engine has to fork before running this command.
    pub fn is_external(&self) -> bool {
        match self.kind {
            CommandKind::External
            | CommandKind::Pipeline { .. }
            | CommandKind::Redirection { .. } => true,
            CommandKind::Builtin(_)
            | CommandKind::Watch(_)
            | CommandKind::AliasDeclaration(_)
            | CommandKind::AliasRemoval(_) => false,
        }
    }

    pub fn args(&self) -> Vec<String> {
        split_args(&self.text)
    }
}
