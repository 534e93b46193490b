use crate::config::SmashConfig;
use crate::shell::alias::AliasTable;
use crate::shell::jobs::JobTable;
use crate::shell::signals::SignalState;
use log::{debug, warn};
use nix::unistd::{Pid, getpid};
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_PROMPT: &str = "smash";
pub const DEFAULT_WATCH_INTERVAL: u64 = 2;

/// Shell-wide state, created once at startup and threaded through the engine.
pub struct ShellContext {
    pub prompt: String,
    pub jobs: JobTable,
    pub aliases: AliasTable,
    /// Directory before the last successful `cd`.
    pub last_dir: Option<PathBuf>,
    /// Cleared by `quit`.
    pub proceed: bool,
    pub signals: Arc<SignalState>,
    pub watch_interval: u64,
    /// Pid of the interactive shell, also inside forked helpers.
    pub shell_pid: Pid,
}

impl ShellContext {
    pub fn new() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            jobs: JobTable::new(),
            aliases: AliasTable::new(),
            last_dir: None,
            proceed: true,
            signals: Arc::new(SignalState::new()),
            watch_interval: DEFAULT_WATCH_INTERVAL,
            shell_pid: getpid(),
        }
    }

    /// Whether this process is a forked pipeline or redirection helper.
    ///
    /// A helper only holds a copy of the shell's job table; the pids in it are
    /// still the interactive shell's children.
    pub fn in_helper(&self) -> bool {
        getpid() != self.shell_pid
    }

    pub fn with_config(config: &SmashConfig) -> Self {
        let mut ctx = Self::new();
        if let Some(prompt) = &config.prompt {
            ctx.prompt = prompt.clone();
        }
        if let Some(interval) = config.watch_interval {
            ctx.watch_interval = interval;
        }

        for alias in &config.aliases {
            let declaration = format!("{}='{}'", alias.name, alias.command);
            match ctx.aliases.declare_line(&declaration) {
                Ok(()) => debug!("alias loaded from config: {}", declaration),
                Err(e) => warn!("skipping alias '{}' from config: {}", alias.name, e),
            }
        }
        ctx
    }
}

impl Default for ShellContext {
    fn default() -> Self {
        Self::new()
    }
}
