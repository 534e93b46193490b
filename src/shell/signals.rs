use anyhow::{Context, Result};
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// The only state the interrupt handler touches.
///
/// The handler kills the foreground child or asks an active `watch` to stop,
/// and leaves a note for the main loop to print. It never allocates and never
/// looks at the job table.
#[derive(Debug, Default)]
pub struct SignalState {
    foreground: AtomicI32,
    watch_active: AtomicBool,
    stop_requested: AtomicBool,
    interrupted: AtomicBool,
    killed: AtomicI32,
}

impl SignalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_foreground(&self, pid: Pid) {
        self.foreground.store(pid.as_raw(), Ordering::SeqCst);
    }

    pub fn clear_foreground(&self) {
        self.foreground.store(0, Ordering::SeqCst);
    }

    pub fn foreground(&self) -> Option<Pid> {
        match self.foreground.load(Ordering::SeqCst) {
            0 => None,
            raw => Some(Pid::from_raw(raw)),
        }
    }

    pub fn on_interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
        let raw = self.foreground.swap(0, Ordering::SeqCst);
        if raw > 0 {
            let _ = kill(Pid::from_raw(raw), Signal::SIGKILL);
            self.killed.store(raw, Ordering::SeqCst);
        } else if self.watch_active.load(Ordering::SeqCst) {
            self.stop_requested.store(true, Ordering::SeqCst);
        }
    }

    pub fn begin_watch(&self) {
        self.stop_requested.store(false, Ordering::SeqCst);
        self.watch_active.store(true, Ordering::SeqCst);
    }

    pub fn end_watch(&self) {
        self.watch_active.store(false, Ordering::SeqCst);
        self.stop_requested.store(false, Ordering::SeqCst);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    /// Pending ctrl-C messages, oldest first. Clears them.
    pub fn take_notices(&self) -> Vec<String> {
        let mut notices = Vec::new();
        if self.interrupted.swap(false, Ordering::SeqCst) {
            notices.push("smash: got ctrl-C".to_string());
        }
        let killed = self.killed.swap(0, Ordering::SeqCst);
        if killed > 0 {
            notices.push(format!("smash: process {} was killed", killed));
        }
        notices
    }

    pub fn print_notices(&self) {
        for notice in self.take_notices() {
            println!("{}", notice);
        }
    }
}

/// Routes SIGINT to the controller. Can only be called once per process.
pub fn install(state: Arc<SignalState>) -> Result<()> {
    ctrlc::set_handler(move || state.on_interrupt())
        .context("smash error: failed to set ctrl-C handler")
}
