use crate::shell::ast::Command;
use log::{debug, warn};
use nix::errno::Errno;
use nix::sys::signal::{Signal, kill};
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;
use std::io::{self, Write};

/// A background command tracked until it exits or is killed.
#[derive(Debug)]
pub struct JobEntry {
    pub id: usize,
    pub pid: Pid,
    pub command: Command,
    pub stopped: bool,
}

/// Background jobs ordered by id.
///
/// `next_id` is always one past the highest live id, so removing the newest
/// job hands its number to the next one while removing an older job leaves
/// the numbering alone.
#[derive(Debug)]
pub struct JobTable {
    entries: Vec<JobEntry>,
    next_id: usize,
    running: usize,
}

impl Default for JobTable {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            running: 0,
        }
    }
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of the command and returns the assigned job id.
    pub fn add(&mut self, command: Command, pid: Pid, stopped: bool) -> usize {
        self.reap_finished();

        let id = self.next_id;
        debug!("job [{}] pid {} started: {}", id, pid, command.original);
        self.entries.push(JobEntry { id, pid, command, stopped });
        self.next_id += 1;
        self.running += 1;
        id
    }

    /// Removing the highest id recomputes the counter from the survivors instead
    /// of decrementing it, so it stays one past the highest live id across gaps.
    pub fn remove_by_id(&mut self, id: usize) -> Option<JobEntry> {
        let pos = self.entries.iter().position(|job| job.id == id)?;
        let entry = self.entries.remove(pos);
        self.running -= 1;
        if id + 1 == self.next_id {
            self.next_id = self.max_id() + 1;
        }
        Some(entry)
    }

    /// Drops every job whose process has exited, without blocking.
    pub fn reap_finished(&mut self) {
        self.entries.retain(|job| {
            let done = has_exited(job.pid);
            if done {
                debug!("job [{}] pid {} reaped", job.id, job.pid);
            }
            !done
        });
        self.next_id = self.max_id() + 1;
        self.running = self.entries.len();
    }

    pub fn get_by_id(&self, id: usize) -> Option<&JobEntry> {
        self.entries.iter().find(|job| job.id == id)
    }

    pub fn get_by_pid(&self, pid: Pid) -> Option<&JobEntry> {
        self.entries.iter().find(|job| job.pid == pid)
    }

    /// The job with the highest id.
    pub fn last_job(&self) -> Option<&JobEntry> {
        self.entries.iter().max_by_key(|job| job.id)
    }

    /// `[id] original-text` per running job.
    pub fn write_list<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        self.entries.sort_by_key(|job| job.id);
        for job in self.entries.iter().filter(|job| !job.stopped) {
            writeln!(out, "[{}] {}", job.id, job.command.original)?;
        }
        Ok(())
    }

    /// `pid: original-text` per job.
    pub fn write_list_with_pid<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        self.entries.sort_by_key(|job| job.id);
        for job in &self.entries {
            writeln!(out, "{}: {}", job.pid, job.command.original)?;
        }
        Ok(())
    }

    /// SIGKILLs every job and empties the table. Returns how many were signalled.
    pub fn kill_all(&mut self) -> usize {
        let count = self.entries.len();
        for job in self.entries.drain(..) {
            match kill(job.pid, Signal::SIGKILL) {
                Ok(()) | Err(Errno::ESRCH) => {}
                Err(e) => warn!("failed to kill job [{}] pid {}: {}", job.id, job.pid, e),
            }
        }
        self.next_id = 1;
        self.running = 0;
        count
    }

    pub fn next_job_id(&self) -> usize {
        self.next_id
    }

    pub fn running(&self) -> usize {
        self.running
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.entries.iter().map(|job| job.id).collect();
        ids.sort_unstable();
        ids
    }

    fn max_id(&self) -> usize {
        self.entries.iter().map(|job| job.id).max().unwrap_or(0)
    }
}

fn has_exited(pid: Pid) -> bool {
    match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
        Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) => true,
        Ok(_) => false,
        // Inherited entries in a forked child are not this process' children.
        Err(Errno::ECHILD) => false,
        Err(e) => {
            debug!("waitpid({}) failed: {}", pid, e);
            false
        }
    }
}
