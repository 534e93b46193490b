use crate::shell::error::{ShellError, ShellResult, report};
use log::debug;
use nix::errno::Errno;
use nix::sys::prctl::set_pdeathsig;
use nix::sys::signal::Signal;
use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{ForkResult, Pid, fork, getpid, getppid, setpgid};
use std::io::{self, Write};

/// Which side of a fork we ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forked {
    Child,
    Parent(Pid),
}

/// Forks a child that leads its own process group.
///
/// Every process-spawning command goes through here, so a terminal ctrl-C only
/// reaches the shell and the shell decides whom to kill. The child is SIGKILLed
/// when its parent dies, so killing a pipeline or redirection helper also takes
/// down the programs it started. Buffered output is flushed first so the child
/// does not replay it.
pub fn spawn_isolated() -> ShellResult<Forked> {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
    let parent = getpid();

    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            let _ = setpgid(Pid::from_raw(0), Pid::from_raw(0));
            if let Err(e) = set_pdeathsig(Signal::SIGKILL) {
                debug!("prctl(PR_SET_PDEATHSIG) failed: {}", e);
            }
            // The parent may have died before the death signal was armed.
            if getppid() != parent {
                exit_child(1);
            }
            Ok(Forked::Child)
        }
        Ok(ForkResult::Parent { child }) => {
            // Racing the child's own call; whichever lands first wins.
            let _ = setpgid(child, child);
            debug!("forked child {}", child);
            Ok(Forked::Parent(child))
        }
        Err(e) => Err(ShellError::sys("fork", e)),
    }
}

/// Runs `body` in a freshly forked child and terminates the child afterwards.
pub fn run_in_child<F>(body: F) -> !
where
    F: FnOnce() -> ShellResult<()>,
{
    let status = match body() {
        Ok(()) => 0,
        Err(e) => {
            report(&e);
            e.exit_status()
        }
    };
    exit_child(status)
}

/// Leaves a forked child without running the parent's exit hooks.
pub fn exit_child(status: i32) -> ! {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
    unsafe { nix::libc::_exit(status) }
}

/// Blocks until `pid` exits or is killed.
pub fn wait_for(pid: Pid) -> ShellResult<WaitStatus> {
    loop {
        match waitpid(pid, None) {
            Ok(status) => {
                debug!("child {} finished: {:?}", pid, status);
                return Ok(status);
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ShellError::sys("waitpid", e)),
        }
    }
}
