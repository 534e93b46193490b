use crate::shell::ast::WatchSpec;
use crate::shell::commands::Executable;
use crate::shell::commands::builtins::env::cd::CdCommand;
use crate::shell::commands::builtins::env::chprompt::ChangePromptCommand;
use crate::shell::commands::builtins::env::quit::QuitCommand;
use crate::shell::commands::builtins::env::showpid::ShowPidCommand;
use crate::shell::commands::builtins::fs::getuser::GetUserCommand;
use crate::shell::commands::builtins::fs::listdir::ListDirCommand;
use crate::shell::commands::builtins::jobs::fg::ForegroundCommand;
use crate::shell::commands::builtins::jobs::jobs::JobsCommand;
use crate::shell::commands::builtins::jobs::kill::KillCommand;
use crate::shell::commands::{external, watch};
use crate::shell::context::ShellContext;
use crate::shell::factory::create_command;
use crate::shell::process::{Forked, run_in_child, spawn_isolated, wait_for};
use crate::shell::run_command_line;
use nix::sys::signal::Signal;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::{Pid, getpid};
use pretty_assertions::assert_eq;
use serial_test::serial;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

fn args(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn run_builtin(cmd: &dyn Executable, words: &[&str], ctx: &mut ShellContext) -> String {
    let mut out = Vec::new();
    cmd.execute(&args(words), ctx, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn builtin_error(cmd: &dyn Executable, words: &[&str], ctx: &mut ShellContext) -> String {
    let mut out = Vec::new();
    cmd.execute(&args(words), ctx, &mut out).unwrap_err().to_string()
}

fn wait_until_reaped(ctx: &mut ShellContext) {
    for _ in 0..50 {
        ctx.jobs.reap_finished();
        if ctx.jobs.is_empty() {
            return;
        }
        thread::sleep(Duration::from_millis(100));
    }
    panic!("jobs were never reaped: {:?}", ctx.jobs.ids());
}

#[test]
#[serial]
fn test_redirection_truncates_then_appends() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.txt");
    let mut ctx = ShellContext::new();

    run_command_line(&format!("printf first > {}", out.display()), &mut ctx);
    run_command_line(&format!("printf second > {}", out.display()), &mut ctx);
    assert_eq!(fs::read_to_string(&out).unwrap(), "second");

    run_command_line(&format!("printf third >> {}", out.display()), &mut ctx);
    assert_eq!(fs::read_to_string(&out).unwrap(), "secondthird");
}

#[test]
#[serial]
fn test_redirection_of_builtin_output() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("pid.txt");
    let mut ctx = ShellContext::new();

    run_command_line(&format!("showpid > {}", out.display()), &mut ctx);
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        format!("smash pid is {}\n", getpid())
    );
}

#[test]
#[serial]
fn test_pipeline_into_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("upper.txt");
    let mut ctx = ShellContext::new();

    run_command_line(&format!("printf hello | tr a-z A-Z > {}", out.display()), &mut ctx);
    assert_eq!(fs::read_to_string(&out).unwrap(), "HELLO");
}

#[test]
#[serial]
fn test_pipeline_routes_stderr() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("err.txt");
    let mut ctx = ShellContext::new();

    run_command_line(
        &format!("sh -c 'echo oops 1>&2' |& tr a-z A-Z > {}", out.display()),
        &mut ctx,
    );
    assert_eq!(fs::read_to_string(&out).unwrap(), "OOPS\n");
}

#[test]
#[serial]
fn test_alias_expands_into_pipeline() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("alias.txt");
    let mut ctx = ShellContext::new();

    run_command_line("alias up='printf hello | tr a-z A-Z'", &mut ctx);
    assert_eq!(ctx.aliases.get("up"), Some("printf hello | tr a-z A-Z"));

    run_command_line(&format!("up > {}", out.display()), &mut ctx);
    assert_eq!(fs::read_to_string(&out).unwrap(), "HELLO");

    run_command_line("unalias up", &mut ctx);
    assert!(!ctx.aliases.contains("up"));
}

#[test]
#[serial]
fn test_background_job_listed_then_killed() {
    let mut ctx = ShellContext::new();
    run_command_line("sleep 30 &", &mut ctx);
    assert_eq!(run_builtin(&JobsCommand, &["jobs"], &mut ctx), "[1] sleep 30 &\n");

    let pid = ctx.jobs.get_by_id(1).unwrap().pid;
    assert_eq!(
        run_builtin(&KillCommand, &["kill", "-9", "1"], &mut ctx),
        format!("signal number 9 was sent to pid {}\n", pid)
    );

    wait_until_reaped(&mut ctx);
    assert_eq!(run_builtin(&JobsCommand, &["jobs"], &mut ctx), "");
    assert_eq!(ctx.jobs.next_job_id(), 1);
}

#[test]
#[serial]
fn test_finished_background_job_is_reaped() {
    let mut ctx = ShellContext::new();
    run_command_line("true &", &mut ctx);
    wait_until_reaped(&mut ctx);
    assert_eq!(run_builtin(&JobsCommand, &["jobs"], &mut ctx), "");
}

#[test]
#[serial]
fn test_quit_kill_lists_and_kills_jobs() {
    let mut ctx = ShellContext::new();
    run_command_line("sleep 30&", &mut ctx);
    let pid = ctx.jobs.get_by_id(1).unwrap().pid;

    assert_eq!(
        run_builtin(&QuitCommand, &["quit", "kill"], &mut ctx),
        format!("smash: sending SIGKILL signal to 1 jobs:\n{}: sleep 30&\n", pid)
    );
    assert!(!ctx.proceed);
    assert!(ctx.jobs.is_empty());
    assert!(matches!(
        waitpid(pid, None).unwrap(),
        WaitStatus::Signaled(p, Signal::SIGKILL, _) if p == pid
    ));
}

#[test]
#[serial]
fn test_plain_quit_still_kills_jobs() {
    let mut ctx = ShellContext::new();
    run_command_line("sleep 30 &", &mut ctx);
    let pid = ctx.jobs.get_by_id(1).unwrap().pid;

    assert_eq!(run_builtin(&QuitCommand, &["quit"], &mut ctx), "");
    assert!(!ctx.proceed);
    assert!(matches!(waitpid(pid, None).unwrap(), WaitStatus::Signaled(..)));
}

#[test]
#[serial]
fn test_exec_failure_exits_child_with_127() {
    let pid = match spawn_isolated().unwrap() {
        Forked::Child => run_in_child(|| external::run("smash-no-such-program --flag")),
        Forked::Parent(pid) => pid,
    };
    assert_eq!(wait_for(pid).unwrap(), WaitStatus::Exited(pid, 127));

    let mut ctx = ShellContext::new();
    run_command_line("smash-no-such-program", &mut ctx);
    assert!(ctx.proceed);
    assert!(ctx.jobs.is_empty());
}

#[test]
#[serial]
fn test_fg_waits_for_job() {
    let mut ctx = ShellContext::new();
    run_command_line("sleep 0.2 &", &mut ctx);
    let pid = ctx.jobs.get_by_id(1).unwrap().pid;

    assert_eq!(
        run_builtin(&ForegroundCommand, &["fg"], &mut ctx),
        format!("sleep 0.2 & {}\n", pid)
    );
    assert!(ctx.jobs.is_empty());
    assert_eq!(ctx.signals.foreground(), None);
}

#[test]
fn test_fg_argument_errors() {
    let mut ctx = ShellContext::new();
    assert_eq!(
        builtin_error(&ForegroundCommand, &["fg"], &mut ctx),
        "smash error: fg: jobs list is empty"
    );
    assert_eq!(
        builtin_error(&ForegroundCommand, &["fg", "abc"], &mut ctx),
        "smash error: fg: invalid arguments"
    );
    assert_eq!(
        builtin_error(&ForegroundCommand, &["fg", "4"], &mut ctx),
        "smash error: fg: job-id 4 does not exist"
    );
    assert_eq!(
        builtin_error(&ForegroundCommand, &["fg", "1", "2"], &mut ctx),
        "smash error: fg: invalid arguments"
    );
}

#[test]
fn test_kill_argument_errors() {
    let mut ctx = ShellContext::new();
    // Never a real process, so no signal can land anywhere.
    let job = create_command("sleep 5 &", &ctx).unwrap();
    ctx.jobs.add(job, Pid::from_raw(2_000_000_001), false);

    let invalid = "smash error: kill: invalid arguments";
    assert_eq!(builtin_error(&KillCommand, &["kill", "-9"], &mut ctx), invalid);
    assert_eq!(builtin_error(&KillCommand, &["kill", "-9", "x"], &mut ctx), invalid);
    assert_eq!(builtin_error(&KillCommand, &["kill", "9", "1"], &mut ctx), invalid);
    assert_eq!(builtin_error(&KillCommand, &["kill", "-0", "1"], &mut ctx), invalid);
    assert_eq!(builtin_error(&KillCommand, &["kill", "-32", "1"], &mut ctx), invalid);
    assert_eq!(
        builtin_error(&KillCommand, &["kill", "-9", "3"], &mut ctx),
        "smash error: kill: job-id 3 does not exist"
    );
    assert_eq!(ctx.jobs.ids(), vec![1]);
}

#[test]
#[serial]
fn test_cd_and_cd_dash() {
    let start = env::current_dir().unwrap();
    let dir = tempdir().unwrap();
    let target = dir.path().canonicalize().unwrap();
    let mut ctx = ShellContext::new();

    assert_eq!(
        builtin_error(&CdCommand, &["cd", "-"], &mut ctx),
        "smash error: cd: OLDPWD not set"
    );

    run_builtin(&CdCommand, &["cd", target.to_str().unwrap()], &mut ctx);
    assert_eq!(env::current_dir().unwrap(), target);
    assert_eq!(ctx.last_dir.as_deref(), Some(start.as_path()));

    run_builtin(&CdCommand, &["cd", "-"], &mut ctx);
    assert_eq!(env::current_dir().unwrap(), start);
    assert_eq!(ctx.last_dir.as_deref(), Some(target.as_path()));

    assert_eq!(
        builtin_error(&CdCommand, &["cd", "a", "b"], &mut ctx),
        "smash error: cd: too many arguments"
    );
    assert_eq!(
        builtin_error(&CdCommand, &["cd", "/smash/no/such/dir"], &mut ctx),
        "smash error: chdir failed: No such file or directory"
    );
    assert_eq!(env::current_dir().unwrap(), start);
}

#[test]
fn test_chprompt_and_showpid() {
    let mut ctx = ShellContext::new();
    run_builtin(&ChangePromptCommand, &["chprompt", "dev"], &mut ctx);
    assert_eq!(ctx.prompt, "dev");
    run_builtin(&ChangePromptCommand, &["chprompt"], &mut ctx);
    assert_eq!(ctx.prompt, "smash");

    assert_eq!(
        run_builtin(&ShowPidCommand, &["showpid"], &mut ctx),
        format!("smash pid is {}\n", getpid())
    );
}

#[test]
fn test_listdir_files_before_directories() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "b").unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let path = dir.path().to_str().unwrap();
    let mut ctx = ShellContext::new();

    assert_eq!(
        run_builtin(&ListDirCommand, &["listdir", path], &mut ctx),
        "file: a.txt\nfile: b.txt\ndirectory: sub\n"
    );
    assert_eq!(
        builtin_error(&ListDirCommand, &["listdir", path, path], &mut ctx),
        "smash error: listdir: too many arguments"
    );
    assert_eq!(
        builtin_error(&ListDirCommand, &["listdir", "/smash/no/such/dir"], &mut ctx),
        "smash error: open failed: No such file or directory"
    );
}

#[test]
fn test_getuser_for_own_process() {
    let mut ctx = ShellContext::new();
    let pid = getpid().to_string();
    let out = run_builtin(&GetUserCommand, &["getuser", pid.as_str()], &mut ctx);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("User: "));
    assert!(lines[1].starts_with("Group: "));

    assert_eq!(
        builtin_error(&GetUserCommand, &["getuser", "999999999"], &mut ctx),
        "smash error: getuser: process 999999999 does not exist"
    );
}

#[test]
#[serial]
fn test_watch_runs_until_interrupted() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("ticks.txt");
    let mut ctx = ShellContext::new();

    let signals = Arc::clone(&ctx.signals);
    let done = Arc::new(AtomicBool::new(false));
    let finished = Arc::clone(&done);
    // Keeps interrupting until the loop is gone; an interrupt that lands while
    // the command runs only kills that iteration.
    let interrupter = thread::spawn(move || {
        while !finished.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(300));
            signals.on_interrupt();
        }
    });

    let spec = WatchSpec {
        interval: 1,
        command: format!("printf x >> {}", log.display()),
    };
    let mut out = Vec::new();
    let result = watch::run(&Ok(spec), &mut ctx, &mut out);
    done.store(true, Ordering::SeqCst);
    interrupter.join().unwrap();

    assert!(result.is_ok());
    let screen = String::from_utf8(out).unwrap();
    assert!(screen.contains(&format!("Every 1s: printf x >> {}", log.display())));
    assert!(!ctx.signals.stop_requested());
    ctx.signals.take_notices();
}

#[test]
fn test_watch_rejects_nested_watch() {
    let mut ctx = ShellContext::new();
    let spec = WatchSpec {
        interval: 1,
        command: "watch 2 date".to_string(),
    };
    let mut out = Vec::new();
    let err = watch::run(&Ok(spec), &mut ctx, &mut out).unwrap_err();
    assert_eq!(err.to_string(), "smash error: watch: cannot watch another watch");
    assert!(!ctx.signals.stop_requested());
}

#[test]
fn test_blank_line_is_ignored() {
    let mut ctx = ShellContext::new();
    run_command_line("   ", &mut ctx);
    assert!(ctx.proceed);
    assert!(ctx.jobs.is_empty());
}

// fd -> link target for every descriptor this process holds.
fn open_fds() -> BTreeMap<String, String> {
    fs::read_dir("/proc/self/fd")
        .unwrap()
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let target = fs::read_link(entry.path()).ok()?;
            Some((
                entry.file_name().to_string_lossy().into_owned(),
                target.to_string_lossy().into_owned(),
            ))
        })
        .collect()
}

fn pipe_fds() -> BTreeMap<String, String> {
    open_fds()
        .into_iter()
        .filter(|(_, target)| target.starts_with("pipe:"))
        .collect()
}

fn fds_under(dir: &Path) -> BTreeMap<String, String> {
    let dir = dir.to_string_lossy().into_owned();
    open_fds()
        .into_iter()
        .filter(|(_, target)| target.starts_with(&dir))
        .collect()
}

#[test]
#[serial]
fn test_quit_inside_helper_leaves_shell_jobs_alone() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("quit.txt");
    let mut ctx = ShellContext::new();
    run_command_line("sleep 30 &", &mut ctx);
    let pid = ctx.jobs.get_by_id(1).unwrap().pid;

    run_command_line(&format!("quit kill > {}", out.display()), &mut ctx);
    run_command_line("quit | cat", &mut ctx);

    assert!(ctx.proceed);
    assert_eq!(ctx.jobs.ids(), vec![1]);
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
    assert_eq!(
        waitpid(pid, Some(WaitPidFlag::WNOHANG)).unwrap(),
        WaitStatus::StillAlive
    );

    ctx.jobs.kill_all();
    waitpid(pid, None).unwrap();
}

#[test]
#[serial]
fn test_fg_inside_helper_is_refused() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("fg.txt");
    let mut ctx = ShellContext::new();
    run_command_line("sleep 30 &", &mut ctx);
    let pid = ctx.jobs.get_by_id(1).unwrap().pid;

    run_command_line(&format!("fg > {}", out.display()), &mut ctx);
    assert_eq!(fs::read_to_string(&out).unwrap(), "");
    assert_eq!(ctx.jobs.ids(), vec![1]);
    assert_eq!(
        waitpid(pid, Some(WaitPidFlag::WNOHANG)).unwrap(),
        WaitStatus::StillAlive
    );
    ctx.jobs.kill_all();
    waitpid(pid, None).unwrap();

    // Same check without forking: a context whose shell pid is not ours.
    let mut helper = ShellContext::new();
    helper.shell_pid = Pid::from_raw(1);
    assert!(helper.in_helper());
    assert_eq!(
        builtin_error(&ForegroundCommand, &["fg"], &mut helper),
        "smash error: fg: cannot be used in a pipeline or redirection"
    );
}

#[test]
#[serial]
fn test_interrupt_kills_redirected_program() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("late.txt");
    let mut ctx = ShellContext::new();

    let signals = Arc::clone(&ctx.signals);
    let interrupter = thread::spawn(move || {
        thread::sleep(Duration::from_millis(500));
        signals.on_interrupt();
    });
    run_command_line(&format!("sh -c 'sleep 2; echo late' > {}", out.display()), &mut ctx);
    interrupter.join().unwrap();

    thread::sleep(Duration::from_millis(2500));
    assert_eq!(fs::read_to_string(&out).unwrap_or_default(), "");
    ctx.signals.take_notices();
}

#[test]
#[serial]
fn test_interrupt_kills_pipeline_halves() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("late.txt");
    let mut ctx = ShellContext::new();

    let signals = Arc::clone(&ctx.signals);
    let interrupter = thread::spawn(move || {
        thread::sleep(Duration::from_millis(500));
        signals.on_interrupt();
    });
    run_command_line(
        &format!("sh -c 'sleep 2; echo late > {}' | cat", out.display()),
        &mut ctx,
    );
    interrupter.join().unwrap();

    thread::sleep(Duration::from_millis(2500));
    assert!(!out.exists());
    ctx.signals.take_notices();
}

#[test]
#[serial]
fn test_pipeline_leaves_no_descriptors_behind() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("a.txt");
    let mut ctx = ShellContext::new();

    let pipes_before = pipe_fds();
    run_command_line(&format!("printf a | cat > {}", out.display()), &mut ctx);
    assert_eq!(fs::read_to_string(&out).unwrap(), "a");
    assert_eq!(pipe_fds(), pipes_before);
    assert!(fds_under(dir.path()).is_empty());

    run_command_line(&format!("printf b | cat | tr b c >> {}", out.display()), &mut ctx);
    assert_eq!(fs::read_to_string(&out).unwrap(), "ac");
    assert_eq!(pipe_fds(), pipes_before);
}

#[test]
#[serial]
fn test_failed_redirection_leaves_no_descriptors_behind() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("missing").join("out.txt");
    let mut ctx = ShellContext::new();

    let pipes_before = pipe_fds();
    run_command_line(&format!("printf x > {}", target.display()), &mut ctx);
    assert!(!target.exists());
    assert_eq!(pipe_fds(), pipes_before);
    assert!(fds_under(dir.path()).is_empty());
    assert!(ctx.proceed);
}
