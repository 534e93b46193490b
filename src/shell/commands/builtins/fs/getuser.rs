// Getuser command

use crate::shell::commands::Executable;
use crate::shell::context::ShellContext;
use crate::shell::error::{ShellError, ShellResult};
use nix::unistd::{Gid, Group, Uid, User};
use std::fs;
use std::io::Write;

/// Prints the real user and group owning a process, read from /proc.
pub struct GetUserCommand;
impl Executable for GetUserCommand {
    fn execute(&self, args: &[String], _ctx: &mut ShellContext, out: &mut dyn Write) -> ShellResult<()> {
        let [_, pid] = args else {
            return Err(ShellError::invalid("getuser", "too many arguments"));
        };
        let missing = || ShellError::not_found("getuser", format!("process {} does not exist", pid));

        let pid: u32 = pid.parse().map_err(|_| missing())?;
        let status = fs::read_to_string(format!("/proc/{}/status", pid)).map_err(|_| missing())?;
        let uid = status_id(&status, "Uid:").ok_or_else(missing)?;
        let gid = status_id(&status, "Gid:").ok_or_else(missing)?;

        let user = User::from_uid(Uid::from_raw(uid))
            .ok()
            .flatten()
            .map(|u| u.name)
            .unwrap_or_else(|| uid.to_string());
        let group = Group::from_gid(Gid::from_raw(gid))
            .ok()
            .flatten()
            .map(|g| g.name)
            .unwrap_or_else(|| gid.to_string());

        writeln!(out, "User: {}", user)?;
        writeln!(out, "Group: {}", group)?;
        Ok(())
    }
}

// "Uid:\t1000\t1000\t1000\t1000" -> real id
fn status_id(status: &str, field: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix(field))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|id| id.parse().ok())
}
