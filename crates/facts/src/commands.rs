//! Allowlisted commands for host inspection.
//!
//! Every command the local provider can execute is defined here. This is
//! the single source of truth for what inspection may run on the host.

use anyhow::{Context, Result};
use std::process::Command;
use tracing::debug;

/// Output of one inspection command.
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run one allowlisted command through the shell and capture its output.
pub fn run(command: &str) -> Result<CommandOutput> {
    debug!("local exec: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .with_context(|| format!("failed to execute: {}", command))?;

    Ok(CommandOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Owning user and command name for every live process.
pub const PROCESS_LIST: &str = "ps -e -o user:32= -o comm=";

/// Listening TCP sockets, numeric, no header.
pub const TCP_LISTENERS: &str = "ss -H -l -n -t";

/// Listening UDP sockets, numeric, no header.
pub const UDP_LISTENERS: &str = "ss -H -l -n -u";

/// Listening unix-domain sockets, no header.
pub const UNIX_LISTENERS: &str = "ss -H -l -n -x";

/// Kernel family name.
pub const KERNEL_NAME: &str = "uname -s";

pub fn service_active_cmd(name: &str) -> Option<String> {
    if !is_safe_name(name) {
        return None;
    }
    Some(format!("systemctl is-active {}", name))
}

pub fn service_enabled_cmd(name: &str) -> Option<String> {
    if !is_safe_name(name) {
        return None;
    }
    Some(format!("systemctl is-enabled {}", name))
}

pub fn package_dpkg_cmd(name: &str) -> Option<String> {
    if !is_safe_name(name) {
        return None;
    }
    Some(format!(
        "dpkg-query -W -f '${{db:Status-Status}} ${{Version}}' {} 2>/dev/null",
        name
    ))
}

pub fn package_rpm_cmd(name: &str) -> Option<String> {
    if !is_safe_name(name) {
        return None;
    }
    Some(format!(
        "rpm -q --qf '%{{VERSION}}-%{{RELEASE}}' {} 2>/dev/null",
        name
    ))
}

pub fn user_group_names_cmd(name: &str) -> Option<String> {
    if !is_safe_name(name) {
        return None;
    }
    Some(format!("id -nG {}", name))
}

pub fn user_group_ids_cmd(name: &str) -> Option<String> {
    if !is_safe_name(name) {
        return None;
    }
    Some(format!("id -G {}", name))
}

pub fn interface_addresses_cmd(name: &str) -> Option<String> {
    if !is_safe_name(name) {
        return None;
    }
    Some(format!("ip -o addr show dev {}", name))
}

pub fn file_md5_cmd(path: &str) -> String {
    format!("md5sum {}", sh_quote(path))
}

/// Validate a target name before it is spliced into a command line.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@' | ':' | '+'))
        && !name.starts_with('-')
}

/// Single-quote a path for the shell.
fn sh_quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_names() {
        assert!(is_safe_name("sshd"));
        assert!(is_safe_name("openssh-server"));
        assert!(is_safe_name("user@host.service"));
        assert!(!is_safe_name(""));
        assert!(!is_safe_name("-rf"));
        assert!(!is_safe_name("a; rm -rf /"));
    }

    #[test]
    fn test_unsafe_name_yields_no_command() {
        assert!(service_active_cmd("a;b").is_none());
        assert!(package_dpkg_cmd("$(boom)").is_none());
    }

    #[test]
    fn test_sh_quote() {
        assert_eq!(sh_quote("/etc/passwd"), "'/etc/passwd'");
        assert_eq!(sh_quote("/tmp/o'brien"), r"'/tmp/o'\''brien'");
    }

    #[test]
    fn test_run_captures_output() {
        let out = run("echo hello").unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }
}
