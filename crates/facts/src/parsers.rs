//! Parsers for command outputs and system tables.

use crate::types::MountFacts;
use anyhow::{anyhow, Result};
use regex::Regex;

/// One line of `/etc/passwd`.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswdEntry {
    pub name: String,
    pub uid: u32,
    pub gid: u32,
    pub home: String,
    pub shell: String,
}

/// Parse `/etc/passwd` content. Malformed lines are skipped.
pub fn parse_passwd(content: &str) -> Vec<PasswdEntry> {
    content
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(':').collect();
            if fields.len() < 7 || line.starts_with('#') {
                return None;
            }
            Some(PasswdEntry {
                name: fields[0].to_string(),
                uid: fields[2].parse().ok()?,
                gid: fields[3].parse().ok()?,
                home: fields[5].to_string(),
                shell: fields[6].to_string(),
            })
        })
        .collect()
}

/// One line of `/etc/group`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEntry {
    pub name: String,
    pub gid: u32,
    pub members: Vec<String>,
}

/// Parse `/etc/group` content. Malformed lines are skipped.
pub fn parse_groups(content: &str) -> Vec<GroupEntry> {
    content
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(':').collect();
            if fields.len() < 4 || line.starts_with('#') {
                return None;
            }
            let members = fields[3]
                .split(',')
                .filter(|m| !m.is_empty())
                .map(|m| m.to_string())
                .collect();
            Some(GroupEntry {
                name: fields[0].to_string(),
                gid: fields[2].parse().ok()?,
                members,
            })
        })
        .collect()
}

/// Parse `/etc/os-release` into (distribution, release, codename).
pub fn parse_os_release(content: &str) -> (Option<String>, Option<String>, Option<String>) {
    let line_re = Regex::new(r#"^([A-Z_]+)="?([^"]*)"?$"#).unwrap();
    let mut distribution = None;
    let mut release = None;
    let mut codename = None;

    for line in content.lines() {
        if let Some(caps) = line_re.captures(line.trim()) {
            let value = caps[2].to_string();
            match &caps[1] {
                "ID" => distribution = Some(value),
                "VERSION_ID" => release = Some(value),
                "VERSION_CODENAME" => codename = Some(value),
                _ => {}
            }
        }
    }

    (distribution, release, codename)
}

/// Find one mount point in `/proc/mounts` content.
pub fn parse_mounts(content: &str, point: &str) -> Option<MountFacts> {
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        if decode_mount_field(fields[1]) == point {
            return Some(MountFacts {
                device: decode_mount_field(fields[0]),
                filesystem: fields[2].to_string(),
                options: fields[3].split(',').map(|o| o.to_string()).collect(),
            });
        }
    }
    None
}

/// Undo the octal escapes the kernel uses in `/proc/mounts` fields.
fn decode_mount_field(field: &str) -> String {
    field
        .replace(r"\040", " ")
        .replace(r"\011", "\t")
        .replace(r"\012", "\n")
        .replace(r"\134", "\\")
}

/// Parse `ps -e -o user:32= -o comm=` output into (user, command) pairs.
pub fn parse_ps_owners(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let user = parts.next()?.to_string();
            let command = parts.next()?.to_string();
            Some((user, command))
        })
        .collect()
}

/// Parse `id -nG`/`id -G` style single-line list output.
pub fn parse_id_list(output: &str) -> Vec<String> {
    output.split_whitespace().map(|s| s.to_string()).collect()
}

/// Parse dpkg-query `'${db:Status-Status} ${Version}'` output into a
/// version string, `None` when the package is not in the installed state.
pub fn parse_dpkg_version(output: &str) -> Option<String> {
    let (status, version) = output.trim().split_once(' ')?;
    if status == "installed" && !version.is_empty() {
        Some(version.to_string())
    } else {
        None
    }
}

/// Parse `md5sum` output into the digest.
pub fn parse_md5_output(output: &str) -> Result<String> {
    let digest = output
        .split_whitespace()
        .next()
        .ok_or_else(|| anyhow!("empty md5sum output"))?;
    if digest.len() == 32 && digest.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(digest.to_lowercase())
    } else {
        Err(anyhow!("unexpected md5sum output: {}", output.trim()))
    }
}

/// Parse `ss -H -l -n -t`/`-u` output into (address, port) listeners.
pub fn parse_inet_listeners(output: &str) -> Vec<(String, u16)> {
    let addr_re = Regex::new(r"^\[?([^\[\]]*)\]?:(\d+)$").unwrap();
    output
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            // State Recv-Q Send-Q Local:Port Peer:Port [Process]
            let local = fields.get(3)?;
            let caps = addr_re.captures(local)?;
            let addr = caps[1].to_string();
            let port: u16 = caps[2].parse().ok()?;
            Some((addr, port))
        })
        .collect()
}

/// Parse `ss -H -l -n -x` output into listening unix socket paths.
pub fn parse_unix_listeners(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            // Netid State Recv-Q Send-Q Local Peer ...
            let path = fields.get(4)?;
            if path.starts_with('/') || path.starts_with('@') {
                Some(path.to_string())
            } else {
                None
            }
        })
        .collect()
}

/// Parse `ip -o addr show dev <name>` output into bare addresses.
pub fn parse_ip_addresses(output: &str) -> Vec<String> {
    let mut addresses = Vec::new();
    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        for window in fields.windows(2) {
            if window[0] == "inet" || window[0] == "inet6" {
                let addr = window[1].split('/').next().unwrap_or(window[1]);
                addresses.push(addr.to_string());
            }
        }
    }
    addresses
}
