//! Local-machine fact source.
//!
//! Inspects the host the process runs on: filesystem metadata through
//! `std::fs`, account databases through `/etc/passwd` and `/etc/group`,
//! kernel state through `/proc` and `/sys`, and everything else through
//! the allowlisted commands in [`crate::commands`].

use crate::commands::{self, run};
use crate::error::{FactError, FactResult};
use crate::parsers;
use crate::source::FactSource;
use crate::types::{
    FileFacts, FileKind, GroupFacts, InterfaceFacts, MountFacts, PackageFacts, ServiceFacts,
    SocketSpec, SystemInfoFacts, UserFacts,
};
use infracheck_common::{hash, Timestamp};
use std::io;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::Path;
use tracing::debug;

const PASSWD_PATH: &str = "/etc/passwd";
const GROUP_PATH: &str = "/etc/group";
const MOUNTS_PATH: &str = "/proc/mounts";
const OS_RELEASE_PATH: &str = "/etc/os-release";
const OS_RELEASE_FALLBACK: &str = "/usr/lib/os-release";

/// Fact source for the machine the process runs on.
pub struct LocalHost;

impl LocalHost {
    pub fn new() -> Self {
        Self
    }

    fn passwd_entries(&self) -> FactResult<Vec<parsers::PasswdEntry>> {
        let content = std::fs::read_to_string(PASSWD_PATH)
            .map_err(|e| FactError::inspection(PASSWD_PATH, e))?;
        Ok(parsers::parse_passwd(&content))
    }

    fn group_entries(&self) -> FactResult<Vec<parsers::GroupEntry>> {
        let content = std::fs::read_to_string(GROUP_PATH)
            .map_err(|e| FactError::inspection(GROUP_PATH, e))?;
        Ok(parsers::parse_groups(&content))
    }

    fn name_for_uid(&self, uid: u32) -> Option<String> {
        self.passwd_entries()
            .ok()?
            .into_iter()
            .find(|e| e.uid == uid)
            .map(|e| e.name)
    }

    fn name_for_gid(&self, gid: u32) -> Option<String> {
        self.group_entries()
            .ok()?
            .into_iter()
            .find(|e| e.gid == gid)
            .map(|e| e.name)
    }
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FactSource for LocalHost {
    fn file(&self, path: &str) -> FactResult<Option<FileFacts>> {
        let p = Path::new(path);
        let link_meta = match std::fs::symlink_metadata(p) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(FactError::inspection(path, e)),
        };

        let ftype = link_meta.file_type();
        let kind = if ftype.is_symlink() {
            FileKind::Symlink
        } else if ftype.is_file() {
            FileKind::File
        } else if ftype.is_dir() {
            FileKind::Directory
        } else if ftype.is_fifo() {
            FileKind::Pipe
        } else if ftype.is_socket() {
            FileKind::Socket
        } else {
            FileKind::Other
        };

        // The raw readlink value, so relative targets compare as written.
        let linked_to = if ftype.is_symlink() {
            std::fs::read_link(p)
                .map(|t| t.display().to_string())
                .ok()
                .or_else(|| std::fs::canonicalize(p).map(|t| t.display().to_string()).ok())
        } else {
            None
        };

        // Attribute facts follow the link when the target is reachable;
        // a dangling symlink falls back to the link's own metadata.
        let meta = std::fs::metadata(p).unwrap_or(link_meta);
        let mtime = meta
            .modified()
            .map(Timestamp::from_system_time)
            .map_err(|e| FactError::inspection(path, e))?;

        Ok(Some(FileFacts {
            kind,
            linked_to,
            owner: self.name_for_uid(meta.uid()),
            group: self.name_for_gid(meta.gid()),
            uid: meta.uid(),
            gid: meta.gid(),
            mode: meta.mode() & 0o7777,
            size: meta.len(),
            mtime,
        }))
    }

    fn file_contains(&self, path: &str, needle: &str) -> FactResult<bool> {
        let bytes = std::fs::read(path).map_err(|e| FactError::inspection(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).contains(needle))
    }

    fn file_md5(&self, path: &str) -> FactResult<String> {
        let out = run(&commands::file_md5_cmd(path)).map_err(|e| FactError::inspection(path, e))?;
        if !out.success() {
            return Err(FactError::inspection(path, out.stderr.trim()));
        }
        parsers::parse_md5_output(&out.stdout).map_err(|e| FactError::inspection(path, e))
    }

    fn file_sha256(&self, path: &str) -> FactResult<String> {
        hash::sha256_file(Path::new(path)).map_err(|e| FactError::inspection(path, e))
    }

    fn package(&self, name: &str) -> FactResult<Option<PackageFacts>> {
        let dpkg = commands::package_dpkg_cmd(name)
            .ok_or_else(|| FactError::Unsupported(name.to_string()))?;
        let out = run(&dpkg).map_err(|e| FactError::inspection(name, e))?;

        if out.exit_code != Some(127) {
            if out.success() {
                return Ok(parsers::parse_dpkg_version(&out.stdout)
                    .map(|version| PackageFacts { version }));
            }
            // dpkg-query exists but does not know the package
            return Ok(None);
        }

        // No dpkg on this host; fall back to rpm.
        let rpm = commands::package_rpm_cmd(name)
            .ok_or_else(|| FactError::Unsupported(name.to_string()))?;
        let out = run(&rpm).map_err(|e| FactError::inspection(name, e))?;
        if out.exit_code == Some(127) {
            return Err(FactError::inspection(name, "no supported package manager"));
        }
        if out.success() {
            let version = out.stdout.trim().to_string();
            if version.is_empty() {
                return Ok(None);
            }
            return Ok(Some(PackageFacts { version }));
        }
        Ok(None)
    }

    fn service(&self, name: &str) -> FactResult<ServiceFacts> {
        let active_cmd = commands::service_active_cmd(name)
            .ok_or_else(|| FactError::Unsupported(name.to_string()))?;
        let enabled_cmd = commands::service_enabled_cmd(name)
            .ok_or_else(|| FactError::Unsupported(name.to_string()))?;

        let active = run(&active_cmd).map_err(|e| FactError::inspection(name, e))?;
        if active.exit_code == Some(127) {
            return Err(FactError::inspection(name, "systemctl unavailable"));
        }
        let enabled = run(&enabled_cmd).map_err(|e| FactError::inspection(name, e))?;

        Ok(ServiceFacts {
            running: active.stdout.trim() == "active",
            enabled: enabled.stdout.trim() == "enabled",
        })
    }

    fn socket_listening(&self, spec: &str) -> FactResult<bool> {
        match spec.parse::<SocketSpec>()? {
            SocketSpec::Tcp { host, port } => {
                let out = run(commands::TCP_LISTENERS)
                    .map_err(|e| FactError::inspection(spec, e))?;
                Ok(inet_listener_present(&out.stdout, host.as_deref(), port))
            }
            SocketSpec::Udp { host, port } => {
                let out = run(commands::UDP_LISTENERS)
                    .map_err(|e| FactError::inspection(spec, e))?;
                Ok(inet_listener_present(&out.stdout, host.as_deref(), port))
            }
            SocketSpec::Unix { path } => {
                let out = run(commands::UNIX_LISTENERS)
                    .map_err(|e| FactError::inspection(spec, e))?;
                Ok(parsers::parse_unix_listeners(&out.stdout)
                    .iter()
                    .any(|p| p == &path))
            }
        }
    }

    fn user(&self, name: &str) -> FactResult<Option<UserFacts>> {
        let entry = match self.passwd_entries()?.into_iter().find(|e| e.name == name) {
            Some(e) => e,
            None => return Ok(None),
        };

        let names_cmd = commands::user_group_names_cmd(name)
            .ok_or_else(|| FactError::Unsupported(name.to_string()))?;
        let ids_cmd = commands::user_group_ids_cmd(name)
            .ok_or_else(|| FactError::Unsupported(name.to_string()))?;

        let names_out = run(&names_cmd).map_err(|e| FactError::inspection(name, e))?;
        let ids_out = run(&ids_cmd).map_err(|e| FactError::inspection(name, e))?;

        let groups = parsers::parse_id_list(&names_out.stdout);
        let gids = parsers::parse_id_list(&ids_out.stdout)
            .iter()
            .filter_map(|g| g.parse().ok())
            .collect();

        Ok(Some(UserFacts {
            uid: entry.uid,
            gid: entry.gid,
            group: self.name_for_gid(entry.gid),
            gids,
            groups,
            home: entry.home,
            shell: entry.shell,
        }))
    }

    fn group(&self, name: &str) -> FactResult<Option<GroupFacts>> {
        Ok(self
            .group_entries()?
            .into_iter()
            .find(|e| e.name == name)
            .map(|e| GroupFacts { gid: e.gid }))
    }

    fn interface(&self, name: &str) -> FactResult<Option<InterfaceFacts>> {
        let addr_cmd = commands::interface_addresses_cmd(name)
            .ok_or_else(|| FactError::Unsupported(name.to_string()))?;

        let sys_path = format!("/sys/class/net/{}", name);
        if !Path::new(&sys_path).exists() {
            return Ok(None);
        }

        let speed = std::fs::read_to_string(format!("{}/speed", sys_path))
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .and_then(|s| if s > 0 { Some(s as u64) } else { None });

        let out = run(&addr_cmd).map_err(|e| FactError::inspection(name, e))?;
        let addresses = if out.success() {
            parsers::parse_ip_addresses(&out.stdout)
        } else {
            debug!("address listing failed for {}: {}", name, out.stderr.trim());
            Vec::new()
        };

        Ok(Some(InterfaceFacts { speed, addresses }))
    }

    fn system_info(&self) -> FactResult<SystemInfoFacts> {
        let out = run(commands::KERNEL_NAME).map_err(|e| FactError::inspection("uname", e))?;
        let kind = out.stdout.trim().to_lowercase();

        let release_content = std::fs::read_to_string(OS_RELEASE_PATH)
            .or_else(|_| std::fs::read_to_string(OS_RELEASE_FALLBACK))
            .unwrap_or_default();
        let (distribution, release, codename) = parsers::parse_os_release(&release_content);

        Ok(SystemInfoFacts {
            kind,
            distribution,
            release,
            codename,
        })
    }

    fn sysctl(&self, key: &str) -> FactResult<String> {
        let safe = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !safe {
            return Err(FactError::InvalidSysctlKey(key.to_string()));
        }

        let path = format!("/proc/sys/{}", key.replace('.', "/"));
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(value.trim().replace('\t', " ")),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FactError::InvalidSysctlKey(key.to_string()))
            }
            Err(e) => Err(FactError::inspection(key, e)),
        }
    }

    fn mount(&self, point: &str) -> FactResult<Option<MountFacts>> {
        let content = std::fs::read_to_string(MOUNTS_PATH)
            .map_err(|e| FactError::inspection(MOUNTS_PATH, e))?;
        Ok(parsers::parse_mounts(&content, point))
    }

    fn process_count(&self, command: &str, user: &str) -> FactResult<usize> {
        let out = run(commands::PROCESS_LIST).map_err(|e| FactError::inspection(command, e))?;
        if !out.success() {
            return Err(FactError::inspection(command, out.stderr.trim()));
        }
        Ok(parsers::parse_ps_owners(&out.stdout)
            .iter()
            .filter(|(u, c)| u == user && c == command)
            .count())
    }
}

/// True when a listener covers the requested (host, port) pair. A
/// wildcard bind counts as covering any requested host.
fn inet_listener_present(output: &str, host: Option<&str>, port: u16) -> bool {
    parsers::parse_inet_listeners(output)
        .iter()
        .any(|(addr, p)| {
            *p == port
                && match host {
                    None => true,
                    Some(h) => addr == h || addr == "0.0.0.0" || addr == "::" || addr == "*",
                }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use predicates::prelude::*;

    #[test]
    fn test_file_facts_for_regular_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let child = temp.child("motd");
        child.write_str("welcome to the machine\n").unwrap();
        child.assert(predicate::path::exists());

        let host = LocalHost::new();
        let facts = host
            .file(child.path().to_str().unwrap())
            .unwrap()
            .expect("file should exist");

        assert_eq!(facts.kind, FileKind::File);
        assert_eq!(facts.size, 23);
        assert!(facts.linked_to.is_none());
    }

    #[test]
    fn test_file_facts_absent_path() {
        let host = LocalHost::new();
        let facts = host.file("/definitely/not/here").unwrap();
        assert!(facts.is_none());
    }

    #[test]
    fn test_file_facts_directory_and_symlink() {
        let temp = assert_fs::TempDir::new().unwrap();
        let dir = temp.child("sub");
        dir.create_dir_all().unwrap();
        let target = temp.child("target");
        target.write_str("x").unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(target.path(), &link).unwrap();

        let host = LocalHost::new();
        let dir_facts = host.file(dir.path().to_str().unwrap()).unwrap().unwrap();
        assert_eq!(dir_facts.kind, FileKind::Directory);

        let link_facts = host.file(link.to_str().unwrap()).unwrap().unwrap();
        assert_eq!(link_facts.kind, FileKind::Symlink);
        let linked_to = link_facts.linked_to.expect("symlink target");
        assert!(linked_to.ends_with("target"));
    }

    #[test]
    fn test_file_mode_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = assert_fs::TempDir::new().unwrap();
        let child = temp.child("secret");
        child.write_str("s").unwrap();
        std::fs::set_permissions(child.path(), std::fs::Permissions::from_mode(0o640)).unwrap();

        let host = LocalHost::new();
        let facts = host.file(child.path().to_str().unwrap()).unwrap().unwrap();
        assert_eq!(facts.mode, 0o640);
    }

    #[test]
    fn test_file_contains_and_sha256() {
        let temp = assert_fs::TempDir::new().unwrap();
        let child = temp.child("data");
        child.write_str("hello world").unwrap();

        let host = LocalHost::new();
        let path = child.path().to_str().unwrap();
        assert!(host.file_contains(path, "lo wor").unwrap());
        assert!(!host.file_contains(path, "goodbye").unwrap());
        assert_eq!(
            host.file_sha256(path).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sysctl_invalid_key() {
        let host = LocalHost::new();
        let err = host.sysctl("vm.nonexistent_key").unwrap_err();
        assert!(matches!(err, FactError::InvalidSysctlKey(_)));

        let err = host.sysctl("../../etc/passwd").unwrap_err();
        assert!(matches!(err, FactError::InvalidSysctlKey(_)));
    }

    #[test]
    fn test_inet_listener_matching() {
        let output = "LISTEN 0 128 0.0.0.0:22 0.0.0.0:*\n\
                      LISTEN 0 128 127.0.0.1:5432 0.0.0.0:*\n";
        assert!(inet_listener_present(output, None, 22));
        assert!(inet_listener_present(output, Some("10.1.2.3"), 22));
        assert!(inet_listener_present(output, Some("127.0.0.1"), 5432));
        assert!(!inet_listener_present(output, Some("10.1.2.3"), 5432));
        assert!(!inet_listener_present(output, None, 80));
    }
}
