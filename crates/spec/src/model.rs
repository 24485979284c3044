//! Typed check tree decoded from the raw specification mapping.
//!
//! Every attribute is optional; an absent attribute simply produces no
//! probe. Unrecognized keys land in the `unrecognized` catch-all of the
//! struct they appeared under.

use crate::values::{ModeSpec, OneOrMany, ScalarValue};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The full specification: one optional section per entity kind.
///
/// Kinds not present in the specification are skipped entirely by the
/// walker, so partial specifications are fully supported.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckSet {
    #[serde(default)]
    pub file: BTreeMap<String, FileChecks>,
    #[serde(default)]
    pub package: BTreeMap<String, PackageChecks>,
    #[serde(default)]
    pub service: BTreeMap<String, ServiceChecks>,
    #[serde(default)]
    pub socket: BTreeMap<String, SocketChecks>,
    #[serde(default)]
    pub user: BTreeMap<String, UserChecks>,
    #[serde(default)]
    pub group: BTreeMap<String, GroupChecks>,
    #[serde(default)]
    pub interface: BTreeMap<String, InterfaceChecks>,
    /// Target-less: attributes sit directly under the kind.
    #[serde(default)]
    pub systeminfo: Option<SystemInfoChecks>,
    #[serde(default)]
    pub sysctl: BTreeMap<String, SysctlChecks>,
    #[serde(default)]
    pub mount: BTreeMap<String, MountChecks>,
    #[serde(default)]
    pub process: BTreeMap<String, ProcessChecks>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

impl CheckSet {
    /// True when no section carries any targets or attributes.
    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
            && self.package.is_empty()
            && self.service.is_empty()
            && self.socket.is_empty()
            && self.user.is_empty()
            && self.group.is_empty()
            && self.interface.is_empty()
            && self.systeminfo.is_none()
            && self.sysctl.is_empty()
            && self.mount.is_empty()
            && self.process.is_empty()
    }

    /// Log every key the decode did not recognize. The keys stay ignored;
    /// this only makes the skip visible when debugging a specification.
    pub fn log_unrecognized(&self) {
        for kind in self.unrecognized.keys() {
            debug!("ignoring unrecognized entity kind: {}", kind);
        }
        log_attrs("file", self.file.iter().map(|(k, v)| (k, &v.unrecognized)));
        log_attrs(
            "package",
            self.package.iter().map(|(k, v)| (k, &v.unrecognized)),
        );
        log_attrs(
            "service",
            self.service.iter().map(|(k, v)| (k, &v.unrecognized)),
        );
        log_attrs(
            "socket",
            self.socket.iter().map(|(k, v)| (k, &v.unrecognized)),
        );
        log_attrs("user", self.user.iter().map(|(k, v)| (k, &v.unrecognized)));
        log_attrs(
            "group",
            self.group.iter().map(|(k, v)| (k, &v.unrecognized)),
        );
        log_attrs(
            "interface",
            self.interface.iter().map(|(k, v)| (k, &v.unrecognized)),
        );
        if let Some(info) = &self.systeminfo {
            for attr in info.unrecognized.keys() {
                debug!("ignoring unrecognized systeminfo attribute: {}", attr);
            }
        }
        log_attrs(
            "sysctl",
            self.sysctl.iter().map(|(k, v)| (k, &v.unrecognized)),
        );
        log_attrs(
            "mount",
            self.mount.iter().map(|(k, v)| (k, &v.unrecognized)),
        );
        log_attrs(
            "process",
            self.process.iter().map(|(k, v)| (k, &v.unrecognized)),
        );
    }
}

fn log_attrs<'a, I>(kind: &str, targets: I)
where
    I: Iterator<Item = (&'a String, &'a BTreeMap<String, serde_json::Value>)>,
{
    for (target, extra) in targets {
        for attr in extra.keys() {
            debug!(
                "ignoring unrecognized {} attribute for {}: {}",
                kind, target, attr
            );
        }
    }
}

/// Checks against one filesystem path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileChecks {
    pub exists: Option<bool>,
    /// One of `file`, `directory`, `pipe`, `socket`, `symlink`. Any other
    /// value is reported as a failed assertion at run time, not rejected
    /// at decode time.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub linkedto: Option<String>,
    pub user: Option<String>,
    pub group: Option<String>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub mode: Option<ModeSpec>,
    pub contains: Option<OneOrMany<String>>,
    pub md5sum: Option<String>,
    pub sha256sum: Option<String>,
    /// Expected as a `YYYY-MM-DD HH:MM:SS` string. Quote it in YAML.
    pub mtime: Option<String>,
    pub size: Option<u64>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

/// Checks against one installed package.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageChecks {
    pub installed: Option<bool>,
    /// Prefix match: `2.0` accepts `2.0-pre4-1`.
    pub version: Option<String>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

/// Checks against one service unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceChecks {
    pub running: Option<bool>,
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

/// Checks against one socket spec such as `tcp://22` or
/// `unix:///var/run/docker.sock`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocketChecks {
    pub listening: Option<bool>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

/// Checks against one user account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChecks {
    pub exists: Option<bool>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    /// Primary group name.
    pub group: Option<String>,
    /// Comma-joined gid list, compared in order.
    pub gids: Option<String>,
    /// Comma-joined group-name list, compared in order.
    pub groups: Option<String>,
    pub home: Option<String>,
    pub shell: Option<String>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

/// Checks against one group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupChecks {
    pub exists: Option<bool>,
    pub gid: Option<u32>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

/// Checks against one network interface.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterfaceChecks {
    pub exists: Option<bool>,
    /// Link speed in Mbit/s.
    pub speed: Option<u64>,
    /// Each listed address must be a member of the interface's address
    /// set; an interface may carry more addresses than listed.
    pub addresses: Option<OneOrMany<String>>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

/// Host-level identity checks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemInfoChecks {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub distribution: Option<String>,
    pub release: Option<String>,
    pub codename: Option<String>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

/// Check against one sysctl key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SysctlChecks {
    pub value: Option<ScalarValue>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

/// Checks against one mount point.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MountChecks {
    pub exists: Option<bool>,
    pub filesystem: Option<String>,
    pub device: Option<String>,
    /// Each listed element is compared against the comma-joined actual
    /// option list, in kernel order.
    pub options: Option<OneOrMany<String>>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

/// Checks against processes sharing one command name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessChecks {
    /// Expected live-process count per owning user, compared exactly.
    #[serde(default)]
    pub count: BTreeMap<String, u64>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}
