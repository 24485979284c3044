//! Typed facts returned by a [`crate::FactSource`].

use crate::error::FactError;
use infracheck_common::Timestamp;
use std::fmt;
use std::str::FromStr;

/// What kind of filesystem object a path points at.
///
/// The kinds are disjoint: a symlink is classified as a symlink even when
/// its target is a regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    Pipe,
    Socket,
    Symlink,
    Other,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileKind::File => "file",
            FileKind::Directory => "directory",
            FileKind::Pipe => "pipe",
            FileKind::Socket => "socket",
            FileKind::Symlink => "symlink",
            FileKind::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Metadata snapshot of one filesystem path.
#[derive(Debug, Clone, PartialEq)]
pub struct FileFacts {
    pub kind: FileKind,
    /// Resolved symlink target, when the path is a symlink.
    pub linked_to: Option<String>,
    /// Owner name, when the uid resolves to one.
    pub owner: Option<String>,
    /// Group name, when the gid resolves to one.
    pub group: Option<String>,
    pub uid: u32,
    pub gid: u32,
    /// Permission bits only (no file-type bits).
    pub mode: u32,
    pub size: u64,
    pub mtime: Timestamp,
}

/// Facts about one installed package. Absence of the package is modelled
/// as `None` at the accessor, not as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageFacts {
    pub version: String,
}

/// Running/enabled state of one service unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceFacts {
    pub running: bool,
    pub enabled: bool,
}

/// Identity facts for one user account.
#[derive(Debug, Clone, PartialEq)]
pub struct UserFacts {
    pub uid: u32,
    pub gid: u32,
    /// Primary group name, when the gid resolves to one.
    pub group: Option<String>,
    /// All gids, primary first, in the order the system reports them.
    pub gids: Vec<u32>,
    /// All group names, primary first, in the order the system reports them.
    pub groups: Vec<String>,
    pub home: String,
    pub shell: String,
}

/// Facts about one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupFacts {
    pub gid: u32,
}

/// Facts about one network interface.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceFacts {
    /// Link speed in Mbit/s; virtual interfaces often have none.
    pub speed: Option<u64>,
    /// Every address bound to the interface, v4 and v6, without prefix
    /// lengths.
    pub addresses: Vec<String>,
}

/// Host identity facts.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemInfoFacts {
    /// Kernel family, lowercased (`linux`).
    pub kind: String,
    pub distribution: Option<String>,
    pub release: Option<String>,
    pub codename: Option<String>,
}

/// Facts about one mount point.
#[derive(Debug, Clone, PartialEq)]
pub struct MountFacts {
    pub device: String,
    pub filesystem: String,
    /// Mount options in the order the kernel reports them.
    pub options: Vec<String>,
}

/// A parsed socket target identifier: `tcp://22`, `udp://0.0.0.0:53`,
/// `unix:///var/run/docker.sock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketSpec {
    Tcp { host: Option<String>, port: u16 },
    Udp { host: Option<String>, port: u16 },
    Unix { path: String },
}

impl FromStr for SocketSpec {
    type Err = FactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, rest) = s
            .split_once("://")
            .ok_or_else(|| FactError::Unsupported(s.to_string()))?;
        match scheme {
            "unix" => {
                if rest.is_empty() {
                    return Err(FactError::Unsupported(s.to_string()));
                }
                Ok(SocketSpec::Unix {
                    path: rest.to_string(),
                })
            }
            "tcp" | "udp" => {
                let (host, port_str) = match rest.rsplit_once(':') {
                    Some((h, p)) => (Some(h.to_string()), p),
                    None => (None, rest),
                };
                let port: u16 = port_str
                    .parse()
                    .map_err(|_| FactError::Unsupported(s.to_string()))?;
                if scheme == "tcp" {
                    Ok(SocketSpec::Tcp { host, port })
                } else {
                    Ok(SocketSpec::Udp { host, port })
                }
            }
            _ => Err(FactError::Unsupported(s.to_string())),
        }
    }
}
