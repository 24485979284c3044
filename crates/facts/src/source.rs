//! The state-inspection capability consumed by the assertion engine.

use crate::error::FactResult;
use crate::types::{
    FileFacts, GroupFacts, InterfaceFacts, MountFacts, PackageFacts, ServiceFacts,
    SystemInfoFacts, UserFacts,
};

/// Typed accessors for the live state of one target host.
///
/// Accessors are synchronous and blocking. Where an assertion must be able
/// to say "the target is absent" (files, packages, users, groups,
/// interfaces, mounts), absence is `Ok(None)` rather than an error; `Err`
/// is reserved for inspection trouble. The engine converts both into
/// failed entries, never into aborts.
pub trait FactSource {
    /// Metadata for one path, `None` when nothing exists there.
    fn file(&self, path: &str) -> FactResult<Option<FileFacts>>;

    /// Whether the file's content contains the given text.
    fn file_contains(&self, path: &str, needle: &str) -> FactResult<bool>;

    /// Hex MD5 digest of the file's content.
    fn file_md5(&self, path: &str) -> FactResult<String>;

    /// Hex SHA256 digest of the file's content.
    fn file_sha256(&self, path: &str) -> FactResult<String>;

    /// Version facts for one package, `None` when it is not installed.
    fn package(&self, name: &str) -> FactResult<Option<PackageFacts>>;

    /// Running/enabled state of one service.
    fn service(&self, name: &str) -> FactResult<ServiceFacts>;

    /// Whether something is listening on the given socket spec
    /// (`tcp://22`, `udp://0.0.0.0:53`, `unix:///path`).
    fn socket_listening(&self, spec: &str) -> FactResult<bool>;

    /// Identity facts for one user, `None` when the account is absent.
    fn user(&self, name: &str) -> FactResult<Option<UserFacts>>;

    /// Facts for one group, `None` when the group is absent.
    fn group(&self, name: &str) -> FactResult<Option<GroupFacts>>;

    /// Facts for one network interface, `None` when it is absent.
    fn interface(&self, name: &str) -> FactResult<Option<InterfaceFacts>>;

    /// Host identity facts.
    fn system_info(&self) -> FactResult<SystemInfoFacts>;

    /// Current value of one sysctl key, rendered as text.
    /// Fails with [`crate::FactError::InvalidSysctlKey`] when the key does
    /// not exist on this system.
    fn sysctl(&self, key: &str) -> FactResult<String>;

    /// Facts for one mount point, `None` when nothing is mounted there.
    fn mount(&self, point: &str) -> FactResult<Option<MountFacts>>;

    /// Number of live processes with the given command name owned by the
    /// given user.
    fn process_count(&self, command: &str, user: &str) -> FactResult<usize>;
}
