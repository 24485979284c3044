//! In-memory fact source for engine tests.

use infracheck_common::Timestamp;
use infracheck_facts::{
    FactError, FactResult, FactSource, FileFacts, FileKind, GroupFacts, InterfaceFacts,
    MountFacts, PackageFacts, ServiceFacts, SystemInfoFacts, UserFacts,
};
use std::collections::{BTreeMap, BTreeSet};

/// A canned host: every accessor answers from fixed tables.
pub struct MockFacts {
    pub files: BTreeMap<String, FileFacts>,
    pub contents: BTreeMap<String, String>,
    pub md5s: BTreeMap<String, String>,
    pub sha256s: BTreeMap<String, String>,
    pub packages: BTreeMap<String, PackageFacts>,
    pub services: BTreeMap<String, ServiceFacts>,
    pub listening: BTreeSet<String>,
    pub users: BTreeMap<String, UserFacts>,
    pub groups: BTreeMap<String, GroupFacts>,
    pub interfaces: BTreeMap<String, InterfaceFacts>,
    pub system: SystemInfoFacts,
    pub sysctls: BTreeMap<String, String>,
    pub mounts: BTreeMap<String, MountFacts>,
    pub processes: Vec<(String, String)>,
}

impl MockFacts {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            contents: BTreeMap::new(),
            md5s: BTreeMap::new(),
            sha256s: BTreeMap::new(),
            packages: BTreeMap::new(),
            services: BTreeMap::new(),
            listening: BTreeSet::new(),
            users: BTreeMap::new(),
            groups: BTreeMap::new(),
            interfaces: BTreeMap::new(),
            system: SystemInfoFacts {
                kind: "linux".to_string(),
                distribution: None,
                release: None,
                codename: None,
            },
            sysctls: BTreeMap::new(),
            mounts: BTreeMap::new(),
            processes: Vec::new(),
        }
    }

    /// A root-owned 0644 regular file, as a starting point for tests.
    pub fn regular_file() -> FileFacts {
        FileFacts {
            kind: FileKind::File,
            linked_to: None,
            owner: Some("root".to_string()),
            group: Some("root".to_string()),
            uid: 0,
            gid: 0,
            mode: 0o644,
            size: 0,
            mtime: Timestamp::now(),
        }
    }

    pub fn basic_user(uid: u32, gid: u32) -> UserFacts {
        UserFacts {
            uid,
            gid,
            group: None,
            gids: vec![gid],
            groups: Vec::new(),
            home: format!("/home/u{}", uid),
            shell: "/bin/bash".to_string(),
        }
    }

    pub fn add_file(&mut self, path: &str, facts: FileFacts) {
        self.files.insert(path.to_string(), facts);
    }

    pub fn add_content(&mut self, path: &str, content: &str) {
        self.contents.insert(path.to_string(), content.to_string());
    }

    pub fn add_package(&mut self, name: &str, version: &str) {
        self.packages.insert(
            name.to_string(),
            PackageFacts {
                version: version.to_string(),
            },
        );
    }

    pub fn add_service(&mut self, name: &str, running: bool, enabled: bool) {
        self.services
            .insert(name.to_string(), ServiceFacts { running, enabled });
    }

    pub fn add_listening(&mut self, spec: &str) {
        self.listening.insert(spec.to_string());
    }

    pub fn add_user(&mut self, name: &str, facts: UserFacts) {
        self.users.insert(name.to_string(), facts);
    }

    pub fn add_group(&mut self, name: &str, gid: u32) {
        self.groups.insert(name.to_string(), GroupFacts { gid });
    }

    pub fn add_interface(&mut self, name: &str, speed: Option<u64>, addresses: &[&str]) {
        self.interfaces.insert(
            name.to_string(),
            InterfaceFacts {
                speed,
                addresses: addresses.iter().map(|a| a.to_string()).collect(),
            },
        );
    }

    pub fn add_sysctl(&mut self, key: &str, value: &str) {
        self.sysctls.insert(key.to_string(), value.to_string());
    }

    pub fn add_mount(&mut self, point: &str, device: &str, filesystem: &str, options: &[&str]) {
        self.mounts.insert(
            point.to_string(),
            MountFacts {
                device: device.to_string(),
                filesystem: filesystem.to_string(),
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        );
    }

    pub fn add_process(&mut self, user: &str, command: &str) {
        self.processes.push((user.to_string(), command.to_string()));
    }
}

impl Default for MockFacts {
    fn default() -> Self {
        Self::new()
    }
}

impl FactSource for MockFacts {
    fn file(&self, path: &str) -> FactResult<Option<FileFacts>> {
        Ok(self.files.get(path).cloned())
    }

    fn file_contains(&self, path: &str, needle: &str) -> FactResult<bool> {
        match self.contents.get(path) {
            Some(content) => Ok(content.contains(needle)),
            None => Err(FactError::inspection(path, "no such file")),
        }
    }

    fn file_md5(&self, path: &str) -> FactResult<String> {
        self.md5s
            .get(path)
            .cloned()
            .ok_or_else(|| FactError::inspection(path, "no such file"))
    }

    fn file_sha256(&self, path: &str) -> FactResult<String> {
        self.sha256s
            .get(path)
            .cloned()
            .ok_or_else(|| FactError::inspection(path, "no such file"))
    }

    fn package(&self, name: &str) -> FactResult<Option<PackageFacts>> {
        Ok(self.packages.get(name).cloned())
    }

    fn service(&self, name: &str) -> FactResult<ServiceFacts> {
        Ok(self
            .services
            .get(name)
            .copied()
            .unwrap_or(ServiceFacts {
                running: false,
                enabled: false,
            }))
    }

    fn socket_listening(&self, spec: &str) -> FactResult<bool> {
        Ok(self.listening.contains(spec))
    }

    fn user(&self, name: &str) -> FactResult<Option<UserFacts>> {
        Ok(self.users.get(name).cloned())
    }

    fn group(&self, name: &str) -> FactResult<Option<GroupFacts>> {
        Ok(self.groups.get(name).copied())
    }

    fn interface(&self, name: &str) -> FactResult<Option<InterfaceFacts>> {
        Ok(self.interfaces.get(name).cloned())
    }

    fn system_info(&self) -> FactResult<SystemInfoFacts> {
        Ok(self.system.clone())
    }

    fn sysctl(&self, key: &str) -> FactResult<String> {
        self.sysctls
            .get(key)
            .cloned()
            .ok_or_else(|| FactError::InvalidSysctlKey(key.to_string()))
    }

    fn mount(&self, point: &str) -> FactResult<Option<MountFacts>> {
        Ok(self.mounts.get(point).cloned())
    }

    fn process_count(&self, command: &str, user: &str) -> FactResult<usize> {
        Ok(self
            .processes
            .iter()
            .filter(|(u, c)| u == user && c == command)
            .count())
    }
}
