//! Probe functions: one assertion check per (entity kind, attribute).
//!
//! Every probe queries the fact source, applies its comparison policy,
//! and appends exactly one entry to the run's report. Probes never raise:
//! a target that cannot be inspected becomes a failed entry with the
//! reason in place of the actual value. Each probe returns the cumulative
//! report so callers can chain and inspect incrementally.

use crate::compare::{format_mode, join_csv, normalize_mode, version_matches};
use crate::report::Report;
use infracheck_facts::{
    FactError, FactSource, FileFacts, FileKind, GroupFacts, InterfaceFacts, MountFacts,
    ServiceFacts, SystemInfoFacts, UserFacts,
};
use infracheck_spec::{ModeSpec, ScalarValue};

/// Runs probes against one fact source, accumulating a per-run [`Report`].
pub struct Checker<'a, F: FactSource> {
    facts: &'a F,
    report: Report,
}

impl<'a, F: FactSource> Checker<'a, F> {
    pub fn new(facts: &'a F) -> Self {
        Self {
            facts,
            report: Report::new(),
        }
    }

    /// The report accumulated so far.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Finish the run and take ownership of the report.
    pub fn into_report(self) -> Report {
        self.report
    }

    fn outcome(&mut self, ok: bool, detail: String, found: String) -> &Report {
        if ok {
            self.report.pass(detail);
        } else {
            self.report.fail(format!("{}, found: {}", detail, found));
        }
        &self.report
    }

    fn with_file(
        &mut self,
        target: &str,
        detail: String,
        check: impl FnOnce(&FileFacts) -> (bool, String),
    ) -> &Report {
        match self.facts.file(target) {
            Ok(Some(facts)) => {
                let (ok, found) = check(&facts);
                self.outcome(ok, detail, found)
            }
            Ok(None) => self.outcome(false, detail, "no such file".to_string()),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    fn with_user(
        &mut self,
        target: &str,
        detail: String,
        check: impl FnOnce(&UserFacts) -> (bool, String),
    ) -> &Report {
        match self.facts.user(target) {
            Ok(Some(facts)) => {
                let (ok, found) = check(&facts);
                self.outcome(ok, detail, found)
            }
            Ok(None) => self.outcome(false, detail, "no such user".to_string()),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    fn with_group(
        &mut self,
        target: &str,
        detail: String,
        check: impl FnOnce(&GroupFacts) -> (bool, String),
    ) -> &Report {
        match self.facts.group(target) {
            Ok(Some(facts)) => {
                let (ok, found) = check(&facts);
                self.outcome(ok, detail, found)
            }
            Ok(None) => self.outcome(false, detail, "no such group".to_string()),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    fn with_interface(
        &mut self,
        target: &str,
        detail: String,
        check: impl FnOnce(&InterfaceFacts) -> (bool, String),
    ) -> &Report {
        match self.facts.interface(target) {
            Ok(Some(facts)) => {
                let (ok, found) = check(&facts);
                self.outcome(ok, detail, found)
            }
            Ok(None) => self.outcome(false, detail, "no such interface".to_string()),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    fn with_mount(
        &mut self,
        target: &str,
        detail: String,
        check: impl FnOnce(&MountFacts) -> (bool, String),
    ) -> &Report {
        match self.facts.mount(target) {
            Ok(Some(facts)) => {
                let (ok, found) = check(&facts);
                self.outcome(ok, detail, found)
            }
            Ok(None) => self.outcome(false, detail, "not mounted".to_string()),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    fn with_service(
        &mut self,
        target: &str,
        detail: String,
        check: impl FnOnce(&ServiceFacts) -> (bool, String),
    ) -> &Report {
        match self.facts.service(target) {
            Ok(facts) => {
                let (ok, found) = check(&facts);
                self.outcome(ok, detail, found)
            }
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    fn with_system_info(
        &mut self,
        detail: String,
        check: impl FnOnce(&SystemInfoFacts) -> (bool, String),
    ) -> &Report {
        match self.facts.system_info() {
            Ok(facts) => {
                let (ok, found) = check(&facts);
                self.outcome(ok, detail, found)
            }
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    // --- file probes ---

    pub fn file_exists(&mut self, target: &str, expected: bool) -> &Report {
        let detail = format!("{} exists: {}", target, expected);
        match self.facts.file(target) {
            Ok(facts) => {
                let actual = facts.is_some();
                self.outcome(actual == expected, detail, actual.to_string())
            }
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    /// Dispatch a `type` expectation to exactly one of the five kind
    /// probes. An unrecognized value is a failed entry, not an error.
    pub fn file_type(&mut self, target: &str, expected: &str) -> &Report {
        match expected {
            "file" => self.file_is_file(target),
            "directory" => self.file_is_directory(target),
            "pipe" => self.file_is_pipe(target),
            "socket" => self.file_is_socket(target),
            "symlink" => self.file_is_symlink(target),
            other => {
                self.report
                    .fail(format!("{} could not find a type match: {}", target, other));
                &self.report
            }
        }
    }

    pub fn file_is_file(&mut self, target: &str) -> &Report {
        let detail = format!("{} is: file", target);
        self.with_file(target, detail, |f| {
            (f.kind == FileKind::File, f.kind.to_string())
        })
    }

    pub fn file_is_directory(&mut self, target: &str) -> &Report {
        let detail = format!("{} is: directory", target);
        self.with_file(target, detail, |f| {
            (f.kind == FileKind::Directory, f.kind.to_string())
        })
    }

    pub fn file_is_pipe(&mut self, target: &str) -> &Report {
        let detail = format!("{} is: pipe", target);
        self.with_file(target, detail, |f| {
            (f.kind == FileKind::Pipe, f.kind.to_string())
        })
    }

    pub fn file_is_socket(&mut self, target: &str) -> &Report {
        let detail = format!("{} is: socket", target);
        self.with_file(target, detail, |f| {
            (f.kind == FileKind::Socket, f.kind.to_string())
        })
    }

    pub fn file_is_symlink(&mut self, target: &str) -> &Report {
        let detail = format!("{} is: symlink", target);
        self.with_file(target, detail, |f| {
            (f.kind == FileKind::Symlink, f.kind.to_string())
        })
    }

    pub fn file_linked_to(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} is linked to: {}", target, expected);
        self.with_file(target, detail, |f| {
            let found = f.linked_to.clone().unwrap_or_else(|| "not a symlink".to_string());
            (f.linked_to.as_deref() == Some(expected), found)
        })
    }

    pub fn file_user(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} is owned by user: {}", target, expected);
        self.with_file(target, detail, |f| {
            let found = f.owner.clone().unwrap_or_else(|| format!("uid {}", f.uid));
            (f.owner.as_deref() == Some(expected), found)
        })
    }

    pub fn file_group(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} is owned by group: {}", target, expected);
        self.with_file(target, detail, |f| {
            let found = f.group.clone().unwrap_or_else(|| format!("gid {}", f.gid));
            (f.group.as_deref() == Some(expected), found)
        })
    }

    pub fn file_uid(&mut self, target: &str, expected: u32) -> &Report {
        let detail = format!("{} is owned by uid: {}", target, expected);
        self.with_file(target, detail, |f| (f.uid == expected, f.uid.to_string()))
    }

    pub fn file_gid(&mut self, target: &str, expected: u32) -> &Report {
        let detail = format!("{} is owned by gid: {}", target, expected);
        self.with_file(target, detail, |f| (f.gid == expected, f.gid.to_string()))
    }

    pub fn file_mode(&mut self, target: &str, expected: &ModeSpec) -> &Report {
        let want = normalize_mode(expected);
        let detail = format!("{} has mode: {}", target, want);
        self.with_file(target, detail, |f| {
            let actual = format_mode(f.mode);
            (actual == want, actual)
        })
    }

    pub fn file_contains(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} contains: {}", target, expected);
        match self.facts.file_contains(target, expected) {
            Ok(found) => self.outcome(found, detail, "no match".to_string()),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    pub fn file_md5sum(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has md5sum: {}", target, expected);
        match self.facts.file_md5(target) {
            Ok(actual) => self.outcome(actual == expected, detail, actual),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    pub fn file_sha256sum(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has sha256sum: {}", target, expected);
        match self.facts.file_sha256(target) {
            Ok(actual) => self.outcome(actual == expected, detail, actual),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    /// Compare mtime against a `YYYY-MM-DD HH:MM:SS` expectation; the
    /// actual timestamp is rendered in the same form, no timezone
    /// normalization on either side.
    pub fn file_mtime(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has mtime: {}", target, expected);
        self.with_file(target, detail, |f| {
            let actual = f.mtime.to_datetime_string();
            (actual == expected, actual)
        })
    }

    pub fn file_size(&mut self, target: &str, expected: u64) -> &Report {
        let detail = format!("{} has size: {}", target, expected);
        self.with_file(target, detail, |f| (f.size == expected, f.size.to_string()))
    }

    // --- package probes ---

    pub fn package_installed(&mut self, target: &str, expected: bool) -> &Report {
        let detail = format!("{} is installed: {}", target, expected);
        match self.facts.package(target) {
            Ok(facts) => {
                let actual = facts.is_some();
                self.outcome(actual == expected, detail, actual.to_string())
            }
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    pub fn package_version(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} is version: {}", target, expected);
        match self.facts.package(target) {
            Ok(Some(facts)) => {
                let ok = version_matches(&facts.version, expected);
                self.outcome(ok, detail, facts.version)
            }
            Ok(None) => self.outcome(false, detail, "not installed".to_string()),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    // --- service probes ---

    pub fn service_running(&mut self, target: &str, expected: bool) -> &Report {
        let detail = format!("{} is running: {}", target, expected);
        self.with_service(target, detail, |s| {
            (s.running == expected, s.running.to_string())
        })
    }

    pub fn service_enabled(&mut self, target: &str, expected: bool) -> &Report {
        let detail = format!("{} is enabled: {}", target, expected);
        self.with_service(target, detail, |s| {
            (s.enabled == expected, s.enabled.to_string())
        })
    }

    // --- socket probes ---

    pub fn socket_listening(&mut self, target: &str, expected: bool) -> &Report {
        let detail = format!("{} is listening: {}", target, expected);
        match self.facts.socket_listening(target) {
            Ok(actual) => self.outcome(actual == expected, detail, actual.to_string()),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    // --- user probes ---

    pub fn user_exists(&mut self, target: &str, expected: bool) -> &Report {
        let detail = format!("{} exists: {}", target, expected);
        match self.facts.user(target) {
            Ok(facts) => {
                let actual = facts.is_some();
                self.outcome(actual == expected, detail, actual.to_string())
            }
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    pub fn user_uid(&mut self, target: &str, expected: u32) -> &Report {
        let detail = format!("{} has uid: {}", target, expected);
        self.with_user(target, detail, |u| (u.uid == expected, u.uid.to_string()))
    }

    pub fn user_gid(&mut self, target: &str, expected: u32) -> &Report {
        let detail = format!("{} has gid: {}", target, expected);
        self.with_user(target, detail, |u| (u.gid == expected, u.gid.to_string()))
    }

    pub fn user_group(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has group: {}", target, expected);
        self.with_user(target, detail, |u| {
            let found = u.group.clone().unwrap_or_else(|| format!("gid {}", u.gid));
            (u.group.as_deref() == Some(expected), found)
        })
    }

    /// Order-sensitive comparison of the comma-joined gid list.
    pub fn user_gids(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has gids: {}", target, expected);
        self.with_user(target, detail, |u| {
            let actual = join_csv(&u.gids);
            (actual == expected, actual)
        })
    }

    /// Order-sensitive comparison of the comma-joined group-name list.
    pub fn user_groups(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has groups: {}", target, expected);
        self.with_user(target, detail, |u| {
            let actual = join_csv(&u.groups);
            (actual == expected, actual)
        })
    }

    pub fn user_home(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has home: {}", target, expected);
        self.with_user(target, detail, |u| (u.home == expected, u.home.clone()))
    }

    pub fn user_shell(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has shell: {}", target, expected);
        self.with_user(target, detail, |u| (u.shell == expected, u.shell.clone()))
    }

    // --- group probes ---

    pub fn group_exists(&mut self, target: &str, expected: bool) -> &Report {
        let detail = format!("{} exists: {}", target, expected);
        match self.facts.group(target) {
            Ok(facts) => {
                let actual = facts.is_some();
                self.outcome(actual == expected, detail, actual.to_string())
            }
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    pub fn group_gid(&mut self, target: &str, expected: u32) -> &Report {
        let detail = format!("{} has gid: {}", target, expected);
        self.with_group(target, detail, |g| (g.gid == expected, g.gid.to_string()))
    }

    // --- interface probes ---

    pub fn interface_exists(&mut self, target: &str, expected: bool) -> &Report {
        let detail = format!("{} exists: {}", target, expected);
        match self.facts.interface(target) {
            Ok(facts) => {
                let actual = facts.is_some();
                self.outcome(actual == expected, detail, actual.to_string())
            }
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    pub fn interface_speed(&mut self, target: &str, expected: u64) -> &Report {
        let detail = format!("{} has speed: {}", target, expected);
        self.with_interface(target, detail, |i| {
            let found = i
                .speed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            (i.speed == Some(expected), found)
        })
    }

    /// Membership check: the expected address must be one of the
    /// interface's addresses; extra addresses are fine.
    pub fn interface_address(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has address: {}", target, expected);
        self.with_interface(target, detail, |i| {
            let ok = i.addresses.iter().any(|a| a == expected);
            (ok, join_csv(&i.addresses))
        })
    }

    // --- systeminfo probes ---

    pub fn systeminfo_type(&mut self, expected: &str) -> &Report {
        let detail = format!("type: {}", expected);
        self.with_system_info(detail, |s| (s.kind == expected, s.kind.clone()))
    }

    pub fn systeminfo_distribution(&mut self, expected: &str) -> &Report {
        let detail = format!("distribution: {}", expected);
        self.with_system_info(detail, |s| {
            let found = s.distribution.clone().unwrap_or_else(|| "unknown".to_string());
            (s.distribution.as_deref() == Some(expected), found)
        })
    }

    pub fn systeminfo_release(&mut self, expected: &str) -> &Report {
        let detail = format!("release: {}", expected);
        self.with_system_info(detail, |s| {
            let found = s.release.clone().unwrap_or_else(|| "unknown".to_string());
            (s.release.as_deref() == Some(expected), found)
        })
    }

    pub fn systeminfo_codename(&mut self, expected: &str) -> &Report {
        let detail = format!("codename: {}", expected);
        self.with_system_info(detail, |s| {
            let found = s.codename.clone().unwrap_or_else(|| "unknown".to_string());
            (s.codename.as_deref() == Some(expected), found)
        })
    }

    // --- sysctl probe ---

    /// Best-effort: a key that does not exist on the system is its own
    /// distinct failure, never a run-aborting error.
    pub fn sysctl_value(&mut self, key: &str, expected: &ScalarValue) -> &Report {
        let detail = format!("{}: {}", key, expected);
        match self.facts.sysctl(key) {
            Ok(actual) => self.outcome(actual == expected.to_string(), detail, actual),
            Err(e @ FactError::InvalidSysctlKey(_)) => {
                self.report.fail(e.to_string());
                &self.report
            }
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    // --- mount probes ---

    pub fn mount_exists(&mut self, target: &str, expected: bool) -> &Report {
        let detail = format!("{} exists: {}", target, expected);
        match self.facts.mount(target) {
            Ok(facts) => {
                let actual = facts.is_some();
                self.outcome(actual == expected, detail, actual.to_string())
            }
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }

    pub fn mount_filesystem(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has filesystem: {}", target, expected);
        self.with_mount(target, detail, |m| {
            (m.filesystem == expected, m.filesystem.clone())
        })
    }

    pub fn mount_device(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has device: {}", target, expected);
        self.with_mount(target, detail, |m| (m.device == expected, m.device.clone()))
    }

    /// The expected value is compared against the comma-joined actual
    /// option list, in kernel order, the same order-sensitive policy as
    /// user group lists.
    pub fn mount_option(&mut self, target: &str, expected: &str) -> &Report {
        let detail = format!("{} has options: {}", target, expected);
        self.with_mount(target, detail, |m| {
            let actual = join_csv(&m.options);
            (actual == expected, actual)
        })
    }

    // --- process probe ---

    /// Exact count of live processes matching both command name and
    /// owning user.
    pub fn process_count(&mut self, command: &str, user: &str, expected: u64) -> &Report {
        let detail = format!("{} has count for user {}: {}", command, user, expected);
        match self.facts.process_count(command, user) {
            Ok(actual) => self.outcome(actual as u64 == expected, detail, actual.to_string()),
            Err(e) => self.outcome(false, detail, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockFacts;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_exists_both_polarities() {
        let mut facts = MockFacts::new();
        facts.add_file("/etc/passwd", MockFacts::regular_file());

        let mut checker = Checker::new(&facts);
        checker.file_exists("/etc/passwd", true);
        checker.file_exists("/etc/shadow-copy", false);
        checker.file_exists("/etc/shadow-copy", true);

        let report = checker.into_report();
        assert_eq!(report.totals().pass, 2);
        assert_eq!(report.totals().fail, 1);
        assert_eq!(
            report.failed[0],
            "/etc/shadow-copy exists: true, found: false"
        );
    }

    #[test]
    fn test_file_owner_mismatch_names_found_value() {
        let mut facts = MockFacts::new();
        let mut file = MockFacts::regular_file();
        file.owner = Some("nobody".to_string());
        facts.add_file("/etc/passwd", file);

        let mut checker = Checker::new(&facts);
        checker.file_user("/etc/passwd", "root");

        let report = checker.into_report();
        assert_eq!(
            report.failed[0],
            "/etc/passwd is owned by user: root, found: nobody"
        );
    }

    #[test]
    fn test_file_mode_normalization_matches_all_forms() {
        let mut facts = MockFacts::new();
        let mut file = MockFacts::regular_file();
        file.mode = 0o644;
        facts.add_file("/etc/hosts", file);

        let mut checker = Checker::new(&facts);
        checker.file_mode("/etc/hosts", &ModeSpec::Int(644));
        checker.file_mode("/etc/hosts", &ModeSpec::Text("644".to_string()));
        checker.file_mode("/etc/hosts", &ModeSpec::Text("0644".to_string()));

        assert_eq!(checker.report().totals().pass, 3);
    }

    #[test]
    fn test_package_version_prefix_semantics() {
        let mut facts = MockFacts::new();
        facts.add_package("tree", "2.0-pre4-1");

        let mut checker = Checker::new(&facts);
        checker.package_version("tree", "2.0");
        checker.package_version("tree", "2.0-pre5");

        let report = checker.into_report();
        assert_eq!(report.totals().pass, 1);
        assert_eq!(report.totals().fail, 1);
        assert_eq!(
            report.failed[0],
            "tree is version: 2.0-pre5, found: 2.0-pre4-1"
        );
    }

    #[test]
    fn test_interface_address_membership() {
        let mut facts = MockFacts::new();
        facts.add_interface("eth0", None, &["192.168.1.2", "10.0.0.5"]);

        let mut checker = Checker::new(&facts);
        checker.interface_address("eth0", "192.168.1.2");
        checker.interface_address("eth0", "192.168.1.9");

        let report = checker.into_report();
        assert_eq!(report.totals().pass, 1);
        assert_eq!(report.totals().fail, 1);
    }

    #[test]
    fn test_user_gids_join_is_order_sensitive() {
        let mut facts = MockFacts::new();
        let mut user = MockFacts::basic_user(1000, 1000);
        user.gids = vec![1000, 4, 27];
        facts.add_user("deploy", user);

        let mut checker = Checker::new(&facts);
        checker.user_gids("deploy", "1000,4,27");
        checker.user_gids("deploy", "4,27,1000");

        let report = checker.into_report();
        assert_eq!(report.totals().pass, 1);
        assert_eq!(report.totals().fail, 1);
    }

    #[test]
    fn test_sysctl_invalid_key_is_distinct_failure() {
        let facts = MockFacts::new();

        let mut checker = Checker::new(&facts);
        checker.sysctl_value("vm.nonexistent_key", &ScalarValue::Int(1));

        let report = checker.into_report();
        assert_eq!(report.totals().fail, 1);
        assert_eq!(
            report.failed[0],
            "vm.nonexistent_key is not a valid sysctl setting"
        );
    }

    #[test]
    fn test_sysctl_value_mismatch_is_ordinary_failure() {
        let mut facts = MockFacts::new();
        facts.add_sysctl("vm.swappiness", "60");

        let mut checker = Checker::new(&facts);
        checker.sysctl_value("vm.swappiness", &ScalarValue::Int(60));
        checker.sysctl_value("vm.swappiness", &ScalarValue::Int(10));

        let report = checker.into_report();
        assert_eq!(report.totals().pass, 1);
        assert_eq!(report.failed[0], "vm.swappiness: 10, found: 60");
    }

    #[test]
    fn test_unknown_file_type_is_failed_entry() {
        let mut facts = MockFacts::new();
        facts.add_file("/dev/sda", MockFacts::regular_file());

        let mut checker = Checker::new(&facts);
        checker.file_type("/dev/sda", "blockdevice");

        let report = checker.into_report();
        assert_eq!(report.totals().fail, 1);
        assert!(report.failed[0].contains("could not find a type match"));
    }

    #[test]
    fn test_attribute_probe_on_absent_target_fails_gracefully() {
        let facts = MockFacts::new();

        let mut checker = Checker::new(&facts);
        checker.file_mode("/missing", &ModeSpec::Int(644));
        checker.user_uid("ghost", 1000);
        checker.mount_filesystem("/data", "ext4");

        let report = checker.into_report();
        assert_eq!(report.totals().fail, 3);
        assert!(report.failed[0].ends_with("found: no such file"));
        assert!(report.failed[1].ends_with("found: no such user"));
        assert!(report.failed[2].ends_with("found: not mounted"));
    }

    #[test]
    fn test_mount_option_compares_joined_list() {
        let mut facts = MockFacts::new();
        facts.add_mount("/", "/dev/sda1", "ext4", &["rw", "relatime"]);

        let mut checker = Checker::new(&facts);
        checker.mount_option("/", "rw,relatime");
        checker.mount_option("/", "rw");

        let report = checker.into_report();
        assert_eq!(report.totals().pass, 1);
        assert_eq!(report.failed[0], "/ has options: rw, found: rw,relatime");
    }

    #[test]
    fn test_process_count_exact() {
        let mut facts = MockFacts::new();
        facts.add_process("www-data", "nginx");
        facts.add_process("www-data", "nginx");
        facts.add_process("root", "nginx");

        let mut checker = Checker::new(&facts);
        checker.process_count("nginx", "www-data", 2);
        checker.process_count("nginx", "root", 2);

        let report = checker.into_report();
        assert_eq!(report.totals().pass, 1);
        assert_eq!(
            report.failed[0],
            "nginx has count for user root: 2, found: 1"
        );
    }

    #[test]
    fn test_socket_listening_both_polarities() {
        let mut facts = MockFacts::new();
        facts.add_listening("tcp://22");

        let mut checker = Checker::new(&facts);
        checker.socket_listening("tcp://22", true);
        checker.socket_listening("tcp://5432", false);
        checker.socket_listening("tcp://5432", true);

        let report = checker.into_report();
        assert_eq!(report.totals().pass, 2);
        assert_eq!(report.totals().fail, 1);
        assert_eq!(report.failed[0], "tcp://5432 is listening: true, found: false");
    }

    #[test]
    fn test_probe_returns_cumulative_report() {
        let mut facts = MockFacts::new();
        facts.add_file("/a", MockFacts::regular_file());

        let mut checker = Checker::new(&facts);
        let after_first = checker.file_exists("/a", true).len();
        let after_second = checker.file_exists("/a", true).len();
        assert_eq!(after_first, 1);
        assert_eq!(after_second, 2);
    }
}
