//! Specification traversal and run output.

use crate::probes::Checker;
use crate::report::{Report, Totals};
use infracheck_facts::FactSource;
use infracheck_spec::CheckSet;
use serde::Serialize;
use tracing::debug;

/// Full detail surface for one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    #[serde(rename = "Passed")]
    pub passed: Vec<String>,
    #[serde(rename = "Failed")]
    pub failed: Vec<String>,
    #[serde(rename = "Totals")]
    pub totals: Totals,
}

impl From<Report> for RunReport {
    fn from(report: Report) -> Self {
        let totals = report.totals();
        RunReport {
            passed: report.passed,
            failed: report.failed,
            totals,
        }
    }
}

/// What a run returns: the full detail, or the tallies alone.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RunOutput {
    Detailed(RunReport),
    Totals(Totals),
}

impl RunOutput {
    pub fn totals(&self) -> Totals {
        match self {
            RunOutput::Detailed(report) => report.totals,
            RunOutput::Totals(totals) => *totals,
        }
    }
}

/// Evaluate every check in the specification in one sequential pass.
///
/// Kinds absent from the specification are skipped entirely; list-valued
/// attributes are expanded into one probe per element. The traversal
/// itself never fails: every probe outcome, including inspection
/// trouble, lands in the report.
pub fn run_all<F: FactSource>(facts: &F, checks: &CheckSet, detailed: bool) -> RunOutput {
    let mut checker = Checker::new(facts);
    walk(&mut checker, checks);
    let report = checker.into_report();

    let totals = report.totals();
    debug!("run complete: {} passed, {} failed", totals.pass, totals.fail);

    if detailed {
        RunOutput::Detailed(report.into())
    } else {
        RunOutput::Totals(totals)
    }
}

fn walk<F: FactSource>(checker: &mut Checker<'_, F>, checks: &CheckSet) {
    for (path, file) in &checks.file {
        if let Some(expected) = file.exists {
            checker.file_exists(path, expected);
        }
        if let Some(kind) = &file.kind {
            checker.file_type(path, kind);
        }
        if let Some(target) = &file.linkedto {
            checker.file_linked_to(path, target);
        }
        if let Some(owner) = &file.user {
            checker.file_user(path, owner);
        }
        if let Some(group) = &file.group {
            checker.file_group(path, group);
        }
        if let Some(uid) = file.uid {
            checker.file_uid(path, uid);
        }
        if let Some(gid) = file.gid {
            checker.file_gid(path, gid);
        }
        if let Some(mode) = &file.mode {
            checker.file_mode(path, mode);
        }
        if let Some(values) = &file.contains {
            for needle in values.iter() {
                checker.file_contains(path, needle);
            }
        }
        if let Some(digest) = &file.md5sum {
            checker.file_md5sum(path, digest);
        }
        if let Some(digest) = &file.sha256sum {
            checker.file_sha256sum(path, digest);
        }
        if let Some(mtime) = &file.mtime {
            checker.file_mtime(path, mtime);
        }
        if let Some(size) = file.size {
            checker.file_size(path, size);
        }
    }

    for (name, package) in &checks.package {
        if let Some(expected) = package.installed {
            checker.package_installed(name, expected);
        }
        if let Some(version) = &package.version {
            checker.package_version(name, version);
        }
    }

    for (name, service) in &checks.service {
        if let Some(expected) = service.running {
            checker.service_running(name, expected);
        }
        if let Some(expected) = service.enabled {
            checker.service_enabled(name, expected);
        }
    }

    for (spec, socket) in &checks.socket {
        if let Some(expected) = socket.listening {
            checker.socket_listening(spec, expected);
        }
    }

    for (name, user) in &checks.user {
        if let Some(expected) = user.exists {
            checker.user_exists(name, expected);
        }
        if let Some(uid) = user.uid {
            checker.user_uid(name, uid);
        }
        if let Some(gid) = user.gid {
            checker.user_gid(name, gid);
        }
        if let Some(group) = &user.group {
            checker.user_group(name, group);
        }
        if let Some(gids) = &user.gids {
            checker.user_gids(name, gids);
        }
        if let Some(groups) = &user.groups {
            checker.user_groups(name, groups);
        }
        if let Some(home) = &user.home {
            checker.user_home(name, home);
        }
        if let Some(shell) = &user.shell {
            checker.user_shell(name, shell);
        }
    }

    for (name, group) in &checks.group {
        if let Some(expected) = group.exists {
            checker.group_exists(name, expected);
        }
        if let Some(gid) = group.gid {
            checker.group_gid(name, gid);
        }
    }

    for (name, interface) in &checks.interface {
        if let Some(expected) = interface.exists {
            checker.interface_exists(name, expected);
        }
        if let Some(speed) = interface.speed {
            checker.interface_speed(name, speed);
        }
        if let Some(addresses) = &interface.addresses {
            for address in addresses.iter() {
                checker.interface_address(name, address);
            }
        }
    }

    if let Some(info) = &checks.systeminfo {
        if let Some(kind) = &info.kind {
            checker.systeminfo_type(kind);
        }
        if let Some(distribution) = &info.distribution {
            checker.systeminfo_distribution(distribution);
        }
        if let Some(release) = &info.release {
            checker.systeminfo_release(release);
        }
        if let Some(codename) = &info.codename {
            checker.systeminfo_codename(codename);
        }
    }

    for (key, sysctl) in &checks.sysctl {
        if let Some(value) = &sysctl.value {
            checker.sysctl_value(key, value);
        }
    }

    for (point, mount) in &checks.mount {
        if let Some(expected) = mount.exists {
            checker.mount_exists(point, expected);
        }
        if let Some(filesystem) = &mount.filesystem {
            checker.mount_filesystem(point, filesystem);
        }
        if let Some(device) = &mount.device {
            checker.mount_device(point, device);
        }
        if let Some(options) = &mount.options {
            for option in options.iter() {
                checker.mount_option(point, option);
            }
        }
    }

    for (command, process) in &checks.process {
        for (user, count) in &process.count {
            checker.process_count(command, user, *count);
        }
    }
}
