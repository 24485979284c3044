//! The declarative specification model.
//!
//! A specification is a nested mapping from entity kind (`file`, `package`,
//! `service`, ...) to target identifier to expected attribute values. It is
//! decoded once into the typed [`CheckSet`] tree; unknown kinds and unknown
//! attributes are collected into catch-all maps, logged, and otherwise
//! ignored so that partial or forward-written specifications keep working.

pub mod loader;
pub mod model;
pub mod values;

pub use loader::{from_value, from_yaml_str, load_path};
pub use model::{
    CheckSet, FileChecks, GroupChecks, InterfaceChecks, MountChecks, PackageChecks,
    ProcessChecks, ServiceChecks, SocketChecks, SysctlChecks, SystemInfoChecks, UserChecks,
};
pub use values::{ModeSpec, OneOrMany, ScalarValue};
