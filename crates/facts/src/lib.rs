//! State inspection for one target host.
//!
//! The [`FactSource`] trait is the capability the assertion engine probes
//! through: one family of typed accessors per entity kind. [`LocalHost`]
//! implements it for the machine the process runs on, using an
//! allowlisted command table plus direct reads of the usual virtual
//! files, with all command-output parsing kept in [`parsers`].

pub mod commands;
pub mod error;
pub mod local;
pub mod parsers;
pub mod source;
pub mod types;

pub use error::{FactError, FactResult};
pub use local::LocalHost;
pub use source::FactSource;
pub use types::{
    FileFacts, FileKind, GroupFacts, InterfaceFacts, MountFacts, PackageFacts, ServiceFacts,
    SocketSpec, SystemInfoFacts, UserFacts,
};
