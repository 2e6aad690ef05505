//! Core of an Azure Resource Manager SDK: typed resource IDs, open string
//! enums, a request pipeline with paging and long-running operation polling,
//! a slice of generated service clients, and acceptance-test helpers.

pub mod acceptance;
pub mod arm;
pub mod config;
pub(crate) mod enums;
pub mod error;
pub mod models;
pub mod resourceids;
pub mod services;

pub use arm::{ArmClient, ClientOptions};
pub use error::{Error, Result};
pub use resourceids::{IdRegistry, ResourceId};

/// Version injected at compile time via AZRM_VERSION (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("AZRM_VERSION") {
    Some(v) => v,
    None => "dev",
};
