//! Helpers for acceptance tests that drive real Terraform configurations
//! against Azure and confirm the results through the generated clients.

pub mod check;
mod data;
pub mod resources;
mod state;

pub use data::{Locations, TestData};
pub use resources::TestResource;
pub use state::{InstanceState, State};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcceptanceError {
    #[error("{0} was not found in the Terraform state")]
    ResourceNotFoundInState(String),

    #[error("{0} does not exist in Azure")]
    DoesNotExist(String),

    #[error("{0} still exists in Azure")]
    StillExists(String),

    #[error("checking {0} returned neither a result nor an error")]
    Indeterminate(String),

    #[error("{resource}: attribute {key:?} is {actual:?}, expected {expected:?}")]
    AttributeMismatch {
        resource: String,
        key: String,
        expected: String,
        actual: Option<String>,
    },

    #[error("reading Terraform state: {0}")]
    State(#[from] serde_json::Error),

    #[error(transparent)]
    Client(#[from] crate::Error),
}
