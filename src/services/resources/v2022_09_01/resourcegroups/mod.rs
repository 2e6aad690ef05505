//! Resource groups. Their IDs are the common [`ResourceGroupId`](crate::resourceids::ResourceGroupId).

mod client;
mod models;
mod predicates;

pub use client::{DeleteOperationOptions, ListOperationOptions, ResourceGroupsClient};
pub use models::{ResourceGroup, ResourceGroupPatchable, ResourceGroupProperties};
pub use predicates::ResourceGroupOperationPredicate;
