//! Management locks at any scope.

mod client;
mod constants;
mod id_scopedlock;
mod models;
mod predicates;

pub use client::{ListByScopeOperationOptions, ManagementLocksClient};
pub use constants::LockLevel;
pub use id_scopedlock::ScopedLockId;
pub use models::{ManagementLockObject, ManagementLockOwner, ManagementLockProperties};
pub use predicates::ManagementLockObjectOperationPredicate;
