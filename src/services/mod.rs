//! Typed clients, grouped by service and API version.

pub mod apicenter;
pub mod resources;
pub mod storage;

use crate::resourceids::IdRegistry;

/// Register every resource ID type the service packages define
pub(crate) fn register_ids(registry: &mut IdRegistry) {
    registry
        .register::<apicenter::v2024_03_01::apidefinitions::DefinitionId>()
        .register::<apicenter::v2024_03_01::apidefinitions::VersionId>()
        .register::<resources::v2020_05_01::managementlocks::ScopedLockId>()
        .register::<resources::v2022_09_01::providers::SubscriptionProviderId>()
        .register::<storage::v2023_01_01::storageaccounts::StorageAccountId>();
}
