//! Storage accounts.

mod client;
mod constants;
mod id_storageaccount;
mod models;
mod predicates;

pub use client::{GetPropertiesOperationOptions, StorageAccountsClient};
pub use constants::{
    AccessTier, AccountStatus, DefaultAction, Kind, MinimumTlsVersion, ProvisioningState, PublicNetworkAccess,
    Reason, SkuName, SkuTier, StorageAccountExpand, Type,
};
pub use id_storageaccount::StorageAccountId;
pub use models::{
    CheckNameAvailabilityResult, Endpoints, IpRule, NetworkRuleSet, Sku, StorageAccount,
    StorageAccountCheckNameAvailabilityParameters, StorageAccountCreateParameters, StorageAccountProperties,
    StorageAccountPropertiesCreateParameters, StorageAccountPropertiesUpdateParameters,
    StorageAccountUpdateParameters,
};
pub use predicates::StorageAccountOperationPredicate;
