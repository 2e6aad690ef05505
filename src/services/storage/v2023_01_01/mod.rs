pub mod storageaccounts;

use crate::arm::ArmClient;

pub const API_VERSION: &str = "2023-01-01";

/// Every Storage client for this API version
#[derive(Clone)]
pub struct Client {
    pub storage_accounts: storageaccounts::StorageAccountsClient,
}

impl Client {
    pub fn new(client: ArmClient) -> Self {
        Self {
            storage_accounts: storageaccounts::StorageAccountsClient::new(client),
        }
    }
}
