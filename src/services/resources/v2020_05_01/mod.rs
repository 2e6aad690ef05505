pub mod managementlocks;

use crate::arm::ArmClient;

pub const API_VERSION: &str = "2020-05-01";

#[derive(Clone)]
pub struct Client {
    pub management_locks: managementlocks::ManagementLocksClient,
}

impl Client {
    pub fn new(client: ArmClient) -> Self {
        Self {
            management_locks: managementlocks::ManagementLocksClient::new(client),
        }
    }
}
