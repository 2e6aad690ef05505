pub mod apidefinitions;

use crate::arm::ArmClient;

pub const API_VERSION: &str = "2024-03-01";

/// Every API Center client for this API version
#[derive(Clone)]
pub struct Client {
    pub api_definitions: apidefinitions::ApiDefinitionsClient,
}

impl Client {
    pub fn new(client: ArmClient) -> Self {
        Self {
            api_definitions: apidefinitions::ApiDefinitionsClient::new(client),
        }
    }
}
