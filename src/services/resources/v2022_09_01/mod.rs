pub mod providers;
pub mod resourcegroups;

use crate::arm::ArmClient;

pub const API_VERSION: &str = "2022-09-01";

/// Every Resources client for this API version
#[derive(Clone)]
pub struct Client {
    pub providers: providers::ProvidersClient,
    pub resource_groups: resourcegroups::ResourceGroupsClient,
}

impl Client {
    pub fn new(client: ArmClient) -> Self {
        Self {
            providers: providers::ProvidersClient::new(client.clone()),
            resource_groups: resourcegroups::ResourceGroupsClient::new(client),
        }
    }
}
