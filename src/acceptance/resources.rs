//! Terraform resources under test: how to find each one in Azure, and the
//! HCL configurations the tests apply.

use super::{AcceptanceError, InstanceState, TestData};
use crate::arm::ArmClient;
use crate::resourceids::{ResourceGroupId, ResourceId};
use crate::services::resources::v2020_05_01::managementlocks::{ManagementLocksClient, ScopedLockId};
use crate::services::resources::v2022_09_01::resourcegroups::ResourceGroupsClient;
use crate::services::storage::v2023_01_01::storageaccounts::{
    GetPropertiesOperationOptions, StorageAccountId, StorageAccountsClient,
};
use async_trait::async_trait;

#[async_trait]
pub trait TestResource: Send + Sync {
    /// The Terraform type, e.g. `azurerm_resource_group`
    fn resource_type(&self) -> &'static str;

    /// Look the instance up in Azure. `Some(false)` means Azure answered
    /// "not found"; `None` means the lookup gave no answer either way.
    async fn exists(&self, client: &ArmClient, state: &InstanceState) -> Result<Option<bool>, AcceptanceError>;
}

/// Map a GET outcome to an existence answer, treating 404 as "gone"
fn found<T>(result: crate::Result<crate::arm::Response<T>>) -> Result<Option<bool>, AcceptanceError> {
    match result {
        Ok(response) => Ok(Some(response.model.is_some())),
        Err(err) if err.is_not_found() => Ok(Some(false)),
        Err(err) => Err(err.into()),
    }
}

// ============================================================================
// azurerm_resource_group
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceGroupResource;

#[async_trait]
impl TestResource for ResourceGroupResource {
    fn resource_type(&self) -> &'static str {
        "azurerm_resource_group"
    }

    async fn exists(&self, client: &ArmClient, state: &InstanceState) -> Result<Option<bool>, AcceptanceError> {
        let id = ResourceGroupId::parse(&state.id).map_err(crate::Error::from)?;
        let groups = ResourceGroupsClient::new(client.clone());
        Ok(Some(groups.check_existence(&id).await?))
    }
}

impl ResourceGroupResource {
    pub fn basic(&self, data: &TestData) -> String {
        format!(
            r#"
provider "azurerm" {{
  features {{}}
}}

resource "azurerm_resource_group" "test" {{
  name     = "acctestRG-{}"
  location = "{}"
}}
"#,
            data.random_integer, data.locations.primary
        )
    }

    pub fn with_tags(&self, data: &TestData, environment: &str) -> String {
        format!(
            r#"
provider "azurerm" {{
  features {{}}
}}

resource "azurerm_resource_group" "test" {{
  name     = "acctestRG-{}"
  location = "{}"

  tags = {{
    environment = "{}"
  }}
}}
"#,
            data.random_integer, data.locations.primary, environment
        )
    }

    pub fn requires_import(&self, data: &TestData) -> String {
        format!(
            r#"
{}

resource "azurerm_resource_group" "import" {{
  name     = azurerm_resource_group.test.name
  location = azurerm_resource_group.test.location
}}
"#,
            self.basic(data)
        )
    }
}

// ============================================================================
// azurerm_storage_account
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct StorageAccountResource;

#[async_trait]
impl TestResource for StorageAccountResource {
    fn resource_type(&self) -> &'static str {
        "azurerm_storage_account"
    }

    async fn exists(&self, client: &ArmClient, state: &InstanceState) -> Result<Option<bool>, AcceptanceError> {
        let id = StorageAccountId::parse(&state.id).map_err(crate::Error::from)?;
        let accounts = StorageAccountsClient::new(client.clone());
        found(
            accounts
                .get_properties(&id, GetPropertiesOperationOptions::default())
                .await,
        )
    }
}

impl StorageAccountResource {
    pub fn basic(&self, data: &TestData) -> String {
        self.with_replication(data, "LRS", "production")
    }

    pub fn update(&self, data: &TestData) -> String {
        self.with_replication(data, "GRS", "staging")
    }

    fn with_replication(&self, data: &TestData, replication: &str, environment: &str) -> String {
        format!(
            r#"
{}

resource "azurerm_storage_account" "test" {{
  name                = "unlikely23exst2acct{}"
  resource_group_name = azurerm_resource_group.test.name

  location                 = azurerm_resource_group.test.location
  account_tier             = "Standard"
  account_replication_type = "{}"

  tags = {{
    environment = "{}"
  }}
}}
"#,
            ResourceGroupResource.basic(data),
            data.random_string,
            replication,
            environment
        )
    }
}

// ============================================================================
// azurerm_management_lock
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ManagementLockResource;

#[async_trait]
impl TestResource for ManagementLockResource {
    fn resource_type(&self) -> &'static str {
        "azurerm_management_lock"
    }

    async fn exists(&self, client: &ArmClient, state: &InstanceState) -> Result<Option<bool>, AcceptanceError> {
        let id = ScopedLockId::parse(&state.id).map_err(crate::Error::from)?;
        let locks = ManagementLocksClient::new(client.clone());
        found(locks.get_by_scope(&id).await)
    }
}

impl ManagementLockResource {
    /// A lock on the test resource group at `level` (`CanNotDelete` or `ReadOnly`)
    pub fn resource_group_level(&self, data: &TestData, level: &str) -> String {
        format!(
            r#"
{}

resource "azurerm_management_lock" "test" {{
  name       = "acctestlock-{}"
  scope      = azurerm_resource_group.test.id
  lock_level = "{}"
  notes      = "Hello, World!"
}}
"#,
            ResourceGroupResource.basic(data),
            data.random_integer,
            level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acceptance::Locations;

    fn data() -> TestData {
        TestData::with_locations("azurerm_storage_account", "test", Locations::default())
    }

    #[test]
    fn test_resource_group_config() {
        let data = data();
        let config = ResourceGroupResource.basic(&data);
        assert!(config.contains(&format!("name     = \"acctestRG-{}\"", data.random_integer)));
        assert!(config.contains("location = \"westeurope\""));
        assert!(config.contains("features {}"));
    }

    #[test]
    fn test_requires_import_reuses_the_basic_config() {
        let data = data();
        let config = ResourceGroupResource.requires_import(&data);
        assert!(config.contains(&ResourceGroupResource.basic(&data)));
        assert!(config.contains("resource \"azurerm_resource_group\" \"import\""));
    }

    #[test]
    fn test_storage_account_configs() {
        let data = data();
        let basic = StorageAccountResource.basic(&data);
        assert!(basic.contains(&format!("unlikely23exst2acct{}", data.random_string)));
        assert!(basic.contains("account_replication_type = \"LRS\""));
        assert!(basic.contains("acctestRG-"));

        let update = StorageAccountResource.update(&data);
        assert!(update.contains("account_replication_type = \"GRS\""));
        assert!(update.contains("environment = \"staging\""));
    }

    #[test]
    fn test_lock_config() {
        let config = ManagementLockResource.resource_group_level(&data(), "CanNotDelete");
        assert!(config.contains("lock_level = \"CanNotDelete\""));
        assert!(config.contains("scope      = azurerm_resource_group.test.id"));
    }
}
