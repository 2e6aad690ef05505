//! Assertions over Terraform state and the live resources behind it.

use super::{AcceptanceError, State, TestResource};
use crate::arm::ArmClient;
use tracing::debug;

/// Start a check against the resource at `address` in state
pub fn that(address: &str) -> That<'_> {
    That { address }
}

pub struct That<'a> {
    address: &'a str,
}

impl That<'_> {
    /// The resource is in state and Azure reports it as existing
    pub async fn exists_in_azure<R: TestResource + ?Sized>(
        &self,
        client: &ArmClient,
        state: &State,
        resource: &R,
    ) -> Result<(), AcceptanceError> {
        let instance = state
            .get(self.address)
            .ok_or_else(|| AcceptanceError::ResourceNotFoundInState(self.address.to_string()))?;

        debug!("Checking {} ({}) exists", self.address, instance.id);
        match resource.exists(client, instance).await? {
            Some(true) => Ok(()),
            Some(false) => Err(AcceptanceError::DoesNotExist(self.address.to_string())),
            None => Err(AcceptanceError::Indeterminate(self.address.to_string())),
        }
    }

    /// The resource is in state but Azure no longer has it
    pub async fn does_not_exist_in_azure<R: TestResource + ?Sized>(
        &self,
        client: &ArmClient,
        state: &State,
        resource: &R,
    ) -> Result<(), AcceptanceError> {
        let instance = state
            .get(self.address)
            .ok_or_else(|| AcceptanceError::ResourceNotFoundInState(self.address.to_string()))?;

        match resource.exists(client, instance).await? {
            Some(false) => Ok(()),
            Some(true) => Err(AcceptanceError::StillExists(self.address.to_string())),
            None => Err(AcceptanceError::Indeterminate(self.address.to_string())),
        }
    }

    /// The flattened attribute `key` equals `expected`
    pub fn has_value(&self, state: &State, key: &str, expected: &str) -> Result<(), AcceptanceError> {
        let instance = state
            .get(self.address)
            .ok_or_else(|| AcceptanceError::ResourceNotFoundInState(self.address.to_string()))?;

        let actual = instance.attribute(key);
        if actual == Some(expected) {
            return Ok(());
        }
        Err(AcceptanceError::AttributeMismatch {
            resource: self.address.to_string(),
            key: key.to_string(),
            expected: expected.to_string(),
            actual: actual.map(str::to_string),
        })
    }
}

/// After `terraform destroy`: every instance of the resource's type in the
/// last known state is gone from Azure
pub async fn destroyed<R: TestResource + ?Sized>(
    client: &ArmClient,
    state: &State,
    resource: &R,
) -> Result<(), AcceptanceError> {
    for instance in state.of_type(resource.resource_type()) {
        debug!("Checking {} was destroyed", instance.address);
        match resource.exists(client, instance).await? {
            Some(false) => {}
            Some(true) | None => return Err(AcceptanceError::StillExists(instance.address.clone())),
        }
    }
    Ok(())
}
