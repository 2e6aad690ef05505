use super::{
    CheckNameAvailabilityResult, StorageAccount, StorageAccountCheckNameAvailabilityParameters,
    StorageAccountCreateParameters, StorageAccountExpand, StorageAccountId, StorageAccountOperationPredicate,
    StorageAccountUpdateParameters,
};
use crate::arm::{list_complete, ArmClient, CompleteResult, Operation, Page, Poller, RequestOptions, Response};
use crate::error::Result;
use crate::resourceids::{ResourceGroupId, ResourceId, SubscriptionId};
use crate::services::storage::v2023_01_01::API_VERSION;
use reqwest::Method;

const fn operation(name: &'static str) -> Operation {
    Operation::new("storageaccounts", "StorageAccountsClient", name)
}

#[derive(Debug, Clone, Default)]
pub struct GetPropertiesOperationOptions {
    pub expand: Option<StorageAccountExpand>,
}

#[derive(Clone)]
pub struct StorageAccountsClient {
    client: ArmClient,
}

impl StorageAccountsClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn check_name_availability(
        &self,
        id: &SubscriptionId,
        input: &StorageAccountCheckNameAvailabilityParameters,
    ) -> Result<Response<CheckNameAvailabilityResult>> {
        let request = RequestOptions::new(
            operation("CheckNameAvailability"),
            Method::POST,
            format!("{}/providers/Microsoft.Storage/checkNameAvailability", id.id()),
            API_VERSION,
        )
        .json(input)?;

        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    /// Start creating the account
    pub async fn create(&self, id: &StorageAccountId, input: &StorageAccountCreateParameters) -> Result<Poller> {
        let request = RequestOptions::new(operation("Create"), Method::PUT, id.id(), API_VERSION)
            .expect(&[200, 202])
            .json(input)?;

        let response = self.client.execute(&request).await?;
        Ok(Poller::from_response(&self.client, &request, response))
    }

    /// Create the account and wait until it's provisioned
    pub async fn create_then_poll(
        &self,
        id: &StorageAccountId,
        input: &StorageAccountCreateParameters,
    ) -> Result<Option<StorageAccount>> {
        self.create(id, input).await?.poll_for_model().await
    }

    pub async fn get_properties(
        &self,
        id: &StorageAccountId,
        options: GetPropertiesOperationOptions,
    ) -> Result<Response<StorageAccount>> {
        let request = RequestOptions::new(operation("GetProperties"), Method::GET, id.id(), API_VERSION)
            .optional_query("$expand", options.expand);

        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    pub async fn update(
        &self,
        id: &StorageAccountId,
        input: &StorageAccountUpdateParameters,
    ) -> Result<Response<StorageAccount>> {
        let request = RequestOptions::new(operation("Update"), Method::PATCH, id.id(), API_VERSION).json(input)?;
        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    pub async fn delete(&self, id: &StorageAccountId) -> Result<Response<()>> {
        let request = RequestOptions::new(operation("Delete"), Method::DELETE, id.id(), API_VERSION).expect(&[200, 204]);
        let response = self.client.execute(&request).await?;
        Ok(Response::empty(response))
    }

    /// Accounts in the subscription
    pub async fn list(&self, id: &SubscriptionId) -> Result<Page<StorageAccount>> {
        let request = RequestOptions::new(
            operation("List"),
            Method::GET,
            format!("{}/providers/Microsoft.Storage/storageAccounts", id.id()),
            API_VERSION,
        );

        let response = self.client.execute(&request).await?;
        Page::from_response(request, response)
    }

    pub async fn list_complete(&self, id: &SubscriptionId) -> Result<CompleteResult<StorageAccount>> {
        self.list_complete_matching_predicate(id, StorageAccountOperationPredicate::default())
            .await
    }

    pub async fn list_complete_matching_predicate(
        &self,
        id: &SubscriptionId,
        predicate: StorageAccountOperationPredicate,
    ) -> Result<CompleteResult<StorageAccount>> {
        let first = self.list(id).await?;
        list_complete(first, &self.client, |item| predicate.matches(item)).await
    }

    /// Accounts in one resource group
    pub async fn list_by_resource_group(&self, id: &ResourceGroupId) -> Result<Page<StorageAccount>> {
        let request = RequestOptions::new(
            operation("ListByResourceGroup"),
            Method::GET,
            format!("{}/providers/Microsoft.Storage/storageAccounts", id.id()),
            API_VERSION,
        );

        let response = self.client.execute(&request).await?;
        Page::from_response(request, response)
    }

    pub async fn list_by_resource_group_complete(
        &self,
        id: &ResourceGroupId,
    ) -> Result<CompleteResult<StorageAccount>> {
        self.list_by_resource_group_complete_matching_predicate(id, StorageAccountOperationPredicate::default())
            .await
    }

    pub async fn list_by_resource_group_complete_matching_predicate(
        &self,
        id: &ResourceGroupId,
        predicate: StorageAccountOperationPredicate,
    ) -> Result<CompleteResult<StorageAccount>> {
        let first = self.list_by_resource_group(id).await?;
        list_complete(first, &self.client, |item| predicate.matches(item)).await
    }
}
