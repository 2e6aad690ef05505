use super::{ResourceGroup, ResourceGroupOperationPredicate, ResourceGroupPatchable};
use crate::arm::{list_complete, ArmClient, CompleteResult, Operation, Page, Poller, RequestOptions, Response};
use crate::error::Result;
use crate::resourceids::{ResourceGroupId, ResourceId, SubscriptionId};
use crate::services::resources::v2022_09_01::API_VERSION;
use reqwest::{Method, StatusCode};

const fn operation(name: &'static str) -> Operation {
    Operation::new("resourcegroups", "ResourceGroupsClient", name)
}

#[derive(Debug, Clone, Default)]
pub struct DeleteOperationOptions {
    /// e.g. `Microsoft.Compute/virtualMachines`
    pub force_deletion_types: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListOperationOptions {
    pub filter: Option<String>,
    pub top: Option<i64>,
}

#[derive(Clone)]
pub struct ResourceGroupsClient {
    client: ArmClient,
}

impl ResourceGroupsClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn create_or_update(&self, id: &ResourceGroupId, input: &ResourceGroup) -> Result<Response<ResourceGroup>> {
        let request = RequestOptions::new(operation("CreateOrUpdate"), Method::PUT, id.id(), API_VERSION)
            .expect(&[200, 201])
            .json(input)?;

        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    pub async fn get(&self, id: &ResourceGroupId) -> Result<Response<ResourceGroup>> {
        let request = RequestOptions::new(operation("Get"), Method::GET, id.id(), API_VERSION);
        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    pub async fn check_existence(&self, id: &ResourceGroupId) -> Result<bool> {
        let request =
            RequestOptions::new(operation("CheckExistence"), Method::HEAD, id.id(), API_VERSION).expect(&[204, 404]);
        let response = self.client.execute(&request).await?;
        Ok(response.status == StatusCode::NO_CONTENT)
    }

    pub async fn update(&self, id: &ResourceGroupId, input: &ResourceGroupPatchable) -> Result<Response<ResourceGroup>> {
        let request = RequestOptions::new(operation("Update"), Method::PATCH, id.id(), API_VERSION).json(input)?;
        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    /// Start deleting the group and everything in it
    pub async fn delete(&self, id: &ResourceGroupId, options: DeleteOperationOptions) -> Result<Poller> {
        let request = RequestOptions::new(operation("Delete"), Method::DELETE, id.id(), API_VERSION)
            .expect(&[200, 202])
            .optional_query("forceDeletionTypes", options.force_deletion_types);

        let response = self.client.execute(&request).await?;
        Ok(Poller::from_response(&self.client, &request, response))
    }

    pub async fn delete_then_poll(&self, id: &ResourceGroupId, options: DeleteOperationOptions) -> Result<()> {
        self.delete(id, options).await?.poll_until_done().await?;
        Ok(())
    }

    pub async fn list(&self, id: &SubscriptionId, options: ListOperationOptions) -> Result<Page<ResourceGroup>> {
        let request = RequestOptions::new(
            operation("List"),
            Method::GET,
            format!("{}/resourcegroups", id.id()),
            API_VERSION,
        )
        .optional_query("$filter", options.filter)
        .optional_query("$top", options.top);

        let response = self.client.execute(&request).await?;
        Page::from_response(request, response)
    }

    pub async fn list_complete(
        &self,
        id: &SubscriptionId,
        options: ListOperationOptions,
    ) -> Result<CompleteResult<ResourceGroup>> {
        self.list_complete_matching_predicate(id, options, ResourceGroupOperationPredicate::default())
            .await
    }

    pub async fn list_complete_matching_predicate(
        &self,
        id: &SubscriptionId,
        options: ListOperationOptions,
        predicate: ResourceGroupOperationPredicate,
    ) -> Result<CompleteResult<ResourceGroup>> {
        let first = self.list(id, options).await?;
        list_complete(first, &self.client, |item| predicate.matches(item)).await
    }
}
