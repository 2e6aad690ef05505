use super::{ManagementLockObject, ManagementLockObjectOperationPredicate, ScopedLockId};
use crate::arm::{list_complete, ArmClient, CompleteResult, Operation, Page, RequestOptions, Response};
use crate::error::Result;
use crate::resourceids::{ResourceId, ScopeId};
use crate::services::resources::v2020_05_01::API_VERSION;
use reqwest::Method;

const fn operation(name: &'static str) -> Operation {
    Operation::new("managementlocks", "ManagementLocksClient", name)
}

#[derive(Debug, Clone, Default)]
pub struct ListByScopeOperationOptions {
    pub filter: Option<String>,
}

#[derive(Clone)]
pub struct ManagementLocksClient {
    client: ArmClient,
}

impl ManagementLocksClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn create_or_update_by_scope(
        &self,
        id: &ScopedLockId,
        input: &ManagementLockObject,
    ) -> Result<Response<ManagementLockObject>> {
        let request = RequestOptions::new(operation("CreateOrUpdateByScope"), Method::PUT, id.id(), API_VERSION)
            .expect(&[200, 201])
            .json(input)?;

        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    pub async fn get_by_scope(&self, id: &ScopedLockId) -> Result<Response<ManagementLockObject>> {
        let request = RequestOptions::new(operation("GetByScope"), Method::GET, id.id(), API_VERSION);
        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    pub async fn delete_by_scope(&self, id: &ScopedLockId) -> Result<Response<()>> {
        let request =
            RequestOptions::new(operation("DeleteByScope"), Method::DELETE, id.id(), API_VERSION).expect(&[200, 204]);
        let response = self.client.execute(&request).await?;
        Ok(Response::empty(response))
    }

    pub async fn list_by_scope(
        &self,
        id: &ScopeId,
        options: ListByScopeOperationOptions,
    ) -> Result<Page<ManagementLockObject>> {
        let request = RequestOptions::new(
            operation("ListByScope"),
            Method::GET,
            format!("{}/providers/Microsoft.Authorization/locks", id.id()),
            API_VERSION,
        )
        .optional_query("$filter", options.filter);

        let response = self.client.execute(&request).await?;
        Page::from_response(request, response)
    }

    pub async fn list_by_scope_complete(
        &self,
        id: &ScopeId,
        options: ListByScopeOperationOptions,
    ) -> Result<CompleteResult<ManagementLockObject>> {
        self.list_by_scope_complete_matching_predicate(id, options, ManagementLockObjectOperationPredicate::default())
            .await
    }

    pub async fn list_by_scope_complete_matching_predicate(
        &self,
        id: &ScopeId,
        options: ListByScopeOperationOptions,
        predicate: ManagementLockObjectOperationPredicate,
    ) -> Result<CompleteResult<ManagementLockObject>> {
        let first = self.list_by_scope(id, options).await?;
        list_complete(first, &self.client, |item| predicate.matches(item)).await
    }
}
