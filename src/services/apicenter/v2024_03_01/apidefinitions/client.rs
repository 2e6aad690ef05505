use super::{
    ApiDefinition, ApiDefinitionOperationPredicate, ApiSpecExportResult, ApiSpecImportRequest, DefinitionId,
    VersionId,
};
use crate::arm::{list_complete, ArmClient, CompleteResult, Operation, Page, Poller, RequestOptions, Response};
use crate::error::Result;
use crate::resourceids::ResourceId;
use crate::services::apicenter::v2024_03_01::API_VERSION;
use reqwest::{Method, StatusCode};

const fn operation(name: &'static str) -> Operation {
    Operation::new("apidefinitions", "ApiDefinitionsClient", name)
}

#[derive(Debug, Clone, Default)]
pub struct CreateOrUpdateOperationOptions {
    pub if_match: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListOperationOptions {
    pub filter: Option<String>,
}

#[derive(Clone)]
pub struct ApiDefinitionsClient {
    client: ArmClient,
}

impl ApiDefinitionsClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn create_or_update(
        &self,
        id: &DefinitionId,
        input: &ApiDefinition,
        options: CreateOrUpdateOperationOptions,
    ) -> Result<Response<ApiDefinition>> {
        let request = RequestOptions::new(operation("CreateOrUpdate"), Method::PUT, id.id(), API_VERSION)
            .expect(&[200, 201])
            .optional_header("If-Match", options.if_match.as_deref())
            .json(input)?;

        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    pub async fn get(&self, id: &DefinitionId) -> Result<Response<ApiDefinition>> {
        let request = RequestOptions::new(operation("Get"), Method::GET, id.id(), API_VERSION);
        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    /// Whether the definition exists
    pub async fn head(&self, id: &DefinitionId) -> Result<bool> {
        let request = RequestOptions::new(operation("Head"), Method::HEAD, id.id(), API_VERSION).expect(&[200, 404]);
        let response = self.client.execute(&request).await?;
        Ok(response.status == StatusCode::OK)
    }

    pub async fn delete(&self, id: &DefinitionId) -> Result<Response<()>> {
        let request = RequestOptions::new(operation("Delete"), Method::DELETE, id.id(), API_VERSION).expect(&[200, 204]);
        let response = self.client.execute(&request).await?;
        Ok(Response::empty(response))
    }

    pub async fn list(&self, id: &VersionId, options: ListOperationOptions) -> Result<Page<ApiDefinition>> {
        let request = RequestOptions::new(
            operation("List"),
            Method::GET,
            format!("{}/definitions", id.id()),
            API_VERSION,
        )
        .optional_query("$filter", options.filter);

        let response = self.client.execute(&request).await?;
        Page::from_response(request, response)
    }

    pub async fn list_complete(
        &self,
        id: &VersionId,
        options: ListOperationOptions,
    ) -> Result<CompleteResult<ApiDefinition>> {
        self.list_complete_matching_predicate(id, options, ApiDefinitionOperationPredicate::default())
            .await
    }

    pub async fn list_complete_matching_predicate(
        &self,
        id: &VersionId,
        options: ListOperationOptions,
        predicate: ApiDefinitionOperationPredicate,
    ) -> Result<CompleteResult<ApiDefinition>> {
        let first = self.list(id, options).await?;
        list_complete(first, &self.client, |item| predicate.matches(item)).await
    }

    /// Start exporting the definition's specification
    pub async fn export_specification(&self, id: &DefinitionId) -> Result<Poller> {
        let request = RequestOptions::new(
            operation("ExportSpecification"),
            Method::POST,
            format!("{}/exportSpecification", id.id()),
            API_VERSION,
        )
        .expect(&[200, 202]);

        let response = self.client.execute(&request).await?;
        Ok(Poller::from_response(&self.client, &request, response))
    }

    /// Export the specification and wait for the result
    pub async fn export_specification_then_poll(&self, id: &DefinitionId) -> Result<Option<ApiSpecExportResult>> {
        self.export_specification(id).await?.poll_for_model().await
    }

    /// Start importing a specification into the definition
    pub async fn import_specification(&self, id: &DefinitionId, input: &ApiSpecImportRequest) -> Result<Poller> {
        let request = RequestOptions::new(
            operation("ImportSpecification"),
            Method::POST,
            format!("{}/importSpecification", id.id()),
            API_VERSION,
        )
        .expect(&[200, 202])
        .json(input)?;

        let response = self.client.execute(&request).await?;
        Ok(Poller::from_response(&self.client, &request, response))
    }

    pub async fn import_specification_then_poll(&self, id: &DefinitionId, input: &ApiSpecImportRequest) -> Result<()> {
        self.import_specification(id, input).await?.poll_until_done().await?;
        Ok(())
    }
}
