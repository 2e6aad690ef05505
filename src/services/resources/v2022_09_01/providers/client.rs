use super::{Provider, ProviderOperationPredicate, SubscriptionProviderId};
use crate::arm::{list_complete, ArmClient, CompleteResult, Operation, Page, RequestOptions, Response};
use crate::error::Result;
use crate::resourceids::{ResourceId, SubscriptionId};
use crate::services::resources::v2022_09_01::API_VERSION;
use reqwest::Method;

const fn operation(name: &'static str) -> Operation {
    Operation::new("providers", "ProvidersClient", name)
}

#[derive(Debug, Clone, Default)]
pub struct GetOperationOptions {
    /// e.g. `resourceTypes/aliases`
    pub expand: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ListOperationOptions {
    pub expand: Option<String>,
}

#[derive(Clone)]
pub struct ProvidersClient {
    client: ArmClient,
}

impl ProvidersClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &SubscriptionProviderId, options: GetOperationOptions) -> Result<Response<Provider>> {
        let request = RequestOptions::new(operation("Get"), Method::GET, id.id(), API_VERSION)
            .optional_query("$expand", options.expand);

        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    /// Ask ARM to register the provider; registration completes asynchronously
    pub async fn register(&self, id: &SubscriptionProviderId) -> Result<Response<Provider>> {
        let request = RequestOptions::new(
            operation("Register"),
            Method::POST,
            format!("{}/register", id.id()),
            API_VERSION,
        );

        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    pub async fn unregister(&self, id: &SubscriptionProviderId) -> Result<Response<Provider>> {
        let request = RequestOptions::new(
            operation("Unregister"),
            Method::POST,
            format!("{}/unregister", id.id()),
            API_VERSION,
        );

        let response = self.client.execute(&request).await?;
        Response::from_raw(request.operation, response)
    }

    pub async fn list(&self, id: &SubscriptionId, options: ListOperationOptions) -> Result<Page<Provider>> {
        let request = RequestOptions::new(
            operation("List"),
            Method::GET,
            format!("{}/providers", id.id()),
            API_VERSION,
        )
        .optional_query("$expand", options.expand);

        let response = self.client.execute(&request).await?;
        Page::from_response(request, response)
    }

    pub async fn list_complete(&self, id: &SubscriptionId, options: ListOperationOptions) -> Result<CompleteResult<Provider>> {
        self.list_complete_matching_predicate(id, options, ProviderOperationPredicate::default())
            .await
    }

    pub async fn list_complete_matching_predicate(
        &self,
        id: &SubscriptionId,
        options: ListOperationOptions,
        predicate: ProviderOperationPredicate,
    ) -> Result<CompleteResult<Provider>> {
        let first = self.list(id, options).await?;
        list_complete(first, &self.client, |item| predicate.matches(item)).await
    }
}
