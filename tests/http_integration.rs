//! Integration tests for the ARM pipeline and generated clients using wiremock
//!
//! These tests run the real request pipeline against mocked endpoints:
//! retries, provider registration, paging, long-running operation polling and
//! the acceptance-test existence checks.

use azrm::arm::auth::StaticTokenCredential;
use azrm::{ArmClient, ClientOptions};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{
    bearer_token, body_json, header, header_exists, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUB: &str = "00000000-0000-0000-0000-000000000000";

fn options(server: &MockServer) -> ClientOptions {
    ClientOptions::new(Url::parse(&server.uri()).unwrap())
        .with_retry_delay(Duration::from_millis(5))
        .with_poll_interval(Duration::from_millis(5))
}

fn client_with(options: ClientOptions) -> ArmClient {
    ArmClient::new(options, Arc::new(StaticTokenCredential::new("test-token"))).unwrap()
}

fn client(server: &MockServer) -> ArmClient {
    client_with(options(server))
}

fn arm_error(code: &str, message: &str) -> serde_json::Value {
    json!({"error": {"code": code, "message": message}})
}

fn account_path() -> String {
    format!("/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Storage/storageAccounts/acct1")
}

fn account_body() -> serde_json::Value {
    json!({
        "id": account_path(),
        "name": "acct1",
        "type": "Microsoft.Storage/storageAccounts",
        "location": "westeurope",
        "kind": "StorageV2",
        "sku": {"name": "Standard_LRS"},
        "properties": {"provisioningState": "Succeeded"}
    })
}

/// Request pipeline: auth, api-version, status checking and retries
mod pipeline_tests {
    use super::*;
    use azrm::resourceids::ResourceGroupId;
    use azrm::services::resources::v2022_09_01::resourcegroups::ResourceGroupsClient;

    #[tokio::test]
    async fn test_get_sends_token_and_api_version() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/subscriptions/{SUB}/resourceGroups/rg1")))
            .and(bearer_token("test-token"))
            .and(query_param("api-version", "2022-09-01"))
            .and(header_exists("x-ms-client-request-id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": format!("/subscriptions/{SUB}/resourceGroups/rg1"),
                "name": "rg1",
                "location": "westeurope",
                "properties": {"provisioningState": "Succeeded"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let groups = ResourceGroupsClient::new(client(&server));
        let response = groups.get(&ResourceGroupId::new(SUB, "rg1")).await.unwrap();

        let group = response.model.unwrap();
        assert_eq!(group.name.as_deref(), Some("rg1"));
        assert_eq!(group.location, "westeurope");
        assert_eq!(response.http_response.status, 200);
    }

    #[tokio::test]
    async fn test_unexpected_status_carries_arm_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/subscriptions/{SUB}/resourceGroups/missing")))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(arm_error(
                    "ResourceGroupNotFound",
                    "Resource group 'missing' could not be found.",
                )),
            )
            .mount(&server)
            .await;

        let groups = ResourceGroupsClient::new(client(&server));
        let err = groups
            .get(&ResourceGroupId::new(SUB, "missing"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.arm_error_code(), Some("ResourceGroupNotFound"));
        assert!(err.to_string().contains("resourcegroups.ResourceGroupsClient#Get"));
        assert!(err.to_string().contains("failure responding to request"));
    }

    #[tokio::test]
    async fn test_retries_throttled_request() {
        let server = MockServer::start().await;
        let group_path = format!("/subscriptions/{SUB}/resourceGroups/rg1");

        Mock::given(method("GET"))
            .and(path(group_path.clone()))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(group_path))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"name": "rg1", "location": "westeurope"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let groups = ResourceGroupsClient::new(client(&server));
        let response = groups.get(&ResourceGroupId::new(SUB, "rg1")).await;
        tokio_test::assert_ok!(response);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/subscriptions/{SUB}/resourceGroups/rg1")))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let groups = ResourceGroupsClient::new(client_with(options(&server).with_max_retries(2)));
        let err = groups.get(&ResourceGroupId::new(SUB, "rg1")).await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/subscriptions/{SUB}/resourceGroups/rg1")))
            .respond_with(ResponseTemplate::new(400).set_body_json(arm_error("InvalidParameter", "bad")))
            .expect(1)
            .mount(&server)
            .await;

        let groups = ResourceGroupsClient::new(client(&server));
        let err = groups.get(&ResourceGroupId::new(SUB, "rg1")).await.unwrap_err();
        assert_eq!(err.arm_error_code(), Some("InvalidParameter"));
    }

    #[tokio::test]
    async fn test_check_existence() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path(format!("/subscriptions/{SUB}/resourceGroups/present")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path(format!("/subscriptions/{SUB}/resourceGroups/absent")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let groups = ResourceGroupsClient::new(client(&server));
        assert!(groups.check_existence(&ResourceGroupId::new(SUB, "present")).await.unwrap());
        assert!(!groups.check_existence(&ResourceGroupId::new(SUB, "absent")).await.unwrap());
    }
}

/// Retry with provider registration on MissingSubscriptionRegistration
mod registration_tests {
    use super::*;
    use azrm::services::storage::v2023_01_01::storageaccounts::{
        GetPropertiesOperationOptions, StorageAccountId, StorageAccountsClient,
    };

    async fn mount_unregistered(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path(account_path()))
            .respond_with(ResponseTemplate::new(409).set_body_json(arm_error(
                "MissingSubscriptionRegistration",
                "The subscription is not registered to use namespace 'Microsoft.Storage'.",
            )))
            .up_to_n_times(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_registers_provider_and_retries() {
        let server = MockServer::start().await;
        let provider_path = format!("/subscriptions/{SUB}/providers/Microsoft.Storage");

        mount_unregistered(&server).await;

        Mock::given(method("POST"))
            .and(path(format!("{provider_path}/register")))
            .and(query_param("api-version", "2016-09-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"registrationState": "Registering"})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(provider_path.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"registrationState": "Registering"})))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(provider_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"registrationState": "Registered"})))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(account_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(account_body()))
            .expect(1)
            .mount(&server)
            .await;

        let accounts = StorageAccountsClient::new(client(&server));
        let id = StorageAccountId::new(SUB, "rg1", "acct1");
        let response = accounts
            .get_properties(&id, GetPropertiesOperationOptions::default())
            .await
            .unwrap();
        assert_eq!(response.model.unwrap().name.as_deref(), Some("acct1"));
    }

    #[tokio::test]
    async fn test_registration_can_be_disabled() {
        let server = MockServer::start().await;
        mount_unregistered(&server).await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let accounts = StorageAccountsClient::new(client_with(options(&server).with_provider_registration(false)));
        let id = StorageAccountId::new(SUB, "rg1", "acct1");
        let err = accounts
            .get_properties(&id, GetPropertiesOperationOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.arm_error_code(), Some("MissingSubscriptionRegistration"));
    }
}

/// nextLink paging, Complete aggregation and predicates
mod pager_tests {
    use super::*;
    use azrm::error::Error;
    use azrm::resourceids::SubscriptionId;
    use azrm::services::resources::v2022_09_01::resourcegroups::{
        ListOperationOptions, ResourceGroupOperationPredicate, ResourceGroupsClient,
    };
    use futures::TryStreamExt;

    fn group(name: &str, location: &str) -> serde_json::Value {
        json!({
            "id": format!("/subscriptions/{SUB}/resourceGroups/{name}"),
            "name": name,
            "location": location
        })
    }

    async fn mount_pages(server: &MockServer) {
        let list_path = format!("/subscriptions/{SUB}/resourcegroups");

        Mock::given(method("GET"))
            .and(path(list_path.clone()))
            .and(query_param("$skiptoken", "page2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [group("rg3", "westeurope")]
            })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path(list_path.clone()))
            .and(query_param("$top", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [group("rg1", "westeurope"), group("rg2", "eastus")],
                "nextLink": format!("{}{}?api-version=2022-09-01&%24skiptoken=page2", server.uri(), list_path)
            })))
            .mount(server)
            .await;
    }

    fn first_page_options() -> ListOperationOptions {
        ListOperationOptions {
            filter: None,
            top: Some(2),
        }
    }

    #[tokio::test]
    async fn test_list_complete_walks_every_page() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let groups = ResourceGroupsClient::new(client(&server));
        let result = groups
            .list_complete(&SubscriptionId::new(SUB), first_page_options())
            .await
            .unwrap();

        let names: Vec<_> = result.items.iter().filter_map(|g| g.name.as_deref()).collect();
        assert_eq!(names, vec!["rg1", "rg2", "rg3"]);
    }

    #[tokio::test]
    async fn test_list_complete_applies_predicate() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let groups = ResourceGroupsClient::new(client(&server));
        let predicate = ResourceGroupOperationPredicate {
            location: Some("westeurope".to_string()),
            ..Default::default()
        };
        let result = groups
            .list_complete_matching_predicate(&SubscriptionId::new(SUB), first_page_options(), predicate)
            .await
            .unwrap();

        let names: Vec<_> = result.items.iter().filter_map(|g| g.name.as_deref()).collect();
        assert_eq!(names, vec!["rg1", "rg3"]);
    }

    #[tokio::test]
    async fn test_load_more_until_exhausted() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let arm = client(&server);
        let groups = ResourceGroupsClient::new(arm.clone());
        let first = groups
            .list(&SubscriptionId::new(SUB), first_page_options())
            .await
            .unwrap();
        assert!(first.has_more());
        assert_eq!(first.items().len(), 2);

        let second = first.load_more(&arm).await.unwrap();
        assert!(!second.has_more());
        assert_eq!(second.items().len(), 1);

        let err = second.load_more(&arm).await.unwrap_err();
        assert!(matches!(err, Error::NoMorePages));
        assert_eq!(err.to_string(), "no more pages returned");
    }

    #[tokio::test]
    async fn test_stream_yields_items_in_order() {
        let server = MockServer::start().await;
        mount_pages(&server).await;

        let arm = client(&server);
        let groups = ResourceGroupsClient::new(arm.clone());
        let first = groups
            .list(&SubscriptionId::new(SUB), first_page_options())
            .await
            .unwrap();

        let items: Vec<_> = first.into_stream(arm).try_collect().await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].name.as_deref(), Some("rg3"));
    }

    #[tokio::test]
    async fn test_refuses_next_link_to_another_host() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/subscriptions/{SUB}/resourcegroups")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [],
                "nextLink": "https://attacker.example.com/steal?api-version=2022-09-01"
            })))
            .mount(&server)
            .await;

        let groups = ResourceGroupsClient::new(client(&server));
        let err = groups
            .list_complete(&SubscriptionId::new(SUB), ListOperationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Prepare { .. }));
    }

    #[tokio::test]
    async fn test_empty_next_link_ends_paging() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/subscriptions/{SUB}/resourcegroups")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [group("rg1", "westeurope")],
                "nextLink": ""
            })))
            .expect(1)
            .mount(&server)
            .await;

        let groups = ResourceGroupsClient::new(client(&server));
        let result = groups
            .list_complete(&SubscriptionId::new(SUB), ListOperationOptions::default())
            .await
            .unwrap();
        assert_eq!(result.items.len(), 1);
    }

    #[tokio::test]
    async fn test_post_list_keeps_method_and_drops_first_query() {
        use azrm::arm::{list_complete, Operation, Page, RequestOptions};
        use reqwest::Method;

        const LIST_KEYS: Operation = Operation::new("storage", "StorageAccountsClient", "ListKeys");

        let server = MockServer::start().await;
        let keys_path = account_path() + "/listKeys";

        Mock::given(method("POST"))
            .and(path(keys_path.clone()))
            .and(query_param("$expand", "kerb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": ["a"],
                "nextLink": format!("{}{}?api-version=2023-01-01&%24skiptoken=p2", server.uri(), keys_path)
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(keys_path.clone()))
            .and(query_param("$skiptoken", "p2"))
            .and(query_param_is_missing("$expand"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": ["b"]})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let request = RequestOptions::new(LIST_KEYS, Method::POST, keys_path, "2023-01-01").query("$expand", "kerb");
        let response = client.execute(&request).await.unwrap();
        let first = Page::<String>::from_response(request, response).unwrap();
        assert!(first.has_more());

        let result = list_complete(first, &client, |_| true).await.unwrap();
        assert_eq!(result.items, vec!["a".to_string(), "b".to_string()]);
    }
}

/// Long-running operations
mod poller_tests {
    use super::*;
    use azrm::error::Error;
    use azrm::resourceids::ResourceGroupId;
    use azrm::services::apicenter::v2024_03_01::apidefinitions::{
        ApiDefinitionsClient, ApiSpecExportResultFormat, DefinitionId,
    };
    use azrm::services::resources::v2022_09_01::resourcegroups::{DeleteOperationOptions, ResourceGroupsClient};
    use azrm::services::storage::v2023_01_01::storageaccounts::{
        Kind, ProvisioningState, Sku, SkuName, StorageAccount, StorageAccountCreateParameters, StorageAccountId,
        StorageAccountsClient,
    };

    fn create_parameters() -> StorageAccountCreateParameters {
        StorageAccountCreateParameters {
            kind: Kind::StorageVTwo,
            location: "westeurope".to_string(),
            properties: None,
            sku: Sku {
                name: SkuName::StandardLrs,
                tier: None,
            },
            tags: None,
        }
    }

    #[tokio::test]
    async fn test_async_operation_then_final_get() {
        let server = MockServer::start().await;
        let status_url = format!("{}/providers/Microsoft.Storage/operations/op1", server.uri());

        Mock::given(method("PUT"))
            .and(path(account_path()))
            .and(body_json(json!({
                "kind": "StorageV2",
                "location": "westeurope",
                "sku": {"name": "Standard_LRS"}
            })))
            .respond_with(ResponseTemplate::new(202).insert_header("Azure-AsyncOperation", status_url.as_str()))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/providers/Microsoft.Storage/operations/op1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "InProgress"})))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/providers/Microsoft.Storage/operations/op1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "Succeeded"})))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(account_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(account_body()))
            .expect(1)
            .mount(&server)
            .await;

        let accounts = StorageAccountsClient::new(client(&server));
        let account = accounts
            .create_then_poll(&StorageAccountId::new(SUB, "rg1", "acct1"), &create_parameters())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(account.kind, Some(Kind::StorageVTwo));
    }

    #[tokio::test]
    async fn test_failed_operation_is_an_error() {
        let server = MockServer::start().await;
        let status_url = format!("{}/providers/Microsoft.Storage/operations/op2", server.uri());

        Mock::given(method("PUT"))
            .and(path(account_path()))
            .respond_with(ResponseTemplate::new(202).insert_header("Azure-AsyncOperation", status_url.as_str()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/providers/Microsoft.Storage/operations/op2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "Failed",
                "error": {"code": "StorageAccountAlreadyTaken", "message": "name in use"}
            })))
            .mount(&server)
            .await;

        let accounts = StorageAccountsClient::new(client(&server));
        let err = accounts
            .create_then_poll(&StorageAccountId::new(SUB, "rg1", "acct1"), &create_parameters())
            .await
            .unwrap_err();

        match err {
            Error::Polling { message, .. } => assert!(message.contains("StorageAccountAlreadyTaken")),
            other => panic!("expected a polling error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provisioning_state_polling_without_headers() {
        let server = MockServer::start().await;

        let mut creating = account_body();
        creating["properties"]["provisioningState"] = json!("Creating");
        Mock::given(method("PUT"))
            .and(path(account_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(creating))
            .expect(1)
            .mount(&server)
            .await;

        let mut resolving = account_body();
        resolving["properties"]["provisioningState"] = json!("ResolvingDNS");
        Mock::given(method("GET"))
            .and(path(account_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(resolving))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(account_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(account_body()))
            .mount(&server)
            .await;

        let accounts = StorageAccountsClient::new(client(&server));
        let poller = accounts
            .create(&StorageAccountId::new(SUB, "rg1", "acct1"), &create_parameters())
            .await
            .unwrap();
        assert!(!poller.is_done());

        let account = poller
            .poll_for_model::<StorageAccount>()
            .await
            .unwrap()
            .unwrap();
        let state = account.properties.and_then(|p| p.provisioning_state);
        assert_eq!(state, Some(ProvisioningState::Succeeded));
    }

    #[tokio::test]
    async fn test_location_polling_for_delete() {
        let server = MockServer::start().await;
        let result_path = format!("/subscriptions/{SUB}/operationresults/op3");

        Mock::given(method("DELETE"))
            .and(path(format!("/subscriptions/{SUB}/resourceGroups/rg1")))
            .and(query_param("forceDeletionTypes", "Microsoft.Compute/virtualMachines"))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Location", format!("{}{}", server.uri(), result_path).as_str())
                    .insert_header("Retry-After", "0"),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(result_path.clone()))
            .respond_with(ResponseTemplate::new(202).insert_header("Retry-After", "0"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(result_path))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let groups = ResourceGroupsClient::new(client(&server));
        let options = DeleteOperationOptions {
            force_deletion_types: Some("Microsoft.Compute/virtualMachines".to_string()),
        };
        tokio_test::assert_ok!(groups.delete_then_poll(&ResourceGroupId::new(SUB, "rg1"), options).await);
    }

    #[tokio::test]
    async fn test_polling_times_out() {
        let server = MockServer::start().await;
        let result_path = format!("/subscriptions/{SUB}/operationresults/op4");

        Mock::given(method("DELETE"))
            .and(path(format!("/subscriptions/{SUB}/resourceGroups/rg1")))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Location", format!("{}{}", server.uri(), result_path).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(result_path))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let options = options(&server)
            .with_poll_interval(Duration::from_millis(20))
            .with_polling_timeout(Duration::from_millis(50));
        let groups = ResourceGroupsClient::new(client_with(options));
        let err = groups
            .delete_then_poll(&ResourceGroupId::new(SUB, "rg1"), DeleteOperationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Polling { .. }));
    }

    #[tokio::test]
    async fn test_export_specification_follows_location() {
        let server = MockServer::start().await;
        let id = DefinitionId::new(SUB, "rg1", "center1", "default", "petstore", "v1", "openapi");
        let result_path = "/providers/Microsoft.ApiCenter/locations/westeurope/operationResults/op5";

        Mock::given(method("POST"))
            .and(path(format!("{}/exportSpecification", id)))
            .and(query_param("api-version", "2024-03-01"))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Location", format!("{}{}", server.uri(), result_path).as_str())
                    .insert_header("Retry-After", "0"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(result_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "format": "inline",
                "value": "{\"openapi\": \"3.0.0\"}"
            })))
            .mount(&server)
            .await;

        let definitions = ApiDefinitionsClient::new(client(&server));
        let result = definitions
            .export_specification_then_poll(&id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.format, Some(ApiSpecExportResultFormat::Inline));
        assert!(result.value.unwrap().contains("openapi"));
    }
}

/// Generated clients beyond the resource groups used above
mod client_tests {
    use super::*;
    use azrm::resourceids::{ResourceGroupId, ResourceId, ScopeId, SubscriptionId};
    use azrm::services::apicenter::v2024_03_01::apidefinitions::{
        ApiDefinition, ApiDefinitionProperties, ApiDefinitionsClient, CreateOrUpdateOperationOptions, DefinitionId,
    };
    use azrm::services::resources::v2020_05_01::managementlocks::{
        LockLevel, ManagementLockObject, ManagementLockProperties, ManagementLocksClient, ScopedLockId,
    };
    use azrm::services::resources::v2022_09_01::providers::{
        ListOperationOptions, ProviderOperationPredicate, ProvidersClient, SubscriptionProviderId,
    };
    use azrm::services::storage::v2023_01_01::storageaccounts::{
        Reason, StorageAccountCheckNameAvailabilityParameters, StorageAccountOperationPredicate,
        StorageAccountsClient,
    };

    #[tokio::test]
    async fn test_check_name_availability() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!(
                "/subscriptions/{SUB}/providers/Microsoft.Storage/checkNameAvailability"
            )))
            .and(body_json(json!({"name": "acct1", "type": "Microsoft.Storage/storageAccounts"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "nameAvailable": false,
                "reason": "AlreadyExists",
                "message": "The storage account named acct1 is already taken."
            })))
            .mount(&server)
            .await;

        let accounts = StorageAccountsClient::new(client(&server));
        let result = accounts
            .check_name_availability(
                &SubscriptionId::new(SUB),
                &StorageAccountCheckNameAvailabilityParameters::new("acct1"),
            )
            .await
            .unwrap()
            .model
            .unwrap();
        assert_eq!(result.name_available, Some(false));
        assert_eq!(result.reason, Some(Reason::AlreadyExists));
    }

    #[tokio::test]
    async fn test_list_storage_accounts_by_kind() {
        let server = MockServer::start().await;

        let mut blob = account_body();
        blob["name"] = json!("blob1");
        blob["kind"] = json!("BlobStorage");

        Mock::given(method("GET"))
            .and(path(format!(
                "/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Storage/storageAccounts"
            )))
            .and(query_param("api-version", "2023-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [account_body(), blob]})))
            .mount(&server)
            .await;

        let accounts = StorageAccountsClient::new(client(&server));
        let predicate = StorageAccountOperationPredicate {
            kind: Some("BlobStorage".into()),
            ..Default::default()
        };
        let result = accounts
            .list_by_resource_group_complete_matching_predicate(&ResourceGroupId::new(SUB, "rg1"), predicate)
            .await
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name.as_deref(), Some("blob1"));
    }

    #[tokio::test]
    async fn test_create_api_definition_with_if_match() {
        let server = MockServer::start().await;
        let id = DefinitionId::new(SUB, "rg1", "center1", "default", "petstore", "v1", "openapi");

        Mock::given(method("PUT"))
            .and(path(id.id()))
            .and(header("If-Match", "\"etag-1\""))
            .and(body_json(json!({"properties": {"title": "OpenAPI"}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": id.id(),
                "name": "openapi",
                "properties": {"title": "OpenAPI"}
            })))
            .mount(&server)
            .await;

        let definitions = ApiDefinitionsClient::new(client(&server));
        let input = ApiDefinition {
            properties: Some(ApiDefinitionProperties {
                title: "OpenAPI".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let options = CreateOrUpdateOperationOptions {
            if_match: Some("\"etag-1\"".to_string()),
        };
        let response = definitions.create_or_update(&id, &input, options).await.unwrap();
        assert_eq!(response.http_response.status, 201);
        assert_eq!(response.model.unwrap().name.as_deref(), Some("openapi"));
    }

    #[tokio::test]
    async fn test_provider_register_and_list() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/subscriptions/{SUB}/providers/Microsoft.ApiCenter/register")))
            .and(query_param("api-version", "2022-09-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "namespace": "Microsoft.ApiCenter",
                "registrationState": "Registering"
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!("/subscriptions/{SUB}/providers")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [
                {"namespace": "Microsoft.ApiCenter", "registrationState": "Registering"},
                {"namespace": "Microsoft.Storage", "registrationState": "Registered"}
            ]})))
            .mount(&server)
            .await;

        let providers = ProvidersClient::new(client(&server));
        let registered = providers
            .register(&SubscriptionProviderId::new(SUB, "Microsoft.ApiCenter"))
            .await
            .unwrap()
            .model
            .unwrap();
        assert!(!registered.is_registered());

        let predicate = ProviderOperationPredicate {
            registration_state: Some("Registered".to_string()),
            ..Default::default()
        };
        let result = providers
            .list_complete_matching_predicate(&SubscriptionId::new(SUB), ListOperationOptions::default(), predicate)
            .await
            .unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].namespace.as_deref(), Some("Microsoft.Storage"));
    }

    #[tokio::test]
    async fn test_management_locks_at_resource_group_scope() {
        let server = MockServer::start().await;
        let scope = ScopeId::from(ResourceGroupId::new(SUB, "rg1"));
        let lock_id = ScopedLockId::new(scope.scope.clone(), "lock1");

        Mock::given(method("PUT"))
            .and(path(lock_id.id()))
            .and(query_param("api-version", "2020-05-01"))
            .and(body_json(json!({"properties": {"level": "CanNotDelete", "notes": "keep"}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": lock_id.id(),
                "name": "lock1",
                "properties": {"level": "CanNotDelete", "notes": "keep"}
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(format!(
                "/subscriptions/{SUB}/resourceGroups/rg1/providers/Microsoft.Authorization/locks"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [
                {"id": lock_id.id(), "name": "lock1", "properties": {"level": "CanNotDelete"}}
            ]})))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(lock_id.id()))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let locks = ManagementLocksClient::new(client(&server));
        let input = ManagementLockObject {
            properties: ManagementLockProperties {
                level: LockLevel::CanNotDelete,
                notes: Some("keep".to_string()),
                owners: None,
            },
            ..Default::default()
        };
        let created = locks.create_or_update_by_scope(&lock_id, &input).await.unwrap();
        assert_eq!(created.model.unwrap().properties.level, LockLevel::CanNotDelete);

        let listed = locks.list_by_scope_complete(&scope, Default::default()).await.unwrap();
        assert_eq!(listed.items.len(), 1);

        let deleted = locks.delete_by_scope(&lock_id).await.unwrap();
        assert_eq!(deleted.http_response.status, 204);
        assert!(deleted.model.is_none());
    }
}

/// Acceptance-test existence checks against mocked Azure
mod acceptance_tests {
    use super::*;
    use azrm::acceptance::check;
    use azrm::acceptance::resources::StorageAccountResource;
    use azrm::acceptance::{AcceptanceError, InstanceState, State};

    fn state() -> State {
        let mut state = State::default();
        state.insert(InstanceState {
            address: "azurerm_storage_account.test".to_string(),
            resource_type: "azurerm_storage_account".to_string(),
            id: account_path(),
            attributes: Default::default(),
        });
        state
    }

    async fn mount_account(server: &MockServer, status: u16) {
        let template = if status == 200 {
            ResponseTemplate::new(200).set_body_json(account_body())
        } else {
            ResponseTemplate::new(status).set_body_json(arm_error("ResourceNotFound", "not found"))
        };
        Mock::given(method("GET"))
            .and(path(account_path()))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_exists_in_azure() {
        let server = MockServer::start().await;
        mount_account(&server, 200).await;

        let result = check::that("azurerm_storage_account.test")
            .exists_in_azure(&client(&server), &state(), &StorageAccountResource)
            .await;
        tokio_test::assert_ok!(result);
    }

    #[tokio::test]
    async fn test_not_found_fails_the_exists_check() {
        let server = MockServer::start().await;
        mount_account(&server, 404).await;

        let result = check::that("azurerm_storage_account.test")
            .exists_in_azure(&client(&server), &state(), &StorageAccountResource)
            .await;
        let err = tokio_test::assert_err!(result);
        assert!(matches!(err, AcceptanceError::DoesNotExist(_)));
    }

    #[tokio::test]
    async fn test_not_found_confirms_destroy() {
        let server = MockServer::start().await;
        mount_account(&server, 404).await;

        let result = check::destroyed(&client(&server), &state(), &StorageAccountResource).await;
        tokio_test::assert_ok!(result);
    }

    #[tokio::test]
    async fn test_surviving_resource_fails_destroy() {
        let server = MockServer::start().await;
        mount_account(&server, 200).await;

        let result = check::destroyed(&client(&server), &state(), &StorageAccountResource).await;
        let err = tokio_test::assert_err!(result);
        assert!(matches!(err, AcceptanceError::StillExists(_)));
    }

    #[tokio::test]
    async fn test_server_errors_propagate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(account_path()))
            .respond_with(ResponseTemplate::new(403).set_body_json(arm_error("AuthorizationFailed", "denied")))
            .mount(&server)
            .await;

        let result = check::destroyed(&client(&server), &state(), &StorageAccountResource).await;
        let err = tokio_test::assert_err!(result);
        assert!(matches!(err, AcceptanceError::Client(_)));
    }
}
