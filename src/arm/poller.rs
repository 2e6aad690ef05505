//! Long-running operation polling.
//!
//! ARM reports progress of a long-running operation in one of three ways:
//! an `Azure-AsyncOperation` status monitor, a `Location` URL that answers
//! 202 until the operation ends, or the resource's own
//! `properties.provisioningState`. [`Poller`] picks the strategy from the
//! initial response and follows it until a terminal state.

use super::client::ArmClient;
use super::request::{Operation, RawResponse, RequestOptions};
use crate::error::{Error, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};

const AZURE_ASYNC_OPERATION: &str = "azure-asyncoperation";
const LOCATION: &str = "location";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Strategy {
    Done,
    AsyncOperation { url: String },
    Location { url: String },
    ProvisioningState,
}

#[derive(Deserialize)]
struct OperationStatus {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<crate::error::ArmErrorDetail>,
}

enum State {
    InProgress,
    Succeeded,
    Failed(String),
}

impl State {
    fn from_status(status: &str, error: Option<crate::error::ArmErrorDetail>) -> Self {
        if status.eq_ignore_ascii_case("Succeeded") {
            Self::Succeeded
        } else if status.eq_ignore_ascii_case("Failed") || status.eq_ignore_ascii_case("Canceled") {
            let message = match error {
                Some(error) if !error.message.is_empty() => {
                    format!("operation {}: {}: {}", status, error.code, error.message)
                }
                _ => format!("operation {}", status),
            };
            Self::Failed(message)
        } else {
            Self::InProgress
        }
    }
}

fn is_terminal(state: &str) -> bool {
    ["Succeeded", "Failed", "Canceled"]
        .iter()
        .any(|terminal| terminal.eq_ignore_ascii_case(state))
}

fn provisioning_state(body: &Value) -> Option<&str> {
    body.get("properties")?.get("provisioningState")?.as_str()
}

/// Tracks one long-running operation to completion
pub struct Poller {
    client: ArmClient,
    operation: Operation,
    method: Method,
    resource_path: String,
    api_version: &'static str,
    strategy: Strategy,
    initial: RawResponse,
}

impl Poller {
    /// Build a poller from the initial response of `request`
    pub fn from_response(client: &ArmClient, request: &RequestOptions, response: RawResponse) -> Self {
        let strategy = Self::strategy_for(&request.method, &response);
        tracing::debug!("{}: polling strategy {:?}", request.operation, strategy);

        Self {
            client: client.clone(),
            operation: request.operation,
            method: request.method.clone(),
            resource_path: request.path.clone(),
            api_version: request.api_version,
            strategy,
            initial: response,
        }
    }

    fn strategy_for(method: &Method, response: &RawResponse) -> Strategy {
        if let Some(url) = response.header(AZURE_ASYNC_OPERATION) {
            return Strategy::AsyncOperation {
                url: url.to_string(),
            };
        }

        if response.status != StatusCode::OK {
            if let Some(url) = response.header(LOCATION) {
                return Strategy::Location {
                    url: url.to_string(),
                };
            }
        }

        if *method == Method::PUT || *method == Method::PATCH {
            let state = serde_json::from_str::<Value>(&response.body)
                .ok()
                .and_then(|body| provisioning_state(&body).map(str::to_string));
            if let Some(state) = state {
                if !is_terminal(&state) {
                    return Strategy::ProvisioningState;
                }
            }
        }

        Strategy::Done
    }

    /// True when the initial response already carried the final result
    pub fn is_done(&self) -> bool {
        self.strategy == Strategy::Done
    }

    pub fn initial_response(&self) -> &RawResponse {
        &self.initial
    }

    /// Poll until the operation reaches a terminal state and return the
    /// final response
    pub async fn poll_until_done(self) -> Result<RawResponse> {
        let started = Instant::now();
        let mut last = self.initial.clone();

        loop {
            let url = match &self.strategy {
                Strategy::Done => {
                    tracing::info!("{} completed", self.operation);
                    return Ok(last);
                }
                Strategy::AsyncOperation { url } | Strategy::Location { url } => url.clone(),
                Strategy::ProvisioningState => self.resource_path.clone(),
            };

            self.wait(&last, started).await?;

            match &self.strategy {
                Strategy::AsyncOperation { .. } => {
                    last = self.get(&url, &[200, 201, 202]).await?;
                    let status = last.json::<OperationStatus>(self.operation)?;
                    let (status, error) = status.map(|s| (s.status, s.error)).unwrap_or_default();
                    match State::from_status(&status, error) {
                        State::InProgress => continue,
                        State::Failed(message) => return Err(self.failed(message)),
                        State::Succeeded => return self.final_result(last).await,
                    }
                }
                Strategy::Location { .. } => {
                    last = self.get(&url, &[200, 201, 202, 204]).await?;
                    if last.status != StatusCode::ACCEPTED {
                        tracing::info!("{} completed", self.operation);
                        return Ok(last);
                    }
                }
                Strategy::ProvisioningState => {
                    last = self.get(&url, &[200]).await?;
                    let body = last.value(self.operation)?;
                    let status = provisioning_state(&body).unwrap_or("Succeeded").to_string();
                    match State::from_status(&status, None) {
                        State::InProgress => continue,
                        State::Failed(message) => return Err(self.failed(message)),
                        State::Succeeded => {
                            tracing::info!("{} completed", self.operation);
                            return Ok(last);
                        }
                    }
                }
                Strategy::Done => return Ok(last),
            }
        }
    }

    /// Poll to completion and decode the final body
    pub async fn poll_for_model<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let operation = self.operation;
        let response = self.poll_until_done().await?;
        response.json(operation)
    }

    /// After an async operation succeeds, PUT and PATCH return the resource
    /// itself and POST returns whatever its `Location` points at
    async fn final_result(&self, status_response: RawResponse) -> Result<RawResponse> {
        tracing::info!("{} completed", self.operation);

        if self.method == Method::PUT || self.method == Method::PATCH {
            return self.get(&self.resource_path, &[200]).await;
        }

        if self.method == Method::POST {
            if let Some(location) = self.initial.header(LOCATION) {
                return self.get(location, &[200, 204]).await;
            }
        }

        Ok(status_response)
    }

    async fn get(&self, path: &str, expected: &[u16]) -> Result<RawResponse> {
        let request = RequestOptions::new(self.operation, Method::GET, path, self.api_version).expect(expected);
        self.client.execute(&request).await
    }

    async fn wait(&self, last: &RawResponse, started: Instant) -> Result<()> {
        let options = self.client.options();
        let delay: Duration = last.retry_after().unwrap_or(options.poll_interval);

        if started.elapsed() + delay > options.polling_timeout {
            return Err(Error::Polling {
                operation: self.operation,
                message: format!("timed out after {:?}", options.polling_timeout),
            });
        }

        tokio::time::sleep(delay).await;
        Ok(())
    }

    fn failed(&self, message: String) -> Error {
        tracing::error!("{} {}", self.operation, message);
        Error::Polling {
            operation: self.operation,
            message,
        }
    }
}
