//! Resource provider registration, run when a request fails because the
//! subscription isn't registered for the provider it targets.

use super::client::ArmClient;
use super::request::{Operation, RequestOptions};
use crate::error::{Error, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use std::time::Instant;

const API_VERSION: &str = "2016-09-01";
const MISSING_REGISTRATION: &str = "MissingSubscriptionRegistration";

const REGISTER: Operation = Operation::new("registration", "ProvidersClient", "Register");
const GET: Operation = Operation::new("registration", "ProvidersClient", "Get");

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderState {
    #[serde(default)]
    registration_state: Option<String>,
}

/// The subscription and provider namespace to register when `err` is a
/// `MissingSubscriptionRegistration` conflict
pub(crate) fn registration_target(err: &Error, request_path: &str) -> Option<(String, String)> {
    let Error::Respond {
        status: Some(status),
        detail: Some(detail),
        ..
    } = err
    else {
        return None;
    };

    if *status != StatusCode::CONFLICT || !detail.code.eq_ignore_ascii_case(MISSING_REGISTRATION) {
        return None;
    }

    let path = match url::Url::parse(request_path) {
        Ok(url) => url.path().to_string(),
        Err(_) => request_path.to_string(),
    };

    let namespace = detail
        .target
        .clone()
        .filter(|target| !target.is_empty())
        .or_else(|| value_after(&path, "providers", true))?;
    let subscription = value_after(&path, "subscriptions", false)?;

    Some((subscription, namespace))
}

/// The component following `key` in `path`, first or last occurrence
fn value_after(path: &str, key: &str, last: bool) -> Option<String> {
    let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
    let mut positions = components
        .iter()
        .enumerate()
        .filter(|(_, c)| c.eq_ignore_ascii_case(key))
        .map(|(i, _)| i);

    let position = if last {
        positions.last()
    } else {
        positions.next()
    }?;

    components.get(position + 1).map(|c| c.to_string())
}

/// Register `namespace` for the subscription and wait until ARM reports it
/// as `Registered`
pub async fn register_provider(client: &ArmClient, subscription_id: &str, namespace: &str) -> Result<()> {
    let provider_path = format!("/subscriptions/{}/providers/{}", subscription_id, namespace);

    let register = RequestOptions::new(
        REGISTER,
        Method::POST,
        format!("{}/register", provider_path),
        API_VERSION,
    );
    client.send_checked(&register).await?;
    tracing::info!("Requested registration of {} for {}", namespace, subscription_id);

    let get = RequestOptions::new(GET, Method::GET, provider_path, API_VERSION);
    let started = Instant::now();
    let options = client.options();

    loop {
        let response = client.send_checked(&get).await?;
        let state = response
            .json::<ProviderState>(GET)?
            .and_then(|p| p.registration_state)
            .unwrap_or_default();

        if state.eq_ignore_ascii_case("Registered") {
            tracing::info!("{} is registered for {}", namespace, subscription_id);
            return Ok(());
        }

        if started.elapsed() >= options.registration_timeout {
            return Err(Error::Polling {
                operation: GET,
                message: format!(
                    "timed out waiting for {} to register (last state {:?})",
                    namespace, state
                ),
            });
        }

        tracing::debug!("{} registration state is {:?}", namespace, state);
        tokio::time::sleep(options.poll_interval).await;
    }
}
