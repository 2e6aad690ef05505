//! ARM Client
//!
//! Combines a credential, the HTTP client and the pipeline options into the
//! single entry point every generated operation goes through.

use super::auth::{credential_from_config, TokenCredential};
use super::http::{sanitize_for_log, ArmHttpClient, PreparedRequest};
use super::registration;
use super::request::{RawResponse, RequestOptions};
use crate::config::{CloudEnvironment, Config};
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;
use uuid::Uuid;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
/// Matches the provider's default timeout for long-running operations
const DEFAULT_POLLING_TIMEOUT: Duration = Duration::from_secs(60 * 60);
const DEFAULT_REGISTRATION_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Status codes worth retrying
const RETRYABLE_STATUS: &[StatusCode] = &[
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Pipeline settings shared by every request a client makes
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: Url,
    pub token_scope: String,
    pub user_agent: String,
    pub max_retries: u32,
    /// Base back-off between retries, doubled on every attempt
    pub retry_delay: Duration,
    /// Upper bound for back-off and `Retry-After`
    pub max_retry_delay: Duration,
    pub poll_interval: Duration,
    pub polling_timeout: Duration,
    /// Register resource providers on `MissingSubscriptionRegistration`
    pub register_providers: bool,
    pub registration_timeout: Duration,
}

impl ClientOptions {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            token_scope: CloudEnvironment::PUBLIC.token_scope(),
            user_agent: format!("azrm/{}", env!("CARGO_PKG_VERSION")),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_retry_delay: MAX_RETRY_DELAY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            polling_timeout: DEFAULT_POLLING_TIMEOUT,
            register_providers: true,
            registration_timeout: DEFAULT_REGISTRATION_TIMEOUT,
        }
    }

    /// Options for the cloud and overrides in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let cloud = config.cloud()?;
        let endpoint = config
            .endpoint
            .as_deref()
            .unwrap_or(cloud.resource_manager);
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Configuration(format!("invalid endpoint {:?}: {}", endpoint, e)))?;

        let mut options = Self::new(endpoint);
        options.token_scope = cloud.token_scope();
        options.user_agent = config.user_agent();
        options.register_providers = !config.skip_provider_registration;
        if let Some(retries) = config.max_retries {
            options.max_retries = retries;
        }
        if let Some(secs) = config.poll_interval_secs {
            options.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = config.polling_timeout_secs {
            options.polling_timeout = Duration::from_secs(secs);
        }
        Ok(options)
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_max_retry_delay(mut self, max_retry_delay: Duration) -> Self {
        self.max_retry_delay = max_retry_delay;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_polling_timeout(mut self, polling_timeout: Duration) -> Self {
        self.polling_timeout = polling_timeout;
        self
    }

    pub fn with_provider_registration(mut self, enabled: bool) -> Self {
        self.register_providers = enabled;
        self
    }

    pub fn with_registration_timeout(mut self, timeout: Duration) -> Self {
        self.registration_timeout = timeout;
        self
    }
}

/// Main ARM client
#[derive(Clone)]
pub struct ArmClient {
    http: ArmHttpClient,
    credential: Arc<dyn TokenCredential>,
    options: Arc<ClientOptions>,
}

impl ArmClient {
    pub fn new(options: ClientOptions, credential: Arc<dyn TokenCredential>) -> Result<Self> {
        let http = ArmHttpClient::new(&options.user_agent)?;
        Ok(Self {
            http,
            credential,
            options: Arc::new(options),
        })
    }

    /// Build a client from configuration, picking a credential the way
    /// [`credential_from_config`] does
    pub fn from_config(config: &Config) -> Result<Self> {
        let cloud = config.cloud()?;
        let options = ClientOptions::from_config(config)?;
        Self::new(options, credential_from_config(config, &cloud)?)
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn endpoint(&self) -> &Url {
        &self.options.endpoint
    }

    /// Run one operation: retries transient failures and, when the
    /// subscription isn't registered for the resource provider, registers it
    /// and tries once more.
    pub async fn execute(&self, request: &RequestOptions) -> Result<RawResponse> {
        match self.send_checked(request).await {
            Err(err) if self.options.register_providers => {
                let Some((subscription, namespace)) =
                    registration::registration_target(&err, &request.path)
                else {
                    return Err(err);
                };

                tracing::info!(
                    "{}: subscription {} is not registered for {}, registering",
                    request.operation,
                    subscription,
                    namespace
                );
                registration::register_provider(self, &subscription, &namespace).await?;
                self.send_checked(request).await
            }
            other => other,
        }
    }

    /// Send with retries and check the status, without provider registration
    pub(crate) async fn send_checked(&self, request: &RequestOptions) -> Result<RawResponse> {
        let url = self.build_url(request)?;
        let started = Instant::now();
        let mut attempt = 0;

        loop {
            let prepared = self.prepare(request, url.clone()).await?;
            let response = self
                .http
                .send(prepared)
                .await
                .map_err(|source| Error::Send {
                    operation: request.operation,
                    source,
                })?;

            if request.expected_status.contains(&response.status) {
                tracing::debug!(
                    "{} completed with {} in {:?}",
                    request.operation,
                    response.status,
                    started.elapsed()
                );
                return Ok(response);
            }

            if RETRYABLE_STATUS.contains(&response.status) && attempt < self.options.max_retries {
                let delay = self.retry_delay(attempt, &response);
                tracing::warn!(
                    "{} returned {}, retrying in {:?} (attempt {}/{})",
                    request.operation,
                    response.status,
                    delay,
                    attempt + 1,
                    self.options.max_retries
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            tracing::error!(
                "{} failed with status {}: {}",
                request.operation,
                response.status,
                sanitize_for_log(&response.body)
            );
            return Err(Error::unexpected_status(request.operation, response));
        }
    }

    /// `Retry-After` when the service sent one, else exponential back-off
    fn retry_delay(&self, attempt: u32, response: &RawResponse) -> Duration {
        let delay = response.retry_after().unwrap_or_else(|| {
            self.options
                .retry_delay
                .saturating_mul(2u32.saturating_pow(attempt))
        });
        delay.min(self.options.max_retry_delay)
    }

    /// Resolve the request path against the endpoint. Absolute links (next
    /// links, polling URLs) must point at the endpoint's host.
    pub(crate) fn build_url(&self, request: &RequestOptions) -> Result<Url> {
        let endpoint = &self.options.endpoint;

        if request.is_absolute() {
            let mut url = Url::parse(&request.path).map_err(|e| {
                Error::prepare(request.operation, format!("parsing link {:?}: {}", request.path, e))
            })?;

            let same_origin = url.scheme() == endpoint.scheme()
                && url.host_str() == endpoint.host_str()
                && url.port_or_known_default() == endpoint.port_or_known_default();
            if !same_origin {
                return Err(Error::prepare(
                    request.operation,
                    format!(
                        "refusing to follow a link to {} outside of {}",
                        url.host_str().unwrap_or_default(),
                        endpoint.host_str().unwrap_or_default()
                    ),
                ));
            }

            if !url.query_pairs().any(|(key, _)| key == "api-version") {
                url.query_pairs_mut()
                    .append_pair("api-version", request.api_version);
            }
            return Ok(url);
        }

        let encoded_path = request
            .path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        let mut url = endpoint.clone();
        let base = endpoint.path().trim_end_matches('/');
        url.set_path(&format!("{}{}", base, encoded_path));
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api-version", request.api_version);
            for (key, value) in &request.query {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn prepare(&self, request: &RequestOptions, url: Url) -> Result<PreparedRequest> {
        let token = self
            .credential
            .get_token(&self.options.token_scope)
            .await
            .map_err(|e| Error::prepare(request.operation, format!("acquiring token: {}", e)))?;

        let header_error =
            |name: &str| Error::prepare(request.operation, format!("invalid value for header {}", name));

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token.token))
            .map_err(|_| header_error("Authorization"))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            "x-ms-client-request-id",
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .map_err(|_| header_error("x-ms-client-request-id"))?,
        );

        for (name, value) in &request.headers {
            let header = HeaderName::from_bytes(name.as_bytes()).map_err(|_| header_error(name))?;
            let value = HeaderValue::from_str(value).map_err(|_| header_error(name))?;
            headers.insert(header, value);
        }

        Ok(PreparedRequest {
            method: request.method.clone(),
            url,
            headers,
            body: request.body.clone(),
        })
    }
}
