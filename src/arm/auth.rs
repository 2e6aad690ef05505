//! Azure Authentication
//!
//! Bearer tokens for ARM calls come from a static token or from an
//! `azure_identity` credential (service principal client secret, or the
//! Azure CLI). The identity credentials cache and refresh their own tokens.

use crate::config::{CloudEnvironment, Config};
use crate::error::{Error, Result};
use async_trait::async_trait;
use azure_core::auth::TokenCredential as IdentityTokenCredential;
use azure_identity::{AzureCliCredential, ClientSecretCredential};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use url::Url;

/// An OAuth2 bearer token
#[derive(Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Source of bearer tokens
#[async_trait]
pub trait TokenCredential: Send + Sync {
    async fn get_token(&self, scope: &str) -> Result<AccessToken>;
}

/// A fixed token, e.g. from AZURE_ACCESS_TOKEN or a test
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _scope: &str) -> Result<AccessToken> {
        Ok(AccessToken {
            token: self.token.clone(),
            expires_at: DateTime::<Utc>::MAX_UTC,
        })
    }
}

/// Tokens from an `azure_identity` credential
pub struct IdentityCredential {
    kind: &'static str,
    provider: Arc<dyn IdentityTokenCredential>,
}

impl IdentityCredential {
    pub fn new(kind: &'static str, provider: Arc<dyn IdentityTokenCredential>) -> Self {
        Self { kind, provider }
    }

    /// Service principal authentication with a client secret
    pub fn client_secret(
        cloud: &CloudEnvironment,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let authority = Url::parse(cloud.authority)
            .map_err(|e| Error::Authentication(format!("invalid authority {}: {}", cloud.authority, e)))?;
        let credential = ClientSecretCredential::new(
            azure_core::new_http_client(),
            authority,
            tenant_id.into(),
            client_id.into(),
            client_secret.into(),
        );
        Ok(Self::new("client secret", Arc::new(credential)))
    }

    /// Tokens from `az account get-access-token`
    pub fn azure_cli() -> Self {
        Self::new("azure cli", Arc::new(AzureCliCredential::new()))
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

#[async_trait]
impl TokenCredential for IdentityCredential {
    async fn get_token(&self, scope: &str) -> Result<AccessToken> {
        let token = self
            .provider
            .get_token(&[scope])
            .await
            .map_err(|e| Error::Authentication(format!("{} credential: {}", self.kind, e)))?;

        let expires_at = expiry_from_unix(token.expires_on.unix_timestamp())?;
        tracing::debug!(
            "Token from {} credential expires at {}",
            self.kind,
            expires_at.format("%Y-%m-%d %H:%M:%S UTC")
        );

        Ok(AccessToken {
            token: token.token.secret().to_string(),
            expires_at,
        })
    }
}

fn expiry_from_unix(timestamp: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .ok_or_else(|| Error::Authentication(format!("invalid token expiry {}", timestamp)))
}

/// Pick a credential from configuration: static token, then client secret,
/// then the Azure CLI.
pub fn credential_from_config(config: &Config, cloud: &CloudEnvironment) -> Result<Arc<dyn TokenCredential>> {
    if let Some(token) = &config.access_token {
        tracing::info!("Using access token from AZURE_ACCESS_TOKEN");
        return Ok(Arc::new(StaticTokenCredential::new(token.clone())));
    }

    if let (Some(tenant), Some(client_id), Some(secret)) =
        (&config.tenant_id, &config.client_id, &config.client_secret)
    {
        tracing::info!("Using service principal {} in tenant {}", client_id, tenant);
        return Ok(Arc::new(IdentityCredential::client_secret(
            cloud,
            tenant.clone(),
            client_id.clone(),
            secret.clone(),
        )?));
    }

    tracing::info!("Using Azure CLI credentials");
    Ok(Arc::new(IdentityCredential::azure_cli()))
}
