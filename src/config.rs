//! Configuration Management
//!
//! Handles persistent configuration storage for azrm, environment variable
//! overrides and the Azure cloud environments a client can target.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Endpoints for one Azure cloud
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudEnvironment {
    pub name: &'static str,
    pub resource_manager: &'static str,
    pub authority: &'static str,
    pub token_audience: &'static str,
}

impl CloudEnvironment {
    pub const PUBLIC: Self = Self {
        name: "public",
        resource_manager: "https://management.azure.com/",
        authority: "https://login.microsoftonline.com/",
        token_audience: "https://management.azure.com/",
    };

    pub const CHINA: Self = Self {
        name: "china",
        resource_manager: "https://management.chinacloudapi.cn/",
        authority: "https://login.chinacloudapi.cn/",
        token_audience: "https://management.chinacloudapi.cn/",
    };

    pub const US_GOVERNMENT: Self = Self {
        name: "usgovernment",
        resource_manager: "https://management.usgovcloudapi.net/",
        authority: "https://login.microsoftonline.us/",
        token_audience: "https://management.usgovcloudapi.net/",
    };

    /// Resolve a cloud by name. Accepts short names (`public`, `china`,
    /// `usgovernment`) and the long forms (`AzurePublicCloud`,
    /// `AZURECHINACLOUD`, ...), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let short = lower
            .strip_prefix("azure")
            .and_then(|rest| rest.strip_suffix("cloud"))
            .unwrap_or(&lower);

        match short {
            "public" | "" => Some(Self::PUBLIC),
            "china" => Some(Self::CHINA),
            "usgovernment" | "usgov" => Some(Self::US_GOVERNMENT),
            _ => None,
        }
    }

    /// OAuth scope for ARM tokens in this cloud
    pub fn token_scope(&self) -> String {
        format!("{}.default", self.token_audience)
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Default subscription for subscription-scoped commands
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    /// Cloud environment name, `public` when unset
    #[serde(default)]
    pub environment: Option<String>,
    /// Overrides the cloud's resource manager endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub skip_provider_registration: bool,
    #[serde(default)]
    pub max_retries: Option<u32>,
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,
    #[serde(default)]
    pub polling_timeout_secs: Option<u64>,
    /// Never persisted
    #[serde(skip)]
    pub client_secret: Option<String>,
    /// Never persisted
    #[serde(skip)]
    pub access_token: Option<String>,
    /// Appended to the user agent (AZURE_HTTP_USER_AGENT)
    #[serde(skip)]
    pub user_agent_suffix: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("azrm").join("config.json"))
    }

    /// Load configuration from disk, then apply environment overrides
    pub fn load() -> Self {
        let config = match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from a specific file, without environment overrides
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Apply environment overrides. `ARM_*` names win over `AZURE_*` names.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
        };

        if let Some(v) = first(&["ARM_SUBSCRIPTION_ID", "AZURE_SUBSCRIPTION_ID"]) {
            self.subscription_id = Some(v);
        }
        if let Some(v) = first(&["ARM_TENANT_ID", "AZURE_TENANT_ID"]) {
            self.tenant_id = Some(v);
        }
        if let Some(v) = first(&["ARM_CLIENT_ID", "AZURE_CLIENT_ID"]) {
            self.client_id = Some(v);
        }
        if let Some(v) = first(&["ARM_CLIENT_SECRET", "AZURE_CLIENT_SECRET"]) {
            self.client_secret = Some(v);
        }
        if let Some(v) = first(&["ARM_ENVIRONMENT", "AZURE_ENVIRONMENT"]) {
            self.environment = Some(v);
        }
        if let Some(v) = first(&["ARM_RESOURCE_MANAGER_ENDPOINT"]) {
            self.endpoint = Some(v);
        }
        if let Some(v) = first(&["ARM_SKIP_PROVIDER_REGISTRATION"]) {
            self.skip_provider_registration = matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(v) = first(&["AZURE_ACCESS_TOKEN"]) {
            self.access_token = Some(v);
        }
        if let Some(v) = first(&["AZURE_HTTP_USER_AGENT"]) {
            self.user_agent_suffix = Some(v);
        }

        self
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Configuration(format!("creating {:?}: {}", parent, e)))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Configuration(format!("serializing config: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| Error::Configuration(format!("writing {:?}: {}", path, e)))?;

        Ok(())
    }

    /// The cloud this configuration targets
    pub fn cloud(&self) -> Result<CloudEnvironment> {
        match self.environment.as_deref() {
            None => Ok(CloudEnvironment::PUBLIC),
            Some(name) => CloudEnvironment::from_name(name)
                .ok_or_else(|| Error::Configuration(format!("unknown environment {:?}", name))),
        }
    }

    /// The configured subscription, or an error telling the user how to set one
    pub fn effective_subscription(&self) -> Result<String> {
        self.subscription_id
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                Error::Configuration(
                    "no subscription configured. Set ARM_SUBSCRIPTION_ID or use --subscription".to_string(),
                )
            })
    }

    pub fn user_agent(&self) -> String {
        let base = format!("azrm/{}", env!("CARGO_PKG_VERSION"));
        match &self.user_agent_suffix {
            Some(suffix) => format!("{};{}", base, suffix),
            None => base,
        }
    }

    /// Set subscription and save
    pub fn set_subscription(&mut self, subscription_id: &str) -> Result<()> {
        self.subscription_id = Some(subscription_id.to_string());
        self.save()
    }
}
