//! Models shared across services.

use crate::enums::open_enum;
use serde::{Deserialize, Serialize};

open_enum! {
    /// The kind of identity that created or last modified a resource
    pub enum CreatedByType {
        Application => "Application",
        Key => "Key",
        ManagedIdentity => "ManagedIdentity",
        User => "User",
    }
}

/// Creation and last-modification metadata attached by ARM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_type: Option<CreatedByType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by_type: Option<CreatedByType>,
}

impl SystemData {
    /// `created_at` as a timestamp, when it's a valid RFC 3339 string
    pub fn created_at_time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_time(self.created_at.as_deref()?)
    }

    pub fn last_modified_at_time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        parse_time(self.last_modified_at.as_deref()?)
    }
}

pub(crate) fn parse_time(value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|t| t.with_timezone(&chrono::Utc))
}
