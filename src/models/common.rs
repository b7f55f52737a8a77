use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource tags, ordered by key.
pub type Tags = BTreeMap<String, String>;

/// A child resource of a media services account (no location or tags).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResource<P> {
    /// Full ARM id. Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// e.g. `Microsoft.Media/mediaservices/assets`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_data: Option<SystemData>,
    pub properties: P,
}

impl<P> ProxyResource<P> {
    /// A request body carrying only `properties`.
    pub fn new(properties: P) -> Self {
        Self {
            id: None,
            name: None,
            resource_type: None,
            system_data: None,
            properties,
        }
    }
}

/// A top-level resource with a region and tags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedResource<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_data: Option<SystemData>,
    /// Azure region, e.g. `westeurope`. Left out of PATCH bodies when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    pub properties: P,
}

impl<P> TrackedResource<P> {
    pub fn new(location: impl Into<String>, properties: P) -> Self {
        Self {
            id: None,
            name: None,
            resource_type: None,
            system_data: None,
            location: location.into(),
            tags: None,
            properties,
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// Creation and last-modification metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_type: Option<CreatedByType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_type: Option<CreatedByType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CreatedByType {
    User,
    Application,
    ManagedIdentity,
    Key,
}

/// Provisioning state of a resource that goes through a long-running create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ProvisioningState {
    InProgress,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Source IP ranges allowed to reach an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAccessControl {
    #[serde(default)]
    pub allow: Vec<IpRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_prefix_length: Option<u8>,
}

impl IpRange {
    /// Allow every IPv4 address.
    pub fn allow_all() -> Self {
        Self {
            name: Some("AllowAll".into()),
            address: "0.0.0.0".into(),
            subnet_prefix_length: Some(0),
        }
    }
}
