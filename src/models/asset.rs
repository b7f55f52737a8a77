use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::ProxyResource;

pub type Asset = ProxyResource<AssetProperties>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProperties {
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<Uuid>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Blob container name; generated by the service when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_account_name: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_encryption_format: Option<AssetStorageEncryptionFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AssetStorageEncryptionFormat {
    None,
    MediaStorageClientEncryption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AssetContainerPermission {
    Read,
    ReadWrite,
    ReadWriteDelete,
}

/// Body of `listContainerSas`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContainerSasInput {
    pub permissions: AssetContainerPermission,
    pub expiry_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetContainerSas {
    #[serde(default)]
    pub asset_container_sas_urls: Vec<String>,
}

/// Key material for an asset stored with client-side encryption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEncryptedAssetDecryptionData {
    /// Base64.
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub asset_file_encryption_metadata: Vec<AssetFileEncryptionMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFileEncryptionMetadata {
    #[serde(default)]
    pub initialization_vector: Option<String>,
    #[serde(default)]
    pub asset_file_name: Option<String>,
    pub asset_file_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStreamingLocatorsResponse {
    #[serde(default)]
    pub streaming_locators: Vec<AssetStreamingLocator>,
}

/// Summary of a streaming locator as seen from its asset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStreamingLocator {
    pub name: String,
    pub asset_name: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    pub streaming_locator_id: Uuid,
    pub streaming_policy_name: String,
    #[serde(default)]
    pub default_content_key_policy_name: Option<String>,
}
