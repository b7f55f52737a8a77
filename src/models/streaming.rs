use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{IpAccessControl, ProxyResource, TrackedResource};

pub type StreamingEndpoint = TrackedResource<StreamingEndpointProperties>;

/// Publishes an asset for playback through a streaming policy.
pub type StreamingLocator = ProxyResource<StreamingLocatorProperties>;

pub type StreamingPolicy = ProxyResource<StreamingPolicyProperties>;

/// Names of the streaming policies every account ships with.
pub mod predefined_streaming_policies {
    pub const DOWNLOAD_ONLY: &str = "Predefined_DownloadOnly";
    pub const CLEAR_STREAMING_ONLY: &str = "Predefined_ClearStreamingOnly";
    pub const DOWNLOAD_AND_CLEAR_STREAMING: &str = "Predefined_DownloadAndClearStreaming";
    pub const CLEAR_KEY: &str = "Predefined_ClearKey";
    pub const MULTI_DRM_CENC_STREAMING: &str = "Predefined_MultiDrmCencStreaming";
    pub const MULTI_DRM_STREAMING: &str = "Predefined_MultiDrmStreaming";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingEndpointProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 0 for a standard endpoint, 1-10 for premium.
    pub scale_units: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<StreamingEndpointAccessControl>,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cache_age: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_host_names: Vec<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdn_profile: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_state: Option<StreamingEndpointResourceState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_trial_end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingEndpointAccessControl {
    /// Akamai signature authentication keys, passed through as JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub akamai: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAccessControl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum StreamingEndpointResourceState {
    Stopped,
    Starting,
    Running,
    Stopping,
    Deleting,
    Scaling,
    #[serde(other)]
    Unknown,
}

/// Body of the `scale` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingEntityScaleUnit {
    pub scale_unit: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingLocatorProperties {
    pub asset_name: String,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Generated by the service when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming_locator_id: Option<Uuid>,
    /// A custom policy or one of [`predefined_streaming_policies`].
    pub streaming_policy_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_content_key_policy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_keys: Vec<StreamingLocatorContentKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_media_id: Option<String>,
    /// Asset or account filter names applied to the manifests.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
}

impl StreamingLocatorProperties {
    pub fn new(asset_name: impl Into<String>, streaming_policy_name: impl Into<String>) -> Self {
        Self {
            asset_name: asset_name.into(),
            streaming_policy_name: streaming_policy_name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingLocatorContentKey {
    pub id: Uuid,
    /// Read-only.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub key_type: Option<StreamingLocatorContentKeyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_reference_in_streaming_policy: Option<String>,
    /// Base64; generated when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum StreamingLocatorContentKeyType {
    CommonEncryptionCenc,
    CommonEncryptionCbcs,
    EnvelopeEncryption,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContentKeysResponse {
    #[serde(default)]
    pub content_keys: Vec<StreamingLocatorContentKey>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPathsResponse {
    #[serde(default)]
    pub streaming_paths: Vec<StreamingPath>,
    #[serde(default)]
    pub download_paths: Vec<String>,
}

/// Manifest paths, relative to a streaming endpoint host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingPath {
    pub streaming_protocol: StreamingProtocol,
    pub encryption_scheme: EncryptionScheme,
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum StreamingProtocol {
    Hls,
    Dash,
    SmoothStreaming,
    Download,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum EncryptionScheme {
    NoEncryption,
    EnvelopeEncryption,
    CommonEncryptionCenc,
    CommonEncryptionCbcs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingPolicyProperties {
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_content_key_policy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_encryption: Option<NoEncryption>,
    /// Encryption blocks are passed through as JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope_encryption: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_encryption_cenc: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_encryption_cbcs: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoEncryption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_protocols: Option<EnabledProtocols>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnabledProtocols {
    pub download: bool,
    pub dash: bool,
    pub hls: bool,
    pub smooth_streaming: bool,
}

impl EnabledProtocols {
    pub fn all() -> Self {
        Self {
            download: true,
            dash: true,
            hls: true,
            smooth_streaming: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_paths_response() {
        let raw = json!({
            "streamingPaths": [
                {"streamingProtocol": "Hls", "encryptionScheme": "NoEncryption",
                 "paths": ["/1b2c/manifest(format=m3u8-cmaf)"]},
                {"streamingProtocol": "Dash", "encryptionScheme": "NoEncryption", "paths": []}
            ],
            "downloadPaths": []
        });
        let paths: ListPathsResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(paths.streaming_paths.len(), 2);
        assert_eq!(paths.streaming_paths[0].streaming_protocol, StreamingProtocol::Hls);
        assert!(paths.streaming_paths[1].paths.is_empty());
    }

    #[test]
    fn locator_body_uses_camel_case() {
        let props = StreamingLocatorProperties::new(
            "output",
            predefined_streaming_policies::CLEAR_STREAMING_ONLY,
        );
        assert_eq!(
            serde_json::to_value(&props).unwrap(),
            json!({
                "assetName": "output",
                "streamingPolicyName": "Predefined_ClearStreamingOnly"
            })
        );
    }

    #[test]
    fn content_key_type_field() {
        let raw = json!({
            "id": "6e1f0a2b-0000-4000-8000-000000000002",
            "type": "EnvelopeEncryption",
            "labelReferenceInStreamingPolicy": "aesDefaultKey",
            "policyName": "sharedPolicy"
        });
        let key: StreamingLocatorContentKey = serde_json::from_value(raw).unwrap();
        assert_eq!(key.key_type, Some(StreamingLocatorContentKeyType::EnvelopeEncryption));
        assert!(key.value.is_none());
    }
}
