use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{IpAccessControl, ProxyResource, TrackedResource};

pub type LiveEvent = TrackedResource<LiveEventProperties>;

/// Records part of a live event into an asset.
pub type LiveOutput = ProxyResource<LiveOutputProperties>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEventProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input: LiveEventInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<LiveEventPreview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<LiveEventEncoding>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_state: Option<LiveEventResourceState>,
    /// Keep ingest and preview host names stable across restarts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_static_hostname: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stream_options: Vec<StreamOptionsFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEventInput {
    pub streaming_protocol: LiveEventInputProtocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<LiveEventAccessControl>,
    /// ISO 8601 duration, e.g. `PT2S`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_frame_interval_duration: Option<String>,
    /// Embedded in the ingest URL; generated when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<LiveEventEndpoint>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum LiveEventInputProtocol {
    #[default]
    #[serde(rename = "RTMP")]
    Rtmp,
    #[serde(rename = "FragmentedMP4")]
    FragmentedMp4,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEventAccessControl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAccessControl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEventEndpoint {
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEventPreview {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<LiveEventEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<LiveEventAccessControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_locator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming_policy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_media_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEventEncoding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_type: Option<LiveEventEncodingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stretch_mode: Option<String>,
    /// ISO 8601 duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_frame_interval: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum LiveEventEncodingType {
    /// Pass-through; same as `PassthroughStandard` on older accounts.
    None,
    Standard,
    Premium1080p,
    PassthroughBasic,
    PassthroughStandard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LiveEventResourceState {
    Stopped,
    Allocating,
    StandBy,
    Starting,
    Running,
    Stopping,
    Deleting,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum StreamOptionsFlag {
    Default,
    LowLatency,
    LowLatencyV2,
}

/// Body of the `stop` action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEventActionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_outputs_on_stop: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveOutputProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub asset_name: String,
    /// ISO 8601 duration of the recorded window, e.g. `PT1H`.
    pub archive_window_length: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewind_window_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls: Option<Hls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_snap_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_state: Option<LiveOutputResourceState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragments_per_ts_segment: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum LiveOutputResourceState {
    Creating,
    Running,
    Deleting,
    #[serde(other)]
    Unknown,
}
