use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::ProxyResource;

/// A reusable recipe of outputs applied to every job submitted under it.
pub type Transform = ProxyResource<TransformProperties>;

/// One processing run of a transform over an input.
pub type Job = ProxyResource<JobProperties>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub outputs: Vec<TransformOutput>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_error: Option<OnErrorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_priority: Option<Priority>,
    pub preset: Preset,
}

impl TransformOutput {
    pub fn new(preset: Preset) -> Self {
        Self {
            on_error: None,
            relative_priority: None,
            preset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum OnErrorType {
    StopProcessingJob,
    ContinueJob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Priority {
    Low,
    Normal,
    High,
}

/// What an output produces, discriminated by `@odata.type`.
///
/// Codec and format lists of the standard encoder are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "@odata.type", rename_all_fields = "camelCase")]
pub enum Preset {
    #[serde(rename = "#Microsoft.Media.BuiltInStandardEncoderPreset")]
    BuiltInStandardEncoder {
        preset_name: EncoderNamedPreset,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        configurations: Option<serde_json::Value>,
    },
    #[serde(rename = "#Microsoft.Media.StandardEncoderPreset")]
    StandardEncoder {
        codecs: Vec<serde_json::Value>,
        formats: Vec<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filters: Option<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        experimental_options: Option<BTreeMap<String, String>>,
    },
    #[serde(rename = "#Microsoft.Media.AudioAnalyzerPreset")]
    AudioAnalyzer {
        /// BCP-47, e.g. `en-US`. Detected automatically when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        audio_language: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<AudioAnalysisMode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        experimental_options: Option<BTreeMap<String, String>>,
    },
    #[serde(rename = "#Microsoft.Media.VideoAnalyzerPreset")]
    VideoAnalyzer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        audio_language: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<AudioAnalysisMode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        insights_to_extract: Option<InsightsType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        experimental_options: Option<BTreeMap<String, String>>,
    },
    #[serde(rename = "#Microsoft.Media.FaceDetectorPreset")]
    FaceDetector {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolution: Option<AnalysisResolution>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<FaceRedactorMode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        blur_type: Option<BlurType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        experimental_options: Option<BTreeMap<String, String>>,
    },
}

impl Preset {
    pub fn built_in(name: EncoderNamedPreset) -> Self {
        Preset::BuiltInStandardEncoder {
            preset_name: name,
            configurations: None,
        }
    }
}

/// Built-in encoder recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum EncoderNamedPreset {
    AdaptiveStreaming,
    ContentAwareEncoding,
    H264SingleBitrateSD,
    H264SingleBitrate720p,
    H264SingleBitrate1080p,
    H264MultipleBitrateSD,
    H264MultipleBitrate720p,
    H264MultipleBitrate1080p,
    H265AdaptiveStreaming,
    H265ContentAwareEncoding,
    H265SingleBitrate720p,
    H265SingleBitrate1080p,
    H265SingleBitrate4K,
    AACGoodQualityAudio,
    CopyAllBitrateNonInterleaved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AudioAnalysisMode {
    Standard,
    Basic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum InsightsType {
    AudioInsightsOnly,
    VideoInsightsOnly,
    AllInsights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum AnalysisResolution {
    SourceResolution,
    StandardDefinition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum FaceRedactorMode {
    Analyze,
    Redact,
    Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BlurType {
    Box,
    Low,
    Med,
    High,
    Black,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<JobState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input: JobInput,
    pub outputs: Vec<JobOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Caller-defined pairs echoed back in job notifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_data: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl JobProperties {
    pub fn new(input: JobInput, outputs: Vec<JobOutput>) -> Self {
        Self {
            created: None,
            last_modified: None,
            state: None,
            description: None,
            input,
            outputs,
            priority: None,
            correlation_data: None,
            start_time: None,
            end_time: None,
        }
    }

    /// The first error reported by any output, if one failed.
    pub fn first_error(&self) -> Option<&JobError> {
        self.outputs.iter().find_map(|o| match o {
            JobOutput::Asset(asset) => asset.error.as_ref(),
        })
    }
}

/// Job input, discriminated by `@odata.type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "@odata.type", rename_all_fields = "camelCase")]
pub enum JobInput {
    #[serde(rename = "#Microsoft.Media.JobInputAsset")]
    Asset {
        asset_name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        files: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    #[serde(rename = "#Microsoft.Media.JobInputHttp")]
    Http {
        /// Prefix joined with each entry of `files`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_uri: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        files: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    #[serde(rename = "#Microsoft.Media.JobInputs")]
    Inputs { inputs: Vec<JobInput> },
}

impl JobInput {
    pub fn asset(name: impl Into<String>) -> Self {
        JobInput::Asset {
            asset_name: name.into(),
            files: Vec::new(),
            label: None,
        }
    }

    pub fn http(base_uri: impl Into<String>, files: Vec<String>) -> Self {
        JobInput::Http {
            base_uri: Some(base_uri.into()),
            files,
            label: None,
        }
    }
}

/// Job output, discriminated by `@odata.type`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "@odata.type")]
pub enum JobOutput {
    #[serde(rename = "#Microsoft.Media.JobOutputAsset")]
    Asset(JobOutputAsset),
}

impl JobOutput {
    pub fn asset(name: impl Into<String>) -> Self {
        JobOutput::Asset(JobOutputAsset {
            asset_name: name.into(),
            label: None,
            state: None,
            progress: None,
            error: None,
            start_time: None,
            end_time: None,
            preset_override: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOutputAsset {
    pub asset_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<JobState>,
    /// 0-100. Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JobError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_override: Option<Preset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum JobState {
    Queued,
    Scheduled,
    Processing,
    Canceling,
    Canceled,
    Error,
    Finished,
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// Terminal = won't change anymore (Finished, Error or Canceled).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Finished | JobState::Error | JobState::Canceled)
    }

    /// Error or Canceled.
    pub fn is_failed(&self) -> bool {
        matches!(self, JobState::Error | JobState::Canceled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// `DoNotRetry` or `MayRetry`.
    #[serde(default)]
    pub retry: Option<String>,
    #[serde(default)]
    pub details: Vec<JobErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct JobErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
