use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::ProxyResource;

pub type ContentKeyPolicy = ProxyResource<ContentKeyPolicyProperties>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentKeyPolicyProperties {
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Vec<ContentKeyPolicyOption>,
}

/// One way a key may be delivered: how to package it and who may get it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentKeyPolicyOption {
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_option_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub configuration: ContentKeyPolicyConfiguration,
    pub restriction: ContentKeyPolicyRestriction,
}

/// Key delivery configuration, discriminated by `@odata.type`.
///
/// DRM license templates are passed through as JSON. Secrets such as the
/// FairPlay certificate come back blank unless fetched with
/// [`Client::get_content_key_policy_properties_with_secrets`](crate::Client::get_content_key_policy_properties_with_secrets).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "@odata.type", rename_all_fields = "camelCase")]
pub enum ContentKeyPolicyConfiguration {
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicyClearKeyConfiguration")]
    ClearKey,
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicyUnknownConfiguration")]
    Unknown,
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicyWidevineConfiguration")]
    Widevine { widevine_template: String },
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicyPlayReadyConfiguration")]
    PlayReady {
        licenses: Vec<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        response_custom_data: Option<String>,
    },
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicyFairPlayConfiguration")]
    FairPlay {
        /// Application secret key, base64.
        ask: String,
        fair_play_pfx_password: String,
        /// PKCS 12 certificate, base64.
        fair_play_pfx: String,
        rental_and_lease_key_type: String,
        rental_duration: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offline_rental_configuration: Option<serde_json::Value>,
    },
}

/// Who may request a key, discriminated by `@odata.type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "@odata.type")]
pub enum ContentKeyPolicyRestriction {
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicyOpenRestriction")]
    Open,
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicyUnknownRestriction")]
    Unknown,
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicyTokenRestriction")]
    Token(TokenRestriction),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRestriction {
    pub issuer: String,
    pub audience: String,
    /// `None` only when read without secrets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_verification_key: Option<TokenVerificationKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_verification_keys: Vec<TokenVerificationKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_claims: Vec<TokenClaim>,
    pub restriction_token_type: RestrictionTokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id_connect_discovery_document: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "@odata.type", rename_all_fields = "camelCase")]
pub enum TokenVerificationKey {
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicySymmetricTokenKey")]
    Symmetric {
        /// Base64; blank unless read with secrets.
        #[serde(default)]
        key_value: String,
    },
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicyRsaTokenKey")]
    Rsa { exponent: String, modulus: String },
    #[serde(rename = "#Microsoft.Media.ContentKeyPolicyX509CertificateTokenKey")]
    X509Certificate { raw_body: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaim {
    pub claim_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum RestrictionTokenType {
    Swt,
    Jwt,
}
