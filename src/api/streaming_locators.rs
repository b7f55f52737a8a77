use crate::client::Client;
use crate::errors::{MediaError, Result};
use crate::models::{ListContentKeysResponse, ListPathsResponse, StreamingLocator, StreamingPolicy};
use crate::paging::{ListOptions, Page};
use crate::validation;

const STREAMING_LOCATORS: &str = "streamingLocators";
const STREAMING_POLICIES: &str = "streamingPolicies";

fn check_locator(name: &str, locator: &StreamingLocator) -> Result<()> {
    let props = &locator.properties;
    validation::entity_name("streamingLocatorName", name)?;
    validation::entity_name("assetName", &props.asset_name)?;
    validation::entity_name("streamingPolicyName", &props.streaming_policy_name)?;
    if let Some(ref policy) = props.default_content_key_policy_name {
        validation::entity_name("defaultContentKeyPolicyName", policy)?;
    }
    if let (Some(start), Some(end)) = (props.start_time, props.end_time) {
        if end <= start {
            return Err(MediaError::validation("endTime", "must be after startTime"));
        }
    }
    Ok(())
}

impl Client {
    // -----------------------------------------------------------------------
    // Streaming locators
    // -----------------------------------------------------------------------

    /// Fetch a streaming locator.
    pub async fn get_streaming_locator(
        &self,
        resource_group: &str,
        account_name: &str,
        locator_name: &str,
    ) -> Result<StreamingLocator> {
        validation::entity_name("streamingLocatorName", locator_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_LOCATORS, locator_name],
        )?;
        self.get(url).await
    }

    /// Publish an asset. Locators are immutable; to change one, delete and
    /// recreate it.
    pub async fn create_streaming_locator(
        &self,
        resource_group: &str,
        account_name: &str,
        locator_name: &str,
        locator: &StreamingLocator,
    ) -> Result<StreamingLocator> {
        check_locator(locator_name, locator)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_LOCATORS, locator_name],
        )?;
        self.put(url, locator).await
    }

    /// Delete a streaming locator. Playback URLs built from it stop working.
    pub async fn delete_streaming_locator(
        &self,
        resource_group: &str,
        account_name: &str,
        locator_name: &str,
    ) -> Result<()> {
        validation::entity_name("streamingLocatorName", locator_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_LOCATORS, locator_name],
        )?;
        self.delete(url).await
    }

    /// List streaming locators; `options` narrows and orders the first page.
    pub async fn list_streaming_locators(
        &self,
        resource_group: &str,
        account_name: &str,
        options: Option<&ListOptions>,
    ) -> Result<Page<StreamingLocator>> {
        let url = self.account_url(resource_group, account_name, &[STREAMING_LOCATORS])?;
        self.list_page(url, options).await
    }

    /// Content keys used by an encrypted locator.
    pub async fn list_streaming_locator_content_keys(
        &self,
        resource_group: &str,
        account_name: &str,
        locator_name: &str,
    ) -> Result<ListContentKeysResponse> {
        validation::entity_name("streamingLocatorName", locator_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_LOCATORS, locator_name, "listContentKeys"],
        )?;
        self.post(url, None).await
    }

    /// Manifest and download paths; prefix them with a streaming endpoint
    /// host name to get playback URLs.
    pub async fn list_streaming_locator_paths(
        &self,
        resource_group: &str,
        account_name: &str,
        locator_name: &str,
    ) -> Result<ListPathsResponse> {
        validation::entity_name("streamingLocatorName", locator_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_LOCATORS, locator_name, "listPaths"],
        )?;
        self.post(url, None).await
    }

    // -----------------------------------------------------------------------
    // Streaming policies
    // -----------------------------------------------------------------------

    /// Fetch a custom or predefined streaming policy.
    pub async fn get_streaming_policy(
        &self,
        resource_group: &str,
        account_name: &str,
        policy_name: &str,
    ) -> Result<StreamingPolicy> {
        validation::entity_name("streamingPolicyName", policy_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_POLICIES, policy_name],
        )?;
        self.get(url).await
    }

    /// Create a custom streaming policy. Policies are immutable once created.
    pub async fn create_streaming_policy(
        &self,
        resource_group: &str,
        account_name: &str,
        policy_name: &str,
        policy: &StreamingPolicy,
    ) -> Result<StreamingPolicy> {
        validation::entity_name("streamingPolicyName", policy_name)?;
        let props = &policy.properties;
        if props.no_encryption.is_none()
            && props.envelope_encryption.is_none()
            && props.common_encryption_cenc.is_none()
            && props.common_encryption_cbcs.is_none()
        {
            return Err(MediaError::validation(
                "properties",
                "at least one encryption option is required",
            ));
        }
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_POLICIES, policy_name],
        )?;
        self.put(url, policy).await
    }

    /// Delete a custom streaming policy.
    pub async fn delete_streaming_policy(
        &self,
        resource_group: &str,
        account_name: &str,
        policy_name: &str,
    ) -> Result<()> {
        validation::entity_name("streamingPolicyName", policy_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_POLICIES, policy_name],
        )?;
        self.delete(url).await
    }

    /// List streaming policies; `options` narrows and orders the first page.
    pub async fn list_streaming_policies(
        &self,
        resource_group: &str,
        account_name: &str,
        options: Option<&ListOptions>,
    ) -> Result<Page<StreamingPolicy>> {
        let url = self.account_url(resource_group, account_name, &[STREAMING_POLICIES])?;
        self.list_page(url, options).await
    }
}
