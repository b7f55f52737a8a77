use crate::client::Client;
use crate::errors::Result;
use crate::models::{ContentKeyPolicy, ContentKeyPolicyProperties};
use crate::paging::{ListOptions, Page};
use crate::validation::{self, MAX_DESCRIPTION_LEN};

const CONTENT_KEY_POLICIES: &str = "contentKeyPolicies";

fn check_policy(name: &str, policy: &ContentKeyPolicy) -> Result<()> {
    validation::entity_name("contentKeyPolicyName", name)?;
    validation::description(
        "description",
        policy.properties.description.as_deref(),
        MAX_DESCRIPTION_LEN,
    )?;
    validation::non_empty_list("options", &policy.properties.options)
}

impl Client {
    /// Get a content key policy. Secrets in the options come back blank.
    pub async fn get_content_key_policy(
        &self,
        resource_group: &str,
        account_name: &str,
        policy_name: &str,
    ) -> Result<ContentKeyPolicy> {
        validation::entity_name("contentKeyPolicyName", policy_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[CONTENT_KEY_POLICIES, policy_name],
        )?;
        self.get(url).await
    }

    /// Create or replace a content key policy. At least one option is required.
    pub async fn create_or_update_content_key_policy(
        &self,
        resource_group: &str,
        account_name: &str,
        policy_name: &str,
        policy: &ContentKeyPolicy,
    ) -> Result<ContentKeyPolicy> {
        check_policy(policy_name, policy)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[CONTENT_KEY_POLICIES, policy_name],
        )?;
        self.put(url, policy).await
    }

    /// Patch a content key policy.
    pub async fn update_content_key_policy(
        &self,
        resource_group: &str,
        account_name: &str,
        policy_name: &str,
        policy: &ContentKeyPolicy,
    ) -> Result<ContentKeyPolicy> {
        check_policy(policy_name, policy)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[CONTENT_KEY_POLICIES, policy_name],
        )?;
        self.patch(url, policy).await
    }

    /// Delete a content key policy.
    pub async fn delete_content_key_policy(
        &self,
        resource_group: &str,
        account_name: &str,
        policy_name: &str,
    ) -> Result<()> {
        validation::entity_name("contentKeyPolicyName", policy_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[CONTENT_KEY_POLICIES, policy_name],
        )?;
        self.delete(url).await
    }

    /// List content key policies; `options` narrows and orders the first page.
    pub async fn list_content_key_policies(
        &self,
        resource_group: &str,
        account_name: &str,
        options: Option<&ListOptions>,
    ) -> Result<Page<ContentKeyPolicy>> {
        let url = self.account_url(resource_group, account_name, &[CONTENT_KEY_POLICIES])?;
        self.list_page(url, options).await
    }

    /// Policy properties including verification keys and DRM secrets.
    pub async fn get_content_key_policy_properties_with_secrets(
        &self,
        resource_group: &str,
        account_name: &str,
        policy_name: &str,
    ) -> Result<ContentKeyPolicyProperties> {
        validation::entity_name("contentKeyPolicyName", policy_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[CONTENT_KEY_POLICIES, policy_name, "getPolicyPropertiesWithSecrets"],
        )?;
        self.post(url, None).await
    }
}
