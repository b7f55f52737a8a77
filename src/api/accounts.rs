use reqwest::Method;

use crate::client::{Client, PROVIDER_NAMESPACE};
use crate::errors::{MediaError, Result};
use crate::models::{
    CheckNameAvailabilityInput, EntityNameAvailability, MediaService, MediaServiceUpdate,
    SyncStorageKeysInput,
};
use crate::paging::Page;
use crate::validation;

const ACCOUNT_RESOURCE_TYPE: &str = "Microsoft.Media/mediaservices";

impl Client {
    /// Ask whether an account name is still free in a region.
    pub async fn check_media_service_name_availability(
        &self,
        location: &str,
        name: &str,
    ) -> Result<EntityNameAvailability> {
        validation::location(location)?;
        if name.is_empty() {
            return Err(MediaError::validation("name", "must not be empty"));
        }

        let url = self.subscription_url(&[
            "providers",
            PROVIDER_NAMESPACE,
            "locations",
            location,
            "checkNameAvailability",
        ])?;
        let body = CheckNameAvailabilityInput {
            name: name.to_string(),
            resource_type: ACCOUNT_RESOURCE_TYPE.to_string(),
        };
        self.post(url, Some(serde_json::to_value(&body)?)).await
    }

    /// Fetch an account.
    pub async fn get_media_service(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<MediaService> {
        let url = self.account_url(resource_group, account_name, &[])?;
        self.get(url).await
    }

    /// Create or replace an account and wait for provisioning to finish.
    ///
    /// At least one storage account must be attached.
    pub async fn create_or_update_media_service(
        &self,
        resource_group: &str,
        account_name: &str,
        account: &MediaService,
    ) -> Result<MediaService> {
        validation::location(&account.location)?;
        validation::optional_tags(account.tags.as_ref())?;
        validation::non_empty_list("storageAccounts", &account.properties.storage_accounts)?;

        let url = self.account_url(resource_group, account_name, &[])?;
        self.upsert_long_running(Method::PUT, url.clone(), url, account)
            .await
    }

    /// Patch tags or properties of an account.
    pub async fn update_media_service(
        &self,
        resource_group: &str,
        account_name: &str,
        update: &MediaServiceUpdate,
    ) -> Result<MediaService> {
        validation::optional_tags(update.tags.as_ref())?;

        let url = self.account_url(resource_group, account_name, &[])?;
        self.upsert_long_running(Method::PATCH, url.clone(), url, update)
            .await
    }

    /// Delete an account. Attached storage accounts are left alone.
    pub async fn delete_media_service(&self, resource_group: &str, account_name: &str) -> Result<()> {
        let url = self.account_url(resource_group, account_name, &[])?;
        self.delete(url).await
    }

    /// Accounts in one resource group.
    pub async fn list_media_services(&self, resource_group: &str) -> Result<Page<MediaService>> {
        validation::resource_group(resource_group)?;
        let url = self.subscription_url(&[
            "resourceGroups",
            resource_group,
            "providers",
            PROVIDER_NAMESPACE,
            "mediaServices",
        ])?;
        self.get(url).await
    }

    /// Accounts across the whole subscription.
    pub async fn list_media_services_by_subscription(&self) -> Result<Page<MediaService>> {
        let url = self.subscription_url(&["providers", PROVIDER_NAMESPACE, "mediaServices"])?;
        self.get(url).await
    }

    /// Tell the service that the keys of an attached storage account were rotated.
    pub async fn sync_storage_keys(
        &self,
        resource_group: &str,
        account_name: &str,
        storage_account_id: &str,
    ) -> Result<()> {
        if storage_account_id.is_empty() {
            return Err(MediaError::validation("id", "must not be empty"));
        }
        let url = self.account_url(resource_group, account_name, &["syncStorageKeys"])?;
        let body = SyncStorageKeysInput {
            id: storage_account_id.to_string(),
        };
        self.post::<Option<serde_json::Value>>(url, Some(serde_json::to_value(&body)?))
            .await?;
        Ok(())
    }
}
