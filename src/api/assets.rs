use chrono::Utc;

use crate::client::Client;
use crate::errors::{MediaError, Result};
use crate::models::{
    Asset, AssetContainerSas, ListContainerSasInput, ListStreamingLocatorsResponse,
    StorageEncryptedAssetDecryptionData,
};
use crate::paging::{ListOptions, Page};
use crate::validation::{self, MAX_DESCRIPTION_LEN};

const ASSETS: &str = "assets";

impl Client {
    /// Get an asset by name.
    pub async fn get_asset(
        &self,
        resource_group: &str,
        account_name: &str,
        asset_name: &str,
    ) -> Result<Asset> {
        validation::entity_name("assetName", asset_name)?;
        let url = self.account_url(resource_group, account_name, &[ASSETS, asset_name])?;
        self.get(url).await
    }

    /// Create an asset, or replace the mutable fields of an existing one.
    pub async fn create_or_update_asset(
        &self,
        resource_group: &str,
        account_name: &str,
        asset_name: &str,
        asset: &Asset,
    ) -> Result<Asset> {
        validation::entity_name("assetName", asset_name)?;
        validation::description(
            "description",
            asset.properties.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        )?;
        let url = self.account_url(resource_group, account_name, &[ASSETS, asset_name])?;
        self.put(url, asset).await
    }

    /// Patch an asset; only `alternate_id` and `description` can change.
    pub async fn update_asset(
        &self,
        resource_group: &str,
        account_name: &str,
        asset_name: &str,
        asset: &Asset,
    ) -> Result<Asset> {
        validation::entity_name("assetName", asset_name)?;
        validation::description(
            "description",
            asset.properties.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        )?;
        let url = self.account_url(resource_group, account_name, &[ASSETS, asset_name])?;
        self.patch(url, asset).await
    }

    /// Delete an asset. Its blob container is deleted with it.
    pub async fn delete_asset(
        &self,
        resource_group: &str,
        account_name: &str,
        asset_name: &str,
    ) -> Result<()> {
        validation::entity_name("assetName", asset_name)?;
        let url = self.account_url(resource_group, account_name, &[ASSETS, asset_name])?;
        self.delete(url).await
    }

    /// First page of assets; supports `$filter`, `$top` and `$orderby`.
    pub async fn list_assets(
        &self,
        resource_group: &str,
        account_name: &str,
        options: Option<&ListOptions>,
    ) -> Result<Page<Asset>> {
        let url = self.account_url(resource_group, account_name, &[ASSETS])?;
        self.list_page(url, options).await
    }

    /// SAS URLs for reading or writing the asset's blob container.
    ///
    /// `input.expiry_time` must lie in the future.
    pub async fn list_asset_container_sas(
        &self,
        resource_group: &str,
        account_name: &str,
        asset_name: &str,
        input: &ListContainerSasInput,
    ) -> Result<AssetContainerSas> {
        validation::entity_name("assetName", asset_name)?;
        if input.expiry_time <= Utc::now() {
            return Err(MediaError::validation(
                "expiryTime",
                "must be in the future",
            ));
        }
        let url = self.account_url(
            resource_group,
            account_name,
            &[ASSETS, asset_name, "listContainerSas"],
        )?;
        self.post(url, Some(serde_json::to_value(input)?)).await
    }

    /// Key and per-file IVs for an asset stored with client-side encryption.
    pub async fn get_asset_encryption_key(
        &self,
        resource_group: &str,
        account_name: &str,
        asset_name: &str,
    ) -> Result<StorageEncryptedAssetDecryptionData> {
        validation::entity_name("assetName", asset_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[ASSETS, asset_name, "getEncryptionKey"],
        )?;
        self.post(url, None).await
    }

    /// Streaming locators that publish this asset.
    pub async fn list_asset_streaming_locators(
        &self,
        resource_group: &str,
        account_name: &str,
        asset_name: &str,
    ) -> Result<ListStreamingLocatorsResponse> {
        validation::entity_name("assetName", asset_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[ASSETS, asset_name, "listStreamingLocators"],
        )?;
        self.post(url, None).await
    }
}
