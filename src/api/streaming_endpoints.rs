use reqwest::Method;

use crate::client::Client;
use crate::errors::Result;
use crate::models::{StreamingEndpoint, StreamingEntityScaleUnit};
use crate::paging::Page;
use crate::validation::{self, MAX_DESCRIPTION_LEN};

const STREAMING_ENDPOINTS: &str = "streamingEndpoints";

fn check_endpoint(name: &str, endpoint: &StreamingEndpoint) -> Result<()> {
    check_endpoint_patch(name, endpoint)?;
    validation::location(&endpoint.location)
}

fn check_endpoint_patch(name: &str, endpoint: &StreamingEndpoint) -> Result<()> {
    validation::streaming_endpoint_name(name)?;
    validation::optional_tags(endpoint.tags.as_ref())?;
    validation::scale_units(endpoint.properties.scale_units)?;
    validation::description(
        "description",
        endpoint.properties.description.as_deref(),
        MAX_DESCRIPTION_LEN,
    )
}

impl Client {
    /// Fetch a streaming endpoint.
    pub async fn get_streaming_endpoint(
        &self,
        resource_group: &str,
        account_name: &str,
        endpoint_name: &str,
    ) -> Result<StreamingEndpoint> {
        validation::streaming_endpoint_name(endpoint_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_ENDPOINTS, endpoint_name],
        )?;
        self.get(url).await
    }

    /// Create a streaming endpoint and wait until it is provisioned.
    pub async fn create_streaming_endpoint(
        &self,
        resource_group: &str,
        account_name: &str,
        endpoint_name: &str,
        endpoint: &StreamingEndpoint,
        auto_start: bool,
    ) -> Result<StreamingEndpoint> {
        check_endpoint(endpoint_name, endpoint)?;
        let resource_url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_ENDPOINTS, endpoint_name],
        )?;
        let mut url = resource_url.clone();
        url.query_pairs_mut()
            .append_pair("autoStart", if auto_start { "true" } else { "false" });
        self.upsert_long_running(Method::PUT, url, resource_url, endpoint)
            .await
    }

    /// Patch a streaming endpoint and wait for the change to apply.
    pub async fn update_streaming_endpoint(
        &self,
        resource_group: &str,
        account_name: &str,
        endpoint_name: &str,
        endpoint: &StreamingEndpoint,
    ) -> Result<StreamingEndpoint> {
        check_endpoint_patch(endpoint_name, endpoint)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_ENDPOINTS, endpoint_name],
        )?;
        self.upsert_long_running(Method::PATCH, url.clone(), url, endpoint)
            .await
    }

    /// Delete a streaming endpoint and wait until it is gone.
    pub async fn delete_streaming_endpoint(
        &self,
        resource_group: &str,
        account_name: &str,
        endpoint_name: &str,
    ) -> Result<()> {
        validation::streaming_endpoint_name(endpoint_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_ENDPOINTS, endpoint_name],
        )?;
        self.action_long_running(Method::DELETE, url, None).await
    }

    /// List the streaming endpoints of an account.
    pub async fn list_streaming_endpoints(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<Page<StreamingEndpoint>> {
        let url = self.account_url(resource_group, account_name, &[STREAMING_ENDPOINTS])?;
        self.get(url).await
    }

    /// Start a streaming endpoint; billing starts once it is running.
    pub async fn start_streaming_endpoint(
        &self,
        resource_group: &str,
        account_name: &str,
        endpoint_name: &str,
    ) -> Result<()> {
        self.streaming_endpoint_action(resource_group, account_name, endpoint_name, "start", None)
            .await
    }

    /// Stop a running streaming endpoint.
    pub async fn stop_streaming_endpoint(
        &self,
        resource_group: &str,
        account_name: &str,
        endpoint_name: &str,
    ) -> Result<()> {
        self.streaming_endpoint_action(resource_group, account_name, endpoint_name, "stop", None)
            .await
    }

    /// Change the number of premium streaming units (0-10).
    pub async fn scale_streaming_endpoint(
        &self,
        resource_group: &str,
        account_name: &str,
        endpoint_name: &str,
        scale_units: u32,
    ) -> Result<()> {
        validation::scale_units(scale_units)?;
        let body = StreamingEntityScaleUnit {
            scale_unit: scale_units,
        };
        self.streaming_endpoint_action(
            resource_group,
            account_name,
            endpoint_name,
            "scale",
            Some(serde_json::to_value(body)?),
        )
        .await
    }

    async fn streaming_endpoint_action(
        &self,
        resource_group: &str,
        account_name: &str,
        endpoint_name: &str,
        action: &str,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        validation::streaming_endpoint_name(endpoint_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[STREAMING_ENDPOINTS, endpoint_name, action],
        )?;
        self.action_long_running(Method::POST, url, body).await
    }
}
