use reqwest::Method;

use crate::client::Client;
use crate::errors::{MediaError, Result};
use crate::models::{LiveEvent, LiveEventActionInput, LiveOutput};
use crate::paging::Page;
use crate::validation::{self, MAX_DESCRIPTION_LEN, MAX_LIVE_EVENT_DESCRIPTION_LEN};

const LIVE_EVENTS: &str = "liveEvents";
const LIVE_OUTPUTS: &str = "liveOutputs";

fn check_live_event(name: &str, event: &LiveEvent) -> Result<()> {
    check_live_event_patch(name, event)?;
    validation::location(&event.location)
}

/// PATCH bodies may leave `location` empty.
fn check_live_event_patch(name: &str, event: &LiveEvent) -> Result<()> {
    validation::live_event_name(name)?;
    validation::optional_tags(event.tags.as_ref())?;
    validation::description(
        "description",
        event.properties.description.as_deref(),
        MAX_LIVE_EVENT_DESCRIPTION_LEN,
    )
}

impl Client {
    // -----------------------------------------------------------------------
    // Live events
    // -----------------------------------------------------------------------

    /// Fetch a live event.
    pub async fn get_live_event(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
    ) -> Result<LiveEvent> {
        validation::live_event_name(live_event_name)?;
        let url = self.account_url(resource_group, account_name, &[LIVE_EVENTS, live_event_name])?;
        self.get(url).await
    }

    /// Create a live event and wait until it is provisioned. With
    /// `auto_start` the event goes straight to `Running` and starts billing.
    pub async fn create_live_event(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
        event: &LiveEvent,
        auto_start: bool,
    ) -> Result<LiveEvent> {
        check_live_event(live_event_name, event)?;
        let resource_url =
            self.account_url(resource_group, account_name, &[LIVE_EVENTS, live_event_name])?;
        let mut url = resource_url.clone();
        url.query_pairs_mut()
            .append_pair("autoStart", if auto_start { "true" } else { "false" });
        self.upsert_long_running(Method::PUT, url, resource_url, event)
            .await
    }

    /// Patch a live event and wait for the change to apply.
    pub async fn update_live_event(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
        event: &LiveEvent,
    ) -> Result<LiveEvent> {
        check_live_event_patch(live_event_name, event)?;
        let url = self.account_url(resource_group, account_name, &[LIVE_EVENTS, live_event_name])?;
        self.upsert_long_running(Method::PATCH, url.clone(), url, event)
            .await
    }

    /// Delete a live event and wait until it is gone. A running event is
    /// stopped first by the service.
    pub async fn delete_live_event(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
    ) -> Result<()> {
        validation::live_event_name(live_event_name)?;
        let url = self.account_url(resource_group, account_name, &[LIVE_EVENTS, live_event_name])?;
        self.action_long_running(Method::DELETE, url, None).await
    }

    /// List the live events of an account.
    pub async fn list_live_events(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<Page<LiveEvent>> {
        let url = self.account_url(resource_group, account_name, &[LIVE_EVENTS])?;
        self.get(url).await
    }

    /// Start a stopped or allocated live event.
    pub async fn start_live_event(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
    ) -> Result<()> {
        self.live_event_action(resource_group, account_name, live_event_name, "start", None)
            .await
    }

    /// Stop a running live event, optionally deleting its live outputs.
    pub async fn stop_live_event(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
        remove_outputs_on_stop: bool,
    ) -> Result<()> {
        let body = LiveEventActionInput {
            remove_outputs_on_stop: Some(remove_outputs_on_stop),
        };
        self.live_event_action(
            resource_group,
            account_name,
            live_event_name,
            "stop",
            Some(serde_json::to_value(&body)?),
        )
        .await
    }

    /// Reset a running live event; live outputs are stopped and restarted.
    pub async fn reset_live_event(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
    ) -> Result<()> {
        self.live_event_action(resource_group, account_name, live_event_name, "reset", None)
            .await
    }

    /// Allocate resources so a later start is fast. The event ends in `StandBy`.
    pub async fn allocate_live_event(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
    ) -> Result<()> {
        self.live_event_action(
            resource_group,
            account_name,
            live_event_name,
            "allocate",
            None,
        )
        .await
    }

    async fn live_event_action(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
        action: &str,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        validation::live_event_name(live_event_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[LIVE_EVENTS, live_event_name, action],
        )?;
        self.action_long_running(Method::POST, url, body).await
    }

    // -----------------------------------------------------------------------
    // Live outputs
    // -----------------------------------------------------------------------

    /// Fetch a live output.
    pub async fn get_live_output(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
        live_output_name: &str,
    ) -> Result<LiveOutput> {
        validation::live_event_name(live_event_name)?;
        validation::live_output_name(live_output_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[LIVE_EVENTS, live_event_name, LIVE_OUTPUTS, live_output_name],
        )?;
        self.get(url).await
    }

    /// Start recording a live event into an asset.
    pub async fn create_live_output(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
        live_output_name: &str,
        output: &LiveOutput,
    ) -> Result<LiveOutput> {
        validation::live_event_name(live_event_name)?;
        validation::live_output_name(live_output_name)?;
        validation::entity_name("assetName", &output.properties.asset_name)?;
        validation::description(
            "description",
            output.properties.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        )?;
        if output.properties.archive_window_length.is_empty() {
            return Err(MediaError::validation(
                "archiveWindowLength",
                "must not be empty",
            ));
        }

        let url = self.account_url(
            resource_group,
            account_name,
            &[LIVE_EVENTS, live_event_name, LIVE_OUTPUTS, live_output_name],
        )?;
        self.upsert_long_running(Method::PUT, url.clone(), url, output)
            .await
    }

    /// Stop recording. The asset and what was recorded so far are kept.
    pub async fn delete_live_output(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
        live_output_name: &str,
    ) -> Result<()> {
        validation::live_event_name(live_event_name)?;
        validation::live_output_name(live_output_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[LIVE_EVENTS, live_event_name, LIVE_OUTPUTS, live_output_name],
        )?;
        self.action_long_running(Method::DELETE, url, None).await
    }

    /// List the live outputs of a live event.
    pub async fn list_live_outputs(
        &self,
        resource_group: &str,
        account_name: &str,
        live_event_name: &str,
    ) -> Result<Page<LiveOutput>> {
        validation::live_event_name(live_event_name)?;
        let url = self.account_url(
            resource_group,
            account_name,
            &[LIVE_EVENTS, live_event_name, LIVE_OUTPUTS],
        )?;
        self.get(url).await
    }
}
