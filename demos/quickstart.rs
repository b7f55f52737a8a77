//! Quick-start for the media services client.
//!
//! Run with:
//!   AZURE_ACCESS_TOKEN=eyJ0... AZURE_SUBSCRIPTION_ID=... cargo run --example quickstart
//!
//! Set `RUST_LOG=mediaservices=debug` to see every request and poll.

use std::time::Duration;

use futures::TryStreamExt;
use mediaservices::models::predefined_streaming_policies;
use mediaservices::{
    Asset, AssetProperties, ClientBuilder, EncoderNamedPreset, Job, JobInput, JobOutput,
    JobProperties, ListOptions, LiveEvent, LiveEventInput, LiveEventInputProtocol,
    LiveEventProperties, PollOptions, Preset, StreamingLocator, StreamingLocatorProperties,
    Transform, TransformOutput, TransformProperties,
};
use tracing_subscriber::EnvFilter;

const RESOURCE_GROUP: &str = "media-rg";
const ACCOUNT: &str = "contosomedia";

#[tokio::main]
async fn main() -> mediaservices::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // -----------------------------------------------------------------------
    // 1. Create a client (reads AZURE_ACCESS_TOKEN / AZURE_SUBSCRIPTION_ID)
    // -----------------------------------------------------------------------
    let client = ClientBuilder::new()
        .poll_interval(Duration::from_secs(2))
        .build()?;

    let account = client.get_media_service(RESOURCE_GROUP, ACCOUNT).await?;
    println!(
        "Account {} in {}",
        account.name.as_deref().unwrap_or(ACCOUNT),
        account.location
    );
    println!();

    // -----------------------------------------------------------------------
    // 2. Encode an asset with a built-in preset and wait for the job
    // -----------------------------------------------------------------------
    let output = Asset::new(AssetProperties {
        description: Some("Quick-start encode".into()),
        ..Default::default()
    });
    client
        .create_or_update_asset(RESOURCE_GROUP, ACCOUNT, "output", &output)
        .await?;

    let transform = Transform::new(TransformProperties {
        description: Some("Adaptive bitrate ladder".into()),
        outputs: vec![TransformOutput::new(Preset::built_in(
            EncoderNamedPreset::AdaptiveStreaming,
        ))],
        ..Default::default()
    });
    client
        .create_or_update_transform(RESOURCE_GROUP, ACCOUNT, "adaptive", &transform)
        .await?;

    let job = Job::new(JobProperties::new(
        JobInput::http(
            "https://media.example.com/samples/",
            vec!["ignite.mp4".into()],
        ),
        vec![JobOutput::asset("output")],
    ));
    client
        .create_job(RESOURCE_GROUP, ACCOUNT, "adaptive", "quickstart-job", &job)
        .await?;

    let opts = PollOptions::new(Duration::from_secs(5), Duration::from_secs(30 * 60)).on_progress(
        |job: &Job| {
            let state = job.properties.state;
            let progress: Vec<u8> = job
                .properties
                .outputs
                .iter()
                .filter_map(|o| match o {
                    JobOutput::Asset(a) => a.progress,
                })
                .collect();
            println!("  state: {state:?} progress: {progress:?}");
        },
    );
    client
        .wait_for_job(RESOURCE_GROUP, ACCOUNT, "adaptive", "quickstart-job", Some(opts))
        .await?;
    println!("Job finished");
    println!();

    // -----------------------------------------------------------------------
    // 3. Publish the output and print playback paths
    // -----------------------------------------------------------------------
    let locator = StreamingLocator::new(StreamingLocatorProperties::new(
        "output",
        predefined_streaming_policies::CLEAR_STREAMING_ONLY,
    ));
    client
        .create_streaming_locator(RESOURCE_GROUP, ACCOUNT, "quickstart-locator", &locator)
        .await?;

    let endpoint = client
        .get_streaming_endpoint(RESOURCE_GROUP, ACCOUNT, "default")
        .await?;
    let host = endpoint.properties.host_name.unwrap_or_default();

    let paths = client
        .list_streaming_locator_paths(RESOURCE_GROUP, ACCOUNT, "quickstart-locator")
        .await?;
    for sp in &paths.streaming_paths {
        for p in &sp.paths {
            println!("  {:?}: https://{host}{p}", sp.streaming_protocol);
        }
    }
    println!();

    // -----------------------------------------------------------------------
    // 4. Create a pass-through live event (long-running operation)
    // -----------------------------------------------------------------------
    let event = LiveEvent::new(
        account.location.clone(),
        LiveEventProperties {
            input: LiveEventInput {
                streaming_protocol: LiveEventInputProtocol::Rtmp,
                ..Default::default()
            },
            ..Default::default()
        },
    );
    let event = client
        .create_live_event(RESOURCE_GROUP, ACCOUNT, "quickstart-live", &event, false)
        .await?;
    println!("Live event state: {:?}", event.properties.resource_state);
    client
        .delete_live_event(RESOURCE_GROUP, ACCOUNT, "quickstart-live")
        .await?;
    println!();

    // -----------------------------------------------------------------------
    // 5. Walk every asset, newest first
    // -----------------------------------------------------------------------
    let opts = ListOptions::new().orderby("properties.created desc").top(50);
    let first = client
        .list_assets(RESOURCE_GROUP, ACCOUNT, Some(&opts))
        .await?;

    let mut assets = Box::pin(client.items(first));
    while let Some(asset) = assets.try_next().await? {
        println!(
            "  {} | {:?}",
            asset.name.unwrap_or_default(),
            asset.properties.created
        );
    }

    Ok(())
}
