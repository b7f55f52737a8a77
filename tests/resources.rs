//! Integration tests for the per-resource operations.
//!
//! Uses wiremock for HTTP mocking. Covers request shape (path, api-version,
//! bearer token, body), status mapping (400/404/409/429/5xx), retry behavior
//! and local validation.

mod common;

use chrono::{Duration as ChronoDuration, Utc};
use common::{account_path, builder, create_test_client, ACCOUNT, RESOURCE_GROUP, SUBSCRIPTION};
use mediaservices::{
    Asset, AssetContainerPermission, AssetProperties, EncoderNamedPreset, Job, JobInput,
    JobOutput, JobProperties, ListContainerSasInput, MediaError, Preset, StreamingLocator,
    StreamingLocatorProperties, Transform, TransformOutput, TransformProperties,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn asset_body(name: &str) -> serde_json::Value {
    json!({
        "id": account_path(&format!("/assets/{name}")),
        "name": name,
        "type": "Microsoft.Media/mediaservices/assets",
        "properties": {
            "assetId": "1b34a6a1-2c9f-4d6e-8f20-5b6c1a2e9d10",
            "created": "2024-03-01T10:00:00Z",
            "container": format!("asset-{name}"),
            "storageAccountName": "contosostore"
        }
    })
}

#[tokio::test]
async fn test_get_asset_sends_token_and_api_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets/input")))
        .and(query_param("api-version", "2023-01-01"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_body("input")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let asset = client
        .get_asset(RESOURCE_GROUP, ACCOUNT, "input")
        .await
        .expect("get failed");

    assert_eq!(asset.name.as_deref(), Some("input"));
    assert_eq!(asset.properties.container.as_deref(), Some("asset-input"));
    assert!(asset.properties.asset_id.is_some());
}

#[tokio::test]
async fn test_create_asset_puts_properties_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(account_path("/assets/output")))
        .and(body_json(json!({
            "properties": { "description": "encoded ladder" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(asset_body("output")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let asset = Asset::new(AssetProperties {
        description: Some("encoded ladder".into()),
        ..Default::default()
    });
    let created = client
        .create_or_update_asset(RESOURCE_GROUP, ACCOUNT, "output", &asset)
        .await
        .expect("create failed");

    assert_eq!(created.name.as_deref(), Some("output"));
}

#[tokio::test]
async fn test_delete_asset_accepts_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(account_path("/assets/stale")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    client
        .delete_asset(RESOURCE_GROUP, ACCOUNT, "stale")
        .await
        .expect("delete failed");
}

#[tokio::test]
async fn test_list_container_sas_posts_input() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(account_path("/assets/input/listContainerSas")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assetContainerSasUrls": ["https://contosostore.blob.core.windows.net/asset-input?sig=abc"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let input = ListContainerSasInput {
        permissions: AssetContainerPermission::ReadWrite,
        expiry_time: Utc::now() + ChronoDuration::hours(1),
    };
    let sas = client
        .list_asset_container_sas(RESOURCE_GROUP, ACCOUNT, "input", &input)
        .await
        .expect("listContainerSas failed");

    assert_eq!(sas.asset_container_sas_urls.len(), 1);
}

#[tokio::test]
async fn test_expired_sas_request_is_rejected_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let input = ListContainerSasInput {
        permissions: AssetContainerPermission::Read,
        expiry_time: Utc::now() - ChronoDuration::minutes(5),
    };
    let result = client
        .list_asset_container_sas(RESOURCE_GROUP, ACCOUNT, "input", &input)
        .await;

    assert!(
        matches!(result, Err(MediaError::Validation { ref field, .. }) if field == "expiryTime")
    );
}

#[tokio::test]
async fn test_invalid_names_never_reach_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;

    let result = client.get_asset(RESOURCE_GROUP, ACCOUNT, "bad/name").await;
    assert!(matches!(result, Err(MediaError::Validation { ref field, .. }) if field == "assetName"));

    let result = client.get_asset(RESOURCE_GROUP, "Not-Valid", "input").await;
    assert!(
        matches!(result, Err(MediaError::Validation { ref field, .. }) if field == "accountName")
    );

    let result = client.get_asset("rg.", ACCOUNT, "input").await;
    assert!(
        matches!(result, Err(MediaError::Validation { ref field, .. }) if field == "resourceGroupName")
    );

    let result = client
        .get_live_event(RESOURCE_GROUP, ACCOUNT, "this-live-event-name-is-far-too-long")
        .await;
    assert!(matches!(result, Err(MediaError::Validation { .. })));
}

#[tokio::test]
async fn test_transform_without_outputs_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let result = client
        .create_or_update_transform(
            RESOURCE_GROUP,
            ACCOUNT,
            "empty",
            &Transform::new(TransformProperties::default()),
        )
        .await;

    assert!(matches!(result, Err(MediaError::Validation { ref field, .. }) if field == "outputs"));
}

#[tokio::test]
async fn test_create_transform_and_job_wire_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(account_path("/transforms/adaptive")))
        .and(body_json(json!({
            "properties": {
                "outputs": [{
                    "preset": {
                        "@odata.type": "#Microsoft.Media.BuiltInStandardEncoderPreset",
                        "presetName": "AdaptiveStreaming"
                    }
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "adaptive",
            "properties": {
                "outputs": [{
                    "onError": "StopProcessingJob",
                    "relativePriority": "Normal",
                    "preset": {
                        "@odata.type": "#Microsoft.Media.BuiltInStandardEncoderPreset",
                        "presetName": "AdaptiveStreaming"
                    }
                }]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(account_path("/transforms/adaptive/jobs/job-1")))
        .and(body_json(json!({
            "properties": {
                "input": {
                    "@odata.type": "#Microsoft.Media.JobInputAsset",
                    "assetName": "input"
                },
                "outputs": [{
                    "@odata.type": "#Microsoft.Media.JobOutputAsset",
                    "assetName": "output"
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "job-1",
            "properties": {
                "state": "Queued",
                "input": {
                    "@odata.type": "#Microsoft.Media.JobInputAsset",
                    "assetName": "input"
                },
                "outputs": [{
                    "@odata.type": "#Microsoft.Media.JobOutputAsset",
                    "assetName": "output",
                    "state": "Queued",
                    "progress": 0
                }]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;

    let transform = Transform::new(TransformProperties {
        outputs: vec![TransformOutput::new(Preset::built_in(
            EncoderNamedPreset::AdaptiveStreaming,
        ))],
        ..Default::default()
    });
    let transform = client
        .create_or_update_transform(RESOURCE_GROUP, ACCOUNT, "adaptive", &transform)
        .await
        .expect("transform failed");
    assert_eq!(transform.properties.outputs.len(), 1);

    let job = Job::new(JobProperties::new(
        JobInput::asset("input"),
        vec![JobOutput::asset("output")],
    ));
    let job = client
        .create_job(RESOURCE_GROUP, ACCOUNT, "adaptive", "job-1", &job)
        .await
        .expect("job failed");
    assert_eq!(job.properties.state, Some(mediaservices::JobState::Queued));
}

#[tokio::test]
async fn test_streaming_locator_end_before_start_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let now = Utc::now();
    let mut props = StreamingLocatorProperties::new("output", "Predefined_ClearStreamingOnly");
    props.start_time = Some(now);
    props.end_time = Some(now - ChronoDuration::hours(1));

    let result = client
        .create_streaming_locator(RESOURCE_GROUP, ACCOUNT, "loc", &StreamingLocator::new(props))
        .await;

    assert!(matches!(result, Err(MediaError::Validation { ref field, .. }) if field == "endTime"));
}

#[tokio::test]
async fn test_list_streaming_locator_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(account_path("/streamingLocators/loc/listPaths")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "streamingPaths": [{
                "streamingProtocol": "Hls",
                "encryptionScheme": "NoEncryption",
                "paths": ["/2a1b/manifest(format=m3u8-cmaf)"]
            }],
            "downloadPaths": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let paths = client
        .list_streaming_locator_paths(RESOURCE_GROUP, ACCOUNT, "loc")
        .await
        .expect("listPaths failed");

    assert_eq!(paths.streaming_paths.len(), 1);
    assert_eq!(paths.streaming_paths[0].paths[0], "/2a1b/manifest(format=m3u8-cmaf)");
}

#[tokio::test]
async fn test_subscriptions_use_resource_manager_api_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/subscriptions/{SUBSCRIPTION}")))
        .and(query_param("api-version", "2020-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": format!("/subscriptions/{SUBSCRIPTION}"),
            "subscriptionId": SUBSCRIPTION,
            "displayName": "Media production",
            "state": "Enabled"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let sub = client
        .get_subscription(SUBSCRIPTION)
        .await
        .expect("get subscription failed");

    assert_eq!(sub.subscription_id, SUBSCRIPTION);
    assert_eq!(sub.display_name.as_deref(), Some("Media production"));
}

#[tokio::test]
async fn test_not_found_maps_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets/missing")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": "NotFound", "message": "Asset 'missing' was not found." }
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let result = client.get_asset(RESOURCE_GROUP, ACCOUNT, "missing").await;

    match result {
        Err(MediaError::NotFound { message }) => {
            assert_eq!(message, "Asset 'missing' was not found.")
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_conflict_and_bad_request_keep_error_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(account_path("/streamingLocators/taken")))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": { "code": "Conflict", "message": "locator exists" }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(account_path("/streamingLocators/bad")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": "BadRequest",
                "message": "invalid policy",
                "target": "streamingPolicyName"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let locator = StreamingLocator::new(StreamingLocatorProperties::new(
        "output",
        "Predefined_ClearStreamingOnly",
    ));

    match client
        .create_streaming_locator(RESOURCE_GROUP, ACCOUNT, "taken", &locator)
        .await
    {
        Err(MediaError::Conflict { error }) => assert_eq!(error.code, "Conflict"),
        other => panic!("expected Conflict, got {other:?}"),
    }

    match client
        .create_streaming_locator(RESOURCE_GROUP, ACCOUNT, "bad", &locator)
        .await
    {
        Err(MediaError::BadRequest { error }) => {
            assert_eq!(error.target.as_deref(), Some("streamingPolicyName"))
        }
        other => panic!("expected BadRequest, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_and_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets/a")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets/b")))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;

    let result = client.get_asset(RESOURCE_GROUP, ACCOUNT, "a").await;
    assert!(matches!(result, Err(MediaError::Authentication { .. })));

    let result = client.get_asset(RESOURCE_GROUP, ACCOUNT, "b").await;
    assert!(matches!(result, Err(MediaError::PermissionDenied { .. })));
}

#[tokio::test]
async fn test_server_error_without_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets/a")))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": "ServiceUnavailable", "message": "try later" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = builder(&mock_server)
        .max_retries(0)
        .build()
        .expect("failed to create client");
    let result = client.get_asset(RESOURCE_GROUP, ACCOUNT, "a").await;

    match result {
        Err(MediaError::Api {
            status_code, code, ..
        }) => {
            assert_eq!(status_code, 503);
            assert_eq!(code, "ServiceUnavailable");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_retry_on_server_error_then_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets/flaky")))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets/flaky")))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_body("flaky")))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let asset = client
        .get_asset(RESOURCE_GROUP, ACCOUNT, "flaky")
        .await
        .expect("retry should recover");

    assert_eq!(asset.name.as_deref(), Some("flaky"));
}

#[tokio::test]
async fn test_rate_limit_honors_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets/busy")))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets/busy")))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_body("busy")))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let started = std::time::Instant::now();
    client
        .get_asset(RESOURCE_GROUP, ACCOUNT, "busy")
        .await
        .expect("rate limit should clear");

    assert!(started.elapsed() < std::time::Duration::from_secs(1));
}

#[tokio::test]
async fn test_rate_limit_exhausts_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets/busy")))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = builder(&mock_server)
        .max_retries(2)
        .build()
        .expect("failed to create client");
    let result = client.get_asset(RESOURCE_GROUP, ACCOUNT, "busy").await;

    match result {
        Err(MediaError::RateLimit { retry_after, .. }) => {
            assert_eq!(retry_after, Some(std::time::Duration::ZERO))
        }
        other => panic!("expected RateLimit, got {other:?}"),
    }
}
