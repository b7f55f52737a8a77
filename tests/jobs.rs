//! Integration tests for `wait_for_job` and job cancellation.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{account_path, create_test_client, ACCOUNT, RESOURCE_GROUP};
use mediaservices::{Job, JobState, MediaError, PollOptions};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JOB_PATH: &str = "/transforms/adaptive/jobs/job-1";

fn job_body(state: &str, progress: u8, error: Option<serde_json::Value>) -> serde_json::Value {
    let mut output = json!({
        "@odata.type": "#Microsoft.Media.JobOutputAsset",
        "assetName": "output",
        "state": state,
        "progress": progress
    });
    if let Some(error) = error {
        output["error"] = error;
    }
    json!({
        "name": "job-1",
        "properties": {
            "state": state,
            "input": {
                "@odata.type": "#Microsoft.Media.JobInputHttp",
                "baseUri": "https://media.example.com/",
                "files": ["ignite.mp4"]
            },
            "outputs": [output]
        }
    })
}

async fn mount_job_sequence(mock_server: &MockServer, states: &[serde_json::Value]) {
    let (last, head) = states.split_last().expect("at least one state");
    for body in head {
        Mock::given(method("GET"))
            .and(path(account_path(JOB_PATH)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .up_to_n_times(1)
            .mount(mock_server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(account_path(JOB_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(last))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_wait_for_job_until_finished() {
    let mock_server = MockServer::start().await;
    mount_job_sequence(
        &mock_server,
        &[
            job_body("Queued", 0, None),
            job_body("Processing", 40, None),
            job_body("Finished", 100, None),
        ],
    )
    .await;

    let client = create_test_client(&mock_server).await;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let opts = PollOptions::new(Duration::from_millis(10), Duration::from_secs(5)).on_progress(
        move |job: &Job| {
            sink.lock().unwrap().push(job.properties.state);
        },
    );

    let job = client
        .wait_for_job(RESOURCE_GROUP, ACCOUNT, "adaptive", "job-1", Some(opts))
        .await
        .expect("wait failed");

    assert_eq!(job.properties.state, Some(JobState::Finished));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            Some(JobState::Queued),
            Some(JobState::Processing),
            Some(JobState::Finished)
        ]
    );
}

#[tokio::test]
async fn test_wait_for_job_uses_client_defaults() {
    let mock_server = MockServer::start().await;
    mount_job_sequence(
        &mock_server,
        &[job_body("Scheduled", 0, None), job_body("Finished", 100, None)],
    )
    .await;

    let client = create_test_client(&mock_server).await;
    let job = client
        .wait_for_job(RESOURCE_GROUP, ACCOUNT, "adaptive", "job-1", None)
        .await
        .expect("wait failed");

    assert_eq!(job.properties.state, Some(JobState::Finished));
}

#[tokio::test]
async fn test_wait_for_job_reports_output_error() {
    let mock_server = MockServer::start().await;
    mount_job_sequence(
        &mock_server,
        &[
            job_body("Processing", 10, None),
            job_body(
                "Error",
                10,
                Some(json!({
                    "code": "DownloadNotAccessible",
                    "message": "input file could not be downloaded",
                    "category": "Download",
                    "retry": "DoNotRetry",
                    "details": []
                })),
            ),
        ],
    )
    .await;

    let client = create_test_client(&mock_server).await;
    let result = client
        .wait_for_job(RESOURCE_GROUP, ACCOUNT, "adaptive", "job-1", None)
        .await;

    match result {
        Err(MediaError::JobFailed {
            name,
            state,
            message,
        }) => {
            assert_eq!(name, "job-1");
            assert_eq!(state, JobState::Error);
            assert_eq!(message, "input file could not be downloaded");
        }
        other => panic!("expected JobFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_canceled_job_is_a_failure() {
    let mock_server = MockServer::start().await;
    mount_job_sequence(&mock_server, &[job_body("Canceled", 0, None)]).await;

    let client = create_test_client(&mock_server).await;
    let result = client
        .wait_for_job(RESOURCE_GROUP, ACCOUNT, "adaptive", "job-1", None)
        .await;

    assert!(matches!(
        result,
        Err(MediaError::JobFailed {
            state: JobState::Canceled,
            ..
        })
    ));
}

#[tokio::test]
async fn test_wait_for_job_times_out() {
    let mock_server = MockServer::start().await;
    mount_job_sequence(&mock_server, &[job_body("Processing", 50, None)]).await;

    let client = create_test_client(&mock_server).await;
    let opts = PollOptions::new(Duration::from_millis(10), Duration::from_millis(60));
    let result = client
        .wait_for_job(RESOURCE_GROUP, ACCOUNT, "adaptive", "job-1", Some(opts))
        .await;

    assert!(matches!(result, Err(MediaError::Timeout(d)) if d == Duration::from_millis(60)));
}

#[tokio::test]
async fn test_cancel_job_posts_action() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(account_path(&format!("{JOB_PATH}/cancelJob"))))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    client
        .cancel_job(RESOURCE_GROUP, ACCOUNT, "adaptive", "job-1")
        .await
        .expect("cancel failed");
}
