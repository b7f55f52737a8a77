//! Shared helpers for the wiremock-backed integration tests.

#![allow(dead_code)]

use std::time::Duration;

use mediaservices::{Client, ClientBuilder};
use wiremock::MockServer;

pub const SUBSCRIPTION: &str = "6c3a0a3e-0b1f-4c3d-9a57-2f1c8d0e4b11";
pub const RESOURCE_GROUP: &str = "media-rg";
pub const ACCOUNT: &str = "contosomedia";

/// Path of the test account below the mock server root.
pub fn account_path(rest: &str) -> String {
    format!(
        "/subscriptions/{SUBSCRIPTION}/resourceGroups/{RESOURCE_GROUP}\
         /providers/Microsoft.Media/mediaServices/{ACCOUNT}{rest}"
    )
}

pub fn builder(mock_server: &MockServer) -> ClientBuilder {
    ClientBuilder::new()
        .base_url(mock_server.uri())
        .access_token("test-token")
        .subscription_id(SUBSCRIPTION)
        .poll_interval(Duration::from_millis(10))
        .poll_timeout(Duration::from_secs(5))
}

pub async fn create_test_client(mock_server: &MockServer) -> Client {
    builder(mock_server).build().expect("failed to create client")
}
