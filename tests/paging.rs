//! Integration tests for paged listings: OData options, next-link traversal,
//! the repeated-link guard and the lazy streams.

mod common;

use common::{account_path, create_test_client, ACCOUNT, RESOURCE_GROUP};
use futures::TryStreamExt;
use mediaservices::{Asset, ListOptions, MediaError, Page};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn assets(names: &[&str]) -> Vec<serde_json::Value> {
    names
        .iter()
        .map(|n| json!({ "name": n, "properties": { "container": format!("asset-{n}") } }))
        .collect()
}

/// Mount a three-page asset listing: a,b -> c,d -> e.
async fn mount_three_pages(mock_server: &MockServer) {
    let list = account_path("/assets");
    let link = |token: &str| {
        format!(
            "{}{list}?api-version=2023-01-01&$skiptoken={token}",
            mock_server.uri()
        )
    };

    Mock::given(method("GET"))
        .and(path(list.as_str()))
        .and(query_param_is_missing("$skiptoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": assets(&["a", "b"]),
            "@odata.nextLink": link("p2")
        })))
        .expect(1)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(list.as_str()))
        .and(query_param("$skiptoken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": assets(&["c", "d"]),
            "@odata.nextLink": link("p3")
        })))
        .expect(1)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(list.as_str()))
        .and(query_param("$skiptoken", "p3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": assets(&["e"])
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

fn names(items: &[Asset]) -> Vec<&str> {
    items.iter().filter_map(|a| a.name.as_deref()).collect()
}

#[tokio::test]
async fn test_list_options_become_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(account_path("/assets")))
        .and(query_param("api-version", "2023-01-01"))
        .and(query_param("$filter", "properties.created gt 2024-01-01T00:00:00Z"))
        .and(query_param("$top", "2"))
        .and(query_param("$orderby", "properties.created desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": assets(&["newest", "older"])
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let opts = ListOptions::new()
        .filter("properties.created gt 2024-01-01T00:00:00Z")
        .top(2)
        .orderby("properties.created desc");
    let page = client
        .list_assets(RESOURCE_GROUP, ACCOUNT, Some(&opts))
        .await
        .expect("list failed");

    assert_eq!(names(&page.value), vec!["newest", "older"]);
    assert!(!page.has_more());
}

#[tokio::test]
async fn test_collect_all_follows_next_links() {
    let mock_server = MockServer::start().await;
    mount_three_pages(&mock_server).await;

    let client = create_test_client(&mock_server).await;
    let first = client
        .list_assets(RESOURCE_GROUP, ACCOUNT, None)
        .await
        .expect("list failed");
    assert_eq!(first.continuation_token().as_deref(), Some("p2"));

    let all = client.collect_all(first).await.expect("collect failed");
    assert_eq!(names(&all), vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_next_page_walks_one_page_at_a_time() {
    let mock_server = MockServer::start().await;
    mount_three_pages(&mock_server).await;

    let client = create_test_client(&mock_server).await;
    let mut page = client
        .list_assets(RESOURCE_GROUP, ACCOUNT, None)
        .await
        .expect("list failed");
    let mut sizes = vec![page.value.len()];

    while let Some(next) = client.next_page(&page).await.expect("next page failed") {
        sizes.push(next.value.len());
        page = next;
    }

    assert_eq!(sizes, vec![2, 2, 1]);
}

#[tokio::test]
async fn test_items_stream_spans_pages() {
    let mock_server = MockServer::start().await;
    mount_three_pages(&mock_server).await;

    let client = create_test_client(&mock_server).await;
    let first = client
        .list_assets(RESOURCE_GROUP, ACCOUNT, None)
        .await
        .expect("list failed");

    let items: Vec<Asset> = client
        .items(first)
        .try_collect()
        .await
        .expect("stream failed");
    assert_eq!(names(&items), vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_pages_stream_is_lazy() {
    let mock_server = MockServer::start().await;
    let list = account_path("/assets");

    Mock::given(method("GET"))
        .and(path(list.as_str()))
        .and(query_param("$skiptoken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let first: Page<Asset> = serde_json::from_value(json!({
        "value": assets(&["a"]),
        "@odata.nextLink": format!("{}{list}?$skiptoken=p2", mock_server.uri())
    }))
    .expect("page json");

    let mut pages = Box::pin(client.pages(first));
    let page = pages
        .try_next()
        .await
        .expect("stream failed")
        .expect("first page");
    assert_eq!(names(&page.value), vec!["a"]);
}

#[tokio::test]
async fn test_repeated_next_link_is_rejected() {
    let mock_server = MockServer::start().await;
    let list = account_path("/assets");
    let looping = format!(
        "{}{list}?api-version=2023-01-01&$skiptoken=loop",
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path(list.as_str()))
        .and(query_param("$skiptoken", "loop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": assets(&["x"]),
            "@odata.nextLink": looping
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let first: Page<Asset> = serde_json::from_value(json!({
        "value": [],
        "@odata.nextLink": looping
    }))
    .expect("page json");

    let result = client.collect_all(first).await;
    assert!(matches!(result, Err(MediaError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_zero_top_is_rejected_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let result = client
        .list_assets(RESOURCE_GROUP, ACCOUNT, Some(&ListOptions::new().top(0)))
        .await;

    assert!(matches!(result, Err(MediaError::Validation { .. })));
}

#[tokio::test]
async fn test_items_stream_stops_on_repeated_next_link() {
    let mock_server = MockServer::start().await;
    let list = account_path("/assets");
    let looping = format!(
        "{}{list}?api-version=2023-01-01&$skiptoken=loop",
        mock_server.uri()
    );

    Mock::given(method("GET"))
        .and(path(list.as_str()))
        .and(query_param("$skiptoken", "loop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": assets(&["x"]),
            "@odata.nextLink": looping
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server).await;
    let first: Page<Asset> = serde_json::from_value(json!({
        "value": assets(&["a"]),
        "@odata.nextLink": looping
    }))
    .expect("page json");

    let mut items = Box::pin(client.items(first));
    let mut seen = Vec::new();
    let err = loop {
        match items.try_next().await {
            Ok(Some(asset)) => seen.push(asset),
            Ok(None) => panic!("stream ended without reporting the loop"),
            Err(e) => break e,
        }
    };

    assert_eq!(names(&seen), vec!["a", "x"]);
    assert!(matches!(err, MediaError::InvalidResponse(_)));
}
