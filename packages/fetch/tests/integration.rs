use std::time::Duration;

use jsonlight_core::Access;
use jsonlight_fetch::{FetchError, Fetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_object_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/config.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "svc",
            "replicas": 3,
            "tags": ["a", "b"]
        })))
        .mount(&server)
        .await;

    let url = format!("{}/config.json", server.uri());

    let (name, replicas, tags, status) = tokio::task::spawn_blocking(move || {
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let (object, status) = fetcher.fetch_object(&url).unwrap();
        (
            object.get_string("name").unwrap(),
            object.get_int("replicas").unwrap(),
            object.get_array("tags").unwrap().join(","),
            status,
        )
    })
    .await
    .unwrap();

    assert_eq!(status, 200);
    assert_eq!(name, "svc");
    assert_eq!(replicas, 3);
    assert_eq!(tags, "a,b");
}

#[tokio::test]
async fn test_error_status_is_returned() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());

    let fetched = tokio::task::spawn_blocking(move || {
        Fetcher::new(Duration::from_secs(5))
            .unwrap()
            .fetch(&url)
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(fetched.status, 404);
    assert_eq!(&fetched.body[..], b"not here");
}

#[tokio::test]
async fn test_undecodable_body_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let url = format!("{}/broken", server.uri());

    let err = tokio::task::spawn_blocking(move || {
        Fetcher::new(Duration::from_secs(5))
            .unwrap()
            .fetch_object(&url)
            .unwrap_err()
    })
    .await
    .unwrap();

    assert!(matches!(err, FetchError::Decode { status: 500, .. }));
}

#[tokio::test]
async fn test_timeout_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let url = format!("{}/slow", server.uri());

    let err = tokio::task::spawn_blocking(move || {
        jsonlight_fetch::fetch(&url, Duration::from_millis(200)).unwrap_err()
    })
    .await
    .unwrap();

    assert!(matches!(err, FetchError::Http(_)));
    assert_eq!(err.status(), 0);
}
