use super::test_downloader;
use crate::error::Error;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn users_page(ids: impl IntoIterator<Item = String>) -> serde_json::Value {
    let users: Vec<_> = ids
        .into_iter()
        .map(|id| json!({ "userId": id }))
        .collect();
    json!({ "error": false, "body": { "users": users } })
}

#[tokio::test]
async fn accumulates_pages_until_the_first_empty_page() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/ajax/user/123/following"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "24"))
        .and(query_param("rest", "show"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(users_page((0..24).map(|i| format!("a{i}")))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ajax/user/123/following"))
        .and(query_param("offset", "24"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(users_page((0..24).map(|i| format!("b{i}")))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ajax/user/123/following"))
        .and(query_param("offset", "48"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_page(std::iter::empty())))
        .expect(1)
        .mount(&server)
        .await;

    let (downloader, _) = test_downloader(&server.uri(), temp.path());
    let artists = downloader.list_followed_artists().await.unwrap();

    // two full pages, in page order with per-page order preserved
    assert_eq!(artists.len(), 48);
    assert_eq!(artists[0].as_str(), "a0");
    assert_eq!(artists[23].as_str(), "a23");
    assert_eq!(artists[24].as_str(), "b0");
    assert_eq!(artists[47].as_str(), "b23");

    // exactly three requests: page 0, page 1, and the empty page 2
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn empty_first_page_yields_no_artists() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/ajax/user/123/following"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_page(std::iter::empty())))
        .expect(1)
        .mount(&server)
        .await;

    let (downloader, _) = test_downloader(&server.uri(), temp.path());
    let artists = downloader.list_followed_artists().await.unwrap();
    assert!(artists.is_empty());
}

#[tokio::test]
async fn error_envelope_aborts_enumeration() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/ajax/user/123/following"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": true,
            "message": "invalid session"
        })))
        .mount(&server)
        .await;

    let (downloader, _) = test_downloader(&server.uri(), temp.path());
    let err = downloader.list_followed_artists().await.unwrap_err();
    match err {
        Error::Api(message) => assert_eq!(message, "invalid session"),
        other => panic!("expected Api error, got {other:?}"),
    }
}
