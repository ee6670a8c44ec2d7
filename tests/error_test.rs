use github_api_client::{Error, GitHubClient};
use serde_json::Value;

fn client_for(server: &mockito::ServerGuard) -> GitHubClient {
    GitHubClient::with_base_url("test-token", server.url()).unwrap()
}

async fn fetch_with_status(status: usize, body: &str) -> Error {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/resource")
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server);
    let url = format!("{}/resource", server.url());
    client
        .fetch_page::<Value>(&url, &[])
        .await
        .expect_err("non-200 status must be a typed error")
}

#[tokio::test]
async fn status_401_is_an_authentication_error() {
    let err = fetch_with_status(401, r#"{"message": "Bad credentials"}"#).await;
    assert!(matches!(err, Error::Authentication));
}

#[tokio::test]
async fn status_404_is_a_not_found_error() {
    let err = fetch_with_status(404, r#"{"message": "Not Found"}"#).await;
    assert!(matches!(err, Error::NotFound));
}

#[tokio::test]
async fn status_422_is_a_validation_error() {
    let err = fetch_with_status(422, r#"{"message": "Validation Failed"}"#).await;
    assert!(matches!(err, Error::Validation));
}

#[tokio::test]
async fn status_500_carries_the_decoded_message() {
    let err = fetch_with_status(500, r#"{"message": "Server Error"}"#).await;
    match err {
        Error::UnknownStatus { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Server Error");
        }
        other => panic!("expected UnknownStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn status_500_with_non_json_body_uses_the_sentinel() {
    let err = fetch_with_status(500, "<html>Internal Server Error</html>").await;
    match err {
        Error::UnknownStatus { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "response body is not valid JSON");
        }
        other => panic!("expected UnknownStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_json_on_success_is_a_malformed_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/resource")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = client_for(&server);
    let url = format!("{}/resource", server.url());
    let err = client.fetch_page::<Value>(&url, &[]).await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_required_fields_fail_at_the_decode_boundary() {
    let mut server = mockito::Server::new_async().await;
    // Commit entries without the required `commit` object.
    let _mock = server
        .mock("GET", "/repos/o/r/commits")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"sha": "abc123"}]"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .get_repository_commits("o", "r", 100, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn transport_failures_surface_as_network_errors() {
    // Nothing listens on this port.
    let client = GitHubClient::with_base_url("test-token", "http://127.0.0.1:9").unwrap();
    let err = client
        .fetch_page::<Value>("http://127.0.0.1:9/resource", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn mid_collection_failure_aborts_the_whole_collect() {
    let mut server = mockito::Server::new_async().await;
    let _page1 = server
        .mock("GET", "/items")
        .with_status(200)
        .with_header(
            "link",
            &format!("<{}/items-page2>; rel=\"next\"", server.url()),
        )
        .with_body(r#"[{"id": 1}]"#)
        .create_async()
        .await;
    let _page2 = server
        .mock("GET", "/items-page2")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let url = format!("{}/items", server.url());
    // The page already accumulated is discarded along with the error.
    let err = client
        .collect::<Value>(&url, &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound));
}
