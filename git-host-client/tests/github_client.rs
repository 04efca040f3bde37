use std::time::Duration;

use git_host_client::{GitHubClient, HostError, HostOperation, SourceHost};
use mockito::Matcher;
use serde_json::json;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n+added line\n-removed line\n";

#[tokio::test]
async fn fetch_diff_returns_body_verbatim() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/o/r/pulls/1")
        .match_header("authorization", "Bearer tok")
        .match_header("accept", "application/vnd.github.v3.diff")
        .match_header("user-agent", Matcher::Regex("^pr-review-backend/".into()))
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body(DIFF)
        .create_async()
        .await;

    let client = GitHubClient::new().unwrap();
    let url = format!("{}/repos/o/r/pulls/1", server.url());
    let diff = client.fetch_diff(&url, "tok").await.unwrap();

    assert_eq!(diff, DIFF);
    mock.assert_async().await;
}

#[tokio::test]
async fn fetch_diff_404_keeps_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/o/r/pulls/404")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .create_async()
        .await;

    let client = GitHubClient::new().unwrap();
    let url = format!("{}/repos/o/r/pulls/404", server.url());
    let err = client.fetch_diff(&url, "tok").await.unwrap_err();

    match &err {
        HostError::HttpStatus { op, code, body, .. } => {
            assert_eq!(*op, HostOperation::FetchDiff);
            assert_eq!(*code, 404);
            assert_eq!(body, r#"{"message":"Not Found"}"#);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.kind(), "http_status");
}

#[tokio::test]
async fn post_comment_sends_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/repos/o/r/issues/1/comments")
        .match_header("authorization", "Bearer tok")
        .match_header("accept", "application/vnd.github+json")
        .match_body(Matcher::Json(json!({ "body": "## Summary\nLGTM" })))
        .with_status(201)
        .with_body(r#"{"id":1}"#)
        .create_async()
        .await;

    let client = GitHubClient::new().unwrap();
    let url = format!("{}/repos/o/r/issues/1/comments", server.url());
    client
        .post_comment(&url, "## Summary\nLGTM", "tok")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn post_comment_server_error_is_classified() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/comments")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let client = GitHubClient::new().unwrap();
    let url = format!("{}/comments", server.url());
    let err = client.post_comment(&url, "x", "tok").await.unwrap_err();

    assert!(matches!(
        err,
        HostError::HttpStatus {
            op: HostOperation::PostComment,
            code: 502,
            ..
        }
    ));
}

#[tokio::test]
async fn refused_connection_is_a_connection_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GitHubClient::new().unwrap();
    let err = client
        .fetch_diff(&format!("http://{addr}/pulls/1"), "tok")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "connection");
}

#[tokio::test]
async fn silent_host_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Accept and hold connections without ever answering.
        let mut held = Vec::new();
        while let Ok((sock, _)) = listener.accept().await {
            held.push(sock);
        }
    });

    let client = GitHubClient::with_timeout(Duration::from_millis(200)).unwrap();
    let err = client
        .fetch_diff(&format!("http://{addr}/pulls/1"), "tok")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "timeout");
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn truncated_error_body_still_reports_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut sock, _)) = listener.accept().await {
            // Drain the request head so closing does not reset the connection.
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match sock.read(&mut buf).await {
                    Ok(0) | Err(_) => return,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            // Promise 64 bytes, send 7, then hang up.
            let _ = sock
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 64\r\n\r\npartial")
                .await;
        }
    });

    let client = GitHubClient::new().unwrap();
    let err = client
        .fetch_diff(&format!("http://{addr}/pulls/1"), "tok")
        .await
        .unwrap_err();

    match err {
        HostError::HttpStatus { code, body, .. } => {
            assert_eq!(code, 502);
            assert!(body.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn token_with_newline_is_rejected_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = GitHubClient::new().unwrap();
    let err = client
        .fetch_diff(&format!("{}/pulls/1", server.url()), "tok\nen")
        .await
        .unwrap_err();

    assert!(matches!(err, HostError::InvalidToken));
    mock.assert_async().await;
}
