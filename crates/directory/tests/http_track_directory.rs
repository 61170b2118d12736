use broadcast::{DirectoryError, TrackDirectory};
use directory::HttpTrackDirectory;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn directory_for(server: &MockServer) -> HttpTrackDirectory {
    HttpTrackDirectory::new(format!("{}/v3/tracks", server.uri())).unwrap()
}

#[tokio::test]
async fn decodes_track_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/tracks"))
        .and(header("user-agent", "exercism/blazon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [
                {
                    "id": "go",
                    "language": "Go",
                    "active": true,
                    "problems": [{"slug": "hello-world"}, {"slug": "two-fer"}]
                },
                {
                    "id": "cobol",
                    "language": "COBOL",
                    "active": false,
                    "problems": []
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = directory_for(&server).await.list_tracks().await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].id.as_str(), "go");
    assert!(tracks[0].has("two-fer"));
    assert!(!tracks[1].active);
}

#[tokio::test]
async fn request_carries_no_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tracks": []})))
        .mount(&server)
        .await;

    let tracks = directory_for(&server).await.list_tracks().await.unwrap();
    assert!(tracks.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = directory_for(&server).await.list_tracks().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Decode { .. }));
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = directory_for(&server).await.list_tracks().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Status { status: 502 }));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/v3/tracks", listener.local_addr().unwrap());
    drop(listener);

    let err = HttpTrackDirectory::new(url)
        .unwrap()
        .list_tracks()
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Transport { .. }));
}
