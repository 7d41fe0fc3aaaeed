#![allow(clippy::unwrap_used)]
// Integration tests for `StationClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{header, headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chargewatch_api::{Error, StationClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

const INFO_PATH: &str = "/map-prod/v3/station/info";

async fn setup() -> (MockServer, StationClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}{INFO_PATH}", server.uri())).unwrap();
    let client = StationClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

// ── Success ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_station_info_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(INFO_PATH))
        .and(query_param("deviceId", "123456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deviceId": 123_456,
            "name": ["ACME GARAGE", "STATION 1"],
            "modelNumber": "CT4021-GW1",
            "deviceSoftwareVersion": "5.1.0.12",
            "portsInfo": {
                "ports": [
                    { "outletNumber": 1, "status": "AVAILABLE", "statusV2": "available" },
                    { "outletNumber": 2, "status": "INUSE", "statusV2": "in_use" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = client.station_info("123456").await.unwrap();

    assert_eq!(info.device_id.as_deref(), Some("123456"));
    assert_eq!(info.model_number.as_deref(), Some("CT4021-GW1"));
    assert_eq!(info.ports().len(), 2);
    assert_eq!(info.ports()[0].status_v2.as_deref(), Some("available"));
}

#[tokio::test]
async fn test_requests_bypass_caches() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(INFO_PATH))
        .and(headers("cache-control", vec!["no-store", "no-cache"]))
        .and(header("pragma", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deviceId": 1 })))
        .expect(2)
        .mount(&server)
        .await;

    client.station_info("1").await.unwrap();
    client.station_info("1").await.unwrap();
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_non_success_status_is_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(INFO_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = client.station_info("42").await;

    match result {
        Err(ref err @ Error::Http { status, .. }) => {
            assert_eq!(status, 503);
            assert_eq!(err.to_string(), "HTTP 503");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(INFO_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.station_info("7").await.unwrap_err();
    assert!(
        matches!(err, Error::Http { status: 404, .. }),
        "expected HTTP 404, got: {err:?}"
    );
    assert_eq!(err.to_string(), "HTTP 404");
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(INFO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.station_info("9").await;

    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("oops")),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let base_url = Url::parse(&format!("http://127.0.0.1:{port}{INFO_PATH}")).unwrap();

    let client = StationClient::new(base_url, &TransportConfig::default()).unwrap();
    let result = client.station_info("1").await;

    assert!(
        matches!(result, Err(Error::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}
