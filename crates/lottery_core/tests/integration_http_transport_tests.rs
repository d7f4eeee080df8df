#![cfg(feature = "https")]

mod support;

use std::time::Duration;

use lottery_core::config::LotteryConfig;
use lottery_core::draw::DrawRequest;
use lottery_core::error::{DrawError, DrawErrorClass};
use lottery_core::rpc::{HttpTransport, RpcTransport, TransportError};
use lottery_core::service::{RandomOrgService, RandomService};
use lottery_core::test_helpers::random_org_response_body;

use support::{serve_once, serve_silence};

fn config_for(url: &str, timeout: Duration) -> LotteryConfig {
    LotteryConfig::new("test-key")
        .and_then(|config| config.with_endpoint(url))
        .and_then(|config| config.with_timeout(timeout))
        .expect("valid config")
}

#[test]
fn posts_json_and_parses_the_draw() {
    let body = random_org_response_body(&[5, 3, 9, 1, 7, 2], 1);
    let (url, server) = serve_once("200 OK", &body);
    let service =
        RandomOrgService::from_config(&config_for(&url, Duration::from_secs(5))).unwrap();

    let result = service
        .request_draw(&DrawRequest::lottery(59).unwrap())
        .expect("draw succeeds");
    assert_eq!(result.sorted().numbers(), &[1, 2, 3, 5, 7, 9]);

    let raw_request = server.join().unwrap();
    let lowered = raw_request.to_lowercase();
    assert!(raw_request.starts_with("POST /json-rpc/1/invoke"));
    assert!(lowered.contains("content-type: application/json"));
    assert!(raw_request.contains("\"method\":\"generateIntegers\""));
    assert!(raw_request.contains("\"apiKey\":\"test-key\""));
    assert!(raw_request.contains("\"replacement\":false"));
}

#[test]
fn non_success_status_is_a_network_error_with_status() {
    let (url, server) = serve_once("503 Service Unavailable", "{}");
    let service =
        RandomOrgService::from_config(&config_for(&url, Duration::from_secs(5))).unwrap();

    let err = service
        .request_draw(&DrawRequest::lottery(59).unwrap())
        .unwrap_err();
    assert_eq!(err.class(), DrawErrorClass::Network);
    assert_eq!(err.http_status(), Some(503));
    server.join().unwrap();
}

#[test]
fn missing_random_key_is_a_protocol_error() {
    let body = r#"{"jsonrpc":"2.0","result":{"bitsUsed":1},"id":1}"#;
    let (url, server) = serve_once("200 OK", body);
    let service =
        RandomOrgService::from_config(&config_for(&url, Duration::from_secs(5))).unwrap();

    let err = service
        .request_draw(&DrawRequest::lottery(59).unwrap())
        .unwrap_err();
    assert_eq!(err.class(), DrawErrorClass::Protocol);
    assert!(matches!(err, DrawError::ResponseSerialization(_)), "{err:?}");
    server.join().unwrap();
}

#[test]
fn silent_server_hits_the_timeout() {
    let url = serve_silence(Duration::from_secs(3));
    let transport = HttpTransport::new(&url, Duration::from_millis(300)).unwrap();

    let err = transport.send(b"{}".to_vec()).unwrap_err();
    assert!(matches!(err, TransportError::Timeout(_)), "{err:?}");
}

#[test]
fn refused_connection_is_a_network_error() {
    let transport = HttpTransport::new("http://127.0.0.1:9/invoke", Duration::from_secs(2)).unwrap();
    let err = transport.send(b"{}".to_vec()).unwrap_err();
    assert!(matches!(
        err,
        TransportError::Network(_) | TransportError::Timeout(_)
    ));
}

#[test]
fn invalid_endpoint_is_rejected_up_front() {
    let err = HttpTransport::new("not a url", Duration::from_secs(1)).unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}
