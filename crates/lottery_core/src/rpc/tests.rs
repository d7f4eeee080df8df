use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{ObjectTransport, Params, RpcClient, RpcError, RpcErrorCode, TransportError};
use crate::test_helpers::{SendFlavor, StubTransport};

fn by_name(value: Value) -> Params {
    match value {
        Value::Object(map) => Params::ByName(map),
        _ => Params::ByName(Map::new()),
    }
}

#[test]
fn call_builds_named_envelope_and_returns_result() {
    let stub = StubTransport::new();
    stub.configure_method("add", |params| {
        let map = params.and_then(Params::by_name).cloned().unwrap_or_default();
        let a = map.get("a").and_then(Value::as_i64).unwrap_or(0);
        let b = map.get("b").and_then(Value::as_i64).unwrap_or(0);
        json!(a + b)
    });
    let client = RpcClient::new(stub);

    let result = client
        .call("add", Some(by_name(json!({"a": 2, "b": 3}))))
        .expect("call succeeds");
    assert_eq!(result, json!(5));

    let request = client.transport().last_request().expect("request recorded");
    assert_eq!(request.jsonrpc, "2.0");
    assert_eq!(request.method, "add");
    assert_eq!(request.params.as_ref().map(Params::len), Some(2));
}

#[test]
fn call_supports_positional_params() {
    let stub = StubTransport::new();
    stub.configure_method("echo", |params| {
        params
            .and_then(Params::by_position)
            .map(|values| Value::Array(values.to_vec()))
            .unwrap_or(Value::Null)
    });
    let client = RpcClient::new(stub);

    let result = client
        .call("echo", Some(Params::ByPosition(vec![json!(1), json!("two")])))
        .unwrap();
    assert_eq!(result, json!([1, "two"]));
}

#[test]
fn request_ids_increase_per_call() {
    let stub = StubTransport::new();
    stub.configure_methods(&["ping", "pong"], |_| json!("ok"));
    let client = RpcClient::new(stub);

    client.call("ping", None).unwrap();
    client.call("pong", None).unwrap();
    client.call("ping", None).unwrap();

    let ids: Vec<u64> = client.transport().requests().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn server_error_object_is_surfaced_with_code() {
    let stub = StubTransport::new();
    stub.configure_error("add", -32602, "Invalid params", Some(json!({"field": "a"})));
    let client = RpcClient::new(stub);

    match client.call("add", None) {
        Err(RpcError::Server(object)) => {
            assert_eq!(object.kind(), RpcErrorCode::InvalidParams);
            assert_eq!(object.message, "Invalid params");
            assert_eq!(object.data, Some(json!({"field": "a"})));
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[test]
fn unknown_method_maps_to_method_not_found() {
    let client = RpcClient::new(StubTransport::new());
    let err = client.call("missing", None).unwrap_err();
    assert_eq!(err.code(), 1004);
    assert!(matches!(err, RpcError::Server(ref o) if o.kind() == RpcErrorCode::MethodNotFound));
}

#[test]
fn transport_failure_is_not_a_server_error() {
    let stub = StubTransport::new();
    stub.fail_with(TransportError::Timeout("stub".to_string()));
    let client = RpcClient::new(stub);

    let err = client.call("anything", None).unwrap_err();
    assert_eq!(err.code(), 1003);
    assert!(matches!(err, RpcError::Transport(TransportError::Timeout(_))));
}

#[test]
fn malformed_bodies_are_response_serialization_errors() {
    let cases: [&[u8]; 5] = [
        b"not json",
        b"[1, 2, 3]",
        br#"{"jsonrpc": "1.0", "result": 1, "id": 1}"#,
        br#"{"jsonrpc": "2.0", "result": 1, "id": 2}"#,
        br#"{"jsonrpc": "2.0", "id": 1}"#,
    ];
    for body in cases {
        let stub = StubTransport::new();
        stub.respond_with_raw(body);
        let err = RpcClient::new(stub).call("anything", None).unwrap_err();
        assert!(
            matches!(err, RpcError::ResponseSerialization(_)),
            "body {:?} gave {err:?}",
            String::from_utf8_lossy(body)
        );
    }
}

#[test]
fn error_member_wins_over_null_id() {
    let stub = StubTransport::new();
    stub.respond_with_raw(
        r#"{"jsonrpc": "2.0", "error": {"code": -32700, "message": "Parse error"}, "id": null}"#,
    );
    let err = RpcClient::new(stub).call("anything", None).unwrap_err();
    assert!(matches!(err, RpcError::Server(ref o) if o.kind() == RpcErrorCode::ParseError));
}

#[test]
fn error_codes_round_trip_through_kind() {
    for code in [-32700, -32600, -32601, -32602, -32603, 401] {
        assert_eq!(RpcErrorCode::from_code(code).code(), code);
    }
    assert_eq!(RpcErrorCode::from_code(12), RpcErrorCode::Other(12));
}

#[test]
fn html_error_page_is_a_response_serialization_error() {
    let stub = StubTransport::new();
    stub.respond_with_raw("<html>Bad Gateway</html>");
    let client = RpcClient::new(stub);

    let err = client.call("anything", None).unwrap_err();
    assert_eq!(err.code(), 1002);
}

#[test]
fn object_transport_skips_byte_serialization() {
    let stub = StubTransport::new();
    stub.configure_method("add", |params| {
        let values = params.and_then(Params::by_position).unwrap_or_default();
        json!(values.iter().filter_map(Value::as_i64).sum::<i64>())
    });
    let client = RpcClient::new(ObjectTransport(stub));

    let result = client
        .call("add", Some(Params::ByPosition(vec![json!(4), json!(5)])))
        .unwrap();
    assert_eq!(result, json!(9));

    let stub = client.transport().get_ref();
    assert_eq!(stub.flavors(), vec![SendFlavor::Object]);
    assert_eq!(stub.last_request().map(|r| r.id), Some(1));
}

#[test]
fn both_flavors_report_the_same_failures() {
    let data = StubTransport::new();
    data.configure_error("add", -32602, "Invalid params", None);
    let object = StubTransport::new();
    object.configure_error("add", -32602, "Invalid params", None);

    let from_data = RpcClient::new(data).call("add", None).unwrap_err();
    let from_object = RpcClient::new(ObjectTransport(object)).call("add", None).unwrap_err();
    assert_eq!(from_data.code(), 1004);
    assert_eq!(from_object.code(), 1004);

    let timed_out = StubTransport::new();
    timed_out.fail_with(TransportError::Timeout("stub".to_string()));
    let err = RpcClient::new(ObjectTransport(timed_out)).call("add", None).unwrap_err();
    assert!(matches!(err, RpcError::Transport(TransportError::Timeout(_))));

    let garbled = StubTransport::new();
    garbled.respond_with_raw("<html>Bad Gateway</html>");
    let err = RpcClient::new(ObjectTransport(garbled)).call("add", None).unwrap_err();
    assert_eq!(err.code(), 1002);
}

#[derive(Debug, Deserialize, PartialEq)]
struct Quota {
    #[serde(rename = "requestsLeft")]
    requests_left: u32,
}

#[test]
fn call_typed_decodes_the_result() {
    let stub = StubTransport::new();
    stub.configure_method("getUsage", |_| json!({"requestsLeft": 998, "status": "running"}));
    let client = RpcClient::new(stub);

    let quota: Quota = client.call_typed("getUsage", None).unwrap();
    assert_eq!(quota, Quota { requests_left: 998 });
}

#[test]
fn call_typed_rejects_a_result_of_the_wrong_shape() {
    let stub = StubTransport::new();
    stub.configure_method("getUsage", |_| json!("running"));
    let client = RpcClient::new(stub);

    let err = client.call_typed::<Quota>("getUsage", None).unwrap_err();
    assert!(matches!(err, RpcError::ResponseSerialization(_)), "{err:?}");
}

#[derive(Serialize)]
struct Window {
    from: u32,
    to: u32,
}

#[test]
fn params_follow_the_serialized_shape() {
    let named = Params::from_serializable(&Window { from: 1, to: 59 }).unwrap();
    assert_eq!(named.by_name().and_then(|map| map.get("to")), Some(&json!(59)));

    let positional = Params::from_serializable(&(1, "two")).unwrap();
    assert_eq!(positional.by_position(), Some(&[json!(1), json!("two")][..]));

    let err = Params::from_serializable(&42).unwrap_err();
    assert_eq!(err.code(), 1001);
}
