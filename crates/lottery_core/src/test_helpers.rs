//! Test doubles for the JSON-RPC layer and random.org fixtures.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{json, Value};

use crate::rpc::{
    Params, RpcError, RpcErrorCode, RpcErrorObject, RpcObjectTransport, RpcRequest, RpcTransport,
    TransportError,
};

type ResultFn = Arc<dyn Fn(Option<&Params>) -> Value + Send + Sync>;

#[derive(Clone)]
enum StubReply {
    Result(ResultFn),
    Error(RpcErrorObject),
}

#[derive(Clone)]
enum StubOverride {
    Fail(TransportError),
    Raw(Vec<u8>),
}

/// Which transport flavor carried a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendFlavor {
    /// Serialized bytes, decoded by the stub.
    Data,
    /// A request object the stub answers without any byte encoding.
    Object,
}

/// In-memory transport that answers configured methods.
///
/// Speaks both transport flavors: use it directly for the raw-bytes path, or
/// wrapped in [`crate::rpc::ObjectTransport`] to have it do the
/// serialization. Requests are decoded and recorded so tests can assert on
/// the envelope a client produced. Unconfigured methods answer with
/// `MethodNotFound`.
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<HashMap<String, StubReply>>,
    requests: Mutex<Vec<RpcRequest>>,
    flavors: Mutex<Vec<SendFlavor>>,
    override_reply: Mutex<Option<StubOverride>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method` with the value returned by `result`.
    pub fn configure_method<F>(&self, method: &str, result: F)
    where
        F: Fn(Option<&Params>) -> Value + Send + Sync + 'static,
    {
        self.configure_methods(&[method], result);
    }

    /// Answer every method in `methods` with the same result function.
    pub fn configure_methods<F>(&self, methods: &[&str], result: F)
    where
        F: Fn(Option<&Params>) -> Value + Send + Sync + 'static,
    {
        let result: ResultFn = Arc::new(result);
        let mut replies = lock(&self.replies);
        for method in methods {
            replies.insert(method.to_string(), StubReply::Result(result.clone()));
        }
    }

    /// Answer `method` with a JSON-RPC error object.
    pub fn configure_error(&self, method: &str, code: i64, message: &str, data: Option<Value>) {
        lock(&self.replies).insert(
            method.to_string(),
            StubReply::Error(RpcErrorObject {
                code,
                message: message.to_string(),
                data,
            }),
        );
    }

    /// Fail every send with `error` before a response is produced.
    pub fn fail_with(&self, error: TransportError) {
        *lock(&self.override_reply) = Some(StubOverride::Fail(error));
    }

    /// Return `body` verbatim for every send.
    pub fn respond_with_raw(&self, body: impl Into<Vec<u8>>) {
        *lock(&self.override_reply) = Some(StubOverride::Raw(body.into()));
    }

    pub fn requests(&self) -> Vec<RpcRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<RpcRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Flavor of every send so far, in order.
    pub fn flavors(&self) -> Vec<SendFlavor> {
        lock(&self.flavors).clone()
    }

    fn record(&self, flavor: SendFlavor, request: Option<&RpcRequest>) {
        lock(&self.flavors).push(flavor);
        if let Some(request) = request {
            lock(&self.requests).push(request.clone());
        }
    }

    fn respond(&self, request: Option<RpcRequest>) -> Value {
        let Some(request) = request else {
            return json!({
                "jsonrpc": "2.0",
                "error": {
                    "code": RpcErrorCode::ParseError.code(),
                    "message": "Parse error",
                },
                "id": null,
            });
        };
        let reply = lock(&self.replies).get(&request.method).cloned();
        match reply {
            Some(StubReply::Result(result)) => json!({
                "jsonrpc": "2.0",
                "result": (*result)(request.params.as_ref()),
                "id": request.id,
            }),
            Some(StubReply::Error(error)) => json!({
                "jsonrpc": "2.0",
                "error": error,
                "id": request.id,
            }),
            None => json!({
                "jsonrpc": "2.0",
                "error": {
                    "code": RpcErrorCode::MethodNotFound.code(),
                    "message": "Method not found",
                },
                "id": request.id,
            }),
        }
    }
}

impl RpcTransport for StubTransport {
    fn send(&self, payload: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let request = serde_json::from_slice::<RpcRequest>(&payload).ok();
        self.record(SendFlavor::Data, request.as_ref());

        if let Some(reply) = lock(&self.override_reply).clone() {
            return match reply {
                StubOverride::Fail(error) => Err(error),
                StubOverride::Raw(body) => Ok(body),
            };
        }

        serde_json::to_vec(&self.respond(request))
            .map_err(|err| TransportError::Network(err.to_string()))
    }
}

impl RpcObjectTransport for StubTransport {
    fn send_object(&self, request: Value) -> Result<Value, RpcError> {
        let request = serde_json::from_value::<RpcRequest>(request).ok();
        self.record(SendFlavor::Object, request.as_ref());

        if let Some(reply) = lock(&self.override_reply).clone() {
            return match reply {
                StubOverride::Fail(error) => Err(RpcError::Transport(error)),
                StubOverride::Raw(body) => serde_json::from_slice(&body)
                    .map_err(|err| RpcError::ResponseSerialization(format!("invalid JSON: {err}"))),
            };
        }

        Ok(self.respond(request))
    }
}

/// A `generateIntegers` result as random.org returns it.
pub fn random_org_result(numbers: &[i64]) -> Value {
    json!({
        "random": {
            "data": numbers,
            "completionTime": "2017-10-17 12:00:00Z",
        },
        "bitsUsed": 35,
        "bitsLeft": 249_965,
        "requestsLeft": 999,
        "advisoryDelay": 0,
    })
}

/// Full response body wrapping [`random_org_result`].
pub fn random_org_response_body(numbers: &[i64], id: u64) -> String {
    json!({
        "jsonrpc": "2.0",
        "result": random_org_result(numbers),
        "id": id,
    })
    .to_string()
}
