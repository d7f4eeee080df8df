use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::envelope::{Params, RpcRequest, RpcResponse, JSONRPC_VERSION};
use super::error::RpcError;
use super::transport::RpcExchange;

/// JSON-RPC client over a pluggable transport.
///
/// `T` is either a raw [`super::RpcTransport`] or an
/// [`super::ObjectTransport`] around a transport that serializes itself.
#[derive(Debug)]
pub struct RpcClient<T> {
    transport: T,
    next_id: AtomicU64,
}

impl<T: RpcExchange> RpcClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Invoke `method` and return the `result` member of the response.
    pub fn call(&self, method: &str, params: Option<Params>) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(method, params, id);
        let raw = self.transport.exchange(&request)?;
        validate_response(raw, id)
    }

    /// Like [`RpcClient::call`], decoding the result into `R`.
    pub fn call_typed<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Option<Params>,
    ) -> Result<R, RpcError> {
        let result = self.call(method, params)?;
        serde_json::from_value(result)
            .map_err(|err| RpcError::ResponseSerialization(format!("unexpected result: {err}")))
    }
}

fn validate_response(raw: Value, expected_id: u64) -> Result<Value, RpcError> {
    if !raw.is_object() {
        return Err(RpcError::ResponseSerialization(
            "response is not a JSON object".to_string(),
        ));
    }
    let response: RpcResponse = serde_json::from_value(raw)
        .map_err(|err| RpcError::ResponseSerialization(format!("invalid envelope: {err}")))?;

    if let Some(version) = response.jsonrpc.as_deref() {
        if version != JSONRPC_VERSION {
            return Err(RpcError::ResponseSerialization(format!(
                "unsupported jsonrpc version '{version}'"
            )));
        }
    }

    // Servers may answer a request they could not parse with a null id, so
    // the error member wins over the id check.
    if let Some(error) = response.error {
        return Err(RpcError::Server(error));
    }

    match response.id {
        Some(Value::Number(ref id)) if id.as_u64() == Some(expected_id) => {}
        Some(other) => {
            return Err(RpcError::ResponseSerialization(format!(
                "response id {other} does not match request id {expected_id}"
            )))
        }
        None => {
            return Err(RpcError::ResponseSerialization(
                "response has no id".to_string(),
            ))
        }
    }

    response
        .result
        .ok_or_else(|| RpcError::ResponseSerialization("response has no result".to_string()))
}
