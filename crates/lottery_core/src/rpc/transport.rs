use serde_json::Value;

use super::envelope::RpcRequest;
use super::error::RpcError;

/// Moves one serialized request to the server and returns the raw response body.
pub trait RpcTransport: Send + Sync {
    fn send(&self, payload: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}

impl<T: RpcTransport + ?Sized> RpcTransport for Box<T> {
    fn send(&self, payload: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        (**self).send(payload)
    }
}

impl<T: RpcTransport + ?Sized> RpcTransport for std::sync::Arc<T> {
    fn send(&self, payload: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        (**self).send(payload)
    }
}

/// Transport that encodes the request envelope and decodes the response itself.
///
/// Suits channels that match answers to requests by id (a socket, say) and so
/// need the decoded envelope anyway. Wrap it in [`ObjectTransport`] to hand it
/// to [`super::RpcClient`].
pub trait RpcObjectTransport: Send + Sync {
    fn send_object(&self, request: Value) -> Result<Value, RpcError>;
}

impl<T: RpcObjectTransport + ?Sized> RpcObjectTransport for Box<T> {
    fn send_object(&self, request: Value) -> Result<Value, RpcError> {
        (**self).send_object(request)
    }
}

impl<T: RpcObjectTransport + ?Sized> RpcObjectTransport for std::sync::Arc<T> {
    fn send_object(&self, request: Value) -> Result<Value, RpcError> {
        (**self).send_object(request)
    }
}

/// Selects the object flavor of a transport that may speak both.
#[derive(Debug, Clone, Default)]
pub struct ObjectTransport<T>(pub T);

impl<T> ObjectTransport<T> {
    pub fn get_ref(&self) -> &T {
        &self.0
    }
}

/// One request/response round trip in whichever flavor the transport speaks.
///
/// Implemented for every [`RpcTransport`] (the client serializes) and for
/// [`ObjectTransport`] (the transport serializes).
pub trait RpcExchange: Send + Sync {
    /// Send `request` and return the decoded response envelope, unvalidated.
    fn exchange(&self, request: &RpcRequest) -> Result<Value, RpcError>;
}

impl<T: RpcTransport + ?Sized> RpcExchange for T {
    fn exchange(&self, request: &RpcRequest) -> Result<Value, RpcError> {
        let payload = serde_json::to_vec(request)
            .map_err(|err| RpcError::RequestSerialization(err.to_string()))?;
        let body = self.send(payload)?;
        serde_json::from_slice(&body)
            .map_err(|err| RpcError::ResponseSerialization(format!("invalid JSON: {err}")))
    }
}

impl<T: RpcObjectTransport> RpcExchange for ObjectTransport<T> {
    fn exchange(&self, request: &RpcRequest) -> Result<Value, RpcError> {
        let object = serde_json::to_value(request)
            .map_err(|err| RpcError::RequestSerialization(err.to_string()))?;
        self.0.send_object(object)
    }
}

/// Failures below the JSON-RPC layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    Network(String),
    Timeout(String),
    Status { status: u16, body: String },
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Network(message) => f.write_str(message),
            TransportError::Timeout(message) => write!(f, "request timed out: {message}"),
            TransportError::Status { status, body } if body.trim().is_empty() => {
                write!(f, "HTTP status {status}")
            }
            TransportError::Status { status, body } => {
                write!(f, "HTTP status {status}: {}", body.trim())
            }
        }
    }
}

impl std::error::Error for TransportError {}
