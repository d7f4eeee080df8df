use super::envelope::RpcErrorObject;
use super::transport::TransportError;

/// Errors raised by [`super::RpcClient::call`].
#[derive(Debug)]
pub enum RpcError {
    RequestSerialization(String),
    ResponseSerialization(String),
    Transport(TransportError),
    Server(RpcErrorObject),
}

impl RpcError {
    /// Numeric code, stable across releases, for log lines and exit statuses.
    pub fn code(&self) -> u16 {
        match self {
            RpcError::RequestSerialization(_) => 1001,
            RpcError::ResponseSerialization(_) => 1002,
            RpcError::Transport(_) => 1003,
            RpcError::Server(_) => 1004,
        }
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcError::RequestSerialization(message) => {
                write!(f, "request serialization failed: {message}")
            }
            RpcError::ResponseSerialization(message) => {
                write!(f, "response serialization failed: {message}")
            }
            RpcError::Transport(err) => write!(f, "transport failed: {err}"),
            RpcError::Server(object) => write!(f, "server returned error: {object}"),
        }
    }
}

impl std::error::Error for RpcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RpcError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for RpcError {
    fn from(err: TransportError) -> Self {
        RpcError::Transport(err)
    }
}
