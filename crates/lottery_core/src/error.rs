use crate::draw::DrawResultError;
use crate::local::LocalGenerationError;
use crate::rpc::{RpcError, RpcErrorObject, TransportError};

/// Broad failure category, used to word the alert and pick exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawErrorClass {
    /// Connection, TLS, timeout or non-2xx HTTP status.
    Network,
    /// The exchange happened but the payload was not what was asked for.
    Protocol,
    /// The service (or the local generator) refused the request.
    Application,
}

/// Errors surfaced by a failed draw.
#[derive(Debug)]
pub enum DrawError {
    Transport(TransportError),
    RequestSerialization(String),
    ResponseSerialization(String),
    MalformedResult(String),
    Service(RpcErrorObject),
    Local(LocalGenerationError),
    /// The worker running the draw died before it produced an answer.
    Aborted(String),
}

impl DrawError {
    pub fn class(&self) -> DrawErrorClass {
        match self {
            DrawError::Transport(_) => DrawErrorClass::Network,
            DrawError::RequestSerialization(_)
            | DrawError::ResponseSerialization(_)
            | DrawError::MalformedResult(_) => DrawErrorClass::Protocol,
            DrawError::Service(_) | DrawError::Local(_) | DrawError::Aborted(_) => {
                DrawErrorClass::Application
            }
        }
    }

    /// HTTP status attached to the failure, if the server answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            DrawError::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::Transport(err) => write!(f, "network error: {err}"),
            DrawError::RequestSerialization(message) => {
                write!(f, "could not encode request: {message}")
            }
            DrawError::ResponseSerialization(message) => {
                write!(f, "could not read response: {message}")
            }
            DrawError::MalformedResult(message) => write!(f, "unexpected result: {message}"),
            DrawError::Service(object) => write!(f, "service error: {object}"),
            DrawError::Local(err) => write!(f, "local draw failed: {err}"),
            DrawError::Aborted(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for DrawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DrawError::Transport(err) => Some(err),
            DrawError::Local(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RpcError> for DrawError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::RequestSerialization(message) => DrawError::RequestSerialization(message),
            RpcError::ResponseSerialization(message) => DrawError::ResponseSerialization(message),
            RpcError::Transport(err) => DrawError::Transport(err),
            RpcError::Server(object) => DrawError::Service(object),
        }
    }
}

impl From<DrawResultError> for DrawError {
    fn from(err: DrawResultError) -> Self {
        DrawError::MalformedResult(err.to_string())
    }
}
