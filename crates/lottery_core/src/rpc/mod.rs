//! Minimal JSON-RPC 2.0 client.
//!
//! The client owns envelope construction, request ids and response
//! validation. Moving the request is delegated to a transport, so the same
//! client runs over HTTPS in production and over a stub in tests. A transport
//! either moves bytes ([`RpcTransport`]) or takes the decoded envelope and
//! does its own encoding ([`RpcObjectTransport`]).

mod client;
mod envelope;
mod error;
#[cfg(feature = "https")]
mod http;
mod transport;

pub use client::RpcClient;
pub use envelope::{Params, RpcErrorCode, RpcErrorObject, RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use error::RpcError;
#[cfg(feature = "https")]
pub use http::HttpTransport;
pub use transport::{ObjectTransport, RpcExchange, RpcObjectTransport, RpcTransport, TransportError};

#[cfg(test)]
mod tests;
