use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::RpcError;

pub const JSONRPC_VERSION: &str = "2.0";

/// Parameter structure of a call: an object (by-name) or an array (by-position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    ByName(Map<String, Value>),
    ByPosition(Vec<Value>),
}

impl Params {
    pub fn len(&self) -> usize {
        match self {
            Params::ByName(map) => map.len(),
            Params::ByPosition(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn by_name(&self) -> Option<&Map<String, Value>> {
        match self {
            Params::ByName(map) => Some(map),
            Params::ByPosition(_) => None,
        }
    }

    pub fn by_position(&self) -> Option<&[Value]> {
        match self {
            Params::ByName(_) => None,
            Params::ByPosition(values) => Some(values),
        }
    }

    /// Params from any serializable value. Structs and maps go by name,
    /// sequences by position; anything else cannot be a parameter structure.
    pub fn from_serializable<P: Serialize + ?Sized>(value: &P) -> Result<Self, RpcError> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(Params::ByName(map)),
            Ok(Value::Array(values)) => Ok(Params::ByPosition(values)),
            Ok(other) => Err(RpcError::RequestSerialization(format!(
                "params must be an object or an array, got {other}"
            ))),
            Err(err) => Err(RpcError::RequestSerialization(err.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub params: Option<Params>,
    pub id: u64,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Option<Params>, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// Response envelope. Every field is optional so shape problems are
/// reported by the client instead of failing deserialization outright.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    #[serde(default)]
    pub id: Option<Value>,
}

/// Error member of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcErrorObject {
    pub fn kind(&self) -> RpcErrorCode {
        RpcErrorCode::from_code(self.code)
    }
}

impl std::fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

/// Error codes reserved by JSON-RPC 2.0; anything else is application defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    Other(i64),
}

impl RpcErrorCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            -32700 => RpcErrorCode::ParseError,
            -32600 => RpcErrorCode::InvalidRequest,
            -32601 => RpcErrorCode::MethodNotFound,
            -32602 => RpcErrorCode::InvalidParams,
            -32603 => RpcErrorCode::InternalError,
            other => RpcErrorCode::Other(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            RpcErrorCode::ParseError => -32700,
            RpcErrorCode::InvalidRequest => -32600,
            RpcErrorCode::MethodNotFound => -32601,
            RpcErrorCode::InvalidParams => -32602,
            RpcErrorCode::InternalError => -32603,
            RpcErrorCode::Other(code) => code,
        }
    }
}
