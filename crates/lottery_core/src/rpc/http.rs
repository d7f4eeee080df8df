use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use super::transport::{RpcTransport, TransportError};

/// Blocking HTTP(S) POST transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport for the given endpoint (e.g. `https://api.random.org/json-rpc/1/invoke`).
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TransportError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| TransportError::Network(format!("invalid endpoint '{endpoint}': {err}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Network(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client, endpoint })
    }
}

impl RpcTransport for HttpTransport {
    fn send(&self, payload: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}
