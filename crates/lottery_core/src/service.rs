//! Draw sources and the random.org adapter.
//!
//! random.org exposes `generateIntegers` with by-name parameters
//! (`apiKey`, `n`, `min`, `max`, `replacement`) and answers with
//! `result.random.data`, an array of integers.

use serde::{Deserialize, Serialize};

use crate::draw::{DrawRequest, DrawResult};
use crate::error::DrawError;
use crate::rpc::{Params, RpcClient, RpcError, RpcExchange};

pub const RANDOM_ORG_ENDPOINT: &str = "https://api.random.org/json-rpc/1/invoke";
pub const GENERATE_INTEGERS_METHOD: &str = "generateIntegers";

/// Anything that can satisfy a [`DrawRequest`].
///
/// Calls block; [`crate::dispatch::DrawDispatcher`] runs them off the UI thread.
pub trait RandomService: Send + Sync {
    fn request_draw(&self, request: &DrawRequest) -> Result<DrawResult, DrawError>;

    /// Short label for status lines.
    fn describe(&self) -> &str {
        "random service"
    }
}

impl<S: RandomService + ?Sized> RandomService for Box<S> {
    fn request_draw(&self, request: &DrawRequest) -> Result<DrawResult, DrawError> {
        (**self).request_draw(request)
    }

    fn describe(&self) -> &str {
        (**self).describe()
    }
}

impl<S: RandomService + ?Sized> RandomService for std::sync::Arc<S> {
    fn request_draw(&self, request: &DrawRequest) -> Result<DrawResult, DrawError> {
        (**self).request_draw(request)
    }

    fn describe(&self) -> &str {
        (**self).describe()
    }
}

/// random.org `generateIntegers` over JSON-RPC.
pub struct RandomOrgService<T> {
    rpc: RpcClient<T>,
    api_key: String,
}

impl<T: RpcExchange> RandomOrgService<T> {
    pub fn new(transport: T, api_key: impl Into<String>) -> Self {
        Self {
            rpc: RpcClient::new(transport),
            api_key: api_key.into(),
        }
    }

    pub fn rpc(&self) -> &RpcClient<T> {
        &self.rpc
    }
}

#[cfg(feature = "https")]
impl RandomOrgService<crate::rpc::HttpTransport> {
    /// HTTPS-backed service using the endpoint, key and timeout from `config`.
    pub fn from_config(config: &crate::config::LotteryConfig) -> Result<Self, DrawError> {
        let transport = crate::rpc::HttpTransport::new(&config.endpoint, config.timeout)
            .map_err(DrawError::Transport)?;
        Ok(Self::new(transport, config.api_key.clone()))
    }
}

impl<T: RpcExchange> RandomService for RandomOrgService<T> {
    fn request_draw(&self, request: &DrawRequest) -> Result<DrawResult, DrawError> {
        let params = generate_integers_params(&self.api_key, request)?;
        let result: GenerateIntegersResult =
            self.rpc.call_typed(GENERATE_INTEGERS_METHOD, Some(params))?;
        into_draw_result(result, request)
    }

    fn describe(&self) -> &str {
        "random.org"
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateIntegersParams<'a> {
    api_key: &'a str,
    n: usize,
    min: u32,
    max: u32,
    replacement: bool,
}

fn generate_integers_params(api_key: &str, request: &DrawRequest) -> Result<Params, RpcError> {
    Params::from_serializable(&GenerateIntegersParams {
        api_key,
        n: request.count,
        min: request.min,
        max: request.max,
        replacement: request.allow_replacement,
    })
}

#[derive(Deserialize)]
struct GenerateIntegersResult {
    random: RandomData,
}

#[derive(Deserialize)]
struct RandomData {
    data: Vec<i64>,
}

fn into_draw_result(
    result: GenerateIntegersResult,
    request: &DrawRequest,
) -> Result<DrawResult, DrawError> {
    let numbers = result
        .random
        .data
        .into_iter()
        .map(|n| {
            u32::try_from(n)
                .map_err(|_| DrawError::MalformedResult(format!("number {n} is out of range")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DrawResult::from_numbers(request, numbers)?)
}
