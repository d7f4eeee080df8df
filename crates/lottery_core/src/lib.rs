pub mod ball;
pub mod config;
pub mod dispatch;
pub mod draw;
pub mod error;
pub mod local;
pub mod presenter;
pub mod rpc;
pub mod service;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
