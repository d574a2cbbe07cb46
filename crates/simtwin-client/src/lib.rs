//! HTTP client for the simulation backend plus the step retry executor.

pub mod http_gateway;
pub mod retry;

pub use http_gateway::HttpGateway;
pub use retry::RetryPolicy;
