//! HTTP 中间件

pub mod audit;

pub use audit::audit_middleware;
