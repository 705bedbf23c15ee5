//! HTTP 请求处理器

pub mod account;
pub mod bulk;
pub mod credit;
pub mod operation_log;
pub mod search;
pub mod verification;
