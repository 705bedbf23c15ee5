//! 平台公共基础库
//!
//! 各服务共享的配置加载和可观测性基础设施。
//! 业务逻辑不属于本 crate，只放跨服务复用的底层能力。

pub mod config;
pub mod observability;

pub use config::AppConfig;
pub use observability::ObservabilityConfig;
