//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::observability::ObservabilityConfig;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

/// 积分策略配置
///
/// 参考行为允许管理员扣减至负余额，因此负余额默认放行；
/// 需要余额下限的部署可通过配置关闭。
#[derive(Debug, Clone, Deserialize)]
pub struct CreditConfig {
    /// 是否允许扣减后余额为负
    #[serde(default = "default_allow_negative")]
    pub allow_negative_balance: bool,
}

fn default_allow_negative() -> bool {
    true
}

impl Default for CreditConfig {
    fn default() -> Self {
        Self {
            allow_negative_balance: default_allow_negative(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub credit: CreditConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（TUITION_ 前缀，如 TUITION_SERVER_HOST -> server.host）
    /// 5. 服务特定端口环境变量（如 ACCOUNT_ADMIN_PORT）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("TUITION_ENV").unwrap_or_else(|_| "development".to_string());

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            // 默认配置
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            // 加载默认配置文件
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            // 加载环境特定配置
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            // 加载服务特定配置（如 account-admin-service.toml）
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            // 环境变量覆盖（TUITION_SERVER_HOST -> server.host）
            .add_source(
                Environment::with_prefix("TUITION")
                    .separator("_")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        // 服务特定端口环境变量覆盖
        if let Some(port) = Self::get_service_port_from_env(service_name) {
            config.server.port = port;
        }

        Ok(config)
    }

    /// 从环境变量获取服务特定端口
    ///
    /// 服务名到环境变量的映射规则：
    /// - account-admin-service -> ACCOUNT_ADMIN_PORT
    fn get_service_port_from_env(service_name: &str) -> Option<u16> {
        let env_var_name = match service_name {
            "account-admin-service" => "ACCOUNT_ADMIN_PORT",
            // 通用回退：将服务名转换为大写下划线格式 + _PORT
            _ => return Self::get_generic_service_port(service_name),
        };

        std::env::var(env_var_name)
            .ok()
            .and_then(|v| v.parse().ok())
    }

    /// 通用服务端口获取（用于未明确映射的服务）
    ///
    /// 将 "my-service-name" 转换为 "MY_SERVICE_NAME_PORT"
    fn get_generic_service_port(service_name: &str) -> Option<u16> {
        let env_var_name = format!("{}_PORT", service_name.to_uppercase().replace('-', "_"));
        std::env::var(&env_var_name)
            .ok()
            .and_then(|v| v.parse().ok())
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        // 负余额默认放行，与参考行为一致
        assert!(config.credit.allow_negative_balance);
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                workers: None,
            },
            ..Default::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_service_port_env_var_mapping() {
        // 测试服务名到环境变量名的映射
        assert_eq!(
            AppConfig::get_service_port_from_env("account-admin-service"),
            std::env::var("ACCOUNT_ADMIN_PORT").ok().and_then(|v| v.parse().ok())
        );
    }

    #[test]
    fn test_generic_service_port_conversion() {
        // 测试通用服务名转换：my-custom-service -> MY_CUSTOM_SERVICE_PORT
        // 由于环境变量可能不存在，这里只测试函数不会 panic
        let _ = AppConfig::get_generic_service_port("my-custom-service");
    }
}
