//! 账户管理核心服务
//!
//! 家教平台管理后台的账户与积分后端，提供账户检索、资料维护、
//! 签名积分调整、材料审核和批量操作等 REST API。
//!
//! ## 核心功能
//!
//! - **账户存储**：四类角色（teacher/guardian/student/donor）的账户记录，
//!   角色由 ID 前缀派生且不可变更
//! - **积分账本**：只追加的签名调整日志，余额是流水的纯折叠结果
//! - **审核状态机**：管理端对提交材料的通过/拒绝决定，可随时改判
//! - **账户搜索**：关键词 + 角色过滤，带防全量扫描守卫
//! - **批量操作**：verify/delete 逐项独立执行，单项失败不影响其余
//! - **操作日志**：记录成功的运营写操作，支持审计追溯
//!
//! ## 模块结构
//!
//! - `models`: 账户、流水、操作日志实体
//! - `store`: 进程内账户存储、积分账本和账户级写锁
//! - `search`: 搜索引擎
//! - `bulk`: 批量操作协调器
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型定义
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: 审计中间件
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据验证：validator
//! - 序列化：serde (camelCase)
//!
//! 认证与会话签发由外部网关负责，本服务假定调用方已通过管理员授权。

pub mod bulk;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod search;
pub mod state;
pub mod store;

// 重新导出核心类型
pub use bulk::{BulkAction, BulkActionResult, bulk_apply};
pub use dto::{
    AccountDto, AdjustCreditsRequest, BulkActionRequest, CreateAccountRequest, PageResponse,
    PaginationParams, SearchUsersRequest, UpdateAccountRequest, VerifyAccountRequest,
};
pub use error::{AdminError, Result};
pub use models::{Account, LedgerEntry, ProfileUpdate, Role, VerificationStatus};
pub use search::{RoleFilter, search_accounts};
pub use state::AppState;
pub use store::{AccountLockManager, AccountStore, CreditLedger};
