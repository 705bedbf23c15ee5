//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use tuition_shared::config::CreditConfig;

use crate::models::OperationLogBuffer;
use crate::store::{AccountLockManager, AccountStore, CreditLedger};

/// Axum 应用共享状态
///
/// 账户存储、积分账本、账户级写锁和操作日志缓冲，
/// 通过 Arc 在 handler 间共享。
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AccountStore>,
    pub ledger: Arc<CreditLedger>,
    pub locks: Arc<AccountLockManager>,
    pub operation_logs: Arc<OperationLogBuffer>,
}

impl AppState {
    /// 按积分策略创建应用状态
    pub fn new(credit: &CreditConfig) -> Self {
        Self {
            store: Arc::new(AccountStore::new()),
            ledger: Arc::new(CreditLedger::new(credit.allow_negative_balance)),
            locks: Arc::new(AccountLockManager::new()),
            operation_logs: Arc::new(OperationLogBuffer::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&CreditConfig::default())
    }
}
