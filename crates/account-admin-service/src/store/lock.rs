//! 账户级写锁管理器
//!
//! 账户存储和账本是进程内共享可变状态：同一账户的资料与流水变更
//! 必须串行化，不同账户的变更完全并行，读取不取锁。
//! 单实例服务用进程内异步锁即可满足该约束。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// 账户级写锁
///
/// 按账户 ID 惰性创建锁条目；持有返回的 guard 期间，
/// 同一账户的其他写操作会排队等待。
pub struct AccountLockManager {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl AccountLockManager {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// 获取某账户的写锁
    pub async fn acquire(&self, account_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(account_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        debug!(account_id = %account_id, "acquiring account write lock");
        lock.lock_owned().await
    }

    /// 丢弃某账户的锁条目
    ///
    /// 只能在该账户已从存储中删除之后调用：此后的并发写入
    /// 会先在存储层命中 NotFound，不会再进入临界区。
    pub fn discard(&self, account_id: &str) {
        self.locks.remove(account_id);
    }

    /// 当前持有条目的账户数（容量观测用）
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Default for AccountLockManager {
    fn default() -> Self {
        Self::new()
    }
}
