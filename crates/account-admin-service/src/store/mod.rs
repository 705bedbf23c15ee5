//! 账户存储
//!
//! 进程内共享状态存储：账户记录按 ID 索引，另维护注册顺序
//! 供搜索结果使用。余额不在这里维护，积分永远走 `ledger` 模块。
//!
//! 并发约定：读操作可与任意写并发；对同一账户的写操作由调用方
//! 通过 `lock::AccountLockManager` 串行化后再进入本模块。

pub mod ledger;
pub mod lock;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use tracing::info;

use crate::error::{AdminError, Result};
use crate::models::{Account, ProfileUpdate, Role};

pub use ledger::CreditLedger;
pub use lock::AccountLockManager;

/// 账户存储
pub struct AccountStore {
    accounts: DashMap<String, Account>,
    /// 注册顺序，搜索结果按此顺序返回（单次调用内稳定）
    order: RwLock<Vec<String>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            order: RwLock::new(Vec::new()),
        }
    }

    /// 注册新账户
    ///
    /// 账户 ID 必须携带合法角色前缀（`teacher-` / `guardian-` /
    /// `student-` / `donor-`），角色由前缀派生且此后不可变更；
    /// 重复 ID 拒绝。
    pub fn insert(
        &self,
        id: String,
        name: String,
        email: String,
        phone: String,
        location: String,
    ) -> Result<Account> {
        let role = Role::from_account_id(&id)
            .ok_or_else(|| AdminError::Validation(format!("账户 ID 前缀不合法: {}", id)))?;

        let account = Account::new(id.clone(), role, name, email, phone, location);

        // 先完成 map 写入并释放分片锁，再更新顺序表；
        // snapshot_ordered 以相反方向（顺序表 -> map）取锁，交叠会死锁
        match self.accounts.entry(id.clone()) {
            Entry::Occupied(_) => return Err(AdminError::DuplicateAccount(id)),
            Entry::Vacant(vacant) => {
                vacant.insert(account.clone());
            }
        }
        self.order.write().push(id.clone());

        info!(account_id = %id, role = role.as_str(), "Account registered");
        Ok(account)
    }

    /// 按 ID 查询账户
    pub fn get(&self, id: &str) -> Result<Account> {
        self.accounts
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AdminError::AccountNotFound(id.to_string()))
    }

    /// 账户是否存在
    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    /// 资料部分更新
    ///
    /// `None` 字段保持原值；空字符串是合法的显式值，照常写入。
    pub fn update_profile(&self, id: &str, update: ProfileUpdate) -> Result<Account> {
        let mut entry = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| AdminError::AccountNotFound(id.to_string()))?;
        entry.apply_update(update);
        Ok(entry.value().clone())
    }

    /// 审核决定
    ///
    /// 任意当前状态下均可执行，后写覆盖先写，每次重新记录操作人和时间。
    pub fn decide(&self, id: &str, verified: bool, notes: String, actor: String) -> Result<Account> {
        let mut entry = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| AdminError::AccountNotFound(id.to_string()))?;
        entry.apply_decision(verified, notes, actor);
        Ok(entry.value().clone())
    }

    /// 重新进入待审状态（由申请端的重新提交流程触发）
    pub fn resubmit(&self, id: &str) -> Result<Account> {
        let mut entry = self
            .accounts
            .get_mut(id)
            .ok_or_else(|| AdminError::AccountNotFound(id.to_string()))?;
        entry.resubmit();
        Ok(entry.value().clone())
    }

    /// 硬删除账户
    ///
    /// 没有墓碑或归档：账户记录直接移除；其账本流水由
    /// `CreditLedger` 保留为孤儿只读数据供审计。
    /// 重复删除命中 NotFound 而不是崩溃。
    pub fn remove(&self, id: &str) -> Result<()> {
        match self.accounts.remove(id) {
            Some(_) => {
                self.order.write().retain(|existing| existing != id);
                info!(account_id = %id, "Account removed");
                Ok(())
            }
            None => Err(AdminError::AccountNotFound(id.to_string())),
        }
    }

    /// 按注册顺序快照全部账户
    pub fn snapshot_ordered(&self) -> Vec<Account> {
        let order = self.order.read();
        order
            .iter()
            .filter_map(|id| self.accounts.get(id).map(|entry| entry.value().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}
