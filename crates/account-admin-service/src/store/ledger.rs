//! 积分账本
//!
//! 只追加的签名调整日志：余额是流水的纯折叠结果，
//! 不存在可直接改写的余额字段。为避免每次读取全量折叠，
//! 余额投影与追加在同一账户临界区内一起维护，
//! 两者的一致性由测试中的折叠校验兜底。

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use tracing::info;

use crate::error::{AdminError, Result};
use crate::models::{DEFAULT_ADJUST_REASON, LedgerEntry};

/// 积分账本
///
/// 并发约定与 `AccountStore` 一致：`adjust` 必须在目标账户的
/// 写锁内调用；`balance` / `history` 可随时并发读取。
pub struct CreditLedger {
    /// 每账户的流水列表，按接受顺序追加
    entries: DashMap<String, Vec<LedgerEntry>>,
    /// 余额投影，随每次追加更新
    balances: DashMap<String, i64>,
    /// 全局流水序号
    next_id: AtomicU64,
    /// 是否允许扣减后余额为负（可配置策略，默认允许）
    allow_negative_balance: bool,
}

impl CreditLedger {
    pub fn new(allow_negative_balance: bool) -> Self {
        Self {
            entries: DashMap::new(),
            balances: DashMap::new(),
            next_id: AtomicU64::new(1),
            allow_negative_balance,
        }
    }

    /// 追加一条签名调整并返回新余额
    ///
    /// - 金额为 0 直接拒绝，不产生流水（空写入会污染审计日志）；
    /// - 原因省略或为空白时落系统默认标签；
    /// - 负余额默认放行，策略关闭时越过 0 的扣减拒绝且不写入。
    pub fn adjust(
        &self,
        account_id: &str,
        amount: i64,
        reason: Option<String>,
        actor: &str,
    ) -> Result<i64> {
        if amount == 0 {
            return Err(AdminError::InvalidAmount);
        }

        let new_balance = self.balance(account_id) + amount;
        if !self.allow_negative_balance && new_balance < 0 {
            return Err(AdminError::InsufficientCredits);
        }

        let reason = reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADJUST_REASON.to_string());

        let entry = LedgerEntry {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            account_id: account_id.to_string(),
            amount,
            reason,
            actor: actor.to_string(),
            created_at: Utc::now(),
        };

        info!(
            account_id = %account_id,
            amount = amount,
            new_balance = new_balance,
            actor = %actor,
            "Credit adjustment recorded"
        );

        self.entries
            .entry(account_id.to_string())
            .or_default()
            .push(entry);
        self.balances.insert(account_id.to_string(), new_balance);

        Ok(new_balance)
    }

    /// 当前余额（无流水的账户为 0）
    pub fn balance(&self, account_id: &str) -> i64 {
        self.balances.get(account_id).map(|b| *b).unwrap_or(0)
    }

    /// 全量折叠计算余额
    ///
    /// 审计口径：余额投影必须与该结果一致。
    pub fn fold_balance(&self, account_id: &str) -> i64 {
        self.entries
            .get(account_id)
            .map(|entries| entries.iter().map(|e| e.amount).sum())
            .unwrap_or(0)
    }

    /// 按时间顺序返回账户流水
    ///
    /// 账户删除后流水仍保留（孤儿只读数据），供审计回溯。
    pub fn history(&self, account_id: &str) -> Vec<LedgerEntry> {
        self.entries
            .get(account_id)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    /// 某账户的流水条数
    pub fn entry_count(&self, account_id: &str) -> usize {
        self.entries.get(account_id).map(|e| e.len()).unwrap_or(0)
    }
}
