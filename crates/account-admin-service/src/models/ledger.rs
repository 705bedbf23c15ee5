//! 账本流水实体
//!
//! 每条流水是一次带符号的积分调整，写入后不可编辑、不可删除，
//! 余额是流水的纯折叠结果。

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 管理端未填写原因时落库的系统默认标签
pub const DEFAULT_ADJUST_REASON: &str = "Admin Allocation";

/// 账本流水记录
///
/// `amount` 为带符号整数：正数为发放，负数为扣减。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: u64,
    pub account_id: String,
    pub amount: i64,
    pub reason: String,
    pub actor: String,
    pub created_at: DateTime<Utc>,
}
