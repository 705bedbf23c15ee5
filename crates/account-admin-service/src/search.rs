//! 账户搜索引擎
//!
//! 把管理端的一次查询解析为有界的账户列表：
//! 关键词对姓名/邮箱/电话做大小写不敏感子串匹配，
//! 角色过滤按 ID 前缀，两者同时给出时取交集（AND）。

use crate::models::{Account, Role};
use crate::store::AccountStore;

/// 角色过滤条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFilter {
    /// 不限角色（参考前端传 "all"）
    All,
    Only(Role),
}

impl RoleFilter {
    /// 解析前端传入的 userType 值
    pub fn parse(value: &str) -> Option<RoleFilter> {
        match value {
            "all" | "" => Some(RoleFilter::All),
            "teacher" => Some(RoleFilter::Only(Role::Teacher)),
            "guardian" => Some(RoleFilter::Only(Role::Guardian)),
            "student" => Some(RoleFilter::Only(Role::Student)),
            "donor" => Some(RoleFilter::Only(Role::Donor)),
            _ => None,
        }
    }

    fn matches(&self, account: &Account) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(role) => account.role == *role,
        }
    }
}

/// 搜索账户
///
/// 契约与参考行为一致：关键词为空且角色不限时返回空集，
/// 这是对全量扫描的刻意防护，不是错误。
/// 结果按注册顺序返回（单次调用内稳定）。
pub fn search_accounts(store: &AccountStore, text: &str, role_filter: RoleFilter) -> Vec<Account> {
    let text = text.trim();
    if text.is_empty() && role_filter == RoleFilter::All {
        return Vec::new();
    }

    let needle = text.to_lowercase();
    store
        .snapshot_ordered()
        .into_iter()
        .filter(|account| {
            role_filter.matches(account) && (needle.is_empty() || matches_text(account, &needle))
        })
        .collect()
}

/// 任一字段命中即视为匹配
fn matches_text(account: &Account, needle: &str) -> bool {
    account.name.to_lowercase().contains(needle)
        || account.email.to_lowercase().contains(needle)
        || account.phone.to_lowercase().contains(needle)
}
