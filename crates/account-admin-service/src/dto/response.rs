//! 账户管理核心响应 DTO 定义
//!
//! 所有 REST API 的响应体结构。成功响应的外层形状与参考前端的
//! 调用契约对齐（`success` + 载荷字段），错误响应由
//! `error::AdminError` 的 `IntoResponse` 统一产出。

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::bulk::BulkActionResult;
use crate::models::{Account, LedgerEntry, OperationLog, Role, VerificationStatus};

/// 账户 DTO（含派生余额）
///
/// `credit_balance` 不是账户的存储字段，由账本折叠结果在
/// 序列化时拼入。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub credit_balance: i64,
    pub verification: VerificationStatus,
    pub verification_notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountDto {
    /// 由账户记录和当前余额组装
    pub fn from_account(account: Account, credit_balance: i64) -> Self {
        Self {
            id: account.id,
            role: account.role,
            name: account.name,
            email: account.email,
            phone: account.phone,
            location: account.location,
            credit_balance,
            verification: account.verification,
            verification_notes: account.verification_notes,
            verified_by: account.verified_by,
            verified_at: account.verified_at,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// 分页响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    /// 创建分页响应
    pub fn new(items: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }

    /// 创建空分页响应
    pub fn empty(page: i64, page_size: i64) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            page_size,
            total_pages: 0,
        }
    }
}

/// 搜索响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUsersResponse {
    pub success: bool,
    pub users: Vec<AccountDto>,
}

impl SearchUsersResponse {
    pub fn new(users: Vec<AccountDto>) -> Self {
        Self { success: true, users }
    }
}

/// 单账户响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub success: bool,
    pub user: AccountDto,
}

impl AccountResponse {
    pub fn new(user: AccountDto) -> Self {
        Self { success: true, user }
    }
}

/// 仅状态响应（删除等无载荷操作）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// 积分调整响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustCreditsResponse {
    pub success: bool,
    /// 调整后的余额（账本折叠结果）
    pub new_balance: i64,
}

impl AdjustCreditsResponse {
    pub fn new(new_balance: i64) -> Self {
        Self {
            success: true,
            new_balance,
        }
    }
}

/// 账本流水历史响应（按时间顺序分页）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditHistoryResponse {
    pub success: bool,
    pub balance: i64,
    pub history: PageResponse<LedgerEntry>,
}

impl CreditHistoryResponse {
    pub fn new(balance: i64, history: PageResponse<LedgerEntry>) -> Self {
        Self {
            success: true,
            balance,
            history,
        }
    }
}

/// 批量操作响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionResponse {
    pub success: bool,
    pub results: Vec<BulkActionResult>,
}

impl BulkActionResponse {
    pub fn new(results: Vec<BulkActionResult>) -> Self {
        Self {
            success: true,
            results,
        }
    }
}

/// 操作日志响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationLogsResponse {
    pub success: bool,
    pub logs: PageResponse<OperationLog>,
}

impl OperationLogsResponse {
    pub fn new(logs: PageResponse<OperationLog>) -> Self {
        Self { success: true, logs }
    }
}
