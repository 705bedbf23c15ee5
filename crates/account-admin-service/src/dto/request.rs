//! 账户管理核心请求 DTO 定义
//!
//! 所有 REST API 的请求参数和请求体结构。
//! 服务端资料校验（邮箱格式、长度上限）是防御性补充：
//! 参考前端没有在服务端强制这些检查，这里作为设计选择加上。

use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::bulk::BulkAction;

/// 搜索账户请求
///
/// POST /users/search
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchUsersRequest {
    /// 关键词，对姓名/邮箱/电话做大小写不敏感子串匹配
    #[serde(default)]
    #[validate(length(max = 200, message = "搜索关键词最长 200 字符"))]
    pub query: String,
    /// 角色过滤："all" / "teacher" / "guardian" / "student" / "donor"
    #[serde(default = "default_user_type")]
    pub user_type: String,
}

fn default_user_type() -> String {
    "all".to_string()
}

/// 注册账户请求（外部报名流程的入库入口）
///
/// POST /users
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// 账户 ID，必须携带角色前缀（teacher- / guardian- / student- / donor-）
    #[validate(length(min = 1, max = 64, message = "账户 ID 长度必须在 1-64 之间"))]
    pub id: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "姓名最长 100 字符"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = validate_optional_email))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 32, message = "电话最长 32 字符"))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "地址最长 200 字符"))]
    pub location: String,
}

/// 更新账户资料请求
///
/// PUT /user/{id}
///
/// 未出现的字段保持原值；空字符串是合法的显式值（清空该字段）。
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[validate(length(max = 100, message = "姓名最长 100 字符"))]
    pub name: Option<String>,
    #[validate(custom(function = validate_optional_email))]
    pub email: Option<String>,
    #[validate(length(max = 32, message = "电话最长 32 字符"))]
    pub phone: Option<String>,
    #[validate(length(max = 200, message = "地址最长 200 字符"))]
    pub location: Option<String>,
}

impl UpdateAccountRequest {
    /// 是否一个字段都没有提供
    pub fn is_noop(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.location.is_none()
    }
}

/// 积分调整请求
///
/// POST /user/{id}/credits
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdjustCreditsRequest {
    /// 带符号调整量，负数为扣减；0 在账本层拒绝
    pub credits: i64,
    #[validate(length(max = 500, message = "调整原因最长 500 字符"))]
    pub reason: Option<String>,
    /// 操作人，省略时默认 "Admin"
    #[validate(length(max = 100, message = "操作人最长 100 字符"))]
    pub actor: Option<String>,
}

/// 审核决定请求
///
/// PUT /user/{id}/verify
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAccountRequest {
    pub verified: bool,
    #[serde(default)]
    #[validate(length(max = 500, message = "审核备注最长 500 字符"))]
    pub verification_notes: String,
    #[validate(length(min = 1, max = 100, message = "操作人不能为空且最长 100 字符"))]
    pub verified_by: String,
}

/// 批量操作请求
///
/// POST /users/bulk-action
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionRequest {
    pub action: BulkAction,
    pub user_ids: Vec<String>,
    /// 操作人，省略时默认 "Admin"
    #[validate(length(max = 100, message = "操作人最长 100 字符"))]
    pub actor: Option<String>,
}

/// 分页查询参数
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    /// 计算列表切片的 offset
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0) * self.limit()
    }

    /// 获取限制条数（最大100）
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, 100)
    }
}

/// 邮箱校验：空字符串是“显式清空”而不是格式错误
fn validate_optional_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.validate_email() {
        Ok(())
    } else {
        let mut error = ValidationError::new("email");
        error.message = Some("邮箱格式不正确".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let req: SearchUsersRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.query, "");
        assert_eq!(req.user_type, "all");
    }

    #[test]
    fn test_create_account_request_validation() {
        let valid: CreateAccountRequest = serde_json::from_str(
            r#"{"id":"teacher-001","name":"Karim","email":"karim@example.com","phone":"+880171","location":"Dhaka"}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());

        // 邮箱格式错误
        let invalid: CreateAccountRequest = serde_json::from_str(
            r#"{"id":"teacher-001","email":"not-an-email"}"#,
        )
        .unwrap();
        assert!(invalid.validate().is_err());

        // 空邮箱是显式清空，不是格式错误
        let empty_email: CreateAccountRequest =
            serde_json::from_str(r#"{"id":"teacher-001","email":""}"#).unwrap();
        assert!(empty_email.validate().is_ok());
    }

    #[test]
    fn test_update_request_distinguishes_absent_from_empty() {
        let req: UpdateAccountRequest =
            serde_json::from_str(r#"{"name":"","phone":"+880"}"#).unwrap();
        assert!(req.validate().is_ok());
        // 出现且为空字符串 -> Some("")
        assert_eq!(req.name.as_deref(), Some(""));
        // 未出现 -> None
        assert!(req.email.is_none());
        assert!(!req.is_noop());

        let noop: UpdateAccountRequest = serde_json::from_str("{}").unwrap();
        assert!(noop.is_noop());
    }

    #[test]
    fn test_adjust_credits_request_accepts_negative() {
        let req: AdjustCreditsRequest =
            serde_json::from_str(r#"{"credits":-100,"reason":"penalty"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.credits, -100);
        assert!(req.actor.is_none());
    }

    #[test]
    fn test_verify_request_requires_operator() {
        let valid: VerifyAccountRequest = serde_json::from_str(
            r#"{"verified":true,"verificationNotes":"ok","verifiedBy":"Admin"}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());

        let missing_operator: VerifyAccountRequest =
            serde_json::from_str(r#"{"verified":false,"verifiedBy":""}"#).unwrap();
        assert!(missing_operator.validate().is_err());
    }

    #[test]
    fn test_bulk_request_camel_case_fields() {
        let req: BulkActionRequest = serde_json::from_str(
            r#"{"action":"delete","userIds":["teacher-001","donor-002"]}"#,
        )
        .unwrap();
        assert_eq!(req.action, BulkAction::Delete);
        assert_eq!(req.user_ids.len(), 2);
    }

    #[test]
    fn test_pagination_offset_and_limit() {
        let params = PaginationParams { page: 3, page_size: 10 };
        assert_eq!(params.offset(), 20);
        assert_eq!(params.limit(), 10);

        // 超限 page_size 被钳制
        let params = PaginationParams { page: 1, page_size: 1000 };
        assert_eq!(params.limit(), 100);

        // 非法 page 不产生负 offset
        let params = PaginationParams { page: 0, page_size: 20 };
        assert_eq!(params.offset(), 0);
    }
}
