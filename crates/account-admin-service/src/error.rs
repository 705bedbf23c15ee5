//! 账户管理核心错误类型定义
//!
//! 包含所有 admin service 特有的错误类型

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 账户管理核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    // 目标不存在
    #[error("账户不存在: {0}")]
    AccountNotFound(String),

    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 业务错误
    #[error("账户已存在: {0}")]
    DuplicateAccount(String),
    #[error("调整金额不能为 0")]
    InvalidAmount,
    #[error("余额不足: 当前策略不允许负余额")]
    InsufficientCredits,
    #[error("请求不合法: {0}")]
    InvalidRequest(String),

    // 系统错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl AdminError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AccountNotFound(_) => StatusCode::NOT_FOUND,

            Self::Validation(_) | Self::InvalidAmount | Self::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }

            // 请求合法但与当前状态冲突
            Self::DuplicateAccount(_) | Self::InsufficientCredits => StatusCode::CONFLICT,

            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateAccount(_) => "DUPLICATE_ACCOUNT",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InsufficientCredits => "INSUFFICIENT_CREDITS",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for AdminError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, AdminError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    // ---- 辅助函数 ----

    /// 构造所有错误变体及其期望的 (StatusCode, error_code) 映射。
    /// 使用表驱动方式避免逐个变体写重复断言，同时保证新增变体时只需在一处维护。
    fn all_error_variants() -> Vec<(AdminError, StatusCode, &'static str)> {
        vec![
            // 目标不存在：前端依赖 404 做条件跳转
            (
                AdminError::AccountNotFound("teacher-001".into()),
                StatusCode::NOT_FOUND,
                "ACCOUNT_NOT_FOUND",
            ),
            // 参数校验
            (
                AdminError::Validation("email invalid".into()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (AdminError::InvalidAmount, StatusCode::BAD_REQUEST, "INVALID_AMOUNT"),
            (
                AdminError::InvalidRequest("empty batch".into()),
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
            ),
            // 业务冲突类：409 表示请求合法但与当前状态冲突
            (
                AdminError::DuplicateAccount("donor-001".into()),
                StatusCode::CONFLICT,
                "DUPLICATE_ACCOUNT",
            ),
            (
                AdminError::InsufficientCredits,
                StatusCode::CONFLICT,
                "INSUFFICIENT_CREDITS",
            ),
            // 系统级错误：统一 500，防止内部实现细节泄露
            (
                AdminError::Internal("unexpected state".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ]
    }

    // ---- 表驱动：全量 status_code 覆盖 ----

    /// 确保每个错误变体都映射到正确的 HTTP 状态码。
    /// 状态码错误会导致前端误判请求结果（如把 409 当 500 处理），所以需要逐一验证。
    #[test]
    fn test_all_variants_status_code() {
        for (error, expected_status, label) in all_error_variants() {
            assert_eq!(
                error.status_code(),
                expected_status,
                "状态码不匹配: variant={label}"
            );
        }
    }

    // ---- 表驱动：全量 error_code 覆盖 ----

    /// 错误码是 API 契约的一部分，客户端用它做条件分支。
    /// 任何错误码变更都是破坏性变更，必须逐一锁定。
    #[test]
    fn test_all_variants_error_code() {
        for (error, _status, expected_code) in all_error_variants() {
            assert_eq!(
                error.error_code(),
                expected_code,
                "错误码不匹配: expected={expected_code}"
            );
        }
    }

    // ---- Display trait 测试 ----

    /// Display 输出直接作为 API 响应的 message 字段返回给用户，
    /// 必须包含关键上下文（如账户 ID），否则用户无法定位问题。
    #[test]
    fn test_display_contains_context_for_parameterized_variants() {
        assert!(
            AdminError::AccountNotFound("teacher-001".into())
                .to_string()
                .contains("teacher-001")
        );
        assert!(
            AdminError::DuplicateAccount("donor-9".into())
                .to_string()
                .contains("donor-9")
        );
        assert!(
            AdminError::Validation("email invalid".into())
                .to_string()
                .contains("email invalid")
        );
        assert!(
            AdminError::InvalidRequest("empty batch".into())
                .to_string()
                .contains("empty batch")
        );
        assert!(AdminError::Internal("oom".into()).to_string().contains("oom"));
    }

    /// 无参数的变体也应有可读描述，不能返回空字符串
    #[test]
    fn test_display_nonempty_for_unit_variants() {
        for err in [AdminError::InvalidAmount, AdminError::InsufficientCredits] {
            let msg = err.to_string();
            assert!(!msg.is_empty(), "Display 输出不应为空: {:?}", err);
        }
    }

    // ---- IntoResponse 测试 ----

    /// IntoResponse 是错误到 HTTP 响应的最终出口。
    /// 必须验证：状态码正确、响应体结构完整（success/code/message 三字段），
    /// 否则前端解析会崩溃。
    #[tokio::test]
    async fn test_into_response_body_structure() {
        for (error, expected_status, expected_code) in all_error_variants() {
            let label = format!("{:?}", error);
            let response = error.into_response();

            assert_eq!(
                response.status(),
                expected_status,
                "响应状态码不匹配: {label}"
            );

            let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("读取响应体失败");
            let body: serde_json::Value =
                serde_json::from_slice(&body_bytes).expect("响应体不是合法 JSON");

            assert_eq!(body["success"], json!(false), "success 字段应为 false: {label}");
            assert_eq!(body["code"], json!(expected_code), "code 字段不匹配: {label}");
            assert!(
                !body["message"].as_str().unwrap_or("").is_empty(),
                "message 不应为空: {label}"
            );
        }
    }

    /// 系统级错误的响应消息不应泄露内部细节，只返回通用提示。
    /// 这是安全要求，防止攻击者通过错误消息探测系统架构。
    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let error = AdminError::Internal("lock poisoned at store.rs".into());
        let response = error.into_response();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("读取响应体失败");
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        let message = body["message"].as_str().unwrap();

        assert!(
            !message.contains("lock poisoned"),
            "系统错误消息泄露了内部细节: {message}"
        );
        assert!(message.contains("服务内部错误"), "系统错误应返回通用提示: {message}");
    }

    // ---- From<validator::ValidationErrors> 转换测试 ----

    /// validator 是请求参数校验的统一入口，转换必须把字段级错误信息带入 AdminError，
    /// 否则用户无法知道哪个字段校验失败。
    #[test]
    fn test_from_validation_errors() {
        use validator::{ValidationError, ValidationErrors};

        let mut errors = ValidationErrors::new();
        let mut field_error = ValidationError::new("email");
        field_error.message = Some("邮箱格式不正确".into());
        errors.add("email", field_error);

        let admin_error: AdminError = errors.into();
        match &admin_error {
            AdminError::Validation(msg) => {
                assert!(msg.contains("email"), "转换后应保留字段名: {msg}");
            }
            other => panic!("期望 Validation 变体，实际: {:?}", other),
        }

        assert_eq!(admin_error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(admin_error.error_code(), "VALIDATION_ERROR");
    }

    // ---- 变体完备性校验 ----

    /// 如果新增了变体但忘记加测试，这个计数断言会失败。
    #[test]
    fn test_all_variants_covered_in_table() {
        assert_eq!(
            all_error_variants().len(),
            7,
            "表驱动用例数量与变体总数不一致，可能新增了变体但未更新测试"
        );
    }
}
