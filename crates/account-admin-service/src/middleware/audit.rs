//! 审计日志中间件
//!
//! 自动记录所有成功的写操作（POST/PUT/DELETE）到进程内操作日志，
//! 实现运营操作的审计追溯。积分余额的权威审计在账本流水，
//! 这里覆盖其余变更。

use axum::{
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::state::AppState;

/// 写操作身份头：网关完成认证后注入的管理员标识。
/// 缺失时回退到参考前端硬编码的 "Admin"。
const ACTOR_HEADER: &str = "x-admin-actor";

/// 审计中间件：在写操作成功后写入操作日志
///
/// 日志写入进程内环形缓冲，写满淘汰最旧记录；
/// 审计功能故障不影响正常业务。
pub async fn audit_middleware(
    State(state): State<AppState>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();

    // 只拦截写操作，读操作（GET/HEAD/OPTIONS）无需审计
    if !is_write_method(&method) {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();

    // 搜索虽然走 POST，但只是查询，不属于业务变更范畴
    if path == "/users/search" {
        return next.run(request).await;
    }

    let operator = request
        .headers()
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("Admin")
        .to_string();

    let response = next.run(request).await;

    // 只记录成功的写操作，失败操作无实际变更，记录意义不大
    if response.status().is_success() {
        let (module, action) = parse_module_action(&path, &method);
        let target_id = extract_target(&path);

        state
            .operation_logs
            .record(operator.clone(), module.clone(), action.clone(), target_id);
        debug!(
            operator = %operator,
            module = %module,
            action = %action,
            "审计日志已记录"
        );
    }

    response
}

fn is_write_method(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

/// 从路径中解析业务模块和操作类型
///
/// 约定：
/// - `/users`              -> (users, create)
/// - `/users/bulk-action`  -> (users, bulk-action)
/// - `/user/{id}`          -> (user, update|delete)
/// - `/user/{id}/credits`  -> (user, credits)
/// - `/user/{id}/verify`   -> (user, verify)
fn parse_module_action(path: &str, method: &Method) -> (String, String) {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let module = segments.first().unwrap_or(&"unknown").to_string();

    // 带子资源名的路径直接用子资源作为动作，语义比 HTTP 动词更精确
    let action = match module.as_str() {
        "user" if segments.len() >= 3 => segments[2].to_string(),
        "users" if segments.len() >= 2 => segments[1].to_string(),
        _ => match *method {
            Method::POST => "create".to_string(),
            Method::PUT | Method::PATCH => "update".to_string(),
            Method::DELETE => "delete".to_string(),
            _ => "unknown".to_string(),
        },
    };

    (module, action)
}

/// 从路径中提取操作目标账户 ID
///
/// 仅单账户路由（/user/{id}/...）携带目标；批量操作的目标
/// 在请求体里，逐项结果由响应返回，这里不展开。
fn extract_target(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.first() == Some(&"user") && segments.len() >= 2 {
        return Some(segments[1].to_string());
    }
    None
}
