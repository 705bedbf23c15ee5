//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{handlers, middleware::audit_middleware, state::AppState};

/// 构建账户集合路由
///
/// 包含注册入库、搜索和批量操作
fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::account::create_account))
        .route("/users/search", post(handlers::search::search_users))
        .route("/users/bulk-action", post(handlers::bulk::bulk_action))
}

/// 构建单账户路由
///
/// 包含详情、资料更新、删除、积分调整/流水和审核决定
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/{id}", get(handlers::account::get_account))
        .route("/user/{id}", put(handlers::account::update_account))
        .route("/user/{id}", delete(handlers::account::delete_account))
        .route("/user/{id}/credits", post(handlers::credit::adjust_credits))
        .route("/user/{id}/credits", get(handlers::credit::get_credit_history))
        .route(
            "/user/{id}/verify",
            put(handlers::verification::decide_verification),
        )
}

/// 构建操作日志路由
fn log_routes() -> Router<AppState> {
    Router::new().route("/logs", get(handlers::operation_log::list_logs))
}

/// 构建完整的 API 路由
///
/// 返回所有管理核心 API 路由（不含健康检查，由调用方在 main.rs 中挂载）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(users_routes())
        .merge(user_routes())
        .merge(log_routes())
}

/// 组装完整应用（API 路由 + 审计中间件 + 状态）
///
/// main.rs 在此之上再叠加 CORS、安全头和可观测性中间件；
/// E2E 测试直接使用本函数获得与生产一致的请求链路。
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(api_routes())
        .route("/health", get(health_check))
        // 审计中间件：自动记录成功写操作到进程内操作日志
        .layer(middleware::from_fn_with_state(state.clone(), audit_middleware))
        .with_state(state)
}

/// 存活探针：服务进程正常即返回 ok
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "service": "account-admin-service"
    }))
}
