//! 账户管理 HTTP 处理器
//!
//! 提供账户的注册入库、详情查询、资料部分更新和硬删除。
//! 余额不在这里改动，积分调整走 `credit` 处理器。

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use validator::Validate;

use crate::dto::{AccountDto, AccountResponse, CreateAccountRequest, StatusResponse, UpdateAccountRequest};
use crate::error::Result;
use crate::models::ProfileUpdate;
use crate::state::AppState;

/// 注册账户
///
/// POST /users
///
/// 外部报名流程的入库入口：ID 必须携带合法角色前缀，
/// 角色由前缀派生且此后不可变更。
#[instrument(skip(state, req))]
pub async fn create_account(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>> {
    req.validate()?;

    let account = state
        .store
        .insert(req.id, req.name, req.email, req.phone, req.location)?;

    let balance = state.ledger.balance(&account.id);
    Ok(Json(AccountResponse::new(AccountDto::from_account(account, balance))))
}

/// 获取账户详情
///
/// GET /user/{id}
#[instrument(skip(state))]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>> {
    let account = state.store.get(&id)?;
    let balance = state.ledger.balance(&id);
    Ok(Json(AccountResponse::new(AccountDto::from_account(account, balance))))
}

/// 更新账户资料（部分更新）
///
/// PUT /user/{id}
///
/// 未出现的字段保持原值；空字符串是合法的显式值，照常写入。
#[instrument(skip(state, req))]
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>> {
    req.validate()?;

    let update = ProfileUpdate {
        name: req.name,
        email: req.email,
        phone: req.phone,
        location: req.location,
    };

    // 同一账户的写操作串行化
    let _guard = state.locks.acquire(&id).await;
    let account = state.store.update_profile(&id, update)?;

    let balance = state.ledger.balance(&id);
    Ok(Json(AccountResponse::new(AccountDto::from_account(account, balance))))
}

/// 删除账户（硬删除）
///
/// DELETE /user/{id}
///
/// 账本流水保留为孤儿只读数据供审计；重复删除命中 404。
#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>> {
    let _guard = state.locks.acquire(&id).await;
    state.store.remove(&id)?;
    // 账户已不在存储中，后续写入先命中 NotFound，可安全丢弃锁条目
    state.locks.discard(&id);

    Ok(Json(StatusResponse::ok()))
}
