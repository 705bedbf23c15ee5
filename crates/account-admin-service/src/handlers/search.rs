//! 账户搜索 HTTP 处理器

use axum::{Json, extract::State};
use tracing::instrument;
use validator::Validate;

use crate::dto::{AccountDto, SearchUsersRequest, SearchUsersResponse};
use crate::error::{AdminError, Result};
use crate::search::{RoleFilter, search_accounts};
use crate::state::AppState;

/// 搜索账户
///
/// POST /users/search
///
/// 关键词为空且角色不限时返回空集（防全量扫描的契约行为）。
/// 返回的账户带派生余额。
#[instrument(skip(state, req), fields(user_type = %req.user_type))]
pub async fn search_users(
    State(state): State<AppState>,
    Json(req): Json<SearchUsersRequest>,
) -> Result<Json<SearchUsersResponse>> {
    req.validate()?;

    let role_filter = RoleFilter::parse(&req.user_type)
        .ok_or_else(|| AdminError::Validation(format!("未知的账户类型: {}", req.user_type)))?;

    let users = search_accounts(&state.store, &req.query, role_filter)
        .into_iter()
        .map(|account| {
            let balance = state.ledger.balance(&account.id);
            AccountDto::from_account(account, balance)
        })
        .collect();

    Ok(Json(SearchUsersResponse::new(users)))
}
