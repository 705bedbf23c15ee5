//! 审核管理 HTTP 处理器
//!
//! 管理端对账户提交材料的审核决定。通过/拒绝始终可用，
//! 不看当前状态（管理员可改判），后写覆盖先写。

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::{info, instrument};
use validator::Validate;

use tuition_shared::observability::metrics;

use crate::dto::{AccountDto, AccountResponse, VerifyAccountRequest};
use crate::error::Result;
use crate::state::AppState;

/// 审核决定
///
/// PUT /user/{id}/verify
///
/// 每次决定都重新记录操作人和时间，拒绝也不例外。
#[instrument(skip(state, req))]
pub async fn decide_verification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<VerifyAccountRequest>,
) -> Result<Json<AccountResponse>> {
    req.validate()?;

    let _guard = state.locks.acquire(&id).await;
    let account = state
        .store
        .decide(&id, req.verified, req.verification_notes, req.verified_by)?;

    let outcome = if req.verified { "verified" } else { "rejected" };
    metrics::record_verification_decision(outcome);
    info!(
        account_id = %id,
        outcome = outcome,
        actor = account.verified_by.as_deref().unwrap_or(""),
        "Verification decision recorded"
    );

    let balance = state.ledger.balance(&id);
    Ok(Json(AccountResponse::new(AccountDto::from_account(account, balance))))
}
