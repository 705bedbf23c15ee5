//! 积分管理 HTTP 处理器
//!
//! 实现签名积分调整和账本流水查询。
//! 调整在目标账户的写锁内完成存在性检查和追加，
//! 保证与删除、其他调整串行。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::{info, instrument};
use validator::Validate;

use tuition_shared::observability::metrics;

use crate::dto::{
    AdjustCreditsRequest, AdjustCreditsResponse, CreditHistoryResponse, PageResponse,
    PaginationParams,
};
use crate::error::{AdminError, Result};
use crate::state::AppState;

/// 管理端积分调整的默认操作人（参考前端硬编码的身份）
const DEFAULT_ACTOR: &str = "Admin";

/// 积分调整
///
/// POST /user/{id}/credits
///
/// `credits` 为带符号整数，负数为扣减；0 被账本层拒绝。
/// 负余额默认放行，部署可通过策略配置关闭。
#[instrument(skip(state, req))]
pub async fn adjust_credits(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AdjustCreditsRequest>,
) -> Result<Json<AdjustCreditsResponse>> {
    req.validate()?;

    let actor = req.actor.unwrap_or_else(|| DEFAULT_ACTOR.to_string());

    // 存在性检查和追加必须在同一临界区内，避免与删除竞争
    let _guard = state.locks.acquire(&id).await;
    if !state.store.contains(&id) {
        return Err(AdminError::AccountNotFound(id));
    }

    let new_balance = state.ledger.adjust(&id, req.credits, req.reason, &actor)?;

    let direction = if req.credits > 0 { "credit" } else { "debit" };
    metrics::record_credit_adjustment(direction, "success");
    info!(
        account_id = %id,
        amount = req.credits,
        new_balance = new_balance,
        actor = %actor,
        "Credit adjustment applied"
    );

    Ok(Json(AdjustCreditsResponse::new(new_balance)))
}

/// 账本流水查询（按时间顺序分页）
///
/// GET /user/{id}/credits
///
/// 审计展示用：返回当前余额和该账户的全部流水分页。
#[instrument(skip(state))]
pub async fn get_credit_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<CreditHistoryResponse>> {
    if !state.store.contains(&id) {
        return Err(AdminError::AccountNotFound(id));
    }

    let balance = state.ledger.balance(&id);
    let entries = state.ledger.history(&id);
    let total = entries.len() as i64;

    let offset = pagination.offset().max(0) as usize;
    let limit = pagination.limit() as usize;
    let items: Vec<_> = entries.into_iter().skip(offset).take(limit).collect();

    let history = PageResponse::new(items, total, pagination.page, pagination.page_size);
    Ok(Json(CreditHistoryResponse::new(balance, history)))
}
