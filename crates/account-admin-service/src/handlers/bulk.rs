//! 批量操作 HTTP 处理器

use axum::{Json, extract::State};
use tracing::instrument;
use validator::Validate;

use crate::bulk::bulk_apply;
use crate::dto::{BulkActionRequest, BulkActionResponse};
use crate::error::Result;
use crate::state::AppState;

/// 管理端批量操作的默认操作人
const DEFAULT_ACTOR: &str = "Admin";

/// 批量操作
///
/// POST /users/bulk-action
///
/// 逐项独立执行，单项失败是结果数据而不是异常；
/// 只有空列表会让请求本身失败（400 INVALID_REQUEST）。
/// 调用方可用返回的结果序列汇报 “N of M succeeded”。
#[instrument(skip(state, req), fields(count = req.user_ids.len()))]
pub async fn bulk_action(
    State(state): State<AppState>,
    Json(req): Json<BulkActionRequest>,
) -> Result<Json<BulkActionResponse>> {
    req.validate()?;

    let actor = req.actor.unwrap_or_else(|| DEFAULT_ACTOR.to_string());
    let results = bulk_apply(&state.store, &state.locks, req.action, &req.user_ids, &actor).await?;

    Ok(Json(BulkActionResponse::new(results)))
}
