//! 操作日志 HTTP 处理器

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use crate::dto::{OperationLogsResponse, PageResponse, PaginationParams};
use crate::error::Result;
use crate::state::AppState;

/// 查询运营操作日志（最新在前）
///
/// GET /logs
#[instrument(skip(state))]
pub async fn list_logs(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<OperationLogsResponse>> {
    let offset = pagination.offset().max(0) as usize;
    let limit = pagination.limit() as usize;

    let (total, items) = state.operation_logs.list_desc(offset, limit);

    let logs = PageResponse::new(items, total as i64, pagination.page, pagination.page_size);
    Ok(Json(OperationLogsResponse::new(logs)))
}
