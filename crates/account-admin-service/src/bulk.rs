//! 批量操作协调器
//!
//! 对一组账户应用同一动作（verify / delete），逐项独立执行：
//! 单项失败记录为该项的结果数据，不中断其余项，也不整体回滚。
//! 各项并发展开，同一账户的变更仍由账户级写锁串行化。

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use tuition_shared::observability::metrics;

use crate::error::{AdminError, Result};
use crate::store::{AccountLockManager, AccountStore};

/// 批量动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Verify,
    Delete,
}

impl BulkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkAction::Verify => "verify",
            BulkAction::Delete => "delete",
        }
    }
}

/// 单个账户的批量操作结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionResult {
    pub account_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
}

impl BulkActionResult {
    fn ok(account_id: String) -> Self {
        Self {
            account_id,
            success: true,
            error_reason: None,
        }
    }

    fn failed(account_id: String, error: &AdminError) -> Self {
        Self {
            account_id,
            success: false,
            error_reason: Some(error.to_string()),
        }
    }
}

/// 对一组账户应用同一动作
///
/// - 空列表拒绝（`InvalidRequest`），这是唯一让协调器本身失败的输入；
/// - 重复 ID 防御性去重（保留首次出现的顺序），每个唯一 ID 只产出一条结果；
/// - 逐项结果全量返回，调用方可据此汇报 “N of M succeeded”。
#[instrument(skip(store, locks, account_ids), fields(count = account_ids.len()))]
pub async fn bulk_apply(
    store: &Arc<AccountStore>,
    locks: &Arc<AccountLockManager>,
    action: BulkAction,
    account_ids: &[String],
    actor: &str,
) -> Result<Vec<BulkActionResult>> {
    if account_ids.is_empty() {
        return Err(AdminError::InvalidRequest("账户 ID 列表不能为空".to_string()));
    }

    // 防御性去重：同一批次中重复出现的 ID 只处理一次
    let mut seen = std::collections::HashSet::new();
    let unique_ids: Vec<String> = account_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect();

    let tasks = unique_ids.into_iter().map(|account_id| {
        let store = store.clone();
        let locks = locks.clone();
        let actor = actor.to_string();
        async move {
            let _guard = locks.acquire(&account_id).await;
            let outcome = match action {
                BulkAction::Verify => store
                    .decide(&account_id, true, String::new(), actor)
                    .map(|_| ()),
                BulkAction::Delete => {
                    let removed = store.remove(&account_id);
                    if removed.is_ok() {
                        // 账户已不在存储中，后续写入会命中 NotFound，可安全丢弃锁条目
                        locks.discard(&account_id);
                    }
                    removed
                }
            };

            metrics::record_bulk_action_item(action.as_str(), outcome.is_ok());
            match outcome {
                Ok(()) => BulkActionResult::ok(account_id),
                Err(error) => BulkActionResult::failed(account_id, &error),
            }
        }
    });

    let results = join_all(tasks).await;

    let succeeded = results.iter().filter(|r| r.success).count();
    info!(
        action = action.as_str(),
        total = results.len(),
        succeeded = succeeded,
        "Bulk action completed"
    );

    Ok(results)
}
