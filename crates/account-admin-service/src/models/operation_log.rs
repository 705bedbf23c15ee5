//! 运营操作日志
//!
//! 审计中间件把成功的写操作记入进程内的有界环形缓冲，
//! 供 `GET /logs` 倒序分页查询。积分余额的权威审计在账本流水，
//! 这里覆盖其余变更（资料编辑、审核决定、删除、批量操作）。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// 默认保留的日志条数
const DEFAULT_CAPACITY: usize = 1024;

/// 一条运营操作日志
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationLog {
    pub id: u64,
    pub operator: String,
    pub module: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 操作日志环形缓冲
///
/// 容量固定，写满后淘汰最旧记录；日志丢失可接受，不影响业务。
pub struct OperationLogBuffer {
    inner: Mutex<VecDeque<OperationLog>>,
    next_id: AtomicU64,
    capacity: usize,
}

impl OperationLogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY))),
            next_id: AtomicU64::new(1),
            capacity: capacity.max(1),
        }
    }

    /// 追加一条日志，必要时淘汰最旧记录
    pub fn record(
        &self,
        operator: String,
        module: String,
        action: String,
        target_id: Option<String>,
    ) {
        let log = OperationLog {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            operator,
            module,
            action,
            target_id,
            created_at: Utc::now(),
        };

        let mut buf = self.inner.lock();
        if buf.len() == self.capacity {
            buf.pop_front();
        }
        buf.push_back(log);
    }

    /// 倒序（最新在前）分页读取，返回（总数，当前页）
    pub fn list_desc(&self, offset: usize, limit: usize) -> (usize, Vec<OperationLog>) {
        let buf = self.inner.lock();
        let total = buf.len();
        let page = buf
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        (total, page)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Default for OperationLogBuffer {
    fn default() -> Self {
        Self::new()
    }
}
