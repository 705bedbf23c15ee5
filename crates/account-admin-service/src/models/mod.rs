//! 账户管理核心的实体模型

pub mod account;
pub mod ledger;
pub mod operation_log;

pub use account::{Account, ProfileUpdate, Role, VerificationStatus};
pub use ledger::{DEFAULT_ADJUST_REASON, LedgerEntry};
pub use operation_log::{OperationLog, OperationLogBuffer};
