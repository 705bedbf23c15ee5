//! 账户管理核心 DTO 模块
//!
//! 包含所有请求和响应的数据传输对象

pub mod request;
pub mod response;

// 重新导出常用类型
pub use request::{
    AdjustCreditsRequest, BulkActionRequest, CreateAccountRequest, PaginationParams,
    SearchUsersRequest, UpdateAccountRequest, VerifyAccountRequest,
};

pub use response::{
    AccountDto, AccountResponse, AdjustCreditsResponse, BulkActionResponse,
    CreditHistoryResponse, OperationLogsResponse, PageResponse, SearchUsersResponse,
    StatusResponse,
};
