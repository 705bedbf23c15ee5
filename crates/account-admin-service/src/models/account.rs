//! 账户实体与审核状态机
//!
//! 账户角色由 ID 前缀决定且创建后不可变更；
//! 积分余额不在账户上存储，由账本折叠派生（见 `store::ledger`）。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 账户角色
///
/// 对应平台的四类用户，序列化为小写字符串（`teacher` 等）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Guardian,
    Student,
    Donor,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Teacher, Role::Guardian, Role::Student, Role::Donor];

    /// 账户 ID 前缀（含连字符）
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher-",
            Role::Guardian => "guardian-",
            Role::Student => "student-",
            Role::Donor => "donor-",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Guardian => "guardian",
            Role::Student => "student",
            Role::Donor => "donor",
        }
    }

    /// 从账户 ID 解析角色
    ///
    /// 前缀必须完整且其后至少还有一个字符，否则视为不合法 ID。
    pub fn from_account_id(id: &str) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| id.len() > role.id_prefix().len() && id.starts_with(role.id_prefix()))
    }
}

/// 审核状态
///
/// 状态机：`unverified -> pending -> {verified, rejected}`。
/// `verified` 和 `rejected` 对单个审核周期是终态，但管理员可随时改判，
/// 被拒绝的账户也可由申请端重新提交进入 `pending`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    /// 是否处于本轮审核的终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, VerificationStatus::Verified | VerificationStatus::Rejected)
    }
}

/// 账户记录
///
/// 注意没有余额字段：余额永远是该账户账本流水的折叠结果。
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub verification: VerificationStatus,
    pub verification_notes: String,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 资料部分更新
///
/// `None` 表示保持原值；空字符串是合法的显式值（清空该字段），
/// 不能当作“未提供”处理。
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

impl Account {
    /// 创建新账户，初始为未审核状态
    ///
    /// 角色由调用方从 ID 前缀解析后传入，此后不再变更。
    pub fn new(id: String, role: Role, name: String, email: String, phone: String, location: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            role,
            name,
            email,
            phone,
            location,
            verification: VerificationStatus::Unverified,
            verification_notes: String::new(),
            verified_by: None,
            verified_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 应用资料部分更新
    pub fn apply_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        self.updated_at = Utc::now();
    }

    /// 应用一次审核决定
    ///
    /// 任意当前状态下均可执行（管理员可改判已有结论），后写覆盖先写，
    /// 每次都重新记录操作人和时间，拒绝也不例外。
    pub fn apply_decision(&mut self, verified: bool, notes: String, actor: String) {
        let now = Utc::now();
        self.verification = if verified {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Rejected
        };
        self.verification_notes = notes;
        self.verified_by = Some(actor);
        self.verified_at = Some(now);
        self.updated_at = now;
    }

    /// 重新进入待审状态
    ///
    /// 由申请端的重新提交流程触发，不属于管理端 HTTP 接口。
    pub fn resubmit(&mut self) {
        self.verification = VerificationStatus::Pending;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_account_id() {
        assert_eq!(Role::from_account_id("teacher-001"), Some(Role::Teacher));
        assert_eq!(Role::from_account_id("guardian-42"), Some(Role::Guardian));
        assert_eq!(Role::from_account_id("student-abc"), Some(Role::Student));
        assert_eq!(Role::from_account_id("donor-9"), Some(Role::Donor));

        // 前缀不合法或只有前缀没有主体
        assert_eq!(Role::from_account_id("admin-001"), None);
        assert_eq!(Role::from_account_id("teacher-"), None);
        assert_eq!(Role::from_account_id(""), None);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
        assert_eq!(serde_json::to_string(&Role::Donor).unwrap(), "\"donor\"");
    }

    #[test]
    fn test_new_account_is_unverified() {
        let account = account_fixture();
        assert_eq!(account.verification, VerificationStatus::Unverified);
        assert!(account.verified_by.is_none());
        assert!(account.verified_at.is_none());
    }

    #[test]
    fn test_apply_update_none_keeps_value_empty_string_clears() {
        let mut account = account_fixture();
        account.apply_update(ProfileUpdate {
            name: Some("Karim Rahman".to_string()),
            email: None,
            phone: Some(String::new()),
            location: None,
        });

        assert_eq!(account.name, "Karim Rahman");
        // None 不改动
        assert_eq!(account.email, "karim@example.com");
        // 空字符串是显式清空
        assert_eq!(account.phone, "");
        assert_eq!(account.location, "Dhaka");
    }

    #[test]
    fn test_apply_decision_stamps_actor_and_time() {
        let mut account = account_fixture();
        account.apply_decision(true, "文件齐全".to_string(), "Admin".to_string());

        assert_eq!(account.verification, VerificationStatus::Verified);
        assert_eq!(account.verification_notes, "文件齐全");
        assert_eq!(account.verified_by.as_deref(), Some("Admin"));
        assert!(account.verified_at.is_some());
    }

    /// 管理端可对终态账户重复决定：后写覆盖先写，不报错
    #[test]
    fn test_apply_decision_last_write_wins() {
        let mut account = account_fixture();
        account.apply_decision(true, "ok".to_string(), "Admin".to_string());
        account.apply_decision(false, "bad".to_string(), "Admin".to_string());

        assert_eq!(account.verification, VerificationStatus::Rejected);
        assert_eq!(account.verification_notes, "bad");
        // 拒绝同样记录操作人和时间
        assert_eq!(account.verified_by.as_deref(), Some("Admin"));
        assert!(account.verified_at.is_some());
    }

    #[test]
    fn test_resubmit_reenters_pending() {
        let mut account = account_fixture();
        account.apply_decision(false, "材料不清晰".to_string(), "Admin".to_string());
        assert!(account.verification.is_terminal());

        account.resubmit();
        assert_eq!(account.verification, VerificationStatus::Pending);
        assert!(!account.verification.is_terminal());
    }

    fn account_fixture() -> Account {
        Account::new(
            "teacher-001".to_string(),
            Role::Teacher,
            "Karim".to_string(),
            "karim@example.com".to_string(),
            "+8801712345678".to_string(),
            "Dhaka".to_string(),
        )
    }
}
