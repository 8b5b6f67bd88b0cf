// document-backend/src/domain/share_types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShareType {
    Internal,
    External,
    Public,
}

impl ShareType {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INTERNAL" => Some(Self::Internal),
            "EXTERNAL" => Some(Self::External),
            "PUBLIC" => Some(Self::Public),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "INTERNAL",
            Self::External => "EXTERNAL",
            Self::Public => "PUBLIC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipientType {
    User,
    Group,
    Email,
    Link,
}

impl RecipientType {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "USER" => Some(Self::User),
            "GROUP" => Some(Self::Group),
            "EMAIL" => Some(Self::Email),
            "LINK" => Some(Self::Link),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Group => "GROUP",
            Self::Email => "EMAIL",
            Self::Link => "LINK",
        }
    }
}

/// 共有先に与える権限。VIEW < COMMENT < EDIT < FULL の順に包含する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShareAccessLevel {
    View,
    Comment,
    Edit,
    Full,
}

impl ShareAccessLevel {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "VIEW" => Some(Self::View),
            "COMMENT" => Some(Self::Comment),
            "EDIT" => Some(Self::Edit),
            "FULL" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "VIEW",
            Self::Comment => "COMMENT",
            Self::Edit => "EDIT",
            Self::Full => "FULL",
        }
    }

    pub fn allows(&self, required: ShareAccessLevel) -> bool {
        *self >= required
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShareStatus {
    Active,
    Revoked,
}

impl ShareStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Revoked => "REVOKED",
        }
    }
}

/// アクセスログに記録する操作種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessAction {
    Create,
    View,
    Download,
    Update,
    NewVersion,
    Archive,
    Share,
    ShareAccess,
    SubmitForApproval,
    Approve,
    Reject,
    CancelApproval,
}

impl AccessAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::View => "VIEW",
            Self::Download => "DOWNLOAD",
            Self::Update => "UPDATE",
            Self::NewVersion => "NEW_VERSION",
            Self::Archive => "ARCHIVE",
            Self::Share => "SHARE",
            Self::ShareAccess => "SHARE_ACCESS",
            Self::SubmitForApproval => "SUBMIT_FOR_APPROVAL",
            Self::Approve => "APPROVE",
            Self::Reject => "REJECT",
            Self::CancelApproval => "CANCEL_APPROVAL",
        }
    }

    /// 共有リンク経由のアクセスかどうか（アクセスカウント更新の対象）
    pub fn counts_share_access(&self) -> bool {
        matches!(self, Self::ShareAccess)
    }
}

impl std::fmt::Display for AccessAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
