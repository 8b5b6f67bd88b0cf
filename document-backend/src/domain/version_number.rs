// document-backend/src/domain/version_number.rs

//! ドキュメントのバージョン番号（`{major}.{minor}` 形式）
//!
//! 新しいバージョンは常にマイナー番号のみを繰り上げる。
//! メジャー番号を上げる経路は持たない固定ポリシー。

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionNumber {
    pub major: u32,
    pub minor: u32,
}

impl VersionNumber {
    pub const INITIAL: VersionNumber = VersionNumber { major: 1, minor: 0 };

    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// "1.3" のような文字列を解釈する
    pub fn parse(value: &str) -> Option<Self> {
        let (major, minor) = value.trim().split_once('.')?;
        let major = major.parse().ok()?;
        let minor = minor.parse().ok()?;
        Some(Self { major, minor })
    }

    /// 次のバージョン（マイナー番号 + 1）
    pub fn next(&self) -> Self {
        Self {
            major: self.major,
            minor: self.minor.saturating_add(1),
        }
    }
}

impl Default for VersionNumber {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl std::str::FromStr for VersionNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid version number: '{}'", s))
    }
}
