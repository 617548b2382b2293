//! Domain identifiers.
//!
//! # ULID ベースの ID
//! Task の ID には ULID (Universally Unique Lexicographically Sortable
//! Identifier) を使用します。
//!
//! ## ULID の特性
//! - **時刻でソート可能**: timestamp が先頭にあるため、生成順序でソートできる
//! - **衝突しない**: 80-bit のランダム部があるため、同一ミリ秒内の連続生成でも
//!   一意（タイムスタンプ文字列由来の ID にあった衝突リスクを解消）
//! - **UUID互換**: 128-bit で UUID と同じサイズ
//!
//! On the wire the id is an opaque string, so `TaskId` serializes
//! transparently as the canonical 26-char ULID form and parses back from
//! it (`FromStr`); a displayed id and a stored id are the same text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identifier of a Task (the unit the delete operation names).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Ulid);

impl TaskId {
    /// Wrap an existing ULID.
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// The underlying ULID.
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for TaskId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Ulid::from_string(s)?))
    }
}
