// ==========================================
// 견적 공정 그룹 엔진 - 도메인 타입 정의
// ==========================================
// 책임: 공정 그룹 키 (이름 있는 공정 / 이름 없는 새 공정)
// ==========================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 이름 없는 새 공정 키를 JSON 경계에서 표현할 때 쓰는 접두어
///
/// 저장 레코드의 `processOrder` 는 `string[]` 형태를 유지해야 하므로
/// 엔진 밖으로 나갈 때만 보이지 않는 문자열로 인코딩한다.
pub const PENDING_WIRE_PREFIX: &str = "\u{200B}new-section:";

// ==========================================
// 공정 그룹 키 (Group Key)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// 사용자가 이름을 붙인 공정 (예: "가설철거")
    Named(String),
    /// 공정 추가 버튼으로 만들어진, 아직 이름이 없는 공정
    Pending(u64),
}

impl GroupKey {
    pub fn named(name: impl Into<String>) -> Self {
        GroupKey::Named(name.into())
    }

    /// 화면/엑셀에 표시되는 이름 (새 공정은 빈 문자열)
    pub fn display_name(&self) -> &str {
        match self {
            GroupKey::Named(name) => name,
            GroupKey::Pending(_) => "",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, GroupKey::Pending(_))
    }

    /// 이름이 비어 있는 공정 (공백만 있는 이름 포함)
    pub fn is_blank(&self) -> bool {
        match self {
            GroupKey::Named(name) => name.trim().is_empty(),
            GroupKey::Pending(_) => false,
        }
    }

    pub fn to_wire(&self) -> String {
        match self {
            GroupKey::Named(name) => name.clone(),
            GroupKey::Pending(seq) => format!("{}{}", PENDING_WIRE_PREFIX, seq),
        }
    }

    pub fn from_wire(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix(PENDING_WIRE_PREFIX) {
            if let Ok(seq) = rest.parse::<u64>() {
                return GroupKey::Pending(seq);
            }
        }
        GroupKey::Named(raw.to_string())
    }
}

impl Default for GroupKey {
    fn default() -> Self {
        GroupKey::Named(String::new())
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for GroupKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = crate::domain::lenient::text(deserializer)?;
        Ok(GroupKey::from_wire(&raw))
    }
}
