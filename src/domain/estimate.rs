// ==========================================
// 견적 공정 그룹 엔진 - 견적 상태 / 저장 레코드
// ==========================================
// 책임: 편집 세션 상태, 저장소와 주고받는 JSON 레코드, 가져오기 결과
// 레드라인: 동작(그룹화/순서 변경)은 engine 모듈에 둔다
// ==========================================

use crate::domain::line_item::LineItem;
use crate::domain::types::GroupKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// EstimateMeta - 견적서 머리 정보
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateMeta {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub estimate_date: Option<NaiveDate>,
    #[serde(default)]
    pub note: String,
}

// ==========================================
// EstimateDraft - 편집 세션 상태
// ==========================================
/// 한 편집 세션이 단독으로 소유하는 항목/공정 순서
///
/// `next_pending` 은 새 공정 키 발급용 단조 증가 카운터
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EstimateDraft {
    pub items: Vec<LineItem>,
    pub order: Vec<GroupKey>,
    pub next_pending: u64,
}

// ==========================================
// PersistedRecord - 저장 레코드
// ==========================================
/// 견적/템플릿 저장소가 그대로 보관하는 `{items, processOrder}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_order: Option<Vec<GroupKey>>,
}

impl PersistedRecord {
    /// DB 컬럼(JSON 텍스트) 두 개에서 레코드 복원
    ///
    /// - items 파싱 실패/빈 값 → 빈 목록
    /// - process_order 파싱 실패/빈 값 → None (호출 측에서 순서 재구성)
    pub fn from_json_columns(items_json: Option<&str>, order_json: Option<&str>) -> Self {
        let items = items_json
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| serde_json::from_str::<Vec<LineItem>>(s).ok())
            .unwrap_or_default();

        let process_order = order_json
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| serde_json::from_str::<Option<Vec<GroupKey>>>(s).ok())
            .flatten();

        Self {
            items,
            process_order,
        }
    }

    pub fn items_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.items)
    }

    pub fn process_order_json(&self) -> serde_json::Result<Option<String>> {
        self.process_order
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
    }
}

// ==========================================
// ParsedEstimate - 엑셀 가져오기 결과
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedEstimate {
    pub meta: EstimateMeta,
    pub items: Vec<LineItem>,
    pub process_order: Vec<GroupKey>,
}
