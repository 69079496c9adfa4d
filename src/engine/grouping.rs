// ==========================================
// 견적 공정 그룹 엔진 - 그룹화 엔진
// ==========================================
// 책임: 항목 + 공정 순서 → 표시용 공정 그룹 목록
// 레드라인: 순수 투영. items / order 를 절대 변경하지 않는다
// ==========================================

use crate::domain::line_item::{EstimateTotals, LineItem};
use crate::domain::types::GroupKey;
use std::collections::HashMap;
use std::collections::HashSet;

// ==========================================
// GroupingOptions - 표시 옵션
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingOptions {
    /// 수량 0 항목 제외 (인쇄/출력용 화면)
    pub filter_zero_qty: bool,
}

impl GroupingOptions {
    /// 편집 화면: 모든 항목 표시
    pub fn editing() -> Self {
        Self {
            filter_zero_qty: false,
        }
    }

    /// 인쇄 화면: 수량 0 항목 / 빈 그룹 숨김
    pub fn print() -> Self {
        Self {
            filter_zero_qty: true,
        }
    }
}

// ==========================================
// 표시 결과
// ==========================================

/// 그룹 안의 한 줄 (번호는 그룹마다 1부터)
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow<'a> {
    pub seq: usize,
    /// 원본 items 배열에서의 위치 (편집 시 역참조용)
    pub source_index: usize,
    pub item: &'a LineItem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayGroup<'a> {
    pub key: &'a GroupKey,
    pub display_name: &'a str,
    pub rows: Vec<DisplayRow<'a>>,
}

impl<'a> DisplayGroup<'a> {
    /// 보이는 항목들의 소계
    pub fn subtotal(&self) -> EstimateTotals {
        EstimateTotals::from_items(self.rows.iter().map(|r| r.item))
    }
}

// ==========================================
// GroupingEngine - 그룹화 엔진
// ==========================================
pub struct GroupingEngine {
    // 상태 없는 엔진
}

impl GroupingEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 항목을 공정 순서대로 묶어 표시용 그룹 생성
    ///
    /// 1) 순위 = order 내 위치, 없는 키는 order.len() (맨 뒤 묶음)
    /// 2) (순위, 원래 위치) 로 안정 정렬 - 내용으로 타이브레이크하지 않음
    /// 3) 같은 키가 연속된 구간을 하나의 그룹으로 분할
    /// 4) filter_zero_qty 이면 분할 전에 수량 0 항목 제외 (빈 그룹은 자연히 사라짐)
    ///
    /// 어떤 입력에도 실패하지 않는다.
    pub fn group_for_display<'a>(
        &self,
        items: &'a [LineItem],
        order: &[GroupKey],
        options: GroupingOptions,
    ) -> Vec<DisplayGroup<'a>> {
        let mut groups: Vec<DisplayGroup<'a>> = Vec::new();

        for index in self.sorted_indices(items, order) {
            let item = &items[index];
            if options.filter_zero_qty && item.is_zero_quantity() {
                continue;
            }

            if let Some(group) = groups.last_mut().filter(|g| *g.key == item.group_key) {
                let seq = group.rows.len() + 1;
                group.rows.push(DisplayRow {
                    seq,
                    source_index: index,
                    item,
                });
                continue;
            }

            groups.push(DisplayGroup {
                key: &item.group_key,
                display_name: item.group_key.display_name(),
                rows: vec![DisplayRow {
                    seq: 1,
                    source_index: index,
                    item,
                }],
            });
        }

        groups
    }

    /// (순위, 원래 위치) 기준 정렬 결과를 원래 인덱스 목록으로 반환
    pub fn sorted_indices(&self, items: &[LineItem], order: &[GroupKey]) -> Vec<usize> {
        let ranks = rank_table(order);
        let trailing = order.len();

        let mut indices: Vec<usize> = (0..items.len()).collect();
        // sort_by_key 는 안정 정렬이므로 동순위는 원래 위치 순서를 유지
        indices.sort_by_key(|&i| {
            ranks
                .get(&items[i].group_key)
                .copied()
                .unwrap_or(trailing)
        });
        indices
    }
}

impl Default for GroupingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 중복 항목이 있으면 앞쪽 위치가 순위가 된다
fn rank_table(order: &[GroupKey]) -> HashMap<&GroupKey, usize> {
    let mut ranks = HashMap::with_capacity(order.len());
    for (pos, key) in order.iter().enumerate() {
        ranks.entry(key).or_insert(pos);
    }
    ranks
}

/// 항목에 처음 등장한 순서대로 공정 순서 재구성 (저장 레코드에 순서가 없을 때)
pub fn first_seen_order(items: &[LineItem]) -> Vec<GroupKey> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(&item.group_key))
        .map(|item| item.group_key.clone())
        .collect()
}
