// ==========================================
// 견적 공정 그룹 엔진 - 공정 순서 편집
// ==========================================
// 책임: 공정 순서 이동 / 이름 변경 / 새 공정 추가 / 항목 추가·삭제
// 불변식: order 의 항목은 항상 유일하다
// ==========================================

use crate::domain::estimate::{EstimateDraft, ParsedEstimate, PersistedRecord};
use crate::domain::line_item::{EstimateTotals, LineItem};
use crate::domain::types::GroupKey;
use crate::engine::grouping::{first_seen_order, DisplayGroup, GroupingEngine, GroupingOptions};
use std::collections::HashSet;
use tracing::debug;

impl EstimateDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// 항목/순서로 세션 상태 구성 (중복 순서 제거, 새 공정 카운터 재설정)
    pub fn from_parts(items: Vec<LineItem>, order: Vec<GroupKey>) -> Self {
        let mut draft = Self {
            items,
            order,
            next_pending: 0,
        };
        draft.normalize_order();
        draft.next_pending = draft.pending_floor();
        draft
    }

    /// 저장 레코드에서 복원 (processOrder 가 없으면 항목 등장 순서로 재구성)
    pub fn from_record(record: PersistedRecord) -> Self {
        let order = match record.process_order {
            Some(order) => order,
            None => first_seen_order(&record.items),
        };
        Self::from_parts(record.items, order)
    }

    pub fn to_record(&self) -> PersistedRecord {
        PersistedRecord {
            items: self.items.clone(),
            process_order: Some(self.order.clone()),
        }
    }

    // ==========================================
    // 공정 순서 편집
    // ==========================================

    /// 위로 이동 (맨 위면 변화 없음)
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.order.len() {
            return false;
        }
        self.order.swap(index - 1, index);
        debug!(index, "공정 위로 이동");
        true
    }

    /// 아래로 이동 (맨 아래면 변화 없음)
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.order.len() {
            return false;
        }
        self.order.swap(index, index + 1);
        debug!(index, "공정 아래로 이동");
        true
    }

    /// 공정 이름 변경
    ///
    /// old_key 인 모든 항목의 키와 order 내 해당 위치를 함께 바꾼다.
    /// 이미 있는 이름으로 바꾸면 order 의 중복은 앞쪽 하나만 남기고,
    /// 두 공정의 항목은 다음 그룹화에서 하나로 합쳐진다.
    pub fn rename_group(&mut self, old_key: &GroupKey, new_name: &str) -> GroupKey {
        let new_key = GroupKey::named(new_name.trim());
        if *old_key == new_key {
            return new_key;
        }

        let mut touched = 0usize;
        for item in self.items.iter_mut().filter(|i| i.group_key == *old_key) {
            item.group_key = new_key.clone();
            touched += 1;
        }

        if let Some(pos) = self.order.iter().position(|k| k == old_key) {
            self.order[pos] = new_key.clone();
        }
        self.normalize_order();

        debug!(from = %old_key.to_wire(), to = %new_key.to_wire(), items = touched, "공정 이름 변경");
        new_key
    }

    /// 이름 없는 새 공정 추가 (빈 항목 하나 포함)
    pub fn append_new_section(&mut self) -> GroupKey {
        let key = self.issue_pending_key();
        self.order.push(key.clone());
        self.items.push(LineItem::new(key.clone()));
        debug!(key = %key.to_wire(), "새 공정 추가");
        key
    }

    /// 공정에 빈 항목 추가
    ///
    /// 같은 공정의 마지막 항목 바로 뒤에 넣는다 (없으면 맨 뒤).
    /// 표시 순서는 그룹화 정렬이 정하므로 물리적 위치는 가독성용일 뿐이다.
    pub fn append_item_to_group(&mut self, group_key: &GroupKey) -> usize {
        let index = self
            .items
            .iter()
            .rposition(|i| i.group_key == *group_key)
            .map(|last| last + 1)
            .unwrap_or(self.items.len());
        self.items.insert(index, LineItem::new(group_key.clone()));
        debug!(key = %group_key.to_wire(), index, "공정에 항목 추가");
        index
    }

    /// 항목 삭제 (범위 밖이면 None)
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        debug!(index, "항목 삭제");
        Some(removed)
    }

    /// 가져오기 결과로 세션 상태 전체 교체 (성공한 결과만 들어온다)
    pub fn apply_import(&mut self, parsed: ParsedEstimate) {
        *self = Self::from_parts(parsed.items, parsed.process_order);
        debug!(
            items = self.items.len(),
            groups = self.order.len(),
            "가져오기 결과 적용"
        );
    }

    /// order 의 중복 제거 (앞쪽 위치 유지)
    pub fn normalize_order(&mut self) {
        let mut seen = HashSet::new();
        self.order.retain(|k| seen.insert(k.clone()));
    }

    // ==========================================
    // 조회
    // ==========================================

    pub fn display_groups(&self, options: GroupingOptions) -> Vec<DisplayGroup<'_>> {
        GroupingEngine::new().group_for_display(&self.items, &self.order, options)
    }

    pub fn totals(&self) -> EstimateTotals {
        EstimateTotals::from_items(&self.items)
    }

    /// 새 공정 키 발급
    ///
    /// 카운터가 u64 끝에 닿아 이미 쓰인 번호를 가리키면 비어 있는 가장 작은 번호를 쓴다.
    fn issue_pending_key(&mut self) -> GroupKey {
        let used: HashSet<u64> = self.pending_seqs().collect();
        let seq = if used.contains(&self.next_pending) {
            (0..=u64::MAX).find(|s| !used.contains(s)).unwrap_or(0)
        } else {
            self.next_pending
        };
        self.next_pending = self.next_pending.max(seq.saturating_add(1));
        GroupKey::Pending(seq)
    }

    /// 이미 쓰인 새 공정 번호보다 큰 값 (u64 끝에서 멈춘다)
    fn pending_floor(&self) -> u64 {
        self.pending_seqs()
            .map(|seq| seq.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    fn pending_seqs(&self) -> impl Iterator<Item = u64> + '_ {
        self.items
            .iter()
            .map(|i| &i.group_key)
            .chain(self.order.iter())
            .filter_map(|k| match k {
                GroupKey::Pending(seq) => Some(*seq),
                GroupKey::Named(_) => None,
            })
    }
}
