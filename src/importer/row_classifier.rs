// ==========================================
// 견적 공정 그룹 엔진 - 행 분류기
// ==========================================
// 책임: 데이터 행을 종류별로 분류 (순서 있는 판정 표)
// 판정 순서:
//   1) HeaderRepeat        열 머리 반복 (다른 시트에서 붙여넣은 경우)
//   2) GroupHeader         공정 이름 행
//   3) StrayNumberArtifact 번호만 남은 공정 표시 행
//   4) BlankSeparator      빈 구분 행
//   5) LineItem            그 외 전부 (기본)
// ==========================================

use crate::domain::grid::Cell;
use crate::domain::sheet_format::{
    COL_CATEGORY, COL_NO, COL_QUANTITY, COL_SPEC, COL_UNIT, GROUP_SENTINEL, ROW_TYPE_GROUP,
};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::sheet_layout::{cell_at, is_header_row, SheetLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    HeaderRepeat,
    GroupHeader,
    StrayNumberArtifact,
    BlankSeparator,
    LineItem,
}

/// 분류에 필요한 진행 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyContext {
    pub has_current_group: bool,
}

// ==========================================
// RowView - 배치를 적용해 읽은 한 행
// ==========================================
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowView {
    pub no: String,
    pub category: String,
    pub spec: String,
    pub unit: String,
    pub quantity: String,
    pub material: String,
    pub labor: String,
    pub note: String,
    pub row_type: String,
    pub header_pattern: bool,
    pub all_blank: bool,
}

impl RowView {
    pub fn read(row: &[Cell], layout: &SheetLayout) -> Self {
        let cleaner = DataCleaner;
        let text = |col: usize| cleaner.clean_text(cell_at(row, col));

        Self {
            no: text(COL_NO),
            category: text(COL_CATEGORY),
            spec: text(COL_SPEC),
            unit: text(COL_UNIT),
            quantity: if layout.has_quantity_column {
                text(COL_QUANTITY)
            } else {
                String::new()
            },
            material: text(layout.col_material),
            labor: text(layout.col_labor),
            note: text(layout.col_note),
            row_type: text(layout.col_row_type),
            header_pattern: is_header_row(row),
            all_blank: row.iter().all(Cell::is_blank),
        }
    }

    pub fn no_is_number(&self) -> bool {
        DataCleaner.is_numeric_label(&self.no)
    }

    /// 품목/규격/단위가 모두 빈 칸
    pub fn item_cells_empty(&self) -> bool {
        self.category.is_empty() && self.spec.is_empty() && self.unit.is_empty()
    }

    /// 수량/단가가 모두 빈 칸
    pub fn numeric_cells_empty(&self) -> bool {
        self.quantity.is_empty() && self.material.is_empty() && self.labor.is_empty()
    }

    pub fn has_group_sentinel(&self) -> bool {
        self.category == GROUP_SENTINEL
    }

    /// 공정 행에서 읽은 이름
    ///
    /// - 예전 양식 "#" 행에서 번호 칸이 비어 있으면 None (현재 공정 유지)
    /// - 그 외에는 번호 칸 (빈 문자열이면 이름 없는 공정)
    pub fn group_label(&self) -> Option<&str> {
        if self.has_group_sentinel() && self.no.is_empty() {
            None
        } else {
            Some(self.no.as_str())
        }
    }
}

// ==========================================
// 판정 함수
// ==========================================

type RowPredicate = fn(&RowView, &ClassifyContext) -> bool;

/// 순서대로 평가하며 처음 참이 되는 종류를 택한다
const CLASSIFY_RULES: &[(RowKind, RowPredicate)] = &[
    (RowKind::HeaderRepeat, is_header_repeat),
    (RowKind::GroupHeader, is_group_header),
    (RowKind::StrayNumberArtifact, is_stray_number_artifact),
    (RowKind::BlankSeparator, is_blank_separator),
];

/// 열 머리 패턴이어도 행 구분 열이 "공정" 이면 공정 행 ("No" 라는 공정 이름)
pub fn is_header_repeat(row: &RowView, _ctx: &ClassifyContext) -> bool {
    row.header_pattern && row.row_type != ROW_TYPE_GROUP
}

/// 공정 이름 행
///
/// - 행 구분 열이 "공정"
/// - 품목 칸이 "#" 이고 번호 칸이 숫자가 아님
/// - 번호 칸만 글자가 있고 품목/규격/단위/수량/단가가 모두 빈 칸
pub fn is_group_header(row: &RowView, _ctx: &ClassifyContext) -> bool {
    if row.row_type == ROW_TYPE_GROUP {
        return true;
    }
    if row.has_group_sentinel() && !row.no_is_number() {
        return true;
    }
    !row.no.is_empty() && !row.no_is_number() && row.item_cells_empty() && row.numeric_cells_empty()
}

/// 번호 + "#" 만 있는 행 (예전 양식 번호 매기기 잔재)
pub fn is_stray_number_artifact(row: &RowView, _ctx: &ClassifyContext) -> bool {
    row.has_group_sentinel()
        && row.no_is_number()
        && row.spec.is_empty()
        && row.unit.is_empty()
        && row.numeric_cells_empty()
        && row.note.is_empty()
}

/// 공정이 아직 없을 때 앞 세 칸이 빈 행, 또는 완전히 빈 행
///
/// 완전히 빈 행은 공정 안에서도 건너뛴다. 예전 동작은 공정이 없을 때만
/// 건너뛰고 공정 안의 빈 행은 빈 항목으로 받아들였다.
pub fn is_blank_separator(row: &RowView, ctx: &ClassifyContext) -> bool {
    if row.all_blank {
        return true;
    }
    !ctx.has_current_group && row.no.is_empty() && row.category.is_empty() && row.spec.is_empty()
}

pub fn classify(row: &RowView, ctx: &ClassifyContext) -> RowKind {
    CLASSIFY_RULES
        .iter()
        .find(|(_, predicate)| predicate(row, ctx))
        .map(|(kind, _)| *kind)
        .unwrap_or(RowKind::LineItem)
}
