// ==========================================
// 견적 공정 그룹 엔진 - 시트 배치 감지
// ==========================================
// 책임: 열 머리 행 위치 찾기, 수량 열 유무로 두 가지 양식 판별
// 원칙: 한 시트에 대해 한 번만 결정하고 모든 행에 같은 배치를 쓴다
// ==========================================

use crate::config::engine_config::ImportConfig;
use crate::domain::grid::{Cell, Grid};
use crate::domain::sheet_format::{
    COL_CATEGORY, COL_NO, COL_QUANTITY, COL_SPEC, LABEL_CATEGORY, LABEL_NO, LABEL_QUANTITY,
    LABEL_SPEC,
};
use crate::importer::data_cleaner::DataCleaner;

static EMPTY_CELL: Cell = Cell::Empty;

/// 범위 밖은 빈 칸으로 본다
pub fn cell_at(row: &[Cell], col: usize) -> &Cell {
    row.get(col).unwrap_or(&EMPTY_CELL)
}

/// 열 머리 행 패턴: 첫 칸이 "no" 이거나 2·3번째 칸이 품목/규격
///
/// 첫 칸이 순번 숫자인 행은 품목/규격 이름이 같아도 항목 행이다.
pub fn is_header_row(row: &[Cell]) -> bool {
    let cleaner = DataCleaner;
    let first_text = cleaner.clean_text(cell_at(row, COL_NO));
    if cleaner.normalize_label(&first_text) == LABEL_NO.to_lowercase() {
        return true;
    }
    !cleaner.is_numeric_label(&first_text)
        && cleaner.clean_text(cell_at(row, COL_CATEGORY)) == LABEL_CATEGORY
        && cleaner.clean_text(cell_at(row, COL_SPEC)) == LABEL_SPEC
}

// ==========================================
// SheetLayout - 시트 배치
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub header_row: usize,
    /// false 면 기본 위치를 가정한 것
    pub header_detected: bool,
    /// 현재 양식(수량 열 있음) / 예전 양식(수량 열 없음)
    pub has_quantity_column: bool,
    pub col_material: usize,
    pub col_labor: usize,
    pub col_note: usize,
    pub col_row_type: usize,
}

impl SheetLayout {
    /// 위쪽 header_scan_rows 행 안에서 열 머리 행을 찾는다
    pub fn detect(grid: &Grid, config: &ImportConfig) -> Self {
        let found = grid
            .iter()
            .take(config.header_scan_rows)
            .position(|row| is_header_row(row));

        let header_row = found.unwrap_or(config.default_header_row);
        let has_quantity_column = grid
            .get(header_row)
            .map(|row| DataCleaner.clean_text(cell_at(row, COL_QUANTITY)) == LABEL_QUANTITY)
            .unwrap_or(false);

        Self::with_header(header_row, found.is_some(), has_quantity_column)
    }

    pub fn with_header(header_row: usize, header_detected: bool, has_quantity_column: bool) -> Self {
        let shift = usize::from(has_quantity_column);
        Self {
            header_row,
            header_detected,
            has_quantity_column,
            col_material: 4 + shift,
            col_labor: 5 + shift,
            col_note: 6 + shift,
            col_row_type: 7 + shift,
        }
    }

    pub fn data_start(&self) -> usize {
        self.header_row + 1
    }
}
