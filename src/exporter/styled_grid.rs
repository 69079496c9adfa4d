// ==========================================
// 견적 공정 그룹 엔진 - 서식 있는 격자
// ==========================================
// 책임: 내보내기 결과 (셀 값 + 행 역할별 서식)
// 렌더러(xlsx/csv)는 이 구조만 보고 출력한다
// ==========================================

use crate::domain::grid::{Cell, Grid};

/// 열 머리 행 채우기 색
pub const HEADER_FILL: u32 = 0xD9E1F2;
/// 공정 행 채우기 색
pub const GROUP_FILL: u32 = 0xFFF2CC;

/// 행 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRole {
    Meta,
    Blank,
    ColumnHeader,
    GroupHeader,
    LineItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub bold: bool,
    pub border: bool,
    pub fill: Option<u32>,
}

impl RowRole {
    /// 역할과 열 위치로 정해지는 셀 서식
    pub fn cell_style(&self, col: usize) -> CellStyle {
        match self {
            RowRole::Meta => CellStyle {
                bold: col == 0,
                ..CellStyle::default()
            },
            RowRole::Blank => CellStyle::default(),
            RowRole::ColumnHeader => CellStyle {
                bold: true,
                border: true,
                fill: Some(HEADER_FILL),
            },
            RowRole::GroupHeader => CellStyle {
                bold: col == 0,
                border: true,
                fill: Some(GROUP_FILL),
            },
            RowRole::LineItem => CellStyle {
                border: true,
                ..CellStyle::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledRow {
    pub role: RowRole,
    pub cells: Vec<Cell>,
}

impl StyledRow {
    pub fn new(role: RowRole, cells: Vec<Cell>) -> Self {
        Self { role, cells }
    }

    /// 서식이 있는 셀만 (col, 값, 서식) 순회
    pub fn styled_cells(&self) -> impl Iterator<Item = (usize, &Cell, CellStyle)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(col, cell)| (col, cell, self.role.cell_style(col)))
    }
}

// ==========================================
// StyledGrid
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct StyledGrid {
    pub sheet_name: String,
    pub rows: Vec<StyledRow>,
    /// 열 너비 (문자 수 기준)
    pub column_widths: Vec<f64>,
}

impl StyledGrid {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            rows: Vec::new(),
            column_widths: Vec::new(),
        }
    }

    pub fn push(&mut self, role: RowRole, cells: Vec<Cell>) {
        self.rows.push(StyledRow::new(role, cells));
    }

    /// 서식을 뺀 셀 격자 (가져오기 입력과 같은 형태)
    pub fn to_grid(&self) -> Grid {
        self.rows.iter().map(|row| row.cells.clone()).collect()
    }

    pub fn rows_with_role(&self, role: RowRole) -> impl Iterator<Item = &StyledRow> + '_ {
        self.rows.iter().filter(move |row| row.role == role)
    }
}
