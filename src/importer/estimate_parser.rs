// ==========================================
// 견적 공정 그룹 엔진 - 견적 시트 해석기
// ==========================================
// 책임: 디코딩된 셀 격자 → {머리 정보, 항목, 공정 순서}
// 흐름:
//   1) 열 머리 행 찾기 (없으면 기본 위치, 범위 밖이면 실패)
//   2) 수량 열 유무로 배치 결정 (시트 전체 공통)
//   3) 위에서 아래로 행 분류, 현재 공정을 따라가며 항목 생성
//   4) 항목이 하나도 없으면 실패
// 원칙: 순수 함수, 셀 값 때문에 실패하지 않는다
// ==========================================

use crate::config::engine_config::ImportConfig;
use crate::domain::estimate::{EstimateMeta, ParsedEstimate};
use crate::domain::grid::{Cell, Grid};
use crate::domain::line_item::LineItem;
use crate::domain::sheet_format::{
    COL_NO, COL_QUANTITY, META_ADDRESS, META_CONTACT, META_CUSTOMER, META_DATE, META_NOTE, META_TITLE,
};
use crate::domain::types::GroupKey;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_classifier::{classify, ClassifyContext, RowKind, RowView};
use crate::importer::sheet_layout::{cell_at, SheetLayout};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// 양식을 인식하지 못한 이유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnrecognizedReason {
    TooFewRows,
    NoDataRows,
    NoLineItems,
}

impl fmt::Display for UnrecognizedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnrecognizedReason::TooFewRows => write!(f, "행이 2개 미만"),
            UnrecognizedReason::NoDataRows => write!(f, "열 머리 아래에 데이터 행이 없음"),
            UnrecognizedReason::NoLineItems => write!(f, "항목 행이 없음"),
        }
    }
}

// ==========================================
// EstimateSheetParser - 견적 시트 해석기
// ==========================================
pub struct EstimateSheetParser {
    config: ImportConfig,
    cleaner: DataCleaner,
}

impl EstimateSheetParser {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            cleaner: DataCleaner,
        }
    }

    /// 인식 못 하면 None
    pub fn parse(&self, grid: &Grid) -> Option<ParsedEstimate> {
        self.parse_detailed(grid).ok()
    }

    /// 인식 못 하면 FormatUnrecognized
    pub fn try_parse(&self, grid: &Grid) -> ImportResult<ParsedEstimate> {
        self.parse_detailed(grid)
            .map_err(|reason| ImportError::FormatUnrecognized {
                reason: reason.to_string(),
            })
    }

    pub fn parse_detailed(&self, grid: &Grid) -> Result<ParsedEstimate, UnrecognizedReason> {
        if grid.len() < 2 {
            return Err(UnrecognizedReason::TooFewRows);
        }

        let layout = SheetLayout::detect(grid, &self.config);
        if layout.data_start() >= grid.len() {
            return Err(UnrecognizedReason::NoDataRows);
        }
        debug!(
            header_row = layout.header_row,
            detected = layout.header_detected,
            has_quantity = layout.has_quantity_column,
            "시트 배치 결정"
        );

        let mut state = ParseState::default();
        for (row_index, row) in grid.iter().enumerate().skip(layout.data_start()) {
            let view = RowView::read(row, &layout);
            let ctx = ClassifyContext {
                has_current_group: state.current_group.is_some(),
            };

            match classify(&view, &ctx) {
                RowKind::HeaderRepeat | RowKind::StrayNumberArtifact | RowKind::BlankSeparator => {
                    continue;
                }
                RowKind::GroupHeader => state.enter_group(&view),
                RowKind::LineItem => {
                    let item = self.build_item(row, &view, &layout, &state);
                    state.push_item(item);
                    debug!(row = row_index, "항목 행");
                }
            }
        }

        if state.items.is_empty() {
            return Err(UnrecognizedReason::NoLineItems);
        }

        Ok(ParsedEstimate {
            meta: self.read_meta(grid, layout.header_row),
            items: state.items,
            process_order: state.order,
        })
    }

    /// 글자 칸은 RowView 에서, 수량/단가는 원래 셀에서 읽는다
    fn build_item(
        &self,
        row: &[Cell],
        view: &RowView,
        layout: &SheetLayout,
        state: &ParseState,
    ) -> LineItem {
        let group_key = state
            .current_group
            .clone()
            .or_else(|| state.items.last().map(|i| i.group_key.clone()))
            .unwrap_or_default();

        let quantity = if layout.has_quantity_column {
            self.cleaner.parse_amount(cell_at(row, COL_QUANTITY))
        } else {
            0
        };

        let unit = match (&self.config.default_unit, view.unit.is_empty()) {
            (Some(default_unit), true) => default_unit.clone(),
            _ => view.unit.clone(),
        };

        LineItem {
            group_key,
            category: view.category.clone(),
            spec: view.spec.clone(),
            unit,
            quantity,
            material_unit_price: self.cleaner.parse_amount(cell_at(row, layout.col_material)),
            labor_unit_price: self.cleaner.parse_amount(cell_at(row, layout.col_labor)),
            note: view.note.clone(),
        }
    }

    /// 열 머리 위쪽의 "라벨, 값" 행에서 머리 정보 읽기 (모르는 라벨은 무시)
    fn read_meta(&self, grid: &Grid, header_row: usize) -> EstimateMeta {
        let mut meta = EstimateMeta::default();
        for row in grid.iter().take(header_row) {
            let label = self.cleaner.clean_text(cell_at(row, COL_NO));
            let value: &Cell = cell_at(row, COL_NO + 1);
            match label.as_str() {
                META_CUSTOMER => meta.customer_name = self.cleaner.clean_text(value),
                META_CONTACT => meta.contact = self.cleaner.clean_text(value),
                META_ADDRESS => meta.address = self.cleaner.clean_text(value),
                META_TITLE => meta.title = self.cleaner.clean_text(value),
                META_DATE => meta.estimate_date = self.cleaner.parse_date(value),
                META_NOTE => meta.note = self.cleaner.clean_text(value),
                _ => {}
            }
        }
        meta
    }
}

impl Default for EstimateSheetParser {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

// ==========================================
// 행 순회 상태
// ==========================================
#[derive(Default)]
struct ParseState {
    current_group: Option<GroupKey>,
    items: Vec<LineItem>,
    order: Vec<GroupKey>,
    seen: HashSet<GroupKey>,
    next_pending: u64,
}

impl ParseState {
    fn enter_group(&mut self, view: &RowView) {
        let key = match view.group_label() {
            None => return,
            Some("") => {
                let key = GroupKey::Pending(self.next_pending);
                self.next_pending = self.next_pending.saturating_add(1);
                key
            }
            Some(label) => GroupKey::named(label),
        };
        self.register(&key);
        self.current_group = Some(key);
    }

    fn push_item(&mut self, item: LineItem) {
        self.register(&item.group_key);
        self.items.push(item);
    }

    fn register(&mut self, key: &GroupKey) {
        if self.seen.insert(key.clone()) {
            self.order.push(key.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::text_row;
    use chrono::NaiveDate;

    fn header() -> Vec<Cell> {
        text_row(&["no", "품목", "규격", "단위", "수량", "재료비단가", "노무비단가", "비고"])
    }

    fn item_row(no: i32, category: &str, unit: &str, qty: i32, mat: i32, labor: i32) -> Vec<Cell> {
        vec![
            Cell::from(no),
            Cell::from(category),
            Cell::Empty,
            Cell::from(unit),
            Cell::from(qty),
            Cell::from(mat),
            Cell::from(labor),
            Cell::Empty,
        ]
    }

    #[test]
    fn test_scenario_group_then_item() {
        let grid = vec![
            header(),
            text_row(&["가설철거", "", "", "", "", "", "", ""]),
            item_row(1, "철거", "식", 1, 10000, 5000),
        ];
        let parsed = EstimateSheetParser::default().parse(&grid).unwrap();

        assert_eq!(parsed.process_order, vec![GroupKey::named("가설철거")]);
        assert_eq!(parsed.items.len(), 1);
        let item = &parsed.items[0];
        assert_eq!(item.group_key, GroupKey::named("가설철거"));
        assert_eq!(item.category, "철거");
        assert_eq!(item.unit, "식");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.material_unit_price, 10000);
        assert_eq!(item.labor_unit_price, 5000);
    }

    #[test]
    fn test_too_few_rows() {
        let parser = EstimateSheetParser::default();
        assert_eq!(
            parser.parse_detailed(&vec![header()]),
            Err(UnrecognizedReason::TooFewRows)
        );
    }

    #[test]
    fn test_fallback_header_beyond_bounds_fails() {
        let grid = vec![text_row(&["a"]), text_row(&["b"]), text_row(&["c"])];
        let parser = EstimateSheetParser::default();
        assert_eq!(parser.parse_detailed(&grid), Err(UnrecognizedReason::NoDataRows));
        assert!(matches!(
            parser.try_parse(&grid),
            Err(ImportError::FormatUnrecognized { .. })
        ));
    }

    #[test]
    fn test_no_items_fails() {
        let grid = vec![header(), text_row(&["가설철거"]), text_row(&["", "", ""])];
        assert_eq!(
            EstimateSheetParser::default().parse_detailed(&grid),
            Err(UnrecognizedReason::NoLineItems)
        );
    }

    #[test]
    fn test_items_without_header_inherit_previous_group() {
        let grid = vec![
            header(),
            item_row(1, "도배", "롤", 2, 100, 0),
            item_row(2, "장판", "㎡", 3, 200, 0),
        ];
        let parsed = EstimateSheetParser::default().parse(&grid).unwrap();

        assert_eq!(parsed.items.len(), 2);
        assert!(parsed.items.iter().all(|i| i.group_key == GroupKey::default()));
        assert_eq!(parsed.process_order, vec![GroupKey::default()]);
    }

    #[test]
    fn test_header_repeat_and_blank_rows_skipped() {
        let grid = vec![
            header(),
            text_row(&["", "", ""]),
            text_row(&["목공", "", "", "", "", "", "", ""]),
            item_row(1, "몰딩", "m", 10, 1000, 500),
            vec![],
            header(),
            text_row(&["도장"]),
            item_row(1, "페인트", "말", 2, 30000, 0),
        ];
        let parsed = EstimateSheetParser::default().parse(&grid).unwrap();

        assert_eq!(
            parsed.process_order,
            vec![GroupKey::named("목공"), GroupKey::named("도장")]
        );
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[1].group_key, GroupKey::named("도장"));
    }

    #[test]
    fn test_legacy_layout_has_zero_quantity() {
        let grid = vec![
            text_row(&["No", "품목", "규격", "단위", "재료비단가", "노무비단가", "비고"]),
            text_row(&["전기", "#"]),
            text_row(&["1", "콘센트", "2구", "개", "3,000", "2,000", "교체"]),
            text_row(&["2", "#"]),
        ];
        let parsed = EstimateSheetParser::default().parse(&grid).unwrap();

        assert_eq!(parsed.items.len(), 1);
        let item = &parsed.items[0];
        assert_eq!(item.group_key, GroupKey::named("전기"));
        assert_eq!(item.quantity, 0);
        assert_eq!(item.material_unit_price, 3000);
        assert_eq!(item.labor_unit_price, 2000);
        assert_eq!(item.note, "교체");
    }

    #[test]
    fn test_malformed_numbers_become_zero() {
        let grid = vec![
            header(),
            text_row(&["1", "철거", "", "식", "한 번", "별도", " 1 200 ", ""]),
        ];
        let parsed = EstimateSheetParser::default().parse(&grid).unwrap();
        let item = &parsed.items[0];

        assert_eq!(item.quantity, 0);
        assert_eq!(item.material_unit_price, 0);
        assert_eq!(item.labor_unit_price, 1200);
    }

    #[test]
    fn test_blank_marker_rows_become_distinct_pending_groups() {
        let marker = text_row(&["", "", "", "", "", "", "", "", "공정"]);
        let grid = vec![
            header(),
            marker.clone(),
            item_row(1, "a", "", 1, 0, 0),
            marker,
            item_row(1, "b", "", 1, 0, 0),
        ];
        let parsed = EstimateSheetParser::default().parse(&grid).unwrap();

        assert_eq!(parsed.process_order.len(), 2);
        assert!(parsed.process_order.iter().all(GroupKey::is_pending));
        assert_ne!(parsed.items[0].group_key, parsed.items[1].group_key);
    }

    #[test]
    fn test_default_unit_config() {
        let grid = vec![header(), text_row(&["1", "철거", "", "", "1"])];
        let parser = EstimateSheetParser::new(ImportConfig {
            default_unit: Some("식".to_string()),
            ..ImportConfig::default()
        });
        assert_eq!(parser.parse(&grid).unwrap().items[0].unit, "식");
        assert_eq!(EstimateSheetParser::default().parse(&grid).unwrap().items[0].unit, "");
    }

    #[test]
    fn test_meta_rows_read() {
        let grid = vec![
            text_row(&["고객명", " 홍길동 "]),
            text_row(&["견적일", "2025-03-01"]),
            text_row(&["담당", "무시됨"]),
            Vec::new(),
            header(),
            item_row(1, "철거", "식", 1, 0, 0),
        ];
        let parsed = EstimateSheetParser::default().parse(&grid).unwrap();

        assert_eq!(parsed.meta.customer_name, "홍길동");
        assert_eq!(parsed.meta.estimate_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(parsed.meta.title, "");
    }

    #[test]
    fn test_group_named_no_keeps_its_items() {
        let grid = vec![
            header(),
            text_row(&["철거", "", "", "", "", "", "", "", "공정"]),
            item_row(1, "철거", "식", 1, 0, 0),
            text_row(&["No", "", "", "", "", "", "", "", "공정"]),
            item_row(1, "몰딩", "m", 2, 0, 0),
        ];
        let parsed = EstimateSheetParser::default().parse(&grid).unwrap();

        assert_eq!(
            parsed.process_order,
            vec![GroupKey::named("철거"), GroupKey::named("No")]
        );
        assert_eq!(parsed.items[1].group_key, GroupKey::named("No"));
    }

    #[test]
    fn test_item_labelled_like_header_is_kept() {
        let grid = vec![
            header(),
            text_row(&["A", "", "", "", "", "", "", "", "공정"]),
            vec![
                Cell::Number(1.0),
                Cell::text("품목"),
                Cell::text("규격"),
                Cell::Empty,
                Cell::Number(2.0),
                Cell::Number(1500.0),
                Cell::text("1,000"),
                Cell::Empty,
            ],
        ];
        let parsed = EstimateSheetParser::default().parse(&grid).unwrap();

        assert_eq!(parsed.items.len(), 1);
        let item = &parsed.items[0];
        assert_eq!(item.category, "품목");
        assert_eq!(item.spec, "규격");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.material_unit_price, 1500);
        assert_eq!(item.labor_unit_price, 1000);
    }
}
