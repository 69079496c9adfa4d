// ==========================================
// 견적 공정 그룹 엔진 - 견적서 내보내기
// ==========================================
// 책임: {머리 정보, 항목, 공정 순서} → 서식 있는 격자
// 배치 (가져오기의 역방향):
//   0-5  머리 정보 (라벨, 값)
//   6    빈 행
//   7    열 머리
//   8-   공정 행 + 항목 행 (공정마다 번호 1부터)
// 원칙: 같은 입력이면 항상 같은 격자
// ==========================================

use crate::config::engine_config::ExportConfig;
use crate::domain::estimate::{EstimateDraft, EstimateMeta};
use crate::domain::grid::Cell;
use crate::domain::line_item::LineItem;
use crate::domain::sheet_format::{
    COLUMN_HEADERS, META_ADDRESS, META_CONTACT, META_CUSTOMER, META_DATE, META_NOTE, META_TITLE,
    MIN_ROW_WIDTH, ROW_TYPE_GROUP,
};
use crate::domain::types::GroupKey;
use crate::engine::grouping::{DisplayGroup, GroupingEngine, GroupingOptions};
use crate::exporter::styled_grid::{RowRole, StyledGrid};
use tracing::{debug, instrument};

/// No, 품목, 규격, 단위, 수량, 재료비단가, 노무비단가, 비고, 구분
const COLUMN_WIDTHS: [f64; MIN_ROW_WIDTH] = [8.0, 24.0, 16.0, 8.0, 8.0, 12.0, 12.0, 20.0, 6.0];

pub struct EstimateExporter {
    config: ExportConfig,
    engine: GroupingEngine,
}

impl EstimateExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            engine: GroupingEngine::new(),
        }
    }

    /// 전체 항목 내보내기 (수량 0 항목도 포함)
    #[instrument(skip_all, fields(items = items.len(), groups = order.len()))]
    pub fn export(&self, meta: &EstimateMeta, items: &[LineItem], order: &[GroupKey]) -> StyledGrid {
        self.export_with(meta, items, order, GroupingOptions::editing())
    }

    /// 인쇄용 내보내기 (수량 0 항목과 빈 공정 제외)
    pub fn export_for_print(
        &self,
        meta: &EstimateMeta,
        items: &[LineItem],
        order: &[GroupKey],
    ) -> StyledGrid {
        self.export_with(meta, items, order, GroupingOptions::print())
    }

    pub fn export_draft(&self, meta: &EstimateMeta, draft: &EstimateDraft) -> StyledGrid {
        self.export(meta, &draft.items, &draft.order)
    }

    fn export_with(
        &self,
        meta: &EstimateMeta,
        items: &[LineItem],
        order: &[GroupKey],
        options: GroupingOptions,
    ) -> StyledGrid {
        let mut grid = StyledGrid::new(self.config.sheet_name.clone());
        grid.column_widths = COLUMN_WIDTHS.to_vec();

        for (label, value) in meta_rows(meta) {
            grid.push(RowRole::Meta, vec![Cell::text(label), value]);
        }
        grid.push(RowRole::Blank, Vec::new());
        grid.push(
            RowRole::ColumnHeader,
            COLUMN_HEADERS.iter().map(|h| Cell::text(*h)).collect(),
        );

        let groups = self.engine.group_for_display(items, order, options);
        debug!(groups = groups.len(), "공정 그룹 계산 완료");
        for group in &groups {
            grid.push(RowRole::GroupHeader, group_header_cells(group));
            for row in &group.rows {
                grid.push(RowRole::LineItem, item_cells(row.seq, row.item));
            }
        }

        grid
    }
}

impl Default for EstimateExporter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

fn meta_rows(meta: &EstimateMeta) -> [(&'static str, Cell); 6] {
    let date = meta
        .estimate_date
        .map(|d| Cell::text(d.format("%Y-%m-%d").to_string()))
        .unwrap_or_default();

    [
        (META_CUSTOMER, Cell::text(meta.customer_name.clone())),
        (META_CONTACT, Cell::text(meta.contact.clone())),
        (META_ADDRESS, Cell::text(meta.address.clone())),
        (META_TITLE, Cell::text(meta.title.clone())),
        (META_DATE, date),
        (META_NOTE, Cell::text(meta.note.clone())),
    ]
}

/// 이름 칸 + 빈 칸 + 구분 열 "공정"
fn group_header_cells(group: &DisplayGroup<'_>) -> Vec<Cell> {
    let mut cells = vec![Cell::Empty; MIN_ROW_WIDTH];
    cells[0] = Cell::text(group.display_name);
    cells[MIN_ROW_WIDTH - 1] = Cell::text(ROW_TYPE_GROUP);
    cells
}

fn item_cells(seq: usize, item: &LineItem) -> Vec<Cell> {
    vec![
        Cell::Number(seq as f64),
        Cell::text(item.category.clone()),
        Cell::text(item.spec.clone()),
        Cell::text(item.unit.clone()),
        Cell::from(item.quantity),
        Cell::from(item.material_unit_price),
        Cell::from(item.labor_unit_price),
        Cell::text(item.note.clone()),
        Cell::Empty,
    ]
}
