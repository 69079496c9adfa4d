// ==========================================
// 견적 공정 그룹 엔진 - CSV 렌더러
// ==========================================
// 서식은 버리고 셀 값만 쓴다
// ==========================================

use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::styled_grid::StyledGrid;
use csv::WriterBuilder;
use std::path::Path;

pub struct CsvRenderer;

impl CsvRenderer {
    pub fn render(&self, grid: &StyledGrid) -> ExportResult<Vec<u8>> {
        // 행 길이가 제각각이므로 flexible
        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        for row in grid.to_grid() {
            let fields: Vec<String> = row.iter().map(|cell| cell.trimmed_text()).collect();
            writer.write_record(&fields)?;
        }
        writer
            .into_inner()
            .map_err(|e| ExportError::CsvWriteError(e.to_string()))
    }

    pub fn save(&self, grid: &StyledGrid, path: &Path) -> ExportResult<()> {
        std::fs::write(path, self.render(grid)?)?;
        Ok(())
    }
}
