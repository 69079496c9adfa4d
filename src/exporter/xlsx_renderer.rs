// ==========================================
// 견적 공정 그룹 엔진 - xlsx 렌더러
// ==========================================
// 도구: rust_xlsxwriter
// ==========================================

use crate::domain::grid::Cell;
use crate::exporter::error::ExportResult;
use crate::exporter::styled_grid::{CellStyle, StyledGrid};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

pub struct XlsxRenderer;

impl XlsxRenderer {
    /// xlsx 바이트로 렌더링
    pub fn render(&self, grid: &StyledGrid) -> ExportResult<Vec<u8>> {
        let mut workbook = self.build_workbook(grid)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// 파일로 저장
    pub fn save(&self, grid: &StyledGrid, path: &Path) -> ExportResult<()> {
        let mut workbook = self.build_workbook(grid)?;
        workbook.save(path)?;
        info!(path = %path.display(), rows = grid.rows.len(), "xlsx 저장 완료");
        Ok(())
    }

    fn build_workbook(&self, grid: &StyledGrid) -> ExportResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&grid.sheet_name)?;

        for (col, width) in grid.column_widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        for (row_index, row) in grid.rows.iter().enumerate() {
            for (col, cell, style) in row.styled_cells() {
                write_cell(worksheet, row_index as u32, col as u16, cell, &style)?;
            }
        }

        Ok(workbook)
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    style: &CellStyle,
) -> ExportResult<()> {
    let format = to_format(style);
    match (cell, format) {
        (Cell::Empty, Some(fmt)) => {
            worksheet.write_blank(row, col, &fmt)?;
        }
        (Cell::Empty, None) => {}
        (Cell::Text(s), Some(fmt)) => {
            worksheet.write_string_with_format(row, col, s, &fmt)?;
        }
        (Cell::Text(s), None) => {
            worksheet.write_string(row, col, s)?;
        }
        (Cell::Number(n), Some(fmt)) => {
            worksheet.write_number_with_format(row, col, *n, &fmt)?;
        }
        (Cell::Number(n), None) => {
            worksheet.write_number(row, col, *n)?;
        }
    }
    Ok(())
}

/// 기본 서식이면 None
fn to_format(style: &CellStyle) -> Option<Format> {
    if *style == CellStyle::default() {
        return None;
    }

    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if style.border {
        format = format.set_border(FormatBorder::Thin);
    }
    if let Some(rgb) = style.fill {
        format = format.set_background_color(Color::RGB(rgb));
    }
    Some(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::styled_grid::RowRole;

    #[test]
    fn test_render_produces_zip_bytes() {
        let mut grid = StyledGrid::new("견적서");
        grid.push(RowRole::ColumnHeader, vec![Cell::text("No"), Cell::text("품목")]);
        grid.push(RowRole::LineItem, vec![Cell::Number(1.0), Cell::Empty]);

        let bytes = XlsxRenderer.render(&grid).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_default_style_has_no_format() {
        assert!(to_format(&CellStyle::default()).is_none());
        assert!(to_format(&RowRole::LineItem.cell_style(0)).is_some());
    }
}
