// ==========================================
// 견적 공정 그룹 엔진 - 파일 → 셀 격자 디코더
// ==========================================
// 지원: Excel (.xlsx / .xls) / CSV (.csv)
// 책임: 파일 바이트를 Grid 로 디코딩 (분류는 하지 않음)
// ==========================================

use crate::config::engine_config::ImportConfig;
use crate::domain::grid::{Cell, Grid};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::GridReader;
use crate::importer::sheet_layout::is_header_row;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

// ==========================================
// CSV Reader
// ==========================================
pub struct CsvGridReader;

impl GridReader for CsvGridReader {
    fn read_grid(&self, bytes: &[u8]) -> ImportResult<Grid> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 행 길이가 달라도 허용
            .from_reader(bytes);

        let mut grid = Grid::new();
        for result in reader.records() {
            let record = result?;
            grid.push(record.iter().map(Cell::from).collect());
        }
        Ok(grid)
    }
}

// ==========================================
// Excel Reader
// ==========================================
pub struct ExcelGridReader {
    /// 견적 시트를 고를 때 살펴보는 위쪽 행 수
    pub sheet_probe_rows: usize,
}

impl ExcelGridReader {
    pub fn new(sheet_probe_rows: usize) -> Self {
        Self { sheet_probe_rows }
    }

    fn looks_like_estimate(&self, grid: &Grid) -> bool {
        grid.iter()
            .take(self.sheet_probe_rows)
            .any(|row| is_header_row(row))
    }
}

impl GridReader for ExcelGridReader {
    /// 형식(xlsx/xls)은 내용으로 판별한다
    fn read_grid(&self, bytes: &[u8]) -> ImportResult<Grid> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::NoWorksheet);
        }

        // 열 머리가 보이는 마지막 시트, 없으면 첫 시트
        let mut first: Option<Grid> = None;
        let mut matched: Option<(&str, Grid)> = None;
        for name in &sheet_names {
            let range = workbook.worksheet_range(name)?;
            let grid = range_to_grid(&range);
            if self.looks_like_estimate(&grid) {
                matched = Some((name.as_str(), grid));
            } else if first.is_none() && matched.is_none() {
                first = Some(grid);
            }
        }

        if let Some((name, grid)) = matched {
            debug!(sheet = %name, "견적 시트 선택");
            return Ok(grid);
        }
        debug!(sheet = %sheet_names[0], "열 머리가 있는 시트 없음, 첫 시트 사용");
        first.ok_or(ImportError::NoWorksheet)
    }
}

/// calamine Range 는 첫 사용 셀부터 시작하므로 A1 기준으로 되돌린다
fn range_to_grid(range: &Range<Data>) -> Grid {
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut grid: Grid = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col];
        cells.extend(row.iter().map(data_to_cell));
        grid.push(cells);
    }
    grid
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::text(if *b { "TRUE" } else { "FALSE" }),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

// ==========================================
// 확장자로 디코더 선택
// ==========================================
pub struct UniversalGridReader;

impl UniversalGridReader {
    pub fn reader_for_path(
        &self,
        file_path: &Path,
        config: &ImportConfig,
    ) -> ImportResult<Box<dyn GridReader>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(Box::new(CsvGridReader)),
            "xlsx" | "xls" => Ok(Box::new(ExcelGridReader::new(config.sheet_probe_rows))),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
