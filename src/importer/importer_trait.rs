// ==========================================
// 견적 공정 그룹 엔진 - 가져오기 Trait
// ==========================================
// 책임: 가져오기 인터페이스 정의 (구현 없음)
// ==========================================

use crate::domain::estimate::ParsedEstimate;
use crate::domain::grid::Grid;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// EstimateImporter Trait
// ==========================================
// 구현: EstimateImporterImpl
#[async_trait]
pub trait EstimateImporter: Send + Sync {
    /// 견적서 파일 가져오기
    ///
    /// # 반환
    /// - Ok(ParsedEstimate): 항목 + 공정 순서 + 머리 정보
    /// - Err(FormatUnrecognized): 견적서로 읽을 수 없음
    /// - Err: 파일 읽기/디코딩 오류
    async fn import_file<P: AsRef<Path> + Send>(&self, file_path: P)
        -> ImportResult<ParsedEstimate>;

    /// 이미 디코딩된 격자 해석
    fn import_grid(&self, grid: &Grid) -> ImportResult<ParsedEstimate>;
}

// ==========================================
// GridReader Trait
// ==========================================
// 구현: ExcelGridReader, CsvGridReader
pub trait GridReader: Send + Sync {
    /// 파일 바이트 → 셀 격자
    fn read_grid(&self, bytes: &[u8]) -> ImportResult<Grid>;
}
