// ==========================================
// 견적 공정 그룹 엔진 - 셀 값 정리
// ==========================================
// 책임: TRIM / 라벨 비교 정규화 / 숫자 강제 변환 / 날짜 해석
// 원칙: 어떤 셀 값에도 실패하지 않는다
// ==========================================

use crate::domain::grid::Cell;
use crate::domain::lenient::{coerce_amount, coerce_float};
use chrono::{Duration, NaiveDate};

pub struct DataCleaner;

impl DataCleaner {
    /// 앞뒤 공백 제거한 셀 텍스트
    pub fn clean_text(&self, cell: &Cell) -> String {
        cell.trimmed_text()
    }

    /// 라벨 비교용 (공백 제거 + 소문자)
    pub fn normalize_label(&self, value: &str) -> String {
        value.trim().to_lowercase()
    }

    /// 숫자로만 된 번호 칸인지 ("12" O, "1.5" X, "" X)
    pub fn is_numeric_label(&self, value: &str) -> bool {
        let trimmed = value.trim();
        !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
    }

    /// 수량/단가 셀 → 음이 아닌 정수 (잘못된 값은 0)
    pub fn parse_amount(&self, cell: &Cell) -> u64 {
        match cell {
            Cell::Empty => 0,
            Cell::Number(n) => coerce_float(*n),
            Cell::Text(s) => coerce_amount(s),
        }
    }

    /// 견적일 셀 해석
    ///
    /// - 텍스트: YYYY-MM-DD / YYYYMMDD / YYYY.MM.DD
    /// - 숫자: Excel 일련번호 (1900 날짜 체계)
    pub fn parse_date(&self, cell: &Cell) -> Option<NaiveDate> {
        match cell {
            Cell::Empty => None,
            Cell::Number(serial) => excel_serial_to_date(*serial),
            Cell::Text(s) => {
                let value = s.trim();
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
                    .or_else(|_| NaiveDate::parse_from_str(value, "%Y.%m.%d"))
                    .ok()
            }
        }
    }
}

fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
