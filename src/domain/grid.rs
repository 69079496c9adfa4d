// ==========================================
// 견적 공정 그룹 엔진 - 셀 격자
// ==========================================
// 책임: 디코딩된 스프레드시트 한 장 (문자열 | 숫자 | 빈 칸)
// ==========================================

/// 셀 값
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

/// 한 시트 = 행의 목록
pub type Grid = Vec<Vec<Cell>>;

impl Cell {
    /// 빈 문자열은 Empty 로 정규화
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    /// 비교용 텍스트 (앞뒤 공백 제거, 정수형 숫자는 소수점 없이)
    pub fn trimmed_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => format_number(*n),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(f64::from(value))
    }
}

/// 문자열만으로 된 행 (테스트/고정 라벨 행 작성용)
pub fn text_row(values: &[&str]) -> Vec<Cell> {
    values.iter().map(|v| Cell::from(*v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_text() {
        assert_eq!(Cell::text("  품목 ").trimmed_text(), "품목");
        assert_eq!(Cell::Number(10000.0).trimmed_text(), "10000");
        assert_eq!(Cell::Number(1.5).trimmed_text(), "1.5");
        assert_eq!(Cell::Empty.trimmed_text(), "");
    }

    #[test]
    fn test_empty_string_is_empty_cell() {
        assert_eq!(Cell::from(""), Cell::Empty);
        assert!(Cell::text("   ").is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn test_text_row() {
        let row = text_row(&["no", "", "규격"]);
        assert_eq!(row, vec![Cell::text("no"), Cell::Empty, Cell::text("규격")]);
    }
}
