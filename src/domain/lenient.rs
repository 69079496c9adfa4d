// ==========================================
// 견적 공정 그룹 엔진 - 관대한 값 변환
// ==========================================
// 책임: 저장 JSON / 엑셀 셀에서 들어온 값을 깨끗한 문자열·정수로 변환
// 원칙: 실패하지 않는다 (잘못된 숫자 → 0)
// ==========================================

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 금액/수량 문자열을 음이 아닌 정수로 변환
///
/// - 쉼표, 공백 제거 ("1,200 " → 1200)
/// - 소수는 버림, 음수/비숫자/빈 값은 0
pub fn coerce_amount(raw: &str) -> u64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return 0;
    }
    match cleaned.parse::<f64>() {
        Ok(n) => coerce_float(n),
        Err(_) => 0,
    }
}

pub fn coerce_float(n: f64) -> u64 {
    if n.is_finite() && n > 0.0 {
        n.trunc() as u64
    } else {
        0
    }
}

/// serde `deserialize_with`: 숫자/숫자 문자열/null → u64
pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => v,
            None => n.as_f64().map(coerce_float).unwrap_or(0),
        },
        Value::String(s) => coerce_amount(&s),
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => 0,
    })
}

/// serde `deserialize_with`: 문자열/숫자/null → String
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_amount_formats() {
        assert_eq!(coerce_amount("10000"), 10000);
        assert_eq!(coerce_amount(" 1,200 "), 1200);
        assert_eq!(coerce_amount("1 500"), 1500);
        assert_eq!(coerce_amount("12.9"), 12);
    }

    #[test]
    fn test_coerce_amount_invalid_is_zero() {
        assert_eq!(coerce_amount(""), 0);
        assert_eq!(coerce_amount("abc"), 0);
        assert_eq!(coerce_amount("-5"), 0);
        assert_eq!(coerce_amount("NaN"), 0);
        assert_eq!(coerce_amount("inf"), 0);
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "amount")]
        qty: u64,
        #[serde(deserialize_with = "text")]
        name: String,
    }

    #[test]
    fn test_lenient_json_fields() {
        let p: Probe = serde_json::from_str(r#"{"qty":"3","name":7}"#).unwrap();
        assert_eq!(p.qty, 3);
        assert_eq!(p.name, "7");

        let p: Probe = serde_json::from_str(r#"{"qty":2.7,"name":null}"#).unwrap();
        assert_eq!(p.qty, 2);
        assert_eq!(p.name, "");

        let p: Probe = serde_json::from_str(r#"{"qty":-4,"name":"x"}"#).unwrap();
        assert_eq!(p.qty, 0);
    }
}
