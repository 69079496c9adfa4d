// ==========================================
// 견적 공정 그룹 엔진 - 견적 항목
// ==========================================
// 책임: 한 줄 견적 항목의 필드와 파생 금액, 합계/부가세
// ==========================================

use crate::domain::lenient;
use crate::domain::types::GroupKey;
use serde::{Deserialize, Serialize};

/// 부가세율 (%)
pub const VAT_RATE_PERCENT: u64 = 10;

// ==========================================
// LineItem - 견적 항목
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(rename = "processGroup", default)]
    pub group_key: GroupKey,

    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String, // 품목

    #[serde(default, deserialize_with = "lenient::text")]
    pub spec: String, // 규격

    #[serde(default, deserialize_with = "lenient::text")]
    pub unit: String, // 단위

    #[serde(rename = "qty", default, deserialize_with = "lenient::amount")]
    pub quantity: u64,

    #[serde(default, deserialize_with = "lenient::amount")]
    pub material_unit_price: u64, // 재료비 단가

    #[serde(default, deserialize_with = "lenient::amount")]
    pub labor_unit_price: u64, // 노무비 단가

    #[serde(default, deserialize_with = "lenient::text")]
    pub note: String, // 비고
}

impl LineItem {
    /// 지정한 공정에 속하는 빈 항목
    pub fn new(group_key: GroupKey) -> Self {
        Self {
            group_key,
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_spec(mut self, spec: impl Into<String>) -> Self {
        self.spec = spec.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_prices(mut self, material: u64, labor: u64) -> Self {
        self.material_unit_price = material;
        self.labor_unit_price = labor;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// 재료비 금액 = 수량 × 재료비 단가
    pub fn material_amount(&self) -> u64 {
        self.quantity.saturating_mul(self.material_unit_price)
    }

    /// 노무비 금액 = 수량 × 노무비 단가
    pub fn labor_amount(&self) -> u64 {
        self.quantity.saturating_mul(self.labor_unit_price)
    }

    /// 금액 = 재료비 금액 + 노무비 금액
    pub fn amount(&self) -> u64 {
        self.material_amount().saturating_add(self.labor_amount())
    }

    pub fn is_zero_quantity(&self) -> bool {
        self.quantity == 0
    }
}

// ==========================================
// EstimateTotals - 견적 합계
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateTotals {
    pub material: u64,
    pub labor: u64,
    pub supply: u64, // 공급가액 (재료비 + 노무비)
    pub vat: u64,
    pub total: u64,
}

impl EstimateTotals {
    /// 부가세는 원 단위 절사
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        let (material, labor) = items.into_iter().fold((0u64, 0u64), |(m, l), item| {
            (
                m.saturating_add(item.material_amount()),
                l.saturating_add(item.labor_amount()),
            )
        });
        let supply = material.saturating_add(labor);
        let vat = supply.saturating_mul(VAT_RATE_PERCENT) / 100;

        Self {
            material,
            labor,
            supply,
            vat,
            total: supply.saturating_add(vat),
        }
    }
}
