// ==========================================
// 견적 공정 그룹 엔진 - 견적서 시트 양식
// ==========================================
// 책임: 가져오기/내보내기가 공유하는 라벨과 열 위치
// ==========================================

/// 열 머리 행 첫 칸 (대소문자 무시 비교)
pub const LABEL_NO: &str = "No";
pub const LABEL_CATEGORY: &str = "품목";
pub const LABEL_SPEC: &str = "규격";
pub const LABEL_UNIT: &str = "단위";
pub const LABEL_QUANTITY: &str = "수량";
pub const LABEL_MATERIAL_PRICE: &str = "재료비단가";
pub const LABEL_LABOR_PRICE: &str = "노무비단가";
pub const LABEL_NOTE: &str = "비고";
pub const LABEL_ROW_TYPE: &str = "구분";

/// 행 구분 열에 들어가는 공정 행 표시
pub const ROW_TYPE_GROUP: &str = "공정";

/// 예전 양식에서 품목 칸에 넣던 공정 행 표시
pub const GROUP_SENTINEL: &str = "#";

/// 현재 양식 열 머리 (행 구분 열 포함)
pub const COLUMN_HEADERS: [&str; 9] = [
    LABEL_NO,
    LABEL_CATEGORY,
    LABEL_SPEC,
    LABEL_UNIT,
    LABEL_QUANTITY,
    LABEL_MATERIAL_PRICE,
    LABEL_LABOR_PRICE,
    LABEL_NOTE,
    LABEL_ROW_TYPE,
];

// 고정 열
pub const COL_NO: usize = 0;
pub const COL_CATEGORY: usize = 1;
pub const COL_SPEC: usize = 2;
pub const COL_UNIT: usize = 3;
pub const COL_QUANTITY: usize = 4;

/// 행 구분 열까지 읽을 수 있도록 행을 채우는 최소 폭
pub const MIN_ROW_WIDTH: usize = 9;

// 머리 정보 라벨
pub const META_CUSTOMER: &str = "고객명";
pub const META_CONTACT: &str = "연락처";
pub const META_ADDRESS: &str = "주소";
pub const META_TITLE: &str = "제목";
pub const META_DATE: &str = "견적일";
pub const META_NOTE: &str = "비고";
