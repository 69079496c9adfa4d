// ==========================================
// 로그 초기화
// ==========================================
// tracing + tracing-subscriber
// 환경 변수로 로그 수준 설정
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 로그 초기화
///
/// # 환경 변수
/// - RUST_LOG: 로그 필터 (기본: info)
///   예: RUST_LOG=debug 또는 RUST_LOG=estimate_sections=trace
///
/// # 예시
/// ```no_run
/// use estimate_sections::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// 테스트용 로그 초기화 (여러 번 호출해도 됨)
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
