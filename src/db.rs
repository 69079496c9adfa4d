// ==========================================
// 견적 공정 그룹 엔진 - SQLite 연결 초기화
// ==========================================
// 목표:
// - 모든 Connection::open 에 같은 PRAGMA 적용
// - 템플릿/설정 표 생성 (멱등)
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// 기본 busy_timeout (밀리초)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 데이터 디렉터리 아래 앱 폴더 이름
pub const APP_DIR_NAME: &str = "estimate-sections";

/// 연결마다 필요한 PRAGMA
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// SQLite 연결을 열고 공통 설정 적용
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 템플릿 표 / 설정 표 생성
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS estimate_templates (
            template_id   TEXT PRIMARY KEY,
            title         TEXT NOT NULL,
            items         TEXT NOT NULL DEFAULT '[]',
            process_order TEXT,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_estimate_templates_created
            ON estimate_templates (created_at DESC);

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id   TEXT NOT NULL,
            key        TEXT NOT NULL,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )
}

/// 사용자 데이터 디렉터리의 기본 DB 경로
///
/// 데이터 디렉터리를 알 수 없으면 현재 디렉터리에 만든다.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("templates.db")
}
