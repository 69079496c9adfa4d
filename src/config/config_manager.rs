// ==========================================
// 견적 공정 그룹 엔진 - 설정 관리자
// ==========================================
// 책임: config_kv 표에서 설정 읽기/쓰기, 기본값 위에 덮어쓰기
// 저장: config_kv 표 (key-value + scope)
// ==========================================

use crate::config::engine_config::EngineConfig;
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// 설정 키
pub mod config_keys {
    pub const IMPORT_HEADER_SCAN_ROWS: &str = "import.header_scan_rows";
    pub const IMPORT_DEFAULT_HEADER_ROW: &str = "import.default_header_row";
    pub const IMPORT_SHEET_PROBE_ROWS: &str = "import.sheet_probe_rows";
    pub const IMPORT_DEFAULT_UNIT: &str = "import.default_unit";
    pub const EXPORT_SHEET_NAME: &str = "export.sheet_name";
}

// ==========================================
// ConfigManager - 설정 관리자
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// # 인자
    /// - db_path: 데이터베이스 파일 경로
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 기존 연결로 생성 (PRAGMA 는 다시 적용, 멱등)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("잠금 획득 실패: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }
        Ok(Self { conn })
    }

    /// config_kv 에서 값 읽기 (scope_id='global')
    ///
    /// # 반환
    /// - Some(String): 설정 값
    /// - None: 설정 없음
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("잠금 획득 실패: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("잠금 획득 실패: {}", e))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// 기본값 위에 config_kv 값을 덮어쓴 엔진 설정
    ///
    /// 형식이 잘못된 값은 경고만 남기고 기본값을 쓴다.
    pub fn load_engine_config(&self) -> Result<EngineConfig, Box<dyn Error>> {
        let mut config = EngineConfig::default();

        if let Some(v) = self.parsed(config_keys::IMPORT_HEADER_SCAN_ROWS)? {
            config.import.header_scan_rows = v;
        }
        if let Some(v) = self.parsed(config_keys::IMPORT_DEFAULT_HEADER_ROW)? {
            config.import.default_header_row = v;
        }
        if let Some(v) = self.parsed(config_keys::IMPORT_SHEET_PROBE_ROWS)? {
            config.import.sheet_probe_rows = v;
        }
        if let Some(unit) = self.get_config_value(config_keys::IMPORT_DEFAULT_UNIT)? {
            let unit = unit.trim();
            config.import.default_unit = if unit.is_empty() {
                None
            } else {
                Some(unit.to_string())
            };
        }
        if let Some(name) = self.get_config_value(config_keys::EXPORT_SHEET_NAME)? {
            if !name.trim().is_empty() {
                config.export.sheet_name = name.trim().to_string();
            }
        }

        Ok(config)
    }

    /// global 설정 전체를 JSON 으로
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("잠금 획득 실패: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>, Box<dyn Error>> {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(None);
        };
        match raw.trim().parse::<T>() {
            Ok(v) => Ok(Some(v)),
            Err(_) => {
                warn!(key, value = %raw, "설정 값 형식 오류, 기본값 사용");
                Ok(None)
            }
        }
    }
}
