// ==========================================
// 견적 공정 그룹 엔진 - 견적 템플릿 저장소
// ==========================================
// 책임: {items, processOrder} JSON 을 그대로 보관 (CRUD 만)
// 레드라인: 저장소는 그룹/순서 규칙을 모른다
//           읽을 때만 관대한 레코드 코덱을 거친다
// ==========================================

use crate::domain::estimate::{EstimateDraft, PersistedRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const ENTITY: &str = "EstimateTemplate";

#[derive(Debug, Clone, PartialEq)]
pub struct EstimateTemplate {
    pub template_id: String,
    pub title: String,
    pub record: PersistedRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EstimateTemplate {
    /// 편집 세션으로 불러오기 (순서가 없으면 항목 순서로 재구성)
    pub fn to_draft(&self) -> EstimateDraft {
        EstimateDraft::from_record(self.record.clone())
    }
}

// ==========================================
// TemplateStore Trait
// ==========================================
// 구현: TemplateRepository (rusqlite)
pub trait TemplateStore: Send + Sync {
    /// 새 템플릿 저장 → template_id
    fn save(&self, title: &str, draft: &EstimateDraft) -> RepositoryResult<String>;

    fn find_by_id(&self, template_id: &str) -> RepositoryResult<Option<EstimateTemplate>>;

    /// 최근 저장 순
    fn list(&self) -> RepositoryResult<Vec<EstimateTemplate>>;

    /// 항목/순서 덮어쓰기 (없으면 NotFound)
    fn update(&self, template_id: &str, draft: &EstimateDraft) -> RepositoryResult<()>;

    /// 삭제 (없으면 NotFound)
    fn delete(&self, template_id: &str) -> RepositoryResult<()>;
}

// ==========================================
// TemplateRepository
// ==========================================
pub struct TemplateRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TemplateRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn not_found(template_id: &str) -> RepositoryError {
        RepositoryError::NotFound {
            entity: ENTITY.to_string(),
            id: template_id.to_string(),
        }
    }
}

impl TemplateStore for TemplateRepository {
    #[instrument(skip(self, draft), fields(items = draft.items.len()))]
    fn save(&self, title: &str, draft: &EstimateDraft) -> RepositoryResult<String> {
        let record = draft.to_record();
        let template_id = Uuid::new_v4().to_string();
        let now = format_timestamp(Utc::now());

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO estimate_templates (
              template_id, title, items, process_order, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                template_id,
                title,
                record.items_json()?,
                record.process_order_json()?,
                now,
                now,
            ],
        )?;

        info!(template_id = %template_id, "템플릿 저장");
        Ok(template_id)
    }

    fn find_by_id(&self, template_id: &str) -> RepositoryResult<Option<EstimateTemplate>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT template_id, title, items, process_order, created_at, updated_at
            FROM estimate_templates
            WHERE template_id = ?1
            "#,
        )?;

        match stmt.query_row(params![template_id], map_row) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> RepositoryResult<Vec<EstimateTemplate>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT template_id, title, items, process_order, created_at, updated_at
            FROM estimate_templates
            ORDER BY created_at DESC, rowid DESC
            "#,
        )?;

        let rows = stmt.query_map([], map_row)?;
        let templates = rows.collect::<Result<Vec<_>, _>>()?;
        debug!(count = templates.len(), "템플릿 목록 조회");
        Ok(templates)
    }

    #[instrument(skip(self, draft))]
    fn update(&self, template_id: &str, draft: &EstimateDraft) -> RepositoryResult<()> {
        let record = draft.to_record();
        let conn = self.get_conn()?;
        let changed = conn.execute(
            r#"
            UPDATE estimate_templates
            SET items = ?2, process_order = ?3, updated_at = ?4
            WHERE template_id = ?1
            "#,
            params![
                template_id,
                record.items_json()?,
                record.process_order_json()?,
                format_timestamp(Utc::now()),
            ],
        )?;

        if changed == 0 {
            return Err(Self::not_found(template_id));
        }
        Ok(())
    }

    fn delete(&self, template_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            "DELETE FROM estimate_templates WHERE template_id = ?1",
            params![template_id],
        )?;

        if changed == 0 {
            return Err(Self::not_found(template_id));
        }
        info!(template_id = %template_id, "템플릿 삭제");
        Ok(())
    }
}

/// 고정 폭 RFC3339 (문자열 정렬 = 시간 정렬)
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<EstimateTemplate> {
    let items: Option<String> = row.get(2)?;
    let process_order: Option<String> = row.get(3)?;

    Ok(EstimateTemplate {
        template_id: row.get(0)?,
        title: row.get(1)?,
        record: PersistedRecord::from_json_columns(items.as_deref(), process_order.as_deref()),
        created_at: parse_timestamp(row, 4)?,
        updated_at: parse_timestamp(row, 5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};
    use crate::domain::types::GroupKey;

    fn repo() -> TemplateRepository {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        TemplateRepository::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_save_and_find() {
        let repo = repo();
        let mut draft = EstimateDraft::new();
        let key = draft.append_new_section();
        let renamed = draft.rename_group(&key, "도배");

        let id = repo.save("기본 도배", &draft).unwrap();
        let found = repo.find_by_id(&id).unwrap().unwrap();

        assert_eq!(found.title, "기본 도배");
        assert_eq!(found.record.process_order, Some(vec![renamed.clone()]));
        assert_eq!(found.to_draft().items[0].group_key, renamed);
        assert!(repo.find_by_id("missing").unwrap().is_none());
    }

    #[test]
    fn test_broken_columns_are_tolerated() {
        let repo = repo();
        {
            let conn = repo.get_conn().unwrap();
            conn.execute(
                "INSERT INTO estimate_templates VALUES ('t1', '깨진 템플릿', '[{\"processGroup\":\"목공\",\"qty\":\"3\"}]', 'oops', ?1, ?1)",
                params![format_timestamp(Utc::now())],
            )
            .unwrap();
        }

        let template = repo.find_by_id("t1").unwrap().unwrap();
        assert_eq!(template.record.process_order, None);
        let draft = template.to_draft();
        assert_eq!(draft.order, vec![GroupKey::named("목공")]);
        assert_eq!(draft.items[0].quantity, 3);
    }

    #[test]
    fn test_update_and_delete_missing() {
        let repo = repo();
        let draft = EstimateDraft::new();
        assert!(matches!(
            repo.update("nope", &draft),
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(matches!(repo.delete("nope"), Err(RepositoryError::NotFound { .. })));
    }
}
