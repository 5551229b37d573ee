//! Document persistence: the load/save/list/delete collaborator the core consumes.
//!
//! Default: `PgDocumentStore` (PostgreSQL, sections stored as one `jsonb` value).
//! Tests use `InMemoryDocumentStore`. `AppState` holds an `Arc<dyn DocumentStore>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{DocumentSummary, ResumeDocument, Sections, SortOrder};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns `AppError::NotFound` when no document has this id.
    async fn load(&self, id: Uuid) -> Result<ResumeDocument, AppError>;

    /// Upserts the whole document value.
    async fn save(&self, doc: &ResumeDocument) -> Result<(), AppError>;

    /// Summaries for one owner ordered by `updated_at`. `search` keeps titles that
    /// contain it, case-insensitively.
    async fn list(
        &self,
        owner_id: Uuid,
        order: SortOrder,
        search: Option<&str>,
    ) -> Result<Vec<DocumentSummary>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    template: String,
    sections: Json<Sections>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for ResumeDocument {
    fn from(row: DocumentRow) -> Self {
        ResumeDocument {
            id: row.id,
            owner_id: row.owner_id,
            title: row.title,
            template: row.template,
            created_at: row.created_at,
            updated_at: row.updated_at,
            sections: row.sections.0,
        }
    }
}

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn load(&self, id: Uuid) -> Result<ResumeDocument, AppError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, owner_id, title, template, sections, created_at, updated_at \
             FROM resume_documents WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

        Ok(row.into())
    }

    async fn save(&self, doc: &ResumeDocument) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO resume_documents
                (id, owner_id, title, template, sections, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                template = EXCLUDED.template,
                sections = EXCLUDED.sections,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(doc.id)
        .bind(doc.owner_id)
        .bind(&doc.title)
        .bind(&doc.template)
        .bind(Json(&doc.sections))
        .bind(doc.created_at)
        .bind(doc.updated_at)
        .execute(&self.pool)
        .await?;

        debug!(document_id = %doc.id, "Saved resume document");
        Ok(())
    }

    async fn list(
        &self,
        owner_id: Uuid,
        order: SortOrder,
        search: Option<&str>,
    ) -> Result<Vec<DocumentSummary>, AppError> {
        // ORDER BY direction cannot be bound as a parameter.
        let sql = match order {
            SortOrder::Asc => LIST_SQL_ASC,
            SortOrder::Desc => LIST_SQL_DESC,
        };

        Ok(sqlx::query_as::<_, DocumentSummary>(sql)
            .bind(owner_id)
            .bind(search)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resume_documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Resume {id} not found")));
        }
        Ok(())
    }
}

const LIST_SQL_ASC: &str = r#"
    SELECT id, owner_id, title, template, created_at, updated_at
    FROM resume_documents
    WHERE owner_id = $1
      AND ($2::text IS NULL OR position(lower($2) in lower(title)) > 0)
    ORDER BY updated_at ASC, id ASC
"#;

const LIST_SQL_DESC: &str = r#"
    SELECT id, owner_id, title, template, created_at, updated_at
    FROM resume_documents
    WHERE owner_id = $1
      AND ($2::text IS NULL OR position(lower($2) in lower(title)) > 0)
    ORDER BY updated_at DESC, id DESC
"#;

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub use memory::InMemoryDocumentStore;
