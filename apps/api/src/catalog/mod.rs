#![allow(dead_code)]

//! Catalog collaborator — read-only access to canonical programs and careers.
//!
//! Carried in `AppState` as `Arc<dyn CatalogProvider>`. The Postgres-backed
//! implementation is the production default; `StaticCatalog` serves tests.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::catalog::{CatalogEntry, CatalogEntryRow, CatalogKind};

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn list_all_programs(&self) -> Result<Vec<CatalogEntry>, AppError>;
    async fn list_all_careers(&self) -> Result<Vec<CatalogEntry>, AppError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<CatalogEntry>, AppError>;
}

/// Postgres-backed catalog over the `catalog_entries` table.
/// Returns entries in insertion order so fallback ranking is deterministic.
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_by_kind(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>, AppError> {
        let rows = sqlx::query_as::<_, CatalogEntryRow>(
            "SELECT * FROM catalog_entries WHERE kind = $1 ORDER BY created_at, id",
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }
}

#[async_trait]
impl CatalogProvider for PgCatalog {
    async fn list_all_programs(&self) -> Result<Vec<CatalogEntry>, AppError> {
        self.list_by_kind(CatalogKind::Program).await
    }

    async fn list_all_careers(&self) -> Result<Vec<CatalogEntry>, AppError> {
        self.list_by_kind(CatalogKind::Career).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<CatalogEntry>, AppError> {
        let row = sqlx::query_as::<_, CatalogEntryRow>(
            "SELECT * FROM catalog_entries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CatalogEntry::from))
    }
}

/// In-memory catalog with fixed entry order. Used by tests and local seeding.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    pub entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn list_all_programs(&self) -> Result<Vec<CatalogEntry>, AppError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.kind == CatalogKind::Program)
            .cloned()
            .collect())
    }

    async fn list_all_careers(&self) -> Result<Vec<CatalogEntry>, AppError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.kind == CatalogKind::Career)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<CatalogEntry>, AppError> {
        Ok(self.entries.iter().find(|e| e.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, kind: CatalogKind) -> CatalogEntry {
        CatalogEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            kind,
        }
    }

    #[tokio::test]
    async fn test_static_catalog_filters_by_kind() {
        let catalog = StaticCatalog::new(vec![
            entry("Computer Science", CatalogKind::Program),
            entry("Software Engineer", CatalogKind::Career),
            entry("Nursing", CatalogKind::Program),
        ]);

        let programs = catalog.list_all_programs().await.unwrap();
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[0].name, "Computer Science");

        let careers = catalog.list_all_careers().await.unwrap();
        assert_eq!(careers.len(), 1);
    }

    #[tokio::test]
    async fn test_static_catalog_get_by_id() {
        let e = entry("Computer Science", CatalogKind::Program);
        let id = e.id;
        let catalog = StaticCatalog::new(vec![e]);

        assert!(catalog.get_by_id(id).await.unwrap().is_some());
        assert!(catalog.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }
}
