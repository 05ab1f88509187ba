use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Whether a catalog entry is an academic program or a career.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Program,
    Career,
}

/// A canonical program or career available for matching.
/// Owned by the catalog collaborator; read-only from the core.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: CatalogKind,
}

impl CatalogEntry {
    /// Name and description joined for keyword matching.
    pub fn search_text(&self) -> String {
        match &self.description {
            Some(d) => format!("{} {}", self.name, d),
            None => self.name.clone(),
        }
    }
}

/// Row shape for the `catalog_entries` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogEntryRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: CatalogKind,
    pub created_at: DateTime<Utc>,
}

impl From<CatalogEntryRow> for CatalogEntry {
    fn from(row: CatalogEntryRow) -> Self {
        CatalogEntry {
            id: row.id,
            name: row.name,
            description: row.description,
            kind: row.kind,
        }
    }
}
