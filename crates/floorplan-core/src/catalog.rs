//! Catalog of placeable item templates.
//!
//! The catalog is injected configuration: an ordered list of immutable
//! templates the host renders in its sidebar. `color` and `icon` are opaque
//! presentation tokens; the core never interprets them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a catalog template.
pub type CatalogId = u32;

/// An immutable template describing one kind of placeable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogId,
    pub color: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Errors raised while loading catalog configuration.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate catalog id {0}")]
    DuplicateId(CatalogId),
}

/// An ordered, validated collection of catalog templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog from a template list, rejecting duplicate ids.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Load a catalog from a JSON array of templates.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Template at a sidebar position.
    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    /// Template with the given id.
    pub fn by_id(&self, id: CatalogId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Sidebar position of the template with the given id.
    pub fn index_of(&self, id: CatalogId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }
}
