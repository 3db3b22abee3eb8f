//! Collection tree nodes

use serde::{Deserialize, Serialize};

/// What a tree node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A root-level grouping
    Collection,
    /// A grouping nested under another node
    Folder,
    /// A saved request template
    Request,
}

/// A node of the collection tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Node kind
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Parent node id; `None` for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Child nodes in display order
    #[serde(default)]
    pub children: Vec<CollectionItem>,
}

impl CollectionItem {
    /// Creates a root collection.
    #[must_use]
    pub fn collection(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Collection,
            parent_id: None,
            children: Vec::new(),
        }
    }

    /// Creates a folder under `parent_id`.
    #[must_use]
    pub fn folder(
        id: impl Into<String>,
        name: impl Into<String>,
        parent_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Folder,
            parent_id: Some(parent_id.into()),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, the node itself included.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Self::subtree_len)
            .sum::<usize>()
    }
}
