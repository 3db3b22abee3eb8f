//! Structural operations over the collection tree.
//!
//! Every operation is a plain recursive walk. Lookups that miss are no-ops
//! and report `false`; sibling order is never changed except by appending.

use serde::{Deserialize, Serialize};

use super::CollectionItem;

/// The forest of root collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionTree {
    roots: Vec<CollectionItem>,
}

impl CollectionTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Returns the root nodes in display order.
    #[must_use]
    pub fn roots(&self) -> &[CollectionItem] {
        &self.roots
    }

    /// Adds a node named `name` with the given id.
    ///
    /// Without a parent the node is a root collection; with one it is a
    /// folder appended to that parent's children. Blank names, unknown
    /// parents and ids already in the tree are rejected.
    pub fn add(&mut self, id: impl Into<String>, name: &str, parent_id: Option<&str>) -> bool {
        let id = id.into();
        let name = name.trim();
        if name.is_empty() || self.find(&id).is_some() {
            return false;
        }

        match parent_id {
            None => {
                self.roots.push(CollectionItem::collection(id, name));
                true
            }
            Some(parent_id) => match find_mut(&mut self.roots, parent_id) {
                Some(parent) => {
                    parent
                        .children
                        .push(CollectionItem::folder(id, name, parent_id));
                    true
                }
                None => false,
            },
        }
    }

    /// Renames the node with `id` in place. Blank names are rejected.
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        find_mut(&mut self.roots, id).is_some_and(|item| {
            item.name = name.to_string();
            true
        })
    }

    /// Removes the node with `id` together with its whole subtree.
    pub fn delete(&mut self, id: &str) -> bool {
        remove_from(&mut self.roots, id)
    }

    /// Returns a filtered copy of the tree for a name search.
    ///
    /// Matching is a case-insensitive substring test. A node whose own name
    /// matches is kept with its entire subtree; a node that only has matching
    /// descendants is kept with just the branches leading to them. A blank
    /// query returns the whole tree.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<CollectionItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.roots.clone();
        }
        filter(&self.roots, &needle)
    }

    /// Finds a node anywhere in the tree.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CollectionItem> {
        find(&self.roots, id)
    }

    /// Total number of nodes.
    #[must_use]
    pub fn count(&self) -> usize {
        self.roots.iter().map(CollectionItem::subtree_len).sum()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl From<Vec<CollectionItem>> for CollectionTree {
    fn from(roots: Vec<CollectionItem>) -> Self {
        Self { roots }
    }
}

fn find<'a>(items: &'a [CollectionItem], id: &str) -> Option<&'a CollectionItem> {
    items
        .iter()
        .find_map(|item| if item.id == id { Some(item) } else { find(&item.children, id) })
}

fn find_mut<'a>(items: &'a mut [CollectionItem], id: &str) -> Option<&'a mut CollectionItem> {
    for item in items {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_mut(&mut item.children, id) {
            return Some(found);
        }
    }
    None
}

fn remove_from(items: &mut Vec<CollectionItem>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id != id);
    let mut removed = items.len() != before;
    for item in items.iter_mut() {
        removed |= remove_from(&mut item.children, id);
    }
    removed
}

fn filter(items: &[CollectionItem], needle: &str) -> Vec<CollectionItem> {
    items
        .iter()
        .filter_map(|item| {
            if item.name.to_lowercase().contains(needle) {
                return Some(item.clone());
            }
            let children = filter(&item.children, needle);
            (!children.is_empty()).then(|| CollectionItem {
                id: item.id.clone(),
                name: item.name.clone(),
                kind: item.kind,
                parent_id: item.parent_id.clone(),
                children,
            })
        })
        .collect()
}
