//! In-memory index over one category table.
//!
//! Categories reference their parent by id only. The index keeps an
//! id → node map and a parent → children adjacency map so the API can walk
//! ancestor chains and render trees without object cycles. Every walk is
//! bounded by [`MAX_CATEGORY_DEPTH`] and stops on a repeated id, so malformed
//! (cyclic) data cannot cause unbounded work.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::DbId;

/// Maximum number of ancestors inlined when serializing a category, and the
/// maximum depth rendered by [`CategoryIndex::tree`].
pub const MAX_CATEGORY_DEPTH: usize = 32;

/// A single category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
}

/// A category with its ancestor chain inlined under `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryChain {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub parent: Option<Box<CategoryChain>>,
}

/// A category with its descendants nested under `children`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTreeNode {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub children: Vec<CategoryTreeNode>,
}

#[derive(Debug, Default)]
pub struct CategoryIndex {
    nodes: HashMap<DbId, CategoryNode>,
    children: HashMap<Option<DbId>, Vec<DbId>>,
}

impl CategoryIndex {
    /// Build the index. Child lists are ordered by id.
    pub fn new(categories: impl IntoIterator<Item = CategoryNode>) -> Self {
        let mut nodes = HashMap::new();
        let mut children: HashMap<Option<DbId>, Vec<DbId>> = HashMap::new();

        for node in categories {
            children.entry(node.parent_id).or_default().push(node.id);
            nodes.insert(node.id, node);
        }
        for ids in children.values_mut() {
            ids.sort_unstable();
        }

        Self { nodes, children }
    }

    pub fn get(&self, id: DbId) -> Option<&CategoryNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Categories without a parent, ordered by id.
    pub fn roots(&self) -> Vec<&CategoryNode> {
        self.children_of(None)
    }

    /// Direct children of `parent`, ordered by id.
    pub fn children_of(&self, parent: Option<DbId>) -> Vec<&CategoryNode> {
        self.children
            .get(&parent)
            .map(|ids| ids.iter().filter_map(|id| self.nodes.get(id)).collect())
            .unwrap_or_default()
    }

    /// The category followed by its ancestors, nearest first.
    ///
    /// At most [`MAX_CATEGORY_DEPTH`] ancestors are returned; the walk also
    /// stops at a missing parent or a repeated id.
    pub fn path(&self, id: DbId) -> Option<Vec<&CategoryNode>> {
        let start = self.nodes.get(&id)?;
        let mut path = vec![start];
        let mut seen = HashSet::from([start.id]);
        let mut current = start;

        while path.len() <= MAX_CATEGORY_DEPTH {
            let Some(parent) = current.parent_id.and_then(|p| self.nodes.get(&p)) else {
                break;
            };
            if !seen.insert(parent.id) {
                break;
            }
            path.push(parent);
            current = parent;
        }

        Some(path)
    }

    /// The category with its ancestor chain nested under `parent`.
    pub fn chain(&self, id: DbId) -> Option<CategoryChain> {
        let path = self.path(id)?;
        let mut chain: Option<Box<CategoryChain>> = None;
        for node in path.into_iter().rev() {
            chain = Some(Box::new(CategoryChain {
                id: node.id,
                name: node.name.clone(),
                parent_id: node.parent_id,
                parent: chain,
            }));
        }
        chain.map(|boxed| *boxed)
    }

    /// Whether re-parenting `id` under `new_parent` would make `id` its own
    /// ancestor.
    pub fn would_create_cycle(&self, id: DbId, new_parent: DbId) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(new_parent);
        while let Some(candidate) = current {
            if candidate == id {
                return true;
            }
            if !seen.insert(candidate) {
                // Pre-existing cycle above the new parent that does not
                // contain `id`.
                return false;
            }
            current = self.nodes.get(&candidate).and_then(|n| n.parent_id);
        }
        false
    }

    /// All root categories with their descendants, depth-bounded.
    pub fn tree(&self) -> Vec<CategoryTreeNode> {
        self.roots()
            .into_iter()
            .map(|root| self.subtree(root, 0))
            .collect()
    }

    fn subtree(&self, node: &CategoryNode, depth: usize) -> CategoryTreeNode {
        let children = if depth < MAX_CATEGORY_DEPTH {
            self.children_of(Some(node.id))
                .into_iter()
                .map(|child| self.subtree(child, depth + 1))
                .collect()
        } else {
            Vec::new()
        };

        CategoryTreeNode {
            id: node.id,
            name: node.name.clone(),
            parent_id: node.parent_id,
            children,
        }
    }
}
