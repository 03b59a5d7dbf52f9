//! Database Trees
//!
//! Each database kind is one tree of category nodes held in an arena. Trees
//! are built from an ordered name→children scaffold and addressed with
//! slash-delimited paths.

pub mod builder;
pub mod path;
pub mod scaffold;

pub use builder::{DatabaseTree, TreeBuilder};
pub use path::{resolve, resolve_note, Resolved};
pub use scaffold::Scaffold;

use crate::model::Node;
use crate::types::{DatabaseKind, NodeRef};

/// One tree per database kind.
#[derive(Debug, Clone)]
pub struct Forest {
    trees: [DatabaseTree; 3],
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

impl Forest {
    /// Every kind with a bare root.
    pub fn new() -> Self {
        Self {
            trees: DatabaseKind::ALL.map(DatabaseTree::empty),
        }
    }

    pub fn get(&self, kind: DatabaseKind) -> &DatabaseTree {
        &self.trees[kind.index()]
    }

    pub(crate) fn get_mut(&mut self, kind: DatabaseKind) -> &mut DatabaseTree {
        &mut self.trees[kind.index()]
    }

    /// Replace the tree of the same kind.
    pub fn insert(&mut self, tree: DatabaseTree) {
        let index = tree.kind().index();
        self.trees[index] = tree;
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatabaseTree> {
        self.trees.iter()
    }

    pub fn node(&self, node: NodeRef) -> &Node {
        self.get(node.kind).node(node.node)
    }

    pub fn path_of(&self, node: NodeRef) -> String {
        self.get(node.kind).path_of(node.node)
    }

    pub fn root_of(&self, kind: DatabaseKind) -> NodeRef {
        NodeRef::new(kind, self.get(kind).root_id())
    }
}
