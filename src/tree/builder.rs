//! Tree builder for constructing database trees from scaffolds

use crate::error::StoreError;
use crate::model::{Node, Status};
use crate::tree::scaffold::Scaffold;
use crate::types::{DatabaseKind, NodeId};
use std::time::Instant;
use tracing::{debug, error, instrument};

/// One database tree. Nodes live in an arena and are never removed during a
/// session, so every `NodeId` handed out stays valid for the tree's lifetime.
#[derive(Debug, Clone)]
pub struct DatabaseTree {
    kind: DatabaseKind,
    root: NodeId,
    nodes: Vec<Node>,
}

impl DatabaseTree {
    /// A tree holding only its root, named after the kind.
    pub fn empty(kind: DatabaseKind) -> Self {
        Self {
            kind,
            root: NodeId(0),
            nodes: vec![Node::new(kind.token(), None, Status::Staged)],
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &Node {
        self.node(self.root)
    }

    /// Node by id. Ids are only valid for the tree that issued them.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Exact, case-sensitive child lookup.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.node(parent)
            .children()
            .iter()
            .copied()
            .find(|child| self.node(*child).name() == name)
    }

    /// Slash-delimited absolute path of a node, starting with the kind token.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            match node.parent() {
                Some(parent) => {
                    segments.push(node.name());
                    cursor = Some(parent);
                }
                None => cursor = None,
            }
        }
        segments.push(self.kind.token());
        segments.reverse();
        segments.join("/")
    }

    /// Append a new child. Sibling names must stay unique.
    pub(crate) fn add_child(
        &mut self,
        parent: NodeId,
        name: &str,
        status: Status,
    ) -> Result<NodeId, StoreError> {
        validate_name(name)?;
        if self.find_child(parent, name).is_some() {
            return Err(StoreError::PermissionDenied(format!(
                "node '{}' already exists under '{}'",
                name,
                self.path_of(parent)
            )));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name, Some(parent), status));
        self.node_mut(parent).push_child(id);
        Ok(id)
    }

    /// Create `added` nodes for every scaffold entry below `parent`. Entries
    /// naming an existing child descend into it instead of duplicating it.
    /// Returns the number of nodes created. Names are checked before any node
    /// is created.
    pub(crate) fn graft(&mut self, parent: NodeId, scaffold: &Scaffold) -> Result<usize, StoreError> {
        validate_scaffold(scaffold)?;
        Ok(self.graft_unchecked(parent, scaffold))
    }

    fn graft_unchecked(&mut self, parent: NodeId, scaffold: &Scaffold) -> usize {
        let mut created = 0;
        for (name, children) in scaffold.entries() {
            let child = match self.find_child(parent, name) {
                Some(existing) => existing,
                None => {
                    let id = NodeId(self.nodes.len());
                    self.nodes.push(Node::new(name, Some(parent), Status::Added));
                    self.node_mut(parent).push_child(id);
                    created += 1;
                    id
                }
            };
            created += self.graft_unchecked(child, children);
        }
        created
    }

    /// Rename a node. The root keeps the kind token as its name.
    pub(crate) fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), StoreError> {
        let node = self.node(id);
        let Some(parent) = node.parent() else {
            return Err(StoreError::PermissionDenied(format!(
                "cannot rename the root of '{}'",
                self.kind
            )));
        };
        if node.name() == new_name {
            return Ok(());
        }
        validate_name(new_name)?;
        if self.find_child(parent, new_name).is_some() {
            return Err(StoreError::PermissionDenied(format!(
                "node '{}' already exists under '{}'",
                new_name,
                self.path_of(parent)
            )));
        }
        self.node_mut(id).rename(new_name);
        Ok(())
    }

    /// Current structure as a scaffold rooted at the kind token.
    pub fn to_scaffold(&self) -> Scaffold {
        Scaffold::new().with(self.kind.token(), self.children_scaffold(self.root))
    }

    fn children_scaffold(&self, id: NodeId) -> Scaffold {
        let mut scaffold = Scaffold::new();
        for child in self.node(id).children() {
            scaffold.insert(self.node(*child).name(), self.children_scaffold(*child));
        }
        scaffold
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    if name.is_empty() || name == "." || name.contains('/') {
        return Err(StoreError::invalid_path(
            name,
            "node names must be non-empty, not '.', and must not contain '/'",
        ));
    }
    Ok(())
}

fn validate_scaffold(scaffold: &Scaffold) -> Result<(), StoreError> {
    for (name, children) in scaffold.entries() {
        validate_name(name)?;
        validate_scaffold(children)?;
    }
    Ok(())
}

/// Builds a `DatabaseTree` from the stored structure of one kind.
pub struct TreeBuilder {
    kind: DatabaseKind,
}

impl TreeBuilder {
    pub fn new(kind: DatabaseKind) -> Self {
        Self { kind }
    }

    /// The structure must hold exactly one root, named after the kind. All
    /// nodes are built `staged`.
    #[instrument(skip(self, structure), fields(kind = %self.kind))]
    pub fn build(&self, structure: &Scaffold) -> Result<DatabaseTree, StoreError> {
        let start = Instant::now();

        if structure.len() != 1 {
            error!(roots = structure.len(), "Tree does not have a single root");
            return Err(StoreError::InvariantViolation(format!(
                "database '{}' must have exactly one root node, found {}",
                self.kind,
                structure.len()
            )));
        }
        let (root_name, children) = structure
            .entries()
            .next()
            .ok_or_else(|| StoreError::InvariantViolation("empty structure".to_string()))?;
        if root_name != self.kind.token() {
            return Err(StoreError::InvariantViolation(format!(
                "root of database '{}' must be named '{}', found '{}'",
                self.kind,
                self.kind.token(),
                root_name
            )));
        }

        let mut tree = DatabaseTree::empty(self.kind);
        let root = tree.root_id();
        self.build_children(&mut tree, root, children)?;

        debug!(
            node_count = tree.len(),
            duration_us = start.elapsed().as_micros() as u64,
            "Tree build completed"
        );
        Ok(tree)
    }

    fn build_children(
        &self,
        tree: &mut DatabaseTree,
        parent: NodeId,
        children: &Scaffold,
    ) -> Result<(), StoreError> {
        for (name, grandchildren) in children.entries() {
            let child = tree.add_child(parent, name, Status::Staged)?;
            self.build_children(tree, child, grandchildren)?;
        }
        Ok(())
    }
}
