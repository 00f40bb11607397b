//! Arena store for namespace nodes.

use std::collections::HashMap;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::node::{Node, NodeId};

/// Id-indexed arena owning every node in one forest.
///
/// The store is a plain container: it keeps the id map and a parent/child
/// adjacency index consistent with each other, but does not enforce the
/// forest or name-uniqueness invariants itself. Those are the job of the
/// validators and the mutation engine, which is why external layers must
/// never mutate a store directly.
///
/// Serializes as a flat list of nodes; the adjacency index and the id
/// counter are rebuilt on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "Vec<Node>", from = "Vec<Node>")]
pub struct NodeStore {
    nodes: HashMap<NodeId, Node>,
    /// Parent id (`None` = root) to child ids. Order is incidental.
    children: HashMap<Option<NodeId>, Vec<NodeId>>,
    next_id: u64,
}

impl NodeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the store.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate the next node id.
    pub fn allocate_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Check whether a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Direct children of a parent (`None` = root level), in no particular
    /// order. Display sorting is a presentation concern.
    pub fn children_of(&self, parent_id: Option<NodeId>) -> Vec<&Node> {
        self.child_ids(parent_id)
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    /// Direct child ids of a parent (`None` = root level).
    pub fn child_ids(&self, parent_id: Option<NodeId>) -> &[NodeId] {
        self.children.get(&parent_id).map_or(&[], Vec::as_slice)
    }

    /// Iterate over all nodes in the store.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Insert a node, indexing it under its parent.
    ///
    /// A node with the same id is replaced (and unlinked from its previous
    /// parent first).
    pub fn insert(&mut self, node: Node) {
        if let Some(old_parent) = self.nodes.get(&node.id).map(|old| old.parent_id) {
            self.unlink(node.id, old_parent);
        }
        if node.id.0 >= self.next_id {
            self.next_id = node.id.0 + 1;
        }
        self.children.entry(node.parent_id).or_default().push(node.id);
        self.nodes.insert(node.id, node);
    }

    /// Remove a single node, unlinking it from its parent.
    ///
    /// Children of the removed node are untouched; cascading removal is the
    /// mutation engine's job.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        self.unlink(id, node.parent_id);
        Some(node)
    }

    /// Reparent a node, keeping the adjacency index consistent and touching
    /// `modified_at`. Returns false if the id is unknown.
    ///
    /// No validation happens here; callers go through the move validator.
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> bool {
        let old_parent = match self.nodes.get(&id) {
            Some(node) => node.parent_id,
            None => return false,
        };
        if old_parent != new_parent {
            self.unlink(id, old_parent);
            self.children.entry(new_parent).or_default().push(id);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent_id = new_parent;
            node.modified_at = chrono::Utc::now();
        }
        true
    }

    /// Rename a node and touch `modified_at`. Returns false if the id is
    /// unknown. Uniqueness is the caller's concern.
    pub fn rename(&mut self, id: NodeId, new_name: impl Into<CompactString>) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.name = new_name.into();
                node.modified_at = chrono::Utc::now();
                true
            }
            None => false,
        }
    }

    fn unlink(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(bucket) = self.children.get_mut(&parent) {
            bucket.retain(|child| *child != id);
            if bucket.is_empty() {
                self.children.remove(&parent);
            }
        }
    }
}

impl From<NodeStore> for Vec<Node> {
    fn from(store: NodeStore) -> Self {
        store.nodes.into_values().collect()
    }
}

impl From<Vec<Node>> for NodeStore {
    fn from(nodes: Vec<Node>) -> Self {
        let mut store = NodeStore::new();
        for node in nodes {
            store.insert(node);
        }
        store
    }
}
