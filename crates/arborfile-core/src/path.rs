//! Ancestor chain reconstruction over the node store.

use std::collections::HashSet;

use crate::error::EngineError;
use crate::node::{Node, NodeId};
use crate::store::NodeStore;

/// Root-first ancestor chain for a node, including the node itself.
///
/// Walks `parent_id` links upward until a root (`None` parent) is reached.
/// The walk is bounded by tree depth; it terminates through the root base
/// case, not an iteration cap. A dangling or looping parent link is a
/// corruption condition and is reported as [`EngineError::BrokenChain`]
/// rather than looping or panicking.
pub fn ancestors_of(store: &NodeStore, id: NodeId) -> Result<Vec<&Node>, EngineError> {
    let mut current = store.get(id).ok_or(EngineError::NotFound { id })?;
    let mut chain = vec![current];
    let mut seen = HashSet::from([id]);

    while let Some(parent_id) = current.parent_id {
        if !seen.insert(parent_id) {
            return Err(EngineError::BrokenChain {
                id: current.id,
                missing_parent: parent_id,
            });
        }
        current = store
            .get(parent_id)
            .ok_or(EngineError::BrokenChain {
                id: current.id,
                missing_parent: parent_id,
            })?;
        chain.push(current);
    }

    chain.reverse();
    Ok(chain)
}

/// Check whether `candidate` is `of` itself or one of its ancestors.
///
/// Used by the move validator for cycle detection: moving a folder `F`
/// under target `T` is cyclic exactly when `is_ancestor(store, F, T)`.
/// A dangling parent link ends the walk with `false`; `ancestors_of` is the
/// place where that corruption gets reported.
pub fn is_ancestor(store: &NodeStore, candidate: NodeId, of: NodeId) -> bool {
    if candidate == of {
        return true;
    }
    let mut seen = HashSet::from([of]);
    let mut current = store.get(of);
    while let Some(node) = current {
        match node.parent_id {
            Some(parent_id) if parent_id == candidate => return true,
            Some(parent_id) => {
                if !seen.insert(parent_id) {
                    return false;
                }
                current = store.get(parent_id);
            }
            None => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root -> a -> b -> c
    fn chain_store() -> (NodeStore, NodeId, NodeId, NodeId) {
        let mut store = NodeStore::new();
        let a = store.allocate_id();
        store.insert(Node::new_folder(a, "a", None));
        let b = store.allocate_id();
        store.insert(Node::new_folder(b, "b", Some(a)));
        let c = store.allocate_id();
        store.insert(Node::new_folder(c, "c", Some(b)));
        (store, a, b, c)
    }

    #[test]
    fn test_ancestors_root_first() {
        let (store, a, b, c) = chain_store();
        let chain = ancestors_of(&store, c).unwrap();
        let ids: Vec<_> = chain.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_ancestors_of_root_node() {
        let (store, a, _, _) = chain_store();
        let chain = ancestors_of(&store, a).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].id, a);
    }

    #[test]
    fn test_ancestors_unknown_id() {
        let (store, ..) = chain_store();
        let err = ancestors_of(&store, NodeId::new(99)).unwrap_err();
        assert_eq!(err, EngineError::NotFound { id: NodeId::new(99) });
    }

    #[test]
    fn test_ancestors_broken_chain() {
        let (mut store, _, b, c) = chain_store();
        // Remove the middle node directly; c's parent link now dangles.
        store.remove(b);
        let err = ancestors_of(&store, c).unwrap_err();
        assert!(err.is_corruption());
        assert_eq!(
            err,
            EngineError::BrokenChain {
                id: c,
                missing_parent: b,
            }
        );
    }

    #[test]
    fn test_is_ancestor() {
        let (store, a, b, c) = chain_store();
        assert!(is_ancestor(&store, a, c));
        assert!(is_ancestor(&store, b, c));
        assert!(is_ancestor(&store, c, c), "a node is its own ancestor-or-self");
        assert!(!is_ancestor(&store, c, a));
        assert!(!is_ancestor(&store, b, a));
    }

    #[test]
    fn test_is_ancestor_dangling_parent_is_false() {
        let (mut store, _, b, c) = chain_store();
        store.remove(b);
        assert!(!is_ancestor(&store, NodeId::new(0), c));
    }
}
