//! Mutation engine: the user-facing operations over one node store.

use compact_str::CompactString;

use arborfile_core::path::ancestors_of;
use arborfile_core::{EngineError, FileMeta, NamingConfig, Node, NodeId, NodeStore};

use crate::move_op::validate_move;
use crate::naming::{name_taken, next_available_name, validate_name, NameKind};

/// Applies create/rename/move/delete operations atomically over an owned
/// [`NodeStore`].
///
/// Every operation is validate-then-commit: any `Err` return leaves the
/// store exactly as it was. The engine is single-writer and synchronous —
/// callers exposing one store to concurrent writers must serialize mutating
/// calls themselves (one lock or actor per store), since two moves validated
/// against the same snapshot could jointly form a cycle or a collision.
/// Read-only queries are safe between mutations.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    store: NodeStore,
    config: NamingConfig,
}

impl Engine {
    /// Create an engine over an empty store with default naming rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom naming rules.
    pub fn with_config(config: NamingConfig) -> Self {
        Self {
            store: NodeStore::new(),
            config,
        }
    }

    /// Create an engine over an existing store (e.g. one rebuilt from a
    /// serialized snapshot).
    pub fn from_store(store: NodeStore, config: NamingConfig) -> Self {
        Self { store, config }
    }

    /// Read-only view of the underlying store.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Naming rules in effect.
    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.store.get(id)
    }

    /// Direct children of a folder (`None` = root level), unsorted.
    pub fn children_of(&self, parent_id: Option<NodeId>) -> Vec<&Node> {
        self.store.children_of(parent_id)
    }

    /// Create a folder under `parent_id`.
    ///
    /// A name collision is not an error here: the stored name is
    /// disambiguated to `name (1)`, `name (2)`, … as needed.
    pub fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> Result<NodeId, EngineError> {
        self.create(name, None, parent_id)
    }

    /// Create a file under `parent_id`, carrying opaque content metadata.
    ///
    /// Collisions disambiguate the same way, with the extension kept:
    /// `name (1).ext`.
    pub fn create_file(
        &mut self,
        name: &str,
        meta: FileMeta,
        parent_id: Option<NodeId>,
    ) -> Result<NodeId, EngineError> {
        self.create(name, Some(meta), parent_id)
    }

    /// Create a folder with the configured default name ("New folder",
    /// "New folder (1)", …).
    pub fn create_default_folder(
        &mut self,
        parent_id: Option<NodeId>,
    ) -> Result<NodeId, EngineError> {
        let name = self.config.default_folder_name.clone();
        self.create_folder(&name, parent_id)
    }

    /// Create an empty file with the configured default name
    /// ("New file.txt", "New file (1).txt", …).
    pub fn create_default_file(
        &mut self,
        parent_id: Option<NodeId>,
    ) -> Result<NodeId, EngineError> {
        let name = self.config.default_file_name();
        self.create_file(&name, FileMeta::empty("text/plain"), parent_id)
    }

    fn create(
        &mut self,
        name: &str,
        meta: Option<FileMeta>,
        parent_id: Option<NodeId>,
    ) -> Result<NodeId, EngineError> {
        if let Some(parent) = parent_id {
            let parent_node = self
                .store
                .get(parent)
                .ok_or(EngineError::InvalidParent { id: parent })?;
            if !parent_node.is_folder() {
                return Err(EngineError::InvalidParent { id: parent });
            }
        }

        validate_name(name, &self.config)?;

        let kind = match meta {
            Some(_) => NameKind::File,
            None => NameKind::Folder,
        };
        let final_name = next_available_name(&self.store, name, kind, parent_id);

        let id = self.store.allocate_id();
        let node = match meta {
            Some(meta) => Node::new_file(id, final_name.clone(), meta, parent_id),
            None => Node::new_folder(id, final_name.clone(), parent_id),
        };
        self.store.insert(node);

        tracing::debug!(target: "arborfile", %id, name = %final_name, "created node");
        Ok(id)
    }

    /// Rename a node, keeping sibling uniqueness.
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), EngineError> {
        let node = self.store.get(id).ok_or(EngineError::NotFound { id })?;

        if node.name == new_name {
            return Err(EngineError::NoOp);
        }

        validate_name(new_name, &self.config)?;

        if name_taken(
            &self.store,
            new_name,
            NameKind::from(&node.kind),
            node.parent_id,
            Some(id),
        ) {
            return Err(EngineError::NameCollision {
                name: CompactString::from(new_name),
            });
        }

        self.store.rename(id, new_name);
        tracing::debug!(target: "arborfile", %id, name = %new_name, "renamed node");
        Ok(())
    }

    /// Move a node under a new parent (`None` = root).
    ///
    /// Delegates legality to [`validate_move`]; on failure the store is left
    /// unchanged and the reason is returned to the caller.
    pub fn move_node(
        &mut self,
        id: NodeId,
        new_parent: Option<NodeId>,
    ) -> Result<(), EngineError> {
        validate_move(&self.store, id, new_parent)?;
        self.store.set_parent(id, new_parent);
        tracing::debug!(target: "arborfile", %id, parent = ?new_parent, "moved node");
        Ok(())
    }

    /// Delete a node; folders cascade over their whole subtree.
    ///
    /// Returns the removed ids so the upstream layer can hand file ids to
    /// the content store for blob reclamation. Removal order within the
    /// subtree is unspecified.
    pub fn delete(&mut self, id: NodeId) -> Result<Vec<NodeId>, EngineError> {
        if !self.store.contains(id) {
            return Err(EngineError::NotFound { id });
        }

        // Explicit worklist instead of recursion: subtree depth is caller
        // data and must not be able to blow the stack.
        let mut worklist = vec![id];
        let mut subtree = Vec::new();
        while let Some(current) = worklist.pop() {
            subtree.push(current);
            worklist.extend_from_slice(self.store.child_ids(Some(current)));
        }

        // Children before parents, so no surviving lookup ever sees a
        // dangling parent link.
        let mut removed = Vec::with_capacity(subtree.len());
        for node_id in subtree.into_iter().rev() {
            if self.store.remove(node_id).is_some() {
                removed.push(node_id);
            }
        }

        tracing::debug!(target: "arborfile", %id, count = removed.len(), "deleted subtree");
        Ok(removed)
    }

    /// Root-first ancestor chain for breadcrumb display.
    ///
    /// `None` (the root level) has an empty chain; otherwise the chain ends
    /// with the node itself. A `BrokenChain` outcome means the store is
    /// corrupt and is logged as an error, unlike ordinary validation
    /// failures.
    pub fn breadcrumb(&self, id: Option<NodeId>) -> Result<Vec<Node>, EngineError> {
        let Some(id) = id else {
            return Ok(Vec::new());
        };
        match ancestors_of(&self.store, id) {
            Ok(chain) => Ok(chain.into_iter().cloned().collect()),
            Err(err) => {
                if err.is_corruption() {
                    tracing::error!(target: "arborfile", %id, %err, "ancestor walk hit corrupt parent link");
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_in_missing_parent() {
        let mut engine = Engine::new();
        let err = engine.create_folder("Docs", Some(NodeId::new(9))).unwrap_err();
        assert_eq!(err, EngineError::InvalidParent { id: NodeId::new(9) });
    }

    #[test]
    fn test_create_under_file_is_invalid() {
        let mut engine = Engine::new();
        let file = engine
            .create_file("notes.txt", FileMeta::empty("text/plain"), None)
            .unwrap();
        let err = engine.create_folder("Docs", Some(file)).unwrap_err();
        assert_eq!(err, EngineError::InvalidParent { id: file });
    }

    #[test]
    fn test_create_auto_disambiguates() {
        let mut engine = Engine::new();
        let mut names = Vec::new();
        for _ in 0..3 {
            let id = engine.create_folder("Docs", None).unwrap();
            names.push(engine.get(id).unwrap().name.clone());
        }
        assert_eq!(names, vec!["Docs", "Docs (1)", "Docs (2)"]);
    }

    #[test]
    fn test_create_rejects_bad_names() {
        let mut engine = Engine::new();
        assert!(matches!(
            engine.create_folder("", None),
            Err(EngineError::InvalidName { .. })
        ));
        assert!(matches!(
            engine.create_folder("a/b", None),
            Err(EngineError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_default_names_follow_config() {
        let config = NamingConfig::builder()
            .default_file_stem("Untitled")
            .default_file_extension("md")
            .default_folder_name("Folder")
            .build()
            .unwrap();
        let mut engine = Engine::with_config(config);

        let f1 = engine.create_default_file(None).unwrap();
        let f2 = engine.create_default_file(None).unwrap();
        let d1 = engine.create_default_folder(None).unwrap();

        assert_eq!(engine.get(f1).unwrap().name, "Untitled.md");
        assert_eq!(engine.get(f2).unwrap().name, "Untitled (1).md");
        assert_eq!(engine.get(d1).unwrap().name, "Folder");
    }

    #[test]
    fn test_rename() {
        let mut engine = Engine::new();
        let docs = engine.create_folder("Docs", None).unwrap();
        engine.create_folder("Pics", None).unwrap();

        assert_eq!(
            engine.rename(docs, "Docs"),
            Err(EngineError::NoOp),
            "renaming to the current name changes nothing"
        );
        assert_eq!(
            engine.rename(docs, "pics"),
            Err(EngineError::NameCollision {
                name: "pics".into()
            })
        );
        engine.rename(docs, "Documents").unwrap();
        assert_eq!(engine.get(docs).unwrap().name, "Documents");
    }

    #[test]
    fn test_rename_case_change_of_same_node() {
        // "Docs" -> "docs" collides only case-insensitively with itself;
        // the exclusion must let it through.
        let mut engine = Engine::new();
        let docs = engine.create_folder("Docs", None).unwrap();
        engine.rename(docs, "docs").unwrap();
        assert_eq!(engine.get(docs).unwrap().name, "docs");
    }

    #[test]
    fn test_failed_move_leaves_store_unchanged() {
        let mut engine = Engine::new();
        let outer = engine.create_folder("Outer", None).unwrap();
        let inner = engine.create_folder("Inner", Some(outer)).unwrap();

        let err = engine.move_node(outer, Some(inner)).unwrap_err();
        assert_eq!(
            err,
            EngineError::CyclicMove {
                moved: outer,
                target: inner
            }
        );
        assert_eq!(engine.get(outer).unwrap().parent_id, None);
        assert_eq!(engine.get(inner).unwrap().parent_id, Some(outer));
    }

    #[test]
    fn test_delete_cascades() {
        let mut engine = Engine::new();
        let outer = engine.create_folder("Outer", None).unwrap();
        let inner = engine.create_folder("Inner", Some(outer)).unwrap();
        let leaf = engine
            .create_file("leaf.txt", FileMeta::empty("text/plain"), Some(inner))
            .unwrap();
        let sibling = engine.create_folder("Sibling", None).unwrap();

        let mut removed = engine.delete(outer).unwrap();
        removed.sort_by_key(|id| id.0);
        assert_eq!(removed, vec![outer, inner, leaf]);

        assert!(engine.get(outer).is_none());
        assert!(engine.get(inner).is_none());
        assert!(engine.get(leaf).is_none());
        assert!(engine.get(sibling).is_some());

        assert_eq!(engine.delete(outer), Err(EngineError::NotFound { id: outer }));
    }

    #[test]
    fn test_delete_leaves_no_dangling_parents() {
        let mut engine = Engine::new();
        let outer = engine.create_folder("Outer", None).unwrap();
        engine.create_folder("Inner", Some(outer)).unwrap();
        engine.create_folder("Keep", None).unwrap();

        engine.delete(outer).unwrap();
        for node in engine.store().iter() {
            if let Some(parent) = node.parent_id {
                assert!(engine.get(parent).is_some(), "dangling parent {parent}");
            }
        }
    }

    #[test]
    fn test_breadcrumb() {
        let mut engine = Engine::new();
        let a = engine.create_folder("a", None).unwrap();
        let b = engine.create_folder("b", Some(a)).unwrap();
        let c = engine.create_folder("c", Some(b)).unwrap();

        let chain: Vec<_> = engine
            .breadcrumb(Some(c))
            .unwrap()
            .iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(chain, vec![a, b, c]);
        assert!(engine.breadcrumb(None).unwrap().is_empty());
        assert_eq!(
            engine.breadcrumb(Some(NodeId::new(99))),
            Err(EngineError::NotFound { id: NodeId::new(99) })
        );
    }
}
