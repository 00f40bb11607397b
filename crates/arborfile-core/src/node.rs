//! File and folder node types.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content metadata carried by file nodes.
///
/// Opaque to the engine: the content-store collaborator that actually holds
/// the bytes assigns and interprets these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// MIME type or similar label.
    pub content_type: CompactString,
    /// Size in bytes as reported by the content store.
    pub size_bytes: u64,
    /// Opaque handle into the content store.
    pub storage_path: CompactString,
}

impl FileMeta {
    /// Create new file metadata.
    pub fn new(
        content_type: impl Into<CompactString>,
        size_bytes: u64,
        storage_path: impl Into<CompactString>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            size_bytes,
            storage_path: storage_path.into(),
        }
    }

    /// Metadata for an empty, not-yet-uploaded file.
    pub fn empty(content_type: impl Into<CompactString>) -> Self {
        Self::new(content_type, 0, "")
    }
}

/// Type of namespace node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Folder; may have children.
    Folder,
    /// File; leaf node carrying content metadata.
    File(FileMeta),
}

impl NodeKind {
    /// Check if this is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, NodeKind::Folder)
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File(_))
    }
}

/// A single file or folder in the tree.
///
/// Nodes reference their parent by id rather than owning children; the
/// [`NodeStore`](crate::NodeStore) arena owns every node and maintains the
/// parent/child index. Id edges cannot be prevented from forming cycles by
/// shape alone, so the move validator enforces the forest invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, immutable after creation.
    pub id: NodeId,

    /// Display name (not a path). Unique among siblings of the same kind.
    pub name: CompactString,

    /// Node type and associated metadata.
    pub kind: NodeKind,

    /// Parent folder id; `None` means the node sits at the root.
    pub parent_id: Option<NodeId>,

    /// When the node was created.
    pub created_at: DateTime<Utc>,

    /// Last rename or move.
    pub modified_at: DateTime<Utc>,
}

impl Node {
    /// Create a new folder node.
    pub fn new_folder(
        id: NodeId,
        name: impl Into<CompactString>,
        parent_id: Option<NodeId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Folder,
            parent_id,
            created_at: now,
            modified_at: now,
        }
    }

    /// Create a new file node.
    pub fn new_file(
        id: NodeId,
        name: impl Into<CompactString>,
        meta: FileMeta,
        parent_id: Option<NodeId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            kind: NodeKind::File(meta),
            parent_id,
            created_at: now,
            modified_at: now,
        }
    }

    /// Check if this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }
}
