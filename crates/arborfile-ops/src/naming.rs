//! Sibling name uniqueness and auto-disambiguation.

use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Serialize};

use arborfile_core::{EngineError, NamingConfig, NodeId, NodeKind, NodeStore};

/// Which uniqueness namespace a name is checked against.
///
/// Folders and files never collide with each other, so every query names the
/// side it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameKind {
    /// Whole-name comparison among sibling folders.
    Folder,
    /// (stem, extension) comparison among sibling files.
    File,
}

impl From<&NodeKind> for NameKind {
    fn from(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Folder => Self::Folder,
            NodeKind::File(_) => Self::File,
        }
    }
}

/// Split a file name into (stem, extension) at the last dot.
///
/// The extension keeps its leading dot; a name without a dot has an empty
/// extension. `"archive.tar.gz"` splits as `("archive.tar", ".gz")`.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// Check whether `name` collides with a sibling under `parent_id`.
///
/// Folder rule: case-insensitive whole-name match among sibling folders.
/// File rule: case-insensitive match of both stem and extension among
/// sibling files; same stem with a different extension does not collide.
///
/// `exclude` exempts one node from the comparison (a node being renamed
/// never collides with itself). The exclusion is an explicit option so that
/// a node with id 0 is excluded like any other.
///
/// Pure query over the store's current children; nothing is mutated.
pub fn name_taken(
    store: &NodeStore,
    name: &str,
    kind: NameKind,
    parent_id: Option<NodeId>,
    exclude: Option<NodeId>,
) -> bool {
    let lowered = name.to_lowercase();
    let (stem, ext) = split_name(&lowered);

    store.children_of(parent_id).iter().any(|sibling| {
        if exclude == Some(sibling.id) {
            return false;
        }
        match kind {
            NameKind::Folder => {
                sibling.is_folder() && sibling.name.to_lowercase() == lowered
            }
            NameKind::File => {
                if !sibling.is_file() {
                    return false;
                }
                let sibling_lowered = sibling.name.to_lowercase();
                let (sibling_stem, sibling_ext) = split_name(&sibling_lowered);
                sibling_stem == stem && sibling_ext == ext
            }
        }
    })
}

/// First non-colliding variant of `requested` under `parent_id`.
///
/// Tries the requested name as-is, then `B (1)`, `B (2)`, … — with the
/// extension reattached for files (`B (1).ext`). Terminates within
/// sibling-count + 1 probes since each probe differs from the last.
pub fn next_available_name(
    store: &NodeStore,
    requested: &str,
    kind: NameKind,
    parent_id: Option<NodeId>,
) -> CompactString {
    if !name_taken(store, requested, kind, parent_id, None) {
        return requested.into();
    }

    let (stem, ext) = match kind {
        NameKind::Folder => (requested, ""),
        NameKind::File => split_name(requested),
    };

    let mut counter: u64 = 1;
    loop {
        let candidate = format_compact!("{stem} ({counter}){ext}");
        if !name_taken(store, &candidate, kind, parent_id, None) {
            return candidate;
        }
        counter += 1;
    }
}

/// Validate a candidate name independently of siblings.
///
/// Rejects names that would be unusable regardless of collisions: empty or
/// whitespace-only, over the configured length, containing a path separator
/// or NUL, padded with spaces, ending in a dot, or the reserved `.`/`..`.
pub fn validate_name(name: &str, config: &NamingConfig) -> Result<(), EngineError> {
    if name.trim().is_empty() {
        return Err(EngineError::invalid_name(name, "name cannot be empty"));
    }

    if name.len() > config.max_name_len {
        return Err(EngineError::invalid_name(name, "name is too long"));
    }

    if name.contains('/') || name.contains('\0') {
        return Err(EngineError::invalid_name(
            name,
            "name cannot contain '/' or NUL",
        ));
    }

    if name.starts_with(' ') || name.ends_with(' ') {
        return Err(EngineError::invalid_name(
            name,
            "name cannot start or end with spaces",
        ));
    }

    if name == "." || name == ".." {
        return Err(EngineError::invalid_name(
            name,
            "'.' and '..' are reserved names",
        ));
    }

    if name.ends_with('.') {
        return Err(EngineError::invalid_name(name, "name cannot end with a dot"));
    }

    Ok(())
}
