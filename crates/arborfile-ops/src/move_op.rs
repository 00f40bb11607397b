//! Reparenting validation.

use arborfile_core::path::is_ancestor;
use arborfile_core::{EngineError, NodeId, NodeStore};

use crate::naming::{name_taken, NameKind};

/// Check whether moving `moved_id` under `target_parent` is legal.
///
/// Checks run in order and stop at the first failure:
///   1. the moved node exists;
///   2. the target differs from the current parent (else [`EngineError::NoOp`]);
///   3. for folders, the target is not the folder itself or anything below it
///      (else [`EngineError::CyclicMove`]);
///   4. the target, when given, exists and is a folder;
///   5. no sibling under the target collides with the moved node's name,
///      the moved node itself excluded.
///
/// This only authorizes the move; committing it is the engine's job. Keeping
/// validation free of side effects makes it independently testable and keeps
/// a failed move from touching the store at all.
pub fn validate_move(
    store: &NodeStore,
    moved_id: NodeId,
    target_parent: Option<NodeId>,
) -> Result<(), EngineError> {
    let moved = store
        .get(moved_id)
        .ok_or(EngineError::NotFound { id: moved_id })?;

    if target_parent == moved.parent_id {
        return Err(EngineError::NoOp);
    }

    if let Some(target) = target_parent {
        if moved.is_folder() && is_ancestor(store, moved_id, target) {
            return Err(EngineError::CyclicMove {
                moved: moved_id,
                target,
            });
        }

        let target_node = store
            .get(target)
            .ok_or(EngineError::TargetNotFound { id: target })?;
        if !target_node.is_folder() {
            return Err(EngineError::TargetNotFolder { id: target });
        }
    }

    if name_taken(
        store,
        &moved.name,
        NameKind::from(&moved.kind),
        target_parent,
        Some(moved_id),
    ) {
        return Err(EngineError::NameCollision {
            name: moved.name.clone(),
        });
    }

    Ok(())
}
