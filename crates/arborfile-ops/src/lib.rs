//! Validators and mutation engine for the arborfile namespace tree.
//!
//! This crate layers the operational surface over `arborfile-core`: sibling
//! name uniqueness, move (reparent) validation, and the atomic mutation
//! engine the upstream UI/API layer calls into.

mod engine;
mod move_op;
mod naming;

pub use engine::Engine;
pub use move_op::validate_move;
pub use naming::{name_taken, next_available_name, split_name, validate_name, NameKind};
