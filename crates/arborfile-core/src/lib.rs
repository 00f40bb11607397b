//! Core types for the arborfile namespace engine.
//!
//! This crate provides the fundamental data structures shared across the
//! arborfile workspace: file/folder nodes, the id-indexed node store,
//! ancestor-chain resolution, and naming configuration.

mod config;
mod error;
mod node;
pub mod path;
mod store;

pub use config::{NamingConfig, NamingConfigBuilder};
pub use error::EngineError;
pub use node::{FileMeta, Node, NodeId, NodeKind};
pub use store::NodeStore;
