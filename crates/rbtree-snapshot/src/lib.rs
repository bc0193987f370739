//! Snapshot export for [`rbtree_core`] trees.
//!
//! A snapshot is an immutable, flattened description of a tree at one
//! instant: one entry per node (key, value, color, and the *keys* of its
//! parent and children) plus a redundant parent→child edge list, both in
//! level order.  Structure is recorded by key reference rather than by
//! index or address, so snapshots survive serialization and can be
//! restored into a fresh arena.
//!
//! The exporter only reads the engine's public accessors
//! ([`RbTree::arena`](rbtree_core::RbTree::arena),
//! [`RbTree::root_index`](rbtree_core::RbTree::root_index)); the engine
//! knows nothing about this crate.
//!
//! ```
//! use rbtree_core::RbTree;
//! use rbtree_snapshot::Exporter;
//!
//! let mut tree = RbTree::new();
//! for key in [2, 1, 3] {
//!     tree.insert(key, key).unwrap();
//! }
//! let mut exporter = Exporter::new();
//! let snapshot = exporter.export(&tree);
//! assert_eq!(snapshot.n, 3);
//! assert_eq!(snapshot.links.len(), 2);
//! ```

pub mod error;
pub mod export;
pub mod json;
pub mod restore;
pub mod types;

pub use error::SnapshotError;
pub use export::{export, Exporter};
pub use json::{from_json, to_json};
pub use restore::restore;
pub use types::{KeyRef, Link, Snapshot, SnapshotNode};
