//! Caseboard Solution Verification
//!
//! Canonical serialization of an edge set, the SHA-256 digest wrapper, the
//! verifier that checks a submitted board against a level's stored digest,
//! and the level-file data model.
//!
//! The runtime verifier and the offline authoring tool both go through
//! [`canonicalize`] and [`SolutionDigest`] — one library, two call sites,
//! so a player-built closure hashes identically to the authored one.
//!
//! # Example
//!
//! ```rust
//! use caseboard_graph::{Edge, Relation};
//! use caseboard_solution::{canonicalize, SolutionDigest};
//!
//! let edges = vec![
//!     Edge::new("n2", "n1", Relation::Simultaneity),
//!     Edge::new("n1", "n3", Relation::Sequence),
//! ];
//! let canonical = canonicalize(&edges);
//! let digest = SolutionDigest::compute(canonical.as_bytes());
//! assert_eq!(digest.to_string().len(), 64);
//! ```

#![warn(missing_docs)]

pub mod canonical;
pub mod digest;
pub mod level;
pub mod verify;

// Re-exports
pub use canonical::canonicalize;
pub use digest::{DigestError, SolutionDigest};
pub use level::{
    AdminSolutions, LevelError, LevelMeta, LevelSpec, MorphSeed, NodeSeed, SolutionSpec,
};
pub use verify::{verify, Verdict};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
