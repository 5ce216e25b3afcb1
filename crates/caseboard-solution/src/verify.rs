//! Solution verification
//!
//! Checks a submitted board against a level's solution spec without ever
//! seeing the plaintext answer: archive requirements first, then a digest
//! comparison of the canonical edge string. Both failure modes collapse
//! into one generic verdict so the player cannot tell wrong bins from
//! wrong edges.

use crate::canonical::canonicalize;
use crate::digest::SolutionDigest;
use crate::level::SolutionSpec;
use caseboard_graph::RelationGraph;

/// Outcome of a submission
///
/// Deliberately two-valued: every failure — missing archive, surplus
/// archive requirement, digest mismatch — is the same
/// [`Verdict::InsufficientData`], byte-identical to the caller. Nothing in
/// the verdict reveals which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The board matches the authored solution
    Solved,
    /// The generic failure signal
    InsufficientData,
}

impl Verdict {
    /// Whether the submission passed
    #[inline]
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Verdict::Solved)
    }
}

/// Verify a submitted board against the level's solution spec
///
/// 1. Every id in `must_bin` has to be in the archive; any miss fails.
/// 2. The current edge list is canonicalized and SHA-256 hashed; the digest
///    must equal the stored one exactly.
///
/// Infallible by design: malformed specs cannot reach this point (the
/// digest is a typed, required field of the level file).
#[must_use]
pub fn verify(graph: &RelationGraph, spec: &SolutionSpec) -> Verdict {
    for required in &spec.must_bin {
        if !graph.is_archived(required) {
            tracing::debug!(node = %required, "submission rejected");
            return Verdict::InsufficientData;
        }
    }

    let submitted = SolutionDigest::compute(canonicalize(graph.edges()).as_bytes());
    if submitted == spec.hash {
        tracing::info!(digest = %submitted.short(), "submission accepted");
        Verdict::Solved
    } else {
        tracing::debug!(digest = %submitted.short(), "submission rejected");
        Verdict::InsufficientData
    }
}
