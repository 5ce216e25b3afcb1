//! Level-file data model
//!
//! The on-disk format the game ships: level metadata, node seeds, and the
//! solution block carrying the must-archive list and the digest — never
//! plaintext edges. The authoring-only `admin-solutions.json` mapping lives
//! here too; it is a build-time input and is never bundled with the game.

use crate::digest::SolutionDigest;
use caseboard_graph::{Edge, NodeId, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Level metadata block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelMeta {
    /// Numeric level id; progression advances through consecutive ids
    pub id: u32,
    /// Display title
    pub title: String,
    /// Mission briefing shown in the clue panel
    pub description: String,
    /// Countdown length; absent means untimed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_seconds: Option<u64>,
    /// Visual glitch intensity hint for the renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glitch_intensity: Option<f64>,
    /// Journal text recorded when the level is solved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
}

/// Delayed text-rewrite effect attached to a node seed
///
/// Times are milliseconds; the actual delay is sampled uniformly from
/// `[min_time, max_time]` once the node first gains a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MorphSeed {
    /// Replacement display text
    pub text: String,
    /// Lower bound of the trigger delay (default 60s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_time: Option<u64>,
    /// Upper bound of the trigger delay (default 120s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_time: Option<u64>,
}

/// One node as authored in the level file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSeed {
    /// Stable node id
    pub id: NodeId,
    /// Initial display text
    pub text: String,
    /// Free-form type tag
    #[serde(rename = "type")]
    pub kind: String,
    /// Authored position; absent means the board places it randomly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Optional morph effect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morph: Option<MorphSeed>,
}

/// The solution block: archive requirements plus the target digest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionSpec {
    /// Node ids that must be archived for the solution to count
    #[serde(default)]
    pub must_bin: Vec<NodeId>,
    /// SHA-256 digest of the canonical closed edge set
    pub hash: SolutionDigest,
}

/// A complete level definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Metadata block
    pub meta: LevelMeta,
    /// Node seeds spawned on load
    pub nodes: Vec<NodeSeed>,
    /// Verification data
    pub solution: SolutionSpec,
}

impl LevelSpec {
    /// Load and parse a level file
    ///
    /// # Errors
    /// [`LevelError::Io`] when the file cannot be read,
    /// [`LevelError::Malformed`] when the JSON does not parse (this covers a
    /// missing or malformed `solution.hash` — the digest is a required,
    /// typed field).
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let spec: LevelSpec = serde_json::from_str(&raw).map_err(|source| LevelError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(level = spec.meta.id, nodes = spec.nodes.len(), "level loaded");
        Ok(spec)
    }

    /// Conventional file name for a level id (`level7.json`)
    #[must_use]
    pub fn file_name(id: u32) -> String {
        format!("level{id}.json")
    }
}

/// Authoring-time map from level id to plaintext solution edges
///
/// Keys are stringified level ids, matching the historical file layout.
/// `BTreeMap` keeps serialization order stable across rewrites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminSolutions(pub BTreeMap<String, Vec<Edge>>);

impl AdminSolutions {
    /// Load the admin solutions file
    ///
    /// # Errors
    /// Same taxonomy as [`LevelSpec::load`].
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| LevelError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Solution edges for a level id, if authored
    #[must_use]
    pub fn edges_for(&self, level_id: u32) -> Option<&Vec<Edge>> {
        self.0.get(&level_id.to_string())
    }
}

/// Errors loading external level data
///
/// Non-fatal by design: the caller surfaces a degraded state and halts
/// progression instead of crashing.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File contents did not parse as a valid definition
    #[error("malformed level data in {path}: {source}")]
    Malformed {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}
