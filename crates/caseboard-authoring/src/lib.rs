//! Offline solution authoring
//!
//! Build-time processing of the plaintext solution map: closure expansion
//! of authored edge sets, and injection of canonical digests into the
//! shipped level files. Everything funnels through the same
//! `caseboard-graph` closure and `caseboard-solution` canonicalizer the
//! runtime uses — there is exactly one implementation of each, so an
//! authored digest and a player-built digest can never drift apart.

#![warn(missing_docs)]

use caseboard_graph::close;
use caseboard_solution::{canonicalize, AdminSolutions, LevelError, SolutionDigest};
use std::path::{Path, PathBuf};

/// Errors from the authoring pipeline
#[derive(Debug, thiserror::Error)]
pub enum AuthoringError {
    /// Admin solutions or level data failed to load
    #[error(transparent)]
    Level(#[from] LevelError),

    /// Reading a level file failed
    #[error("cannot read {path}: {source}")]
    Read {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Writing a processed file failed
    #[error("cannot write {path}: {source}")]
    Write {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Reading the levels directory failed
    #[error("cannot read levels directory {path}: {source}")]
    ReadDir {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A level file is structurally unusable for digest injection
    #[error("level file {path} has no solution object")]
    NoSolutionBlock {
        /// Offending path
        path: PathBuf,
    },

    /// JSON processing failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-level closure growth from an expansion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Stringified level id (the admin file's key)
    pub level: String,
    /// Edge count before closure
    pub before: usize,
    /// Edge count after closure
    pub after: usize,
}

/// In-place closure expansion of the admin solutions file
///
/// Each authored edge set is replaced by its simultaneity closure; sets
/// that were already closed are left untouched. Returns one record per
/// level that grew.
///
/// # Errors
/// Load, parse, or write failures.
pub fn expand_solutions(solutions_path: &Path) -> Result<Vec<Expansion>, AuthoringError> {
    let mut solutions = AdminSolutions::load(solutions_path)?;
    let mut expanded = Vec::new();

    for (level, edges) in &mut solutions.0 {
        let closed = close(edges);
        if closed.len() > edges.len() {
            tracing::info!(level = %level, before = edges.len(), after = closed.len(), "expanded");
            expanded.push(Expansion {
                level: level.clone(),
                before: edges.len(),
                after: closed.len(),
            });
            *edges = closed;
        }
    }

    let raw = serde_json::to_string_pretty(&solutions)?;
    std::fs::write(solutions_path, raw).map_err(|source| AuthoringError::Write {
        path: solutions_path.to_path_buf(),
        source,
    })?;
    Ok(expanded)
}

/// Result of a digest-injection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RehashReport {
    /// Levels whose stored digest was rewritten
    pub updated: Vec<u32>,
    /// Levels already carrying the correct digest
    pub unchanged: Vec<u32>,
    /// Level files with no entry in the admin solutions map
    pub skipped: Vec<u32>,
}

/// Inject canonical digests into every level file in a directory
///
/// For each `levelN.json` with an authored solution: batch-close the
/// edges, canonicalize, hash, and write the digest into `solution.hash`.
/// Any plaintext `solution.edges` that snuck into the level file is
/// stripped — the shipped file never carries the answer. Unrelated fields
/// are preserved verbatim.
///
/// # Errors
/// Directory, parse, or write failures; a level file without a `solution`
/// object is refused.
pub fn rehash_levels(
    levels_dir: &Path,
    solutions_path: &Path,
) -> Result<RehashReport, AuthoringError> {
    let solutions = AdminSolutions::load(solutions_path)?;
    let mut report = RehashReport::default();

    let mut level_ids: Vec<u32> = Vec::new();
    let entries = std::fs::read_dir(levels_dir).map_err(|source| AuthoringError::ReadDir {
        path: levels_dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| AuthoringError::ReadDir {
            path: levels_dir.to_path_buf(),
            source,
        })?;
        if let Some(id) = parse_level_file_name(&entry.file_name().to_string_lossy()) {
            level_ids.push(id);
        }
    }
    level_ids.sort_unstable();

    for id in level_ids {
        let Some(edges) = solutions.edges_for(id) else {
            tracing::debug!(level = id, "no authored solution; skipping");
            report.skipped.push(id);
            continue;
        };

        let digest = SolutionDigest::compute(canonicalize(&close(edges)).as_bytes());
        let path = levels_dir.join(format!("level{id}.json"));
        if inject_digest(&path, &digest)? {
            tracing::info!(level = id, digest = %digest.short(), "digest updated");
            report.updated.push(id);
        } else {
            report.unchanged.push(id);
        }
    }

    Ok(report)
}

/// `level12.json` -> `Some(12)`
fn parse_level_file_name(name: &str) -> Option<u32> {
    name.strip_prefix("level")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

/// Rewrite `solution.hash` in place; returns whether the file changed
///
/// Works on the raw JSON value so fields this tool does not know about
/// survive the rewrite.
fn inject_digest(path: &Path, digest: &SolutionDigest) -> Result<bool, AuthoringError> {
    let raw = std::fs::read_to_string(path).map_err(|source| AuthoringError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut value: serde_json::Value = serde_json::from_str(&raw)?;

    let solution = value
        .get_mut("solution")
        .and_then(|s| s.as_object_mut())
        .ok_or_else(|| AuthoringError::NoSolutionBlock {
            path: path.to_path_buf(),
        })?;

    let new_hash = serde_json::Value::String(digest.to_string());
    let had_plaintext = solution.remove("edges").is_some();
    let changed = solution.get("hash") != Some(&new_hash) || had_plaintext;
    if changed {
        solution.insert("hash".to_string(), new_hash);
        let raw = serde_json::to_string_pretty(&value)?;
        std::fs::write(path, raw).map_err(|source| AuthoringError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_file_names_parse() {
        assert_eq!(parse_level_file_name("level7.json"), Some(7));
        assert_eq!(parse_level_file_name("level12.json"), Some(12));
        assert_eq!(parse_level_file_name("level.json"), None);
        assert_eq!(parse_level_file_name("notes.md"), None);
        assert_eq!(parse_level_file_name("levelX.json"), None);
    }
}
