//! Canonical edge-set serialization
//!
//! Maps an edge list to a single deterministic string: identical edge sets
//! serialize identically regardless of insertion order, and regardless of
//! which direction the closure happened to store a simultaneity edge in.

use caseboard_graph::{Edge, Relation};
use serde::Serialize;

/// Compact wire record: source, target, relation name
///
/// Field order is fixed (s, t, y) and serialization is compact JSON, so the
/// output has no whitespace or ordering variance.
#[derive(Serialize)]
struct CanonicalRecord<'a> {
    s: &'a str,
    t: &'a str,
    y: &'static str,
}

/// Serialize an edge set into its canonical string form
///
/// Simultaneity edges are direction-normalized first (lexicographically
/// smaller id becomes the source) — the closure stores them in whatever
/// direction propagation reached them, and two runs may disagree, so the
/// raw direction must not leak into the serialization. Directional
/// relations keep their stored direction. Records are then sorted by
/// (source, target, relation) with ordinal string comparison.
#[must_use]
pub fn canonicalize(edges: &[Edge]) -> String {
    let mut records: Vec<CanonicalRecord<'_>> = edges
        .iter()
        .map(|edge| {
            let (s, t) = normalized_endpoints(edge);
            CanonicalRecord {
                s,
                t,
                y: edge.relation.as_str(),
            }
        })
        .collect();

    records.sort_by(|a, b| a.s.cmp(b.s).then(a.t.cmp(b.t)).then(a.y.cmp(b.y)));

    // Serialization of these borrowed records cannot fail.
    serde_json::to_string(&records).unwrap_or_default()
}

fn normalized_endpoints(edge: &Edge) -> (&str, &str) {
    let (s, t) = (edge.source.as_str(), edge.target.as_str());
    if edge.relation == Relation::Simultaneity && t < s {
        (t, s)
    } else {
        (s, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn output_is_compact_sorted_json() {
        let edges = vec![
            Edge::new("b", "a", Relation::Consequence),
            Edge::new("a", "b", Relation::Sequence),
        ];
        assert_eq!(
            canonicalize(&edges),
            r#"[{"s":"a","t":"b","y":"sequence"},{"s":"b","t":"a","y":"consequence"}]"#
        );
    }

    #[test]
    fn input_order_does_not_matter() {
        let forward = vec![
            Edge::new("a", "b", Relation::Sequence),
            Edge::new("b", "a", Relation::Consequence),
        ];
        let reversed: Vec<Edge> = forward.iter().rev().cloned().collect();
        assert_eq!(canonicalize(&forward), canonicalize(&reversed));
    }

    #[test]
    fn simultaneity_direction_is_normalized() {
        let stored_one_way = vec![Edge::new("b", "a", Relation::Simultaneity)];
        let stored_other_way = vec![Edge::new("a", "b", Relation::Simultaneity)];
        assert_eq!(canonicalize(&stored_one_way), canonicalize(&stored_other_way));
        assert_eq!(
            canonicalize(&stored_one_way),
            r#"[{"s":"a","t":"b","y":"simultaneity"}]"#
        );
    }

    #[test]
    fn directional_relations_keep_direction() {
        let forward = vec![Edge::new("a", "b", Relation::Sequence)];
        let backward = vec![Edge::new("b", "a", Relation::Sequence)];
        assert_ne!(canonicalize(&forward), canonicalize(&backward));
    }

    #[test]
    fn differing_sets_differ() {
        let one = vec![Edge::new("a", "b", Relation::Sequence)];
        let two = vec![
            Edge::new("a", "b", Relation::Sequence),
            Edge::new("b", "c", Relation::Consequence),
        ];
        assert_ne!(canonicalize(&one), canonicalize(&two));
    }

    #[test]
    fn empty_set_is_empty_array() {
        assert_eq!(canonicalize(&[]), "[]");
    }
}
