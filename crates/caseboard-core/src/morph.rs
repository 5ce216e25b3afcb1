//! Clue morphing (the interference effect)
//!
//! A registered node's text is silently rewritten some random delay after
//! the node first gains a connection. Each morph triggers at most once per
//! level; level setup clears all morph state. The session drives the
//! scheduler from its tick — there are no background timers in the core.

use caseboard_graph::{NodeId, RelationGraph};
use caseboard_solution::MorphSeed;
use indexmap::{IndexMap, IndexSet};
use rand::Rng;
use std::time::{Duration, Instant};

const DEFAULT_MIN_MS: u64 = 60_000;
const DEFAULT_MAX_MS: u64 = 120_000;

#[derive(Debug, Clone)]
struct MorphConfig {
    text: String,
    min_ms: u64,
    max_ms: u64,
}

/// Per-level morph state: registered, armed, and completed effects
#[derive(Debug, Default)]
pub struct MorphScheduler {
    registered: IndexMap<NodeId, MorphConfig>,
    armed: IndexMap<NodeId, Instant>,
    completed: IndexSet<NodeId>,
}

impl MorphScheduler {
    /// Create an empty scheduler
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a morph for a node (called during level setup)
    pub fn register(&mut self, node: NodeId, seed: &MorphSeed) {
        self.registered.insert(
            node,
            MorphConfig {
                text: seed.text.clone(),
                min_ms: seed.min_time.unwrap_or(DEFAULT_MIN_MS),
                max_ms: seed.max_time.unwrap_or(DEFAULT_MAX_MS),
            },
        );
    }

    /// Drop all state (new level load)
    pub fn clear(&mut self) {
        self.registered.clear();
        self.armed.clear();
        self.completed.clear();
    }

    /// Arm timers for registered nodes that have gained a connection
    pub fn arm_triggered(&mut self, graph: &RelationGraph, now: Instant, rng: &mut impl Rng) {
        for (node, config) in &self.registered {
            if self.armed.contains_key(node) || self.completed.contains(node) {
                continue;
            }
            if graph.edges().iter().any(|e| e.touches(node)) {
                let delay_ms = if config.min_ms >= config.max_ms {
                    config.min_ms
                } else {
                    rng.gen_range(config.min_ms..=config.max_ms)
                };
                tracing::debug!(node = %node, delay_ms, "morph timer armed");
                self.armed
                    .insert(node.clone(), now + Duration::from_millis(delay_ms));
            }
        }
    }

    /// Collect morphs whose deadline has passed, marking them completed
    ///
    /// Returns (node, replacement text) pairs for the session to apply
    /// through the graph, so the rewrite notification fires normally.
    pub fn take_due(&mut self, now: Instant) -> Vec<(NodeId, String)> {
        let due: Vec<NodeId> = self
            .armed
            .iter()
            .filter(|(_, deadline)| now >= **deadline)
            .map(|(node, _)| node.clone())
            .collect();

        due.into_iter()
            .filter_map(|node| {
                self.armed.shift_remove(&node);
                self.completed.insert(node.clone());
                let text = self.registered.get(&node)?.text.clone();
                tracing::debug!(node = %node, "morph executed");
                Some((node, text))
            })
            .collect()
    }

    /// Number of registered morphs
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseboard_graph::{ClueNode, Relation};
    use rand::rngs::mock::StepRng;

    fn seed(text: &str, min: u64, max: u64) -> MorphSeed {
        MorphSeed {
            text: text.to_string(),
            min_time: Some(min),
            max_time: Some(max),
        }
    }

    fn board() -> RelationGraph {
        let mut g = RelationGraph::new();
        g.add_node(ClueNode::new("n1", "original", "testimony"));
        g.add_node(ClueNode::new("n2", "other", "evidence"));
        g
    }

    #[test]
    fn unconnected_node_never_arms() {
        let mut morphs = MorphScheduler::new();
        morphs.register("n1".into(), &seed("rewritten", 10, 10));
        let g = board();

        let now = Instant::now();
        morphs.arm_triggered(&g, now, &mut StepRng::new(0, 1));
        assert!(morphs.take_due(now + Duration::from_secs(60)).is_empty());
    }

    #[test]
    fn connection_arms_and_deadline_fires_once() {
        let mut morphs = MorphScheduler::new();
        morphs.register("n1".into(), &seed("rewritten", 1000, 1000));

        let mut g = board();
        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);

        let now = Instant::now();
        let mut rng = StepRng::new(0, 1);
        morphs.arm_triggered(&g, now, &mut rng);

        assert!(morphs.take_due(now + Duration::from_millis(999)).is_empty());
        let fired = morphs.take_due(now + Duration::from_millis(1000));
        assert_eq!(fired, vec![("n1".into(), "rewritten".to_string())]);

        // One-shot: re-arming and polling again yields nothing.
        morphs.arm_triggered(&g, now, &mut rng);
        assert!(morphs.take_due(now + Duration::from_secs(600)).is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut morphs = MorphScheduler::new();
        morphs.register("n1".into(), &seed("rewritten", 0, 0));
        let mut g = board();
        g.add_edge("n1".into(), "n2".into(), Relation::Sequence);

        let now = Instant::now();
        morphs.arm_triggered(&g, now, &mut StepRng::new(0, 1));
        morphs.clear();
        assert_eq!(morphs.registered_count(), 0);
        assert!(morphs.take_due(now).is_empty());
    }
}
