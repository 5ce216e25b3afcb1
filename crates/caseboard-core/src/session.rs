//! Case session: one player's run through the campaign
//!
//! Wires the graph, verifier, journal, morph scheduler, and clock together.
//! All collaborators are injected; callers (the UI shell) hold the session
//! and drive it with discrete calls — there is no event loop in here.

use crate::clock::MissionClock;
use crate::error::CoreError;
use crate::journal::{Journal, JournalEntry};
use crate::morph::MorphScheduler;
use crate::progress::{validate_transition, LevelPhase, SaveStore};
use caseboard_graph::{ClueNode, Position, RelationGraph};
use caseboard_solution::{verify, LevelSpec, Verdict};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use std::time::Instant;

/// Session tuning knobs
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Last level of the campaign; solving it completes the run.
    /// `None` means the campaign is open-ended (advance forever).
    pub final_level: Option<u32>,
    /// Seed for board placement and morph delays; `None` draws one
    pub rng_seed: Option<u64>,
}

/// Result of a submission, as surfaced to the player-facing shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Solved; the campaign moves to the given level
    Advance {
        /// Next level id to load
        next_level: u32,
    },
    /// Solved the final level; the campaign is over
    CampaignComplete,
    /// The single generic failure — nothing distinguishes wrong bins
    /// from wrong edges
    Rejected,
}

/// One player's session: graph, progression, journal, effects
pub struct CaseSession {
    graph: RelationGraph,
    store: Box<dyn SaveStore>,
    journal: Journal,
    morphs: MorphScheduler,
    clock: MissionClock,
    rng: StdRng,
    config: SessionConfig,
    current: Option<LevelSpec>,
    current_level: u32,
    phase: LevelPhase,
}

impl CaseSession {
    /// Create a session, resuming saved progress if any
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn new(store: Box<dyn SaveStore>, config: SessionConfig) -> Result<Self, CoreError> {
        let current_level = store.load_progress()?.unwrap_or(1);
        let journal = Journal::from_entries(store.load_journal()?);
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            graph: RelationGraph::new(),
            store,
            journal,
            morphs: MorphScheduler::new(),
            clock: MissionClock::new(),
            rng,
            config,
            current: None,
            current_level,
            phase: LevelPhase::InProgress,
        })
    }

    // --- accessors ---

    /// The live graph (read view for renderers)
    #[must_use]
    pub fn graph(&self) -> &RelationGraph {
        &self.graph
    }

    /// Mutable graph access for player actions (edge drawing, binning)
    pub fn graph_mut(&mut self) -> &mut RelationGraph {
        &mut self.graph
    }

    /// Id of the level currently in play (or next to load)
    #[must_use]
    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    /// Current progression phase
    #[must_use]
    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    /// The solved-case journal
    #[must_use]
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The mission clock
    #[must_use]
    pub fn clock(&self) -> &MissionClock {
        &self.clock
    }

    // --- level lifecycle ---

    /// Load a level file from the conventional location and set it up
    ///
    /// # Errors
    /// [`CoreError::Level`] when the file is missing or malformed; the
    /// caller shows a degraded state and halts progression.
    pub fn begin_level(&mut self, levels_dir: &Path, id: u32, now: Instant) -> Result<(), CoreError> {
        let spec = LevelSpec::load(&levels_dir.join(LevelSpec::file_name(id)))?;
        self.setup_level(spec, now);
        Ok(())
    }

    /// Populate the board from a level definition
    ///
    /// Clears all prior state first (graph, morphs, clock), so it is safe
    /// to call at any time, including to abandon a half-played level.
    pub fn setup_level(&mut self, spec: LevelSpec, now: Instant) {
        self.graph.clear();
        self.morphs.clear();

        for seed in &spec.nodes {
            let position = seed.position.unwrap_or_else(|| {
                // Authored layouts win; everything else lands somewhere on
                // the starting board area.
                Position::new(
                    self.rng.gen_range(100.0..500.0),
                    self.rng.gen_range(100.0..500.0),
                )
            });
            let mut node = ClueNode::new(seed.id.clone(), seed.text.clone(), seed.kind.clone());
            node.position = position;
            self.graph.add_node(node);

            if let Some(morph) = &seed.morph {
                self.morphs.register(seed.id.clone(), morph);
            }
        }

        self.clock.start(spec.meta.timer_seconds, now);
        self.current_level = spec.meta.id;
        self.phase = LevelPhase::InProgress;
        tracing::info!(level = spec.meta.id, nodes = spec.nodes.len(), "level set up");
        self.current = Some(spec);
    }

    /// Rebuild the current level from its retained definition
    ///
    /// # Errors
    /// [`CoreError::NoLevelLoaded`] when nothing has been set up yet.
    pub fn reset_level(&mut self, now: Instant) -> Result<(), CoreError> {
        let spec = self.current.clone().ok_or(CoreError::NoLevelLoaded)?;
        self.setup_level(spec, now);
        Ok(())
    }

    /// Advance time-driven effects; returns `true` when the countdown
    /// expired (the level has been reset)
    ///
    /// # Errors
    /// Propagates a reset failure after timeout.
    pub fn tick(&mut self, now: Instant) -> Result<bool, CoreError> {
        self.morphs.arm_triggered(&self.graph, now, &mut self.rng);
        for (node, text) in self.morphs.take_due(now) {
            if let Err(e) = self.graph.set_node_text(&node, text) {
                // Authored morph points at an id the level never spawned.
                tracing::warn!(node = %node, error = %e, "morph target missing");
            }
        }

        if self.clock.expired(now) {
            tracing::info!(level = self.current_level, "mission clock expired");
            self.clock.stop();
            self.reset_level(now)?;
            return Ok(true);
        }
        Ok(false)
    }

    // --- submission ---

    /// Submit the current board for verification
    ///
    /// On success the journal and progress are persisted and the campaign
    /// advances (or completes after the configured final level). Every
    /// failure is the same generic [`SubmitOutcome::Rejected`]. A repeat
    /// submit on an already-solved level re-reports the prior outcome
    /// without re-verifying or re-persisting.
    ///
    /// # Errors
    /// [`CoreError::NoLevelLoaded`] without a level; store and state
    /// failures propagate.
    pub fn submit(&mut self) -> Result<SubmitOutcome, CoreError> {
        // A double-click between solving and loading the next level is
        // benign, not a state-machine violation.
        match self.phase {
            LevelPhase::Solved => {
                return Ok(SubmitOutcome::Advance {
                    next_level: self.current_level + 1,
                })
            }
            LevelPhase::Completed => return Ok(SubmitOutcome::CampaignComplete),
            LevelPhase::InProgress => {}
        }

        let spec = self.current.as_ref().ok_or(CoreError::NoLevelLoaded)?;

        if verify(&self.graph, &spec.solution) != Verdict::Solved {
            return Ok(SubmitOutcome::Rejected);
        }

        validate_transition(self.phase, LevelPhase::Solved)?;
        self.phase = LevelPhase::Solved;
        self.clock.stop();

        let journal_text = spec
            .meta
            .journal
            .clone()
            .unwrap_or_else(|| "Case resolved.".to_string());
        self.journal.record(JournalEntry::now(
            self.current_level,
            spec.meta.title.clone(),
            journal_text,
        ));
        self.store.save_journal(self.journal.entries())?;

        let next = self.current_level + 1;
        self.store.save_progress(next)?;

        if self
            .config
            .final_level
            .is_some_and(|last| self.current_level >= last)
        {
            validate_transition(self.phase, LevelPhase::Completed)?;
            self.phase = LevelPhase::Completed;
            tracing::info!("campaign complete");
            return Ok(SubmitOutcome::CampaignComplete);
        }

        tracing::info!(next_level = next, "level solved");
        Ok(SubmitOutcome::Advance { next_level: next })
    }

    /// Debug facade: overwrite the board's edges with the authored solution
    ///
    /// Compiled only with the `dev-tools` feature; production builds have
    /// no path to the plaintext answers.
    #[cfg(feature = "dev-tools")]
    pub fn reveal_solution(
        &mut self,
        admin: &caseboard_solution::AdminSolutions,
    ) -> Result<(), CoreError> {
        let edges = admin
            .edges_for(self.current_level)
            .cloned()
            .unwrap_or_default();

        let existing: Vec<_> = self
            .graph
            .edges()
            .iter()
            .map(|e| (e.source.clone(), e.target.clone()))
            .collect();
        for (source, target) in existing {
            self.graph.remove_edge(&source, &target);
        }
        for edge in edges {
            self.graph.add_edge(edge.source, edge.target, edge.relation);
        }
        tracing::warn!(level = self.current_level, "dev-tools: solution revealed");
        Ok(())
    }
}

impl std::fmt::Debug for CaseSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseSession")
            .field("current_level", &self.current_level)
            .field("phase", &self.phase)
            .field("graph", &self.graph)
            .finish_non_exhaustive()
    }
}
