//! Depth-first reachability search over settled configurations.
//!
//! From a configuration the explorer runs one firing sweep, reports the
//! transition, and if the settled result is new, queues every perturbation
//! of it. Known settled states are never expanded twice, so the search ends
//! on any finite state space.

use std::fmt;

use crate::channel::Channel;
use crate::error::AnalysisError;
use crate::perturb::possible_next_channels;
use crate::state::{canonical_key, KnownStates, StateKey};
use crate::topology::Topology;

/// Where a transition started from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Origin {
    /// The configuration handed to the explorer by its caller.
    Init,
    /// A previously settled state.
    Settled(StateKey),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Init => f.write_str("<init>"),
            Origin::Settled(key) => fmt::Display::fmt(key, f),
        }
    }
}

/// One perturb-then-sweep step of the search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    /// Settled state the perturbation was applied to.
    pub from: Origin,
    /// Configuration right after the perturbation, before any firing.
    pub transient: StateKey,
    /// Fire count of every action in sweep order.
    pub fire_counts: Vec<u32>,
    /// Configuration after the sweep.
    pub settled: StateKey,
}

impl Transition {
    /// Total number of firings in the sweep.
    pub fn total_fires(&self) -> u32 {
        self.fire_counts.iter().sum()
    }
}

impl fmt::Display for Transition {
    /// `<from> --(<transient> / [c0, c1, ...])--> <settled>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --({} / [", self.from, self.transient)?;
        for (i, count) in self.fire_counts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{count}")?;
        }
        write!(f, "])--> {}", self.settled)
    }
}

/// Observer of the transitions an explorer reports.
pub trait TransitionSink {
    fn record(&mut self, transition: &Transition);
}

impl TransitionSink for Vec<Transition> {
    fn record(&mut self, transition: &Transition) {
        self.push(transition.clone());
    }
}

/// Discards every transition.
impl TransitionSink for () {
    fn record(&mut self, _transition: &Transition) {}
}

impl<S: TransitionSink + ?Sized> TransitionSink for &mut S {
    fn record(&mut self, transition: &Transition) {
        (**self).record(transition);
    }
}

/// Logs each transition through `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TransitionSink for TracingSink {
    fn record(&mut self, transition: &Transition) {
        tracing::debug!(%transition, "transition");
    }
}

/// Result of a full reachability run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// Settled states in the order they were first reached.
    pub states: Vec<StateKey>,
    /// Every transition in search order.
    pub transitions: Vec<Transition>,
}

impl Analysis {
    /// Number of distinct settled states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// The transition log, one line per transition.
    pub fn log(&self) -> String {
        let mut out = String::new();
        for transition in &self.transitions {
            out.push_str(&transition.to_string());
            out.push('\n');
        }
        out
    }
}

/// Memoized depth-first explorer over one topology.
///
/// Known states survive across [`explore`](Self::explore) calls, so
/// several seeds can share one visited set.
#[derive(Debug)]
pub struct Explorer<'t> {
    topology: &'t Topology,
    known: KnownStates,
}

impl<'t> Explorer<'t> {
    pub fn new(topology: &'t Topology) -> Self {
        Self {
            topology,
            known: KnownStates::new(),
        }
    }

    pub fn known_states(&self) -> &KnownStates {
        &self.known
    }

    pub fn into_known_states(self) -> KnownStates {
        self.known
    }

    /// Explore from the topology's initial configuration.
    pub fn run<S: TransitionSink>(&mut self, sink: &mut S) -> Result<(), AnalysisError> {
        self.explore(Origin::Init, self.topology.channels().to_vec(), sink)
    }

    /// Explore everything reachable from `channels`.
    ///
    /// Pending branches are kept on an explicit stack and pushed in reverse,
    /// so they pop in enumerator order and the visit order equals a
    /// recursive depth-first search.
    pub fn explore<S: TransitionSink>(
        &mut self,
        origin: Origin,
        channels: Vec<Channel>,
        sink: &mut S,
    ) -> Result<(), AnalysisError> {
        let mut pending = vec![(origin, channels)];

        while let Some((from, mut channels)) = pending.pop() {
            let transient = canonical_key(&channels);
            let fire_counts = self.topology.sweep(&mut channels)?;
            let settled = canonical_key(&channels);

            let transition = Transition {
                from,
                transient,
                fire_counts,
                settled,
            };
            tracing::trace!(
                from = %transition.from,
                transient = %transition.transient,
                fire_counts = ?transition.fire_counts,
                settled = %transition.settled,
                "sweep"
            );
            sink.record(&transition);

            let settled = transition.settled;
            if !self.known.insert(&settled) {
                continue;
            }
            if self.known.len() > self.topology.limits().max_states {
                return Err(AnalysisError::MaxStatesExceeded(self.topology.limits().max_states));
            }
            tracing::debug!(state = %settled, known = self.known.len(), "new settled state");

            let start = pending.len();
            pending.extend(
                possible_next_channels(&channels)
                    .filter(|next| canonical_key(next) != settled)
                    .map(|next| (Origin::Settled(settled.clone()), next)),
            );
            pending[start..].reverse();
        }

        Ok(())
    }
}

/// Explore a topology, reporting every transition to `sink`.
///
/// Returns the set of settled states reached.
pub fn analyze_with_sink<S: TransitionSink>(
    topology: &Topology,
    sink: &mut S,
) -> Result<KnownStates, AnalysisError> {
    let mut explorer = Explorer::new(topology);
    explorer.run(sink)?;
    Ok(explorer.into_known_states())
}

/// Explore a topology and collect the full report.
pub fn analyze(topology: &Topology) -> Result<Analysis, AnalysisError> {
    let mut transitions: Vec<Transition> = Vec::new();
    let known = analyze_with_sink(topology, &mut transitions)?;

    tracing::info!(
        states = known.len(),
        transitions = transitions.len(),
        "analysis complete"
    );

    Ok(Analysis {
        states: known.into_vec(),
        transitions,
    })
}
