//! Validated token-flow topology.

use crate::action::ActionFactory;
use crate::builder::TopologyBuilder;
use crate::channel::Channel;
use crate::error::{AnalysisError, ConfigurationError};
use crate::explore::{self, Analysis};
use crate::limits::Limits;
use crate::state::{canonical_key, StateKey};

/// A channel vector in its initial configuration plus the actions wired
/// over it.
///
/// A topology can only be obtained through [`TopologyBuilder`] (or
/// [`Topology::new`], which drives one), so every action index is known to
/// be in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    channels: Vec<Channel>,
    actions: Vec<ActionFactory>,
    limits: Limits,
}

impl Topology {
    /// Build a topology under default limits.
    pub fn new(
        channels: impl IntoIterator<Item = Channel>,
        actions: impl IntoIterator<Item = ActionFactory>,
    ) -> Result<Self, ConfigurationError> {
        Self::with_limits(channels, actions, Limits::default())
    }

    /// Build a topology under custom limits.
    pub fn with_limits(
        channels: impl IntoIterator<Item = Channel>,
        actions: impl IntoIterator<Item = ActionFactory>,
        limits: Limits,
    ) -> Result<Self, ConfigurationError> {
        let mut builder = TopologyBuilder::with_limits(limits);
        for channel in channels {
            builder.channel(channel)?;
        }
        for action in actions {
            builder.action(action)?;
        }
        builder.finish()
    }

    pub(crate) fn from_parts(channels: Vec<Channel>, actions: Vec<ActionFactory>, limits: Limits) -> Self {
        Self {
            channels,
            actions,
            limits,
        }
    }

    /// Initial channel configuration.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Action roles in sweep order.
    pub fn actions(&self) -> &[ActionFactory] {
        &self.actions
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Canonical key of the initial configuration.
    pub fn initial_key(&self) -> StateKey {
        canonical_key(&self.channels)
    }

    /// Run one firing sweep over `channels` in place.
    ///
    /// Each action is bound to the same vector and evaluated exactly once,
    /// in declaration order; an action re-enabled by a later one is not
    /// revisited. Returns the fire count of every action.
    ///
    /// Action indices were checked when the topology was built, so only the
    /// vector length is checked here.
    pub fn sweep(&self, channels: &mut [Channel]) -> Result<Vec<u32>, AnalysisError> {
        if channels.len() != self.channels.len() {
            return Err(AnalysisError::ChannelCountMismatch {
                expected: self.channels.len(),
                actual: channels.len(),
            });
        }

        let mut fire_counts = Vec::with_capacity(self.actions.len());
        for (index, role) in self.actions.iter().enumerate() {
            let fired = role
                .bind_validated(channels)
                .evaluate_with_limit(self.limits.max_fires)
                .map_err(|source| AnalysisError::DivergentAction {
                    action: index,
                    source,
                })?;
            fire_counts.push(fired);
        }
        Ok(fire_counts)
    }

    /// Explore every settled configuration reachable from the initial one.
    pub fn analyze(&self) -> Result<Analysis, AnalysisError> {
        explore::analyze(self)
    }
}
