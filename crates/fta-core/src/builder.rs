//! Eagerly validating builder for topologies.
//!
//! Channels are declared first, then actions over them. Every action is
//! checked against the channels declared so far, so a malformed topology is
//! rejected at the point of declaration rather than during analysis.

use crate::action::ActionFactory;
use crate::channel::Channel;
use crate::error::ConfigurationError;
use crate::limits::Limits;
use crate::topology::Topology;

/// Builder for [`Topology`].
///
/// The builder enforces:
/// - Every action index refers to a declared channel
/// - No actions over an empty channel vector
/// - Resource limits (max channels, max actions)
#[derive(Debug, Clone)]
pub struct TopologyBuilder {
    channels: Vec<Channel>,
    actions: Vec<ActionFactory>,
    limits: Limits,
}

impl Default for TopologyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyBuilder {
    /// Create a new builder with default limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create a new builder with custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            channels: Vec::new(),
            actions: Vec::new(),
            limits,
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Number of channels declared so far.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Declare a channel with its kind and initial state.
    ///
    /// Returns the channel's index in the system vector.
    pub fn channel(&mut self, channel: Channel) -> Result<usize, ConfigurationError> {
        if self.channels.len() >= self.limits.max_channels {
            return Err(ConfigurationError::MaxChannelsExceeded(self.limits.max_channels));
        }
        self.channels.push(channel);
        Ok(self.channels.len() - 1)
    }

    /// Declare an action over the channels declared so far.
    ///
    /// Returns the action's position in the sweep order.
    pub fn action(&mut self, action: ActionFactory) -> Result<usize, ConfigurationError> {
        if self.actions.len() >= self.limits.max_actions {
            return Err(ConfigurationError::MaxActionsExceeded(self.limits.max_actions));
        }
        let index = self.actions.len();
        action.validate(index, self.channels.len())?;
        self.actions.push(action);
        Ok(index)
    }

    /// Finalize and return the topology.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyTopology`] if actions were
    /// declared without any channel.
    pub fn finish(self) -> Result<Topology, ConfigurationError> {
        if self.channels.is_empty() && !self.actions.is_empty() {
            return Err(ConfigurationError::EmptyTopology {
                actions: self.actions.len(),
            });
        }
        Ok(Topology::from_parts(self.channels, self.actions, self.limits))
    }
}
