//! Error types for topology construction and reachability analysis.

use std::fmt;

use thiserror::Error;

/// Which index list of an action a channel reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Input,
    Inhibitor,
    Output,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Input => "input",
            Role::Inhibitor => "inhibitor",
            Role::Output => "output",
        })
    }
}

/// Errors that can occur while declaring a topology.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// An action refers to a channel that does not exist.
    #[error("action {action} {role} index {index} out of range for {channels} channels")]
    IndexOutOfRange {
        action: usize,
        role: Role,
        index: usize,
        channels: usize,
    },

    /// Actions were declared over an empty channel vector.
    #[error("{actions} actions declared over zero channels")]
    EmptyTopology { actions: usize },

    /// Maximum channel count exceeded.
    #[error("maximum channels exceeded ({0})")]
    MaxChannelsExceeded(usize),

    /// Maximum action count exceeded.
    #[error("maximum actions exceeded ({0})")]
    MaxActionsExceeded(usize),
}

/// An action kept re-arming itself past the firing ceiling.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("action did not settle within {limit} firing passes")]
pub struct DivergentActionError {
    pub limit: u32,
}

/// Errors that can occur during a sweep or a reachability run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A bound action failed to settle.
    #[error("action {action} diverged")]
    DivergentAction {
        action: usize,
        #[source]
        source: DivergentActionError,
    },

    /// A channel vector does not match the topology it is swept against.
    #[error("expected {expected} channels, got {actual}")]
    ChannelCountMismatch { expected: usize, actual: usize },

    /// Maximum settled state count exceeded.
    #[error("maximum settled states exceeded ({0})")]
    MaxStatesExceeded(usize),

    /// The topology itself is malformed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
