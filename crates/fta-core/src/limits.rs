//! Resource limits for topology construction and exploration.

/// Resource limits for a reachability run.
///
/// The state space grows exponentially with the number of channels, and a
/// badly wired feedback loop can keep an action re-arming itself. These
/// ceilings turn both into reported errors instead of a hang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of channels in a topology.
    pub max_channels: usize,
    /// Maximum number of actions in a topology.
    pub max_actions: usize,
    /// Maximum firing passes a single `evaluate` call may take.
    pub max_fires: u32,
    /// Maximum number of distinct settled states one run may discover.
    pub max_states: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_channels: 64,
            max_actions: 256,
            max_fires: 1024,
            max_states: 1 << 20,
        }
    }
}

impl Limits {
    /// Create limits with custom values.
    pub fn new(max_channels: usize, max_actions: usize, max_fires: u32, max_states: usize) -> Self {
        Self {
            max_channels,
            max_actions,
            max_fires,
            max_states,
        }
    }

    /// Permissive limits for large offline runs.
    pub fn permissive() -> Self {
        Self {
            max_channels: 128,
            max_actions: 4096,
            max_fires: 1 << 16,
            max_states: 1 << 26,
        }
    }

    /// Strict limits for interactive use.
    pub fn strict() -> Self {
        Self {
            max_channels: 24,
            max_actions: 64,
            max_fires: 64,
            max_states: 1 << 16,
        }
    }
}
