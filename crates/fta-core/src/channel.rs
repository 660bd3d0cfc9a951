//! Channel vocabulary for token-flow circuits.
//!
//! A channel models one wire carrying at most one in-flight token. Every
//! channel cycles Free → Charging → Ready → Free; unbound channels let the
//! environment drive the half of the cycle the circuit does not own.

use std::fmt;

/// Where a channel's two ends live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ChannelKind {
    /// Both ends are internal to the modeled system.
    Bound,
    /// The environment is the source and supplies fresh tokens.
    UnboundInput,
    /// The environment is the sink and consumes delivered tokens.
    UnboundOutput,
}

/// Token state of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ChannelState {
    /// No token on the wire.
    Free,
    /// A token is in flight.
    Charging,
    /// A token has arrived and may be consumed.
    Ready,
}

impl ChannelState {
    /// Single-letter form used in canonical keys.
    #[inline]
    pub fn letter(self) -> char {
        match self {
            ChannelState::Free => 'F',
            ChannelState::Charging => 'C',
            ChannelState::Ready => 'R',
        }
    }
}

/// A wire or port in the system vector.
///
/// `Channel` is a plain value. Successor states are produced either in
/// place ([`charge`](Self::charge), [`discharge`](Self::discharge)) during
/// a firing sweep, or as a fresh value ([`advance`](Self::advance)) when
/// the perturbation enumerator derives a new branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel {
    kind: ChannelKind,
    state: ChannelState,
}

impl Channel {
    /// Create a channel of the given kind and state.
    pub fn new(kind: ChannelKind, state: ChannelState) -> Self {
        Self { kind, state }
    }

    /// A free bound channel.
    pub fn bound() -> Self {
        Self::new(ChannelKind::Bound, ChannelState::Free)
    }

    /// A free channel fed by the environment.
    pub fn unbound_input() -> Self {
        Self::new(ChannelKind::UnboundInput, ChannelState::Free)
    }

    /// A free channel drained by the environment.
    pub fn unbound_output() -> Self {
        Self::new(ChannelKind::UnboundOutput, ChannelState::Free)
    }

    /// Same kind, different state.
    pub fn with_state(self, state: ChannelState) -> Self {
        Self { state, ..self }
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Canonical symbol for this channel.
    ///
    /// Bound channels emit the bare state letter, unbound inputs append `+`
    /// and unbound outputs append `-`, so channels that differ only in kind
    /// never share a symbol.
    pub fn symbol(&self) -> &'static str {
        use ChannelKind::*;
        use ChannelState::*;

        match (self.kind, self.state) {
            (Bound, Free) => "F",
            (Bound, Charging) => "C",
            (Bound, Ready) => "R",
            (UnboundInput, Free) => "F+",
            (UnboundInput, Charging) => "C+",
            (UnboundInput, Ready) => "R+",
            (UnboundOutput, Free) => "F-",
            (UnboundOutput, Charging) => "C-",
            (UnboundOutput, Ready) => "R-",
        }
    }

    /// Free → Charging. No-op in any other state.
    #[inline]
    pub fn charge(&mut self) {
        if self.state == ChannelState::Free {
            self.state = ChannelState::Charging;
        }
    }

    /// Ready → Free. No-op in any other state.
    #[inline]
    pub fn discharge(&mut self) {
        if self.state == ChannelState::Ready {
            self.state = ChannelState::Free;
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.state == ChannelState::Free
    }

    #[inline]
    pub fn is_charging(&self) -> bool {
        self.state == ChannelState::Charging
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state == ChannelState::Ready
    }

    /// Whether the channel is due to move without any action firing.
    ///
    /// Charging channels always settle to Ready. The environment also
    /// supplies a token to a free unbound input and consumes the token on a
    /// ready unbound output.
    pub fn is_unstable(&self) -> bool {
        match (self.kind, self.state) {
            (_, ChannelState::Charging) => true,
            (ChannelKind::UnboundInput, ChannelState::Free) => true,
            (ChannelKind::UnboundOutput, ChannelState::Ready) => true,
            _ => false,
        }
    }

    /// The value this channel moves to when it takes its unstable step.
    ///
    /// Returns an identical copy when the channel is stable.
    pub fn advance(&self) -> Channel {
        let state = match (self.kind, self.state) {
            (_, ChannelState::Charging) => ChannelState::Ready,
            (ChannelKind::UnboundInput, ChannelState::Free) => ChannelState::Charging,
            (ChannelKind::UnboundOutput, ChannelState::Ready) => ChannelState::Free,
            (_, state) => state,
        };
        self.with_state(state)
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::bound()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
