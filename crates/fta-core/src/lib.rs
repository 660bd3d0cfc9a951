//! Free Token Analysis
//!
//! Exhaustive reachability analysis over token-flow circuits of channels and
//! firing actions.
//!
//! # Overview
//!
//! Each [`Channel`] models a wire carrying at most one token through a
//! Free → Charging → Ready → Free cycle. Each [`ActionFactory`] models a
//! gate: it consumes Ready tokens on its inputs, is blocked while any of its
//! inhibitors is Ready, and charges its outputs. Starting from an initial
//! configuration, the [`Explorer`] discovers every *settled* configuration
//! reachable by letting any subset of unstable channels take their
//! spontaneous step and then running one firing sweep.
//!
//! - **Closed vocabulary** — channel kinds and states are enums
//! - **Index-based wiring** — actions refer to channels by position
//! - **Memoized search** — each settled state is expanded once
//! - **Deterministic** — same topology, same transition log, byte for byte
//!
//! # Example
//!
//! ```
//! use fta_core::{ActionFactory, Channel, Topology};
//!
//! // A gate that re-arms itself through an inhibitor it also drives.
//! let topology = Topology::new(
//!     [Channel::bound(), Channel::unbound_output()],
//!     [ActionFactory::new([], [0], [0, 1])],
//! )
//! .unwrap();
//!
//! let analysis = topology.analyze().unwrap();
//! assert_eq!(analysis.state_count(), 6);
//! assert_eq!(
//!     analysis.transitions[0].to_string(),
//!     "<init> --(FF- / [1])--> CC-"
//! );
//! ```
//!
//! # Canonical keys
//!
//! A configuration is identified by the concatenation of its channel
//! symbols. Bound channels print the bare state letter (`F`, `C`, `R`),
//! unbound inputs append `+` and unbound outputs append `-`:
//!
//! ```
//! use fta_core::{canonical_key, Channel, ChannelState};
//!
//! let channels = [
//!     Channel::unbound_input(),
//!     Channel::bound().with_state(ChannelState::Ready),
//!     Channel::unbound_output(),
//! ];
//! assert_eq!(canonical_key(&channels), "F+RF-");
//! ```

pub mod action;
pub mod builder;
pub mod channel;
pub mod error;
pub mod explore;
pub mod limits;
pub mod perturb;
pub mod state;
pub mod topology;

pub use action::{Action, ActionFactory, ActionStatus};
pub use builder::TopologyBuilder;
pub use channel::{Channel, ChannelKind, ChannelState};
pub use error::{AnalysisError, ConfigurationError, DivergentActionError, Role};
pub use explore::{
    analyze, analyze_with_sink, Analysis, Explorer, Origin, TracingSink, Transition, TransitionSink,
};
pub use limits::Limits;
pub use perturb::{possible_next_channels, Perturbations};
pub use state::{canonical_key, KnownStates, StateKey};
pub use topology::Topology;
