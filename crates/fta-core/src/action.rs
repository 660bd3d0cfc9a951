//! Action firing rules.
//!
//! An [`ActionFactory`] names the channels a gate reads, is inhibited by and
//! drives, as indices into the system vector. Binding it to a vector yields
//! an [`Action`] whose [`evaluate`](Action::evaluate) runs the gate to a
//! local fixpoint.

use crate::channel::Channel;
use crate::error::{ConfigurationError, DivergentActionError, Role};
use crate::limits::Limits;

/// A gate's role in a topology: which channel indices it reads, is
/// inhibited by and drives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionFactory {
    /// Channels that must all be Ready for the action to fire.
    pub inputs: Vec<usize>,
    /// Channels that block the outputs while any is Ready.
    pub inhibitors: Vec<usize>,
    /// Channels charged when the action fires.
    pub outputs: Vec<usize>,
}

impl ActionFactory {
    /// Create a factory from its three index lists.
    pub fn new(
        inputs: impl Into<Vec<usize>>,
        inhibitors: impl Into<Vec<usize>>,
        outputs: impl Into<Vec<usize>>,
    ) -> Self {
        Self {
            inputs: inputs.into(),
            inhibitors: inhibitors.into(),
            outputs: outputs.into(),
        }
    }

    /// Every referenced index, tagged with its role.
    pub fn references(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        let inputs = self.inputs.iter().map(|&i| (Role::Input, i));
        let inhibitors = self.inhibitors.iter().map(|&i| (Role::Inhibitor, i));
        let outputs = self.outputs.iter().map(|&i| (Role::Output, i));
        inputs.chain(inhibitors).chain(outputs)
    }

    /// Check every index against a vector of `channels` entries.
    ///
    /// `action` is only used to label the error.
    pub fn validate(&self, action: usize, channels: usize) -> Result<(), ConfigurationError> {
        match self.references().find(|&(_, index)| index >= channels) {
            Some((role, index)) => Err(ConfigurationError::IndexOutOfRange {
                action,
                role,
                index,
                channels,
            }),
            None => Ok(()),
        }
    }

    /// Bind this role to a concrete channel vector.
    ///
    /// The returned action aliases `channels`: everything it charges or
    /// discharges is visible to every later action bound to the same slice.
    /// An out-of-range index is reported as belonging to action 0.
    pub fn bind<'a>(&'a self, channels: &'a mut [Channel]) -> Result<Action<'a>, ConfigurationError> {
        self.validate(0, channels.len())?;
        Ok(self.bind_validated(channels))
    }

    /// Bind without re-checking indices.
    ///
    /// Callers must have validated this role against a vector of the same
    /// length, as [`TopologyBuilder`](crate::TopologyBuilder) does.
    pub(crate) fn bind_validated<'a>(&'a self, channels: &'a mut [Channel]) -> Action<'a> {
        Action {
            role: self,
            channels,
        }
    }
}

/// Read-only snapshot of an action's three predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionStatus {
    pub free: bool,
    pub activated: bool,
    pub inhibited: bool,
}

impl ActionStatus {
    /// Pack as `free | activated << 1 | inhibited << 2`.
    #[inline]
    pub fn bits(self) -> u8 {
        u8::from(self.free) | (u8::from(self.activated) << 1) | (u8::from(self.inhibited) << 2)
    }

    /// Whether the action may fire.
    #[inline]
    pub fn is_enabled(self) -> bool {
        self.free && self.activated
    }
}

/// An [`ActionFactory`] bound to a channel vector.
#[derive(Debug)]
pub struct Action<'a> {
    role: &'a ActionFactory,
    channels: &'a mut [Channel],
}

impl Action<'_> {
    /// Every output channel is Free.
    pub fn is_free(&self) -> bool {
        self.role.outputs.iter().all(|&i| self.channels[i].is_free())
    }

    /// Every input channel is Ready.
    pub fn is_activated(&self) -> bool {
        self.role.inputs.iter().all(|&i| self.channels[i].is_ready())
    }

    /// Some inhibitor channel is Ready.
    pub fn is_inhibited(&self) -> bool {
        self.role.inhibitors.iter().any(|&i| self.channels[i].is_ready())
    }

    pub fn status(&self) -> ActionStatus {
        ActionStatus {
            free: self.is_free(),
            activated: self.is_activated(),
            inhibited: self.is_inhibited(),
        }
    }

    /// Fire under the default firing ceiling.
    pub fn evaluate(&mut self) -> Result<u32, DivergentActionError> {
        self.evaluate_with_limit(Limits::default().max_fires)
    }

    /// Fire until the action no longer re-arms itself.
    ///
    /// Each pass consumes the inputs and clears the inhibitors. If nothing
    /// inhibits the action afterwards its outputs are charged and the pass
    /// counts as one firing. Another pass follows whenever the pass changed
    /// the packed [`ActionStatus`]; an inhibited pass re-enters without
    /// counting.
    ///
    /// Returns the number of firings, or an error once `limit` passes have
    /// been taken without settling.
    pub fn evaluate_with_limit(&mut self, limit: u32) -> Result<u32, DivergentActionError> {
        let role = self.role;
        let mut fired = 0;
        let mut passes = 0;

        loop {
            let before = self.status();
            if !before.is_enabled() {
                return Ok(fired);
            }
            if passes == limit {
                return Err(DivergentActionError { limit });
            }
            passes += 1;

            for &i in &role.inputs {
                self.channels[i].discharge();
            }
            for &i in &role.inhibitors {
                self.channels[i].discharge();
            }

            if !self.is_inhibited() {
                for &i in &role.outputs {
                    self.channels[i].charge();
                }
                fired += 1;
            }

            if self.status().bits() == before.bits() {
                return Ok(fired);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ChannelState;

    fn ready(ch: Channel) -> Channel {
        ch.with_state(ChannelState::Ready)
    }

    #[test]
    fn test_disabled_action_has_no_effect() {
        let role = ActionFactory::new([0], [], [1]);
        let mut channels = vec![Channel::bound(), Channel::bound()];
        let snapshot = channels.clone();

        let mut action = role.bind(&mut channels).unwrap();
        assert!(!action.is_activated());
        assert_eq!(action.evaluate(), Ok(0));
        assert_eq!(channels, snapshot);
    }

    #[test]
    fn test_fire_moves_token() {
        let role = ActionFactory::new([0], [], [1, 2]);
        let mut channels = vec![ready(Channel::bound()), Channel::bound(), Channel::unbound_output()];

        let mut action = role.bind(&mut channels).unwrap();
        assert_eq!(action.evaluate(), Ok(1));

        assert!(channels[0].is_free());
        assert!(channels[1].is_charging());
        assert!(channels[2].is_charging());
    }

    #[test]
    fn test_blocked_by_busy_output() {
        let role = ActionFactory::new([0], [], [1]);
        let mut channels = vec![
            ready(Channel::bound()),
            Channel::bound().with_state(ChannelState::Charging),
        ];

        let mut action = role.bind(&mut channels).unwrap();
        assert!(!action.is_free());
        assert_eq!(action.evaluate(), Ok(0));
        assert!(channels[0].is_ready());
    }

    #[test]
    fn test_inhibitor_cleared_then_fires() {
        let role = ActionFactory::new([0], [1], [2]);
        let mut channels = vec![ready(Channel::bound()), ready(Channel::bound()), Channel::bound()];

        let mut action = role.bind(&mut channels).unwrap();
        assert!(action.is_inhibited());
        assert_eq!(action.evaluate(), Ok(1));

        // Discharging the inhibitor lifts the inhibition, so the output is
        // charged in the same pass.
        assert!(channels[0].is_free());
        assert!(channels[1].is_free());
        assert!(channels[2].is_charging());
    }

    #[test]
    fn test_inhibitor_untouched_when_not_enabled() {
        let role = ActionFactory::new([0], [1], [2]);
        let mut channels = vec![
            ready(Channel::bound()),
            ready(Channel::bound()),
            Channel::bound().with_state(ChannelState::Charging),
        ];
        let snapshot = channels.clone();

        let mut action = role.bind(&mut channels).unwrap();
        assert!(action.is_inhibited());
        assert!(!action.is_free());
        assert_eq!(action.evaluate(), Ok(0));
        assert_eq!(channels, snapshot);
    }

    #[test]
    fn test_reentrant_firing() {
        // First pass clears the inhibitor and fires (status 0b111 -> 0b011),
        // second pass fires again and leaves the status unchanged.
        let role = ActionFactory::new([], [0], []);
        let mut channels = vec![ready(Channel::bound())];

        let mut action = role.bind(&mut channels).unwrap();
        assert_eq!(action.status().bits(), 0b111);
        assert_eq!(action.evaluate(), Ok(2));
        assert_eq!(action.status().bits(), 0b011);
        assert!(channels[0].is_free());
    }

    #[test]
    fn test_self_inhibited_loop() {
        // Inhibitor 0, outputs [0, 1]: the first firing charges its own
        // inhibitor, so a later Ready on channel 0 only clears itself.
        let role = ActionFactory::new([], [0], [0, 1]);

        let mut channels = vec![Channel::bound(), Channel::unbound_output()];
        assert_eq!(role.bind(&mut channels).unwrap().evaluate(), Ok(1));
        assert!(channels[0].is_charging());
        assert!(channels[1].is_charging());

        let mut channels = vec![ready(Channel::bound()), ready(Channel::unbound_output())];
        let action = role.bind(&mut channels).unwrap();
        assert_eq!(
            action.status(),
            ActionStatus {
                free: false,
                activated: true,
                inhibited: true
            }
        );
    }

    #[test]
    fn test_status_bits() {
        let status = ActionStatus {
            free: true,
            activated: false,
            inhibited: true,
        };
        assert_eq!(status.bits(), 0b101);
        assert!(!status.is_enabled());
    }

    #[test]
    fn test_no_outputs_no_inputs_fires_once() {
        let role = ActionFactory::default();
        let mut channels = vec![Channel::bound()];
        assert_eq!(role.bind(&mut channels).unwrap().evaluate(), Ok(1));
    }

    #[test]
    fn test_firing_ceiling() {
        let role = ActionFactory::new([0], [], [1]);
        let mut channels = vec![ready(Channel::bound()), Channel::bound()];
        let mut action = role.bind(&mut channels).unwrap();
        assert_eq!(action.evaluate_with_limit(0), Err(DivergentActionError { limit: 0 }));
    }

    #[test]
    fn test_bind_validated_shares_semantics() {
        let role = ActionFactory::new([0], [], [1]);
        let mut checked = vec![ready(Channel::bound()), Channel::bound()];
        let mut unchecked = checked.clone();

        assert_eq!(role.bind(&mut checked).unwrap().evaluate(), Ok(1));
        assert_eq!(role.bind_validated(&mut unchecked).evaluate(), Ok(1));
        assert_eq!(checked, unchecked);
    }

    #[test]
    fn test_bind_out_of_range() {
        let role = ActionFactory::new([0], [3], []);
        let mut channels = vec![Channel::bound(), Channel::bound()];
        let err = role.bind(&mut channels).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::IndexOutOfRange {
                action: 0,
                role: Role::Inhibitor,
                index: 3,
                channels: 2
            }
        );
    }
}
