//! Perturbation enumerator.
//!
//! From a settled vector, every unstable channel may or may not take its
//! spontaneous step before the next sweep. The enumerator yields each of
//! those combinations as an owned vector.

use crate::channel::Channel;

/// Iterator over every perturbation of a channel vector.
///
/// Yields `2^u` vectors for `u` unstable channels. The reported length
/// saturates at `usize::MAX` when `2^u` does not fit. The order matches a
/// recursive binary expansion where, for each channel from the first, every
/// vector keeping it unchanged precedes every vector advancing it. Each
/// yielded vector is a fresh copy, so branches never share channel values.
#[derive(Debug, Clone)]
pub struct Perturbations<'a> {
    base: &'a [Channel],
    /// Positions of the unstable channels in `base`.
    unstable: Vec<usize>,
    /// Which unstable positions the next vector advances.
    advanced: Vec<bool>,
    remaining: usize,
    done: bool,
}

impl<'a> Perturbations<'a> {
    pub fn new(base: &'a [Channel]) -> Self {
        let unstable: Vec<usize> = base
            .iter()
            .enumerate()
            .filter(|(_, ch)| ch.is_unstable())
            .map(|(i, _)| i)
            .collect();
        let remaining = u32::try_from(unstable.len())
            .ok()
            .and_then(|u| 1usize.checked_shl(u))
            .unwrap_or(usize::MAX);

        Self {
            base,
            advanced: vec![false; unstable.len()],
            unstable,
            remaining,
            done: false,
        }
    }

    /// Positions that differ between the base and at least one perturbation.
    pub fn unstable_positions(&self) -> &[usize] {
        &self.unstable
    }

    /// Step to the next combination, last unstable position fastest.
    fn increment(&mut self) {
        for flag in self.advanced.iter_mut().rev() {
            if *flag {
                *flag = false;
            } else {
                *flag = true;
                return;
            }
        }
        self.done = true;
    }
}

impl Iterator for Perturbations<'_> {
    type Item = Vec<Channel>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut channels = self.base.to_vec();
        for (&pos, &advanced) in self.unstable.iter().zip(&self.advanced) {
            if advanced {
                channels[pos] = channels[pos].advance();
            }
        }

        self.increment();
        self.remaining = self.remaining.saturating_sub(1);
        Some(channels)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Perturbations<'_> {}

/// Every vector reachable by independently keeping or advancing each
/// unstable channel.
pub fn possible_next_channels(channels: &[Channel]) -> Perturbations<'_> {
    Perturbations::new(channels)
}
