//! Forward replay of portal candidates against the target bit pattern.

use crate::candidates::Candidates;
use crate::solvers::{Delta, ForwardStep};
use crate::traits::{Scalar, Steppable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a candidate is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyStrategy {
    /// Replay every candidate from scratch for the full tick count.
    Resimulate,
    /// Remember positions on trajectories already known to reach the target,
    /// and stop a replay as soon as it joins one of them or overshoots.
    Memoized,
}

impl Default for VerifyStrategy {
    fn default() -> Self {
        VerifyStrategy::Resimulate
    }
}

#[derive(Debug)]
pub struct ForwardVerifier<T: Scalar> {
    target: T,
    forward: ForwardStep<T>,
    ascending: bool,
    strategy: VerifyStrategy,
    /// Bit pattern -> ticks still needed to land on the target.
    known: HashMap<u64, usize>,
    steps_taken: u64,
}

impl<T: Scalar> ForwardVerifier<T> {
    pub fn new(target: T, delta: &Delta<T>, strategy: VerifyStrategy) -> Self {
        Self {
            target,
            forward: delta.forward(),
            ascending: delta.value() > T::zero(),
            strategy,
            known: HashMap::new(),
            steps_taken: 0,
        }
    }

    pub fn strategy(&self) -> VerifyStrategy {
        self.strategy
    }

    /// Total forward steps simulated so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// True when `ticks` forward steps from `start` produce the target's exact bits.
    pub fn replays_onto_target(&mut self, start: T, ticks: usize) -> bool {
        match self.strategy {
            VerifyStrategy::Resimulate => {
                self.steps_taken += ticks as u64;
                self.forward.advance(start, ticks).bits_eq(self.target)
            }
            VerifyStrategy::Memoized => self.replay_memoized(start, ticks),
        }
    }

    /// The first candidate, nearest the origin, that replays onto the target.
    pub fn first_match(&mut self, candidates: Candidates<T>, ticks: usize) -> Option<T> {
        for candidate in candidates {
            if self.replays_onto_target(candidate, ticks) {
                return Some(candidate);
            }
        }
        None
    }

    fn replay_memoized(&mut self, start: T, ticks: usize) -> bool {
        let mut position = start;
        let mut remaining = ticks;
        let mut path = Vec::new();

        let matched = loop {
            let bits = position.to_raw_bits();
            if self.known.get(&bits) == Some(&remaining) {
                break true;
            }
            if remaining == 0 {
                break position.bits_eq(self.target);
            }
            // Under a positive delta positions never decrease.
            if self.ascending && position > self.target {
                break false;
            }
            path.push((bits, remaining));
            position = self.forward.step(position);
            remaining -= 1;
            self.steps_taken += 1;
        };

        if matched {
            for (bits, remaining) in path {
                self.known.entry(bits).or_insert(remaining);
            }
        }
        matched
    }
}
