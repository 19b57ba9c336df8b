/*
random_automaton.rs

Copyright 2025 Machina contributors

This file is part of Machina.

Machina is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Machina is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Machina. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Generate a random automaton that accepts a given string.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeSet;
use std::time::Instant;
use thiserror::Error;

use super::automaton::{Automaton, StateId};
use super::difficulty::GeneratorConfig;
use super::transitions::{TransitionError, Transitions};

/// Type of errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// An automaton cannot be built for an empty string.
    #[error("the target string is empty")]
    EmptyTarget,

    /// A transition could not be added to the table.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// [`RandomAutomaton`] object.
#[derive(Debug)]
pub struct RandomAutomaton {
    /// Generator parameters.
    pub config: GeneratorConfig,

    /// Number of states the cleanup removed from the last generated automaton.
    pub removed: usize,

    /// Number of cleanup passes it took to reach a stable automaton.
    pub passes: usize,

    /// Duration in seconds it took to generate the last automaton.
    pub duration: f32,

    /// Time when the generation started. Used to compute the [`RandomAutomaton::duration`].
    start: Instant,
}

impl Default for RandomAutomaton {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl RandomAutomaton {
    /// Create the object.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            removed: 0,
            passes: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    /// Generate and return a random automaton for the given string, using the thread random
    /// generator.
    ///
    /// # Errors
    ///
    /// The method returns an error if the string is empty.
    pub fn generate(&mut self, target: &str) -> Result<Automaton, GenerateError> {
        self.generate_with_rng(target, &mut rand::rng())
    }

    /// Generate and return a random automaton for the given string.
    ///
    /// The automaton always accepts the string: the main path `q0 -> q1 -> ... -> qn` spells it
    /// and survives the cleanup.
    ///
    /// # Errors
    ///
    /// The method returns an error if the string is empty.
    pub fn generate_with_rng<R: Rng>(
        &mut self,
        target: &str,
        rng: &mut R,
    ) -> Result<Automaton, GenerateError> {
        self.removed = 0;
        self.passes = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        let symbols: Vec<char> = target.chars().collect();
        let n: usize = symbols.len();
        if n == 0 {
            return Err(GenerateError::EmptyTarget);
        }

        let main_path: Vec<StateId> = (0..=n).map(StateId::Main).collect();
        let all_states: Vec<StateId> = main_path
            .iter()
            .copied()
            .chain((0..self.config.max_extra_states).map(StateId::Extra))
            .collect();
        let states: BTreeSet<StateId> = all_states.iter().copied().collect();
        let alphabet: BTreeSet<char> = symbols.iter().copied().collect();
        let mut transitions: Transitions = Transitions::new(&states, &alphabet);

        debug!(
            "Target = {target:?}  Main path states = {}  Extra states = {}",
            n + 1,
            self.config.max_extra_states
        );

        // Main path
        for (i, c) in symbols.iter().enumerate() {
            transitions.add(main_path[i], *c, main_path[i + 1])?;
        }

        // Loop on a state between two identical characters
        for i in 1..n {
            if symbols[i - 1] == symbols[i] {
                transitions.add(main_path[i], symbols[i], main_path[i])?;
                debug!("    Structural loop {} --{}--> {}", main_path[i], symbols[i], main_path[i]);
            }
        }

        // Random branches to any state
        for s in &all_states {
            for c in &alphabet {
                if rng.random::<f64>() < self.config.extra_branch_prob
                    && let Some(to) = all_states.choose(rng)
                    && transitions.add(*s, *c, *to)?
                {
                    debug!("    Branch {s} --{c}--> {to}");
                }
            }
        }

        // Random loops
        for s in &all_states {
            for c in &alphabet {
                if rng.random::<f64>() < self.config.loop_prob && transitions.add(*s, *c, *s)? {
                    debug!("    Loop {s} --{c}--> {s}");
                }
            }
        }

        let accept: StateId = main_path[n];
        let mut automaton: Automaton = Automaton::new(
            states,
            alphabet,
            main_path[0],
            BTreeSet::from([accept]),
            transitions,
        );
        self.cleanup(&mut automaton);
        debug_assert!(
            automaton.states().contains(&accept),
            "the accepting state was removed"
        );

        self.duration = self.start.elapsed().as_secs_f32();
        debug!(
            "Removed = {}  Passes = {}  Duration = {}",
            self.removed, self.passes, self.duration
        );
        automaton.debug();
        Ok(automaton)
    }

    /// Remove the useless states until a pass removes nothing.
    ///
    /// The start state and the accepting states are never checked. Every other state is removed
    /// when it has no transitions, when it only loops on itself, when no other state leads to it,
    /// or when it cannot be reached from the start state.
    /// Removing a state can make its predecessors useless, hence the repeated passes.
    pub fn cleanup(&mut self, automaton: &mut Automaton) {
        let start: StateId = automaton.start();

        loop {
            self.passes += 1;
            let reachable: BTreeSet<StateId> = automaton.reachable();
            let candidates: Vec<StateId> = automaton
                .states()
                .iter()
                .filter(|s| **s != start && !automaton.is_accept(**s))
                .copied()
                .collect();

            let mut removed_in_pass: usize = 0;
            for state in candidates {
                let transitions: &Transitions = automaton.transitions();
                let reason: &str = if transitions.num_transitions(state) == 0 {
                    "no transitions"
                } else if transitions.is_self_loop_only(state) {
                    "self-loop only"
                } else if !transitions.is_referenced(state) {
                    "not referenced"
                } else if !reachable.contains(&state) {
                    "not reachable"
                } else {
                    continue;
                };
                debug!("    Removing {state}: {reason}");
                automaton.remove_state(state);
                removed_in_pass += 1;
            }

            self.removed += removed_in_pass;
            if removed_in_pass == 0 {
                break;
            }
        }
    }
}
