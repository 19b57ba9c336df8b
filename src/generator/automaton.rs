/*
automaton.rs

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

//! Non-deterministic finite automaton displayed to the player.

use log::{Level, debug, log_enabled};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use super::transitions::Transitions;
use crate::layout::Point;

/// State identifier.
///
/// - `Main(i)` is the i-th state of the main path, the one that spells the target string.
///   `Main(0)` is the start state.
/// - `Extra(i)` is a distractor state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateId {
    Main(usize),
    Extra(usize),
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateId::Main(i) => write!(f, "q{i}"),
            StateId::Extra(i) => write!(f, "q_extra_{i}"),
        }
    }
}

impl FromStr for StateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s: &str = s.trim();
        if let Some(i) = s.strip_prefix("q_extra_") {
            return i
                .parse()
                .map(StateId::Extra)
                .map_err(|_| format!("Invalid state name: {s}"));
        }
        match s.strip_prefix('q') {
            Some(i) => i
                .parse()
                .map(StateId::Main)
                .map_err(|_| format!("Invalid state name: {s}")),
            None => Err(format!("Invalid state name: {s}")),
        }
    }
}

/// Automaton object.
#[derive(Debug, Clone)]
pub struct Automaton {
    /// All the states.
    states: BTreeSet<StateId>,

    /// Symbols, which are the distinct characters of the target string.
    alphabet: BTreeSet<char>,

    /// Start state. It is never removed by the cleanup.
    start: StateId,

    /// Accepting states.
    accepts: BTreeSet<StateId>,

    /// Transition table.
    transitions: Transitions,

    /// State positions, computed by [`crate::layout::assign_positions`].
    positions: BTreeMap<StateId, Point>,
}

impl Automaton {
    /// Create an [`Automaton`] object.
    pub fn new(
        states: BTreeSet<StateId>,
        alphabet: BTreeSet<char>,
        start: StateId,
        accepts: BTreeSet<StateId>,
        transitions: Transitions,
    ) -> Self {
        Self {
            states,
            alphabet,
            start,
            accepts,
            transitions,
            positions: BTreeMap::new(),
        }
    }

    pub fn states(&self) -> &BTreeSet<StateId> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepts(&self) -> &BTreeSet<StateId> {
        &self.accepts
    }

    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    /// Whether the given state is an accepting state.
    pub fn is_accept(&self, state: StateId) -> bool {
        self.accepts.contains(&state)
    }

    /// Remove a state from the automaton, together with all the transitions leading to it.
    ///
    /// The start state and the accepting states are kept.
    pub fn remove_state(&mut self, state: StateId) {
        if state == self.start || self.is_accept(state) {
            return;
        }
        self.states.remove(&state);
        self.transitions.remove_state(state);
        self.positions.remove(&state);
    }

    /// Return the position of the state, if the layout has been computed.
    pub fn position(&self, state: StateId) -> Option<Point> {
        self.positions.get(&state).copied()
    }

    /// Return all the state positions.
    pub fn positions(&self) -> &BTreeMap<StateId, Point> {
        &self.positions
    }

    /// Set the position of a state. Unknown states are ignored.
    pub fn set_position(&mut self, state: StateId, point: Point) {
        if self.states.contains(&state) {
            self.positions.insert(state, point);
        }
    }

    /// Breadth-first walk from the start state.
    ///
    /// Return the reachable states in discovery order with their distance from the start state.
    /// Transitions are visited by symbol, then by destination, so the order is stable.
    pub fn bfs(&self) -> Vec<(StateId, usize)> {
        let mut order: Vec<(StateId, usize)> = Vec::with_capacity(self.states.len());
        let mut visited: HashSet<StateId> = HashSet::with_capacity(self.states.len());
        let mut queue: VecDeque<(StateId, usize)> = VecDeque::new();

        visited.insert(self.start);
        queue.push_back((self.start, 0));
        while let Some((state, depth)) = queue.pop_front() {
            order.push((state, depth));
            for (_, destinations) in self.transitions.outgoing(state) {
                for next in destinations {
                    if visited.insert(*next) {
                        queue.push_back((*next, depth + 1));
                    }
                }
            }
        }
        order
    }

    /// Return the BFS layer of every state. States that cannot be reached from the start state
    /// are put in the first layer.
    pub fn layers(&self) -> BTreeMap<StateId, usize> {
        let mut layers: BTreeMap<StateId, usize> = self.states.iter().map(|s| (*s, 0)).collect();
        for (state, depth) in self.bfs() {
            layers.insert(state, depth);
        }
        layers
    }

    /// Return the states that can be reached from the start state.
    pub fn reachable(&self) -> BTreeSet<StateId> {
        self.bfs().into_iter().map(|(s, _)| s).collect()
    }

    /// Whether the automaton accepts the given word.
    ///
    /// All the alternatives of the non-deterministic automaton are followed at the same time.
    pub fn accepts_word(&self, word: &str) -> bool {
        let mut current: BTreeSet<StateId> = BTreeSet::from([self.start]);

        for c in word.chars() {
            current = current
                .iter()
                .filter_map(|s| self.transitions.get(*s, c))
                .flatten()
                .copied()
                .collect();
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|s| self.is_accept(*s))
    }

    /// Print the automaton.
    pub fn debug(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        debug!(
            "States = {:?}",
            self.states.iter().map(|s| s.to_string()).collect::<Vec<_>>()
        );
        debug!("Alphabet = {:?}", self.alphabet);
        debug!("Start = {}  Accepts = {:?}", self.start, self.accepts);
        self.transitions.debug();
    }
}
