/*
transitions.rs

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

//! Transition table of the automaton.

use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::automaton::StateId;

/// Transition table validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The state is not declared in the automaton.
    #[error("state {0} is not declared")]
    UnknownState(StateId),

    /// The symbol is not part of the alphabet.
    #[error("symbol {0:?} is not in the alphabet")]
    SymbolNotInAlphabet(char),
}

/// Represent the transitions of the automaton.
///
/// For each state, a [`BTreeMap`] indexed by the symbol stores the set of destination states.
/// Ordered containers make iteration, and therefore the tie-break between symbols leading to the
/// same state, deterministic: the smallest symbol comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transitions {
    /// Declared states. Every source and destination must belong to this set.
    states: BTreeSet<StateId>,

    /// Declared alphabet.
    alphabet: BTreeSet<char>,

    /// Destinations indexed by source state and symbol.
    table: BTreeMap<StateId, BTreeMap<char, BTreeSet<StateId>>>,
}

impl Transitions {
    /// Create an empty table for the given states and alphabet.
    pub fn new(states: &BTreeSet<StateId>, alphabet: &BTreeSet<char>) -> Self {
        Self {
            states: states.clone(),
            alphabet: alphabet.clone(),
            table: states.iter().map(|s| (*s, BTreeMap::new())).collect(),
        }
    }

    /// Add the transition `from --symbol--> to`.
    ///
    /// Return whether the transition is new: destinations are deduplicated per state and symbol.
    ///
    /// # Errors
    ///
    /// The method returns an error if one of the states is not declared or if the symbol is not
    /// in the alphabet.
    pub fn add(&mut self, from: StateId, symbol: char, to: StateId) -> Result<bool, TransitionError> {
        if !self.alphabet.contains(&symbol) {
            return Err(TransitionError::SymbolNotInAlphabet(symbol));
        }
        if !self.states.contains(&to) {
            return Err(TransitionError::UnknownState(to));
        }
        let symbols: &mut BTreeMap<char, BTreeSet<StateId>> = self
            .table
            .get_mut(&from)
            .ok_or(TransitionError::UnknownState(from))?;
        Ok(symbols.entry(symbol).or_default().insert(to))
    }

    /// Remove the state, its outgoing transitions, and every transition that leads to it.
    ///
    /// Symbols left without destinations are dropped, so that a state which only pointed to the
    /// removed state ends up with no outgoing transitions.
    pub fn remove_state(&mut self, state: StateId) {
        self.states.remove(&state);
        self.table.remove(&state);
        for symbols in self.table.values_mut() {
            for destinations in symbols.values_mut() {
                destinations.remove(&state);
            }
            symbols.retain(|_, destinations| !destinations.is_empty());
        }
    }

    /// Return the destinations of the given state for the given symbol.
    pub fn get(&self, from: StateId, symbol: char) -> Option<&BTreeSet<StateId>> {
        self.table.get(&from).and_then(|symbols| symbols.get(&symbol))
    }

    /// Return the outgoing transitions of the given state, ordered by symbol.
    pub fn outgoing(&self, from: StateId) -> impl Iterator<Item = (char, &BTreeSet<StateId>)> {
        self.table
            .get(&from)
            .into_iter()
            .flat_map(|symbols| symbols.iter().map(|(c, d)| (*c, d)))
    }

    /// Return the distinct states reachable from the given state with one transition.
    pub fn successors(&self, from: StateId) -> BTreeSet<StateId> {
        self.outgoing(from)
            .flat_map(|(_, destinations)| destinations.iter().copied())
            .collect()
    }

    /// Number of `(symbol, destination)` pairs leaving the given state.
    pub fn num_transitions(&self, from: StateId) -> usize {
        self.outgoing(from).map(|(_, d)| d.len()).sum()
    }

    /// Total number of `(source, symbol, destination)` triples.
    pub fn len(&self) -> usize {
        self.table.keys().map(|s| self.num_transitions(*s)).sum()
    }

    /// Whether the table has no transitions at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether all the transitions of the state loop back to itself.
    ///
    /// A state without transitions is not considered self-loop only.
    pub fn is_self_loop_only(&self, state: StateId) -> bool {
        let successors: BTreeSet<StateId> = self.successors(state);
        !successors.is_empty() && successors.iter().all(|s| *s == state)
    }

    /// Whether another state has a transition to the given state. Self-loops do not count.
    pub fn is_referenced(&self, state: StateId) -> bool {
        self.table.iter().any(|(from, symbols)| {
            *from != state && symbols.values().any(|d| d.contains(&state))
        })
    }

    /// Print the transitions.
    pub fn debug(&self) {
        let mut s: String = String::new();

        for (from, symbols) in &self.table {
            s.clear();
            s.push_str(&format!("{:>10} -->", from.to_string()));
            for (symbol, destinations) in symbols {
                for to in destinations {
                    s.push_str(&format!(" {to}({symbol})"));
                }
            }
            debug!("{s}");
        }
    }
}
