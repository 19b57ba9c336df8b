/*
traversal.rs

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

//! Manage the player's walk through the automaton.
//!
//! The player walks from the start state by clicking the next state.
//! Each click must follow a transition of the current state (otherwise it is ignored), and the
//! symbol of that transition must be the next character of the target string (otherwise the
//! puzzle is lost).

use log::debug;
use std::collections::BTreeMap;
use strum_macros::FromRepr;

use crate::generator::automaton::{Automaton, StateId};

/// Status of a state, for the game logic and for choosing the state sprite.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, FromRepr)]
#[repr(u8)]
pub enum StateStatus {
    /// Nothing special.
    #[default]
    Normal,

    /// The state can be reached from the current state with one transition.
    Current,

    /// The player left this state with the correct symbol.
    Right,

    /// The player left this state with a wrong symbol.
    Wrong,
}

impl StateStatus {
    /// Index of the state sprite in the sprite sheet (normal, right, wrong).
    /// Reachable states use the normal sprite with a highlight.
    pub fn sprite_index(self) -> usize {
        match self {
            StateStatus::Normal | StateStatus::Current => 0,
            StateStatus::Right => 1,
            StateStatus::Wrong => 2,
        }
    }
}

/// Result of a click on a state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The puzzle is already resolved. Nothing changed.
    Inactive,

    /// No transition leads from the current state to the clicked state. Nothing changed.
    Illegal,

    /// The symbol matches the target string and the player moved to the clicked state.
    Advanced { symbol: char, to: StateId },

    /// The symbol does not match the target string. The puzzle is lost.
    Wrong { symbol: char },
}

/// Result of the resolution check.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resolution {
    Pending,
    Accepted,
    Failed,
}

/// Signals for the owning scene.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Signals {
    /// The current state is an accepting state.
    pub accepted: bool,

    /// The output is equal to the target string.
    pub completed: bool,

    /// A move was wrong or the time is over.
    pub failed: bool,
}

/// Player's walk through one automaton.
#[derive(Debug, Clone)]
pub struct Traversal {
    /// Automaton to walk through. It does not change during the walk.
    automaton: Automaton,

    /// String the player must spell.
    target: String,

    /// State the player occupies.
    current: StateId,

    /// Symbols of the transitions the player followed so far.
    output: String,

    /// Status of each state.
    status: BTreeMap<StateId, StateStatus>,

    /// Whether the puzzle is still in progress.
    analyzing: bool,

    /// Whether the timer expired before the puzzle was solved.
    timed_out: bool,
}

impl Traversal {
    /// Create a [`Traversal`] object that starts at the start state of the automaton.
    pub fn new(automaton: Automaton, target: &str) -> Self {
        let status: BTreeMap<StateId, StateStatus> = automaton
            .states()
            .iter()
            .map(|s| (*s, StateStatus::Normal))
            .collect();
        let mut traversal: Traversal = Self {
            current: automaton.start(),
            automaton,
            target: target.to_string(),
            output: String::with_capacity(target.len()),
            status,
            analyzing: true,
            timed_out: false,
        };
        traversal.mark_successors();
        traversal
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn current(&self) -> StateId {
        self.current
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Whether the puzzle is still in progress.
    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    /// Return the status of the state.
    pub fn status(&self, state: StateId) -> StateStatus {
        self.status.get(&state).copied().unwrap_or_default()
    }

    /// Return the status of all the states.
    pub fn statuses(&self) -> &BTreeMap<StateId, StateStatus> {
        &self.status
    }

    /// Return the symbol of a transition from the current state to the candidate state, or None
    /// if there is no such transition.
    ///
    /// When several symbols lead to the candidate, the smallest one is returned.
    pub fn legal_symbol(&self, candidate: StateId) -> Option<char> {
        self.automaton
            .transitions()
            .outgoing(self.current)
            .find(|(_, destinations)| destinations.contains(&candidate))
            .map(|(symbol, _)| symbol)
    }

    /// Move to the candidate state.
    ///
    /// An illegal click changes nothing. A legal click appends the symbol to the output. If the
    /// output is still a prefix of the target string, then the player moves to the candidate.
    /// Otherwise the state the player tried to leave becomes wrong and the puzzle stops.
    pub fn attempt_transition(&mut self, candidate: StateId) -> MoveOutcome {
        if !self.analyzing {
            return MoveOutcome::Inactive;
        }
        let symbol: char = match self.legal_symbol(candidate) {
            Some(c) => c,
            None => {
                debug!("Illegal move {} -> {candidate}", self.current);
                return MoveOutcome::Illegal;
            }
        };

        self.output.push(symbol);
        if !self.target.starts_with(&self.output) {
            debug!(
                "Wrong move {} --{symbol}--> {candidate}: {:?} is not a prefix of {:?}",
                self.current, self.output, self.target
            );
            self.status.insert(self.current, StateStatus::Wrong);
            self.analyzing = false;
            return MoveOutcome::Wrong { symbol };
        }

        debug!(
            "Move {} --{symbol}--> {candidate}: output = {:?}",
            self.current, self.output
        );
        self.status.insert(self.current, StateStatus::Right);
        self.current = candidate;
        self.mark_successors();
        MoveOutcome::Advanced {
            symbol,
            to: candidate,
        }
    }

    /// Mark the states that can be reached from the current state.
    fn mark_successors(&mut self) {
        for s in self.status.values_mut() {
            if *s == StateStatus::Current {
                *s = StateStatus::Normal;
            }
        }
        for next in self.automaton.transitions().successors(self.current) {
            self.status.insert(next, StateStatus::Current);
        }
    }

    /// Whether the current state is an accepting state.
    pub fn is_accepted(&self) -> bool {
        self.automaton.is_accept(self.current)
    }

    /// Whether the output is exactly the target string.
    pub fn is_completed(&self) -> bool {
        self.output == self.target
    }

    /// Whether a state has the wrong status.
    pub fn has_wrong(&self) -> bool {
        self.status.values().any(|s| *s == StateStatus::Wrong)
    }

    /// Whether the timer expired.
    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }

    /// Stop the puzzle because the time is over.
    pub fn expire(&mut self) {
        if self.analyzing {
            debug!("Time is over for {:?}", self.target);
            self.timed_out = true;
            self.analyzing = false;
        }
    }

    /// Return the signals for the owning scene.
    pub fn signals(&self) -> Signals {
        Signals {
            accepted: self.is_accepted(),
            completed: self.is_completed(),
            failed: self.timed_out || self.has_wrong(),
        }
    }

    /// Resolution check, run once per frame.
    ///
    /// The puzzle is won when the player stands on an accepting state and spelled the whole
    /// target string. It is lost when a move was wrong or when the time is over.
    pub fn resolve(&mut self) -> Resolution {
        let signals: Signals = self.signals();
        let resolution: Resolution = if signals.accepted && signals.completed {
            Resolution::Accepted
        } else if signals.failed {
            Resolution::Failed
        } else {
            Resolution::Pending
        };
        if resolution != Resolution::Pending && self.analyzing {
            debug!("Puzzle {:?} resolved: {resolution:?}", self.target);
            self.analyzing = false;
        }
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::GeneratorConfig;
    use crate::generator::random_automaton::RandomAutomaton;
    use crate::generator::transitions::Transitions;
    use std::collections::BTreeSet;

    fn plain(target: &str) -> Traversal {
        let mut g = RandomAutomaton::new(GeneratorConfig::without_distractors());
        Traversal::new(g.generate(target).unwrap(), target)
    }

    /// q0 --c--> q1 --a--> q2 --t--> q3, plus q1 --t--> q_extra_0 --a--> q3 and
    /// q0 --a,c--> q_extra_0
    fn with_distractor() -> Traversal {
        let states: BTreeSet<StateId> = (0..4)
            .map(StateId::Main)
            .chain(std::iter::once(StateId::Extra(0)))
            .collect();
        let alphabet: BTreeSet<char> = BTreeSet::from(['a', 'c', 't']);
        let mut t = Transitions::new(&states, &alphabet);
        t.add(StateId::Main(0), 'c', StateId::Main(1)).unwrap();
        t.add(StateId::Main(1), 'a', StateId::Main(2)).unwrap();
        t.add(StateId::Main(2), 't', StateId::Main(3)).unwrap();
        t.add(StateId::Main(1), 't', StateId::Extra(0)).unwrap();
        t.add(StateId::Extra(0), 'a', StateId::Main(3)).unwrap();
        t.add(StateId::Main(0), 'c', StateId::Extra(0)).unwrap();
        t.add(StateId::Main(0), 'a', StateId::Extra(0)).unwrap();
        let a = Automaton::new(
            states,
            alphabet,
            StateId::Main(0),
            BTreeSet::from([StateId::Main(3)]),
            t,
        );
        Traversal::new(a, "cat")
    }

    #[test]
    fn starts_on_the_start_state() {
        let t = plain("cat");
        assert_eq!(t.current(), StateId::Main(0));
        assert_eq!(t.output(), "");
        assert!(t.is_analyzing());
        assert_eq!(t.status(StateId::Main(1)), StateStatus::Current);
        assert_eq!(t.status(StateId::Main(2)), StateStatus::Normal);
    }

    #[test]
    fn illegal_click_changes_nothing() {
        let mut t = plain("cat");
        let before = t.statuses().clone();
        assert_eq!(t.attempt_transition(StateId::Main(2)), MoveOutcome::Illegal);
        assert_eq!(t.current(), StateId::Main(0));
        assert_eq!(t.output(), "");
        assert_eq!(t.statuses(), &before);
        assert_eq!(t.resolve(), Resolution::Pending);
    }

    #[test]
    fn smallest_symbol_wins_the_tie() {
        let t = with_distractor();
        assert_eq!(t.legal_symbol(StateId::Extra(0)), Some('a'));
        assert_eq!(t.legal_symbol(StateId::Main(1)), Some('c'));
        assert_eq!(t.legal_symbol(StateId::Main(3)), None);
    }

    #[test]
    fn tie_break_can_lose_the_puzzle() {
        let mut t = with_distractor();
        assert_eq!(
            t.attempt_transition(StateId::Extra(0)),
            MoveOutcome::Wrong { symbol: 'a' }
        );
        assert_eq!(t.output(), "a");
        assert_eq!(t.current(), StateId::Main(0));
        assert_eq!(t.status(StateId::Main(0)), StateStatus::Wrong);
    }

    #[test]
    fn wrong_symbol_marks_the_departed_state() {
        let mut t = with_distractor();
        assert!(matches!(
            t.attempt_transition(StateId::Main(1)),
            MoveOutcome::Advanced { symbol: 'c', .. }
        ));
        assert_eq!(t.status(StateId::Main(0)), StateStatus::Right);
        assert_eq!(
            t.attempt_transition(StateId::Extra(0)),
            MoveOutcome::Wrong { symbol: 't' }
        );
        assert_eq!(t.output(), "ct");
        assert_eq!(t.status(StateId::Main(1)), StateStatus::Wrong);
        assert_eq!(t.status(StateId::Extra(0)), StateStatus::Current);
        assert!(!t.is_analyzing());
        assert!(t.signals().failed);
        assert_eq!(t.resolve(), Resolution::Failed);
        assert_eq!(t.attempt_transition(StateId::Main(2)), MoveOutcome::Inactive);
    }

    #[test]
    fn walking_the_main_path_wins() {
        let mut t = plain("cat");
        for i in 1..=3 {
            assert!(matches!(
                t.attempt_transition(StateId::Main(i)),
                MoveOutcome::Advanced { .. }
            ));
            if i < 3 {
                assert_eq!(t.resolve(), Resolution::Pending);
            }
        }
        assert_eq!(
            t.signals(),
            Signals {
                accepted: true,
                completed: true,
                failed: false
            }
        );
        assert_eq!(t.resolve(), Resolution::Accepted);
        assert!(!t.is_analyzing());
        assert_eq!(t.status(StateId::Main(2)), StateStatus::Right);
        assert_eq!(t.status(StateId::Main(1)), StateStatus::Right);
    }

    #[test]
    fn stale_reachable_marks_are_cleared() {
        let mut t = with_distractor();
        assert_eq!(t.status(StateId::Extra(0)), StateStatus::Current);
        t.attempt_transition(StateId::Main(1));
        assert_eq!(t.status(StateId::Main(2)), StateStatus::Current);
        t.attempt_transition(StateId::Main(2));
        assert_eq!(t.status(StateId::Extra(0)), StateStatus::Normal);
        assert_eq!(t.status(StateId::Main(3)), StateStatus::Current);
    }

    #[test]
    fn expired_timer_fails_the_puzzle() {
        let mut t = plain("cat");
        t.attempt_transition(StateId::Main(1));
        t.expire();
        assert!(t.is_timed_out());
        assert!(!t.has_wrong());
        assert_eq!(t.resolve(), Resolution::Failed);
        assert_eq!(t.attempt_transition(StateId::Main(2)), MoveOutcome::Inactive);
        assert_eq!(t.output(), "c");
    }

    #[test]
    fn sprite_indexes() {
        assert_eq!(StateStatus::Current.sprite_index(), 0);
        assert_eq!(StateStatus::Right.sprite_index(), 1);
        assert_eq!(StateStatus::Wrong.sprite_index(), 2);
        assert_eq!(StateStatus::from_repr(3), Some(StateStatus::Wrong));
    }
}
