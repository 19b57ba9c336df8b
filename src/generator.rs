/*
generator.rs

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

//! Generate random automata.
//!
//! Every text that the machine swallows becomes a puzzle: a random non-deterministic finite
//! automaton that accepts the text, and that the player must walk through.
//!
//! An [`automaton::Automaton`] object stores the states, the alphabet, the start and accepting
//! states, and a [`transitions::Transitions`] table that rejects any state or symbol that the
//! automaton does not declare.
//!
//! You create a random automaton by creating a [`random_automaton::RandomAutomaton`] object and by
//! using its [`random_automaton::RandomAutomaton::generate`] method.
//! The generator works in three steps:
//!
//! * It builds the main path, one state per character plus the final accepting state, and adds a
//!   loop wherever the text repeats a character.
//!
//! * It adds distractors: extra states, random branches, and random self-loops. The amount of
//!   distractors comes from a [`difficulty::GeneratorConfig`] object, usually obtained from a
//!   [`difficulty::Difficulty`] level.
//!
//! * It removes the useless states until the automaton is stable. The main path always survives
//!   this cleanup, so the automaton always accepts the text.

pub mod automaton;
pub mod difficulty;
pub mod random_automaton;
pub mod transitions;
