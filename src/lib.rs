/*
lib.rs

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

//! Machina: a machine that eats texts.
//!
//! For each text, Machina builds a random nondeterministic finite automaton that accepts the
//! text, lays it out as a state diagram, and lets the player walk the diagram, one click per
//! symbol, before the timer expires.
//!
//! - [`generator`] builds the automata.
//! - [`layout`] computes the state positions.
//! - [`traversal`] follows the player's walk.
//! - [`diagram`] turns clicks into moves and provides the drawing geometry.
//! - [`game`] owns all of the above, plus the [`timer`], the [`score`], and the
//!   [`banned_list`].

pub mod banned_list;
pub mod config;
pub mod diagram;
pub mod game;
pub mod generator;
pub mod highscores;
pub mod layout;
pub mod saver;
pub mod score;
pub mod timer;
pub mod traversal;
