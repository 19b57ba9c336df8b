/*
difficulty.rs

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

//! Generator parameters and difficulty levels.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

use crate::config;

/// Difficulty level. The level controls how many distractors the generator adds.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(i32)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl Difficulty {
    /// Return the generator parameters for the difficulty level.
    pub fn generator_config(self) -> GeneratorConfig {
        match self {
            Difficulty::Easy => GeneratorConfig::new(0.15, 2, 0.15),
            Difficulty::Medium => GeneratorConfig::default(),
            Difficulty::Hard => GeneratorConfig::new(0.45, 4, 0.4),
        }
    }
}

/// Parameters of the random automaton generator.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Probability, for each state and symbol, of adding a transition to a random state.
    pub extra_branch_prob: f64,

    /// Number of distractor states.
    pub max_extra_states: usize,

    /// Probability, for each state and symbol, of adding a self-loop.
    pub loop_prob: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            extra_branch_prob: config::EXTRA_BRANCH_PROB,
            max_extra_states: config::MAX_EXTRA_STATES,
            loop_prob: config::LOOP_PROB,
        }
    }
}

impl GeneratorConfig {
    /// Create a [`GeneratorConfig`] object. Probabilities are clamped between 0 and 1.
    pub fn new(extra_branch_prob: f64, max_extra_states: usize, loop_prob: f64) -> Self {
        Self {
            extra_branch_prob: clamp_probability(extra_branch_prob),
            max_extra_states,
            loop_prob: clamp_probability(loop_prob),
        }
    }

    /// Parameters that only keep the main path and the structural self-loops.
    pub fn without_distractors() -> Self {
        Self::new(0.0, 0, 0.0)
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}
