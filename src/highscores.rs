/*
highscores.rs

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

//! Manage the high scores.
//!
//! The main object, [`HighScores`], maintains a scoreboard for each difficulty level.
//! The game adds the final score when the text queue is exhausted or when the player loses all
//! their lives.
//! See the [`crate::saver::highscores`] module that saves and restores the [`HighScores`] object.

use std::collections::HashMap;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::generator::difficulty::Difficulty;

/// Number of entries per scoreboard (number of top scores to keep).
const BOARD_SIZE: usize = 10;

/// Object that represent a final score.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HighScore {
    /// Final score.
    pub points: u32,

    /// Number of puzzles the player solved.
    pub solved: usize,

    /// Completion timestamp, which is used to display the date and time in the scoreboard.
    pub when: SystemTime,
}

/// Sorted list of the top scores for a difficulty level.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
struct ScoreBoard {
    /// Sorted list of the top scores, best first.
    top: Vec<HighScore>,
}

impl ScoreBoard {
    /// Add a score to the scoreboard and return the position in the board, or None if the
    /// score does not make it to the board.
    ///
    /// The returned position starts at 1 (top score). A new score ranks after the older scores
    /// with the same points.
    fn add_score(&mut self, score: HighScore) -> Option<usize> {
        let index: usize = self.top.partition_point(|s| s.points >= score.points);
        if index >= BOARD_SIZE {
            return None;
        }
        self.top.insert(index, score);
        self.top.truncate(BOARD_SIZE);
        Some(index + 1)
    }
}

/// List of the scoreboards for the difficulty levels.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HighScores {
    /// Map of the [`ScoreBoard`] objects indexed by the difficulty name.
    board: HashMap<String, ScoreBoard>,
}

impl HighScores {
    /// Create a [`HighScores`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the string that is used as an index for the list of scoreboards.
    fn build_key(difficulty: Difficulty) -> String {
        difficulty.to_string().to_lowercase()
    }

    /// Add a final score to the scoreboard of the difficulty level and return the position in
    /// the scoreboard, or None if the score does not make it to the board.
    ///
    /// The returned position starts at 1 (top score). A score of zero is never recorded.
    pub fn add_score(
        &mut self,
        difficulty: Difficulty,
        points: u32,
        solved: usize,
    ) -> Option<usize> {
        if points == 0 {
            return None;
        }
        self.board
            .entry(Self::build_key(difficulty))
            .or_default()
            .add_score(HighScore {
                points,
                solved,
                when: SystemTime::now(),
            })
    }

    /// Return the list of [`HighScore`] for the difficulty level.
    ///
    /// Return None when the scoreboard is empty.
    pub fn get_scores(&self, difficulty: Difficulty) -> Option<&[HighScore]> {
        self.board
            .get(&Self::build_key(difficulty))
            .map(|b| b.top.as_slice())
            .filter(|top| !top.is_empty())
    }

    /// Return whether the list of scoreboards is empty.
    pub fn is_empty(&self) -> bool {
        self.board.values().all(|b| b.top.is_empty())
    }
}
