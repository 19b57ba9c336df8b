/*
score.rs

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

//! Manage the player's score and health.

use log::debug;

/// Score of the game in progress.
#[derive(Debug, Clone, Default)]
pub struct Score {
    current: u32,
    highest: u32,
}

impl Score {
    /// Create a [`Score`] object.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u32 {
        self.current
    }

    /// Highest score reached since the object was created.
    pub fn highest(&self) -> u32 {
        self.highest
    }

    pub fn add(&mut self, points: u32) {
        self.current = self.current.saturating_add(points);
        self.highest = self.highest.max(self.current);
        debug!("Score + {points} = {}", self.current);
    }

    /// Remove points. The score never goes below zero.
    pub fn subtract(&mut self, points: u32) {
        self.current = self.current.saturating_sub(points);
        debug!("Score - {points} = {}", self.current);
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

/// Player's lives.
#[derive(Debug, Clone)]
pub struct Health {
    max: u32,
    current: u32,
}

impl Health {
    /// Create a [`Health`] object with all the lives.
    pub fn new(max: u32) -> Self {
        Self { max, current: max }
    }

    pub fn get(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Remove lives. The health never goes below zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
        debug!("Health - {amount} = {}", self.current);
    }

    /// Give lives back. The health never goes above the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}
