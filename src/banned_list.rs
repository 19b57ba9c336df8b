/*
banned_list.rs

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

//! Characters that the machine refuses to eat.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeSet;

/// List of banned lowercase letters.
#[derive(Debug, Clone, Default)]
pub struct BannedList {
    chars: BTreeSet<char>,
}

impl BannedList {
    /// Create an empty [`BannedList`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`BannedList`] object from the given characters.
    pub fn from_chars(chars: &[char]) -> Self {
        Self {
            chars: chars.iter().copied().collect(),
        }
    }

    /// Replace the list with `count` distinct random lowercase letters.
    pub fn generate<R: Rng>(&mut self, count: usize, rng: &mut R) {
        let letters: Vec<char> = ('a'..='z').collect();
        self.chars = letters
            .choose_multiple(rng, count.min(letters.len()))
            .copied()
            .collect();
        debug!("Banned characters = {:?}", self.chars);
    }

    pub fn chars(&self) -> &BTreeSet<char> {
        &self.chars
    }

    /// Return the first banned character of the text, or None if the text can be eaten.
    pub fn find_banned(&self, text: &str) -> Option<char> {
        text.chars().find(|c| self.chars.contains(c))
    }
}
