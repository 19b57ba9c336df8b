/*
config.rs

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

//! Package constants and gameplay defaults.

pub const PACKAGE_NAME: &str = "machina";
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Machina contributors\n",
    "License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.\n",
    "This is free software: you are free to change and redistribute it.\n",
    "There is NO WARRANTY, to the extent permitted by law."
);

/// Probability of adding a distractor branch per state and symbol.
pub const EXTRA_BRANCH_PROB: f64 = 0.3;

/// Number of distractor states added to the main path.
pub const MAX_EXTRA_STATES: usize = 3;

/// Probability of adding a self-loop per state and symbol.
pub const LOOP_PROB: f64 = 0.3;

/// Horizontal distance between two BFS layers.
pub const LAYER_SPACING: f64 = 150.0;

/// Vertical distance between two states of the same layer.
pub const NODE_SPACING: f64 = 100.0;

/// Smallest vertical coordinate of the first state of a layer.
pub const LAYOUT_MARGIN: f64 = 60.0;

/// Side of the square hit region around a state (the state sprites are 90x90).
pub const STATE_SIZE: f64 = 90.0;

/// Seconds the player gets to solve one automaton.
pub const TIMER_DURATION: f64 = 5.0;

/// Remaining seconds below which the timer is in warning.
pub const TIMER_WARNING: f64 = 3.0;

/// Remaining seconds below which the timer is critical.
pub const TIMER_CRITICAL: f64 = 1.0;

/// Lives at the beginning of a game.
pub const MAX_HEALTH: u32 = 3;

/// Number of lowercase letters the machine refuses to eat.
pub const BANNED_COUNT: usize = 8;

/// Points per symbol of a solved text.
pub const POINTS_PER_SYMBOL: u32 = 10;

/// Points removed after a wrong move.
pub const WRONG_PENALTY: u32 = 5;

/// Points removed when the timer expires.
pub const TIMEOUT_PENALTY: u32 = 5;

/// Default layout bounds (logical screen size of the game).
pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;
