/*
saver.rs

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

//! Save and restore objects to files in the user data directory.

pub mod highscores;

use directories::ProjectDirs;
use std::path::PathBuf;

use crate::config::PACKAGE_NAME;

/// Return the directory where Machina stores its files, such as `~/.local/share/machina` on
/// Linux.
///
/// Return None when the home directory of the user cannot be found.
pub fn user_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", PACKAGE_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}
