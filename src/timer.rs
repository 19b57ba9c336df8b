/*
timer.rs

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

//! Countdown timer for a puzzle.
//!
//! The timer does not read the clock. The owning scene advances it with the frame duration, and
//! the expiry is returned by [`Timer::update`].

use log::debug;

use crate::config;

/// How close the timer is to expiring. The renderer picks the timer colors from it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerLevel {
    Normal,
    Warning,
    Critical,
}

/// Result of a timer update.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The timer is stopped, paused, or still has time left.
    Running,

    /// The time left reached zero during this update.
    Expired,
}

/// Countdown timer object.
#[derive(Debug, Clone)]
pub struct Timer {
    /// Duration in seconds.
    duration: f64,

    /// Time left in seconds.
    time_left: f64,

    /// Whether the timer is started.
    running: bool,

    /// Whether the player paused the game.
    paused: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(config::TIMER_DURATION)
    }
}

impl Timer {
    /// Create a stopped [`Timer`] object.
    pub fn new(duration: f64) -> Self {
        let duration: f64 = duration.max(0.0);
        Self {
            duration,
            time_left: duration,
            running: false,
            paused: false,
        }
    }

    /// Start the timer from its full duration.
    pub fn start(&mut self) {
        self.time_left = self.duration;
        self.running = true;
        self.paused = false;
    }

    /// Stop the timer.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
    }

    /// Pause the timer.
    pub fn pause(&mut self) {
        if self.running {
            self.paused = true;
        }
    }

    /// Resume the timer.
    pub fn resume(&mut self) {
        if self.running {
            self.paused = false;
        }
    }

    /// Reset the timer to its full duration and start it.
    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    /// Add bonus time. The time left never exceeds the duration.
    pub fn add_time(&mut self, seconds: f64) {
        self.time_left = (self.time_left + seconds).min(self.duration);
    }

    /// Whether the timer is counting down.
    pub fn is_running(&self) -> bool {
        self.running && !self.paused
    }

    pub fn time_left(&self) -> f64 {
        self.time_left.max(0.0)
    }

    /// Return the fraction of time left, from 1.0 (full) to 0.0 (expired).
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.time_left / self.duration).clamp(0.0, 1.0)
    }

    /// Return the time left such as `4.2s`.
    pub fn time_string(&self) -> String {
        format!("{:.1}s", self.time_left())
    }

    /// Return how close the timer is to expiring.
    pub fn level(&self) -> TimerLevel {
        if self.time_left <= config::TIMER_CRITICAL {
            TimerLevel::Critical
        } else if self.time_left <= config::TIMER_WARNING {
            TimerLevel::Warning
        } else {
            TimerLevel::Normal
        }
    }

    /// Advance the timer by `dt` seconds.
    pub fn update(&mut self, dt: f64) -> TimerEvent {
        if !self.is_running() {
            return TimerEvent::Running;
        }
        self.time_left -= dt;
        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            self.running = false;
            debug!("Timer expired after {}s", self.duration);
            return TimerEvent::Expired;
        }
        TimerEvent::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_once() {
        let mut t = Timer::new(1.0);
        assert_eq!(t.update(2.0), TimerEvent::Running);
        t.start();
        assert_eq!(t.update(0.5), TimerEvent::Running);
        assert_eq!(t.time_string(), "0.5s");
        assert_eq!(t.update(0.6), TimerEvent::Expired);
        assert_eq!(t.time_left(), 0.0);
        assert_eq!(t.update(0.6), TimerEvent::Running);
        assert!(!t.is_running());
    }

    #[test]
    fn paused_timer_does_not_count() {
        let mut t = Timer::new(5.0);
        t.start();
        t.pause();
        assert_eq!(t.update(10.0), TimerEvent::Running);
        assert_eq!(t.progress(), 1.0);
        t.resume();
        t.update(2.5);
        assert_eq!(t.progress(), 0.5);
    }

    #[test]
    fn bonus_time_is_capped() {
        let mut t = Timer::new(5.0);
        t.start();
        t.update(1.0);
        assert_eq!(t.level(), TimerLevel::Normal);
        t.update(1.5);
        assert_eq!(t.level(), TimerLevel::Warning);
        t.add_time(10.0);
        assert_eq!(t.time_left(), 5.0);
        t.update(4.5);
        assert_eq!(t.level(), TimerLevel::Critical);
    }
}
