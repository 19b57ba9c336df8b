/*
game.rs

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

//! Manage the status of a game in progress.
//!
//! The machine swallows texts. Each text becomes a puzzle that the player must solve before the
//! timer expires. A solved puzzle gives points, a lost puzzle costs points and a life.
//!
//! The [`Game`] object owns every component. The renderer calls [`Game::click`] for the player
//! input and [`Game::tick`] once per frame, and reacts to the returned [`GameEvent`]s.

use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;

use crate::banned_list::BannedList;
use crate::config;
use crate::diagram::{Diagram, DiagramConfig};
use crate::generator::automaton::{Automaton, StateId};
use crate::generator::difficulty::Difficulty;
use crate::generator::random_automaton::RandomAutomaton;
use crate::layout::{self, Bounds, LayoutConfig, Point};
use crate::score::{Health, Score};
use crate::timer::{Timer, TimerEvent};
use crate::traversal::{MoveOutcome, Resolution, Traversal};

/// Game parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GameConfig {
    pub difficulty: Difficulty,

    /// Seconds to solve a puzzle.
    pub timer_duration: f64,

    pub max_health: u32,

    /// Number of banned characters drawn when the game starts.
    pub banned_count: usize,

    pub points_per_symbol: u32,
    pub wrong_penalty: u32,
    pub timeout_penalty: u32,

    /// Area where the diagram is drawn.
    pub bounds: Bounds,

    pub layout: LayoutConfig,
    pub diagram: DiagramConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            timer_duration: config::TIMER_DURATION,
            max_health: config::MAX_HEALTH,
            banned_count: config::BANNED_COUNT,
            points_per_symbol: config::POINTS_PER_SYMBOL,
            wrong_penalty: config::WRONG_PENALTY,
            timeout_penalty: config::TIMEOUT_PENALTY,
            bounds: Bounds::default(),
            layout: LayoutConfig::default(),
            diagram: DiagramConfig::default(),
        }
    }
}

/// Why a puzzle was lost.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// The player followed a transition with the wrong symbol.
    WrongMove,

    /// The timer expired.
    Timeout,
}

/// What happened during a frame or after feeding texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The text contains a banned character. No puzzle is built for it.
    Refused { text: String, banned: char },

    /// A new puzzle is displayed.
    Started { text: String },

    /// The player solved the puzzle.
    Solved { text: String, points: u32 },

    /// The player lost the puzzle.
    Failed { text: String, reason: FailReason },

    /// No text is left to analyze.
    QueueDone,

    /// The player has no lives left.
    GameOver,
}

/// Puzzle in progress: the walk through the automaton and its diagram.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pub traversal: Traversal,
    pub diagram: Diagram,
}

impl Puzzle {
    /// Build the puzzle for an automaton: compute the layout, then the diagram.
    pub fn new(mut automaton: Automaton, text: &str, config: &GameConfig) -> Self {
        layout::assign_positions_with(&mut automaton, config.bounds, &config.layout);
        let diagram: Diagram = Diagram::new(&automaton, config.diagram);
        Self {
            traversal: Traversal::new(automaton, text),
            diagram,
        }
    }
}

/// Manage the status of the game in progress.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,

    /// Automaton generator for the difficulty level.
    generator: RandomAutomaton,

    /// Random generator for the automata and the banned characters.
    rng: StdRng,

    /// Characters the machine refuses.
    banned: BannedList,

    /// Texts waiting for analysis.
    queue: VecDeque<String>,

    /// Current puzzle.
    puzzle: Option<Puzzle>,

    /// Countdown for the current puzzle.
    timer: Timer,

    score: Score,
    health: Health,

    /// Number of solved puzzles.
    solved: usize,

    /// Number of lost puzzles.
    failed: usize,

    /// Whether the player paused the game.
    paused: bool,

    /// Whether the player lost all their lives.
    over: bool,
}

impl Game {
    /// Create a [`Game`] object seeded from the thread random generator.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create a [`Game`] object with a fixed seed, so that the same texts give the same puzzles.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let mut banned: BannedList = BannedList::new();
        banned.generate(config.banned_count, &mut rng);
        Self {
            generator: RandomAutomaton::new(config.difficulty.generator_config()),
            rng,
            banned,
            queue: VecDeque::new(),
            puzzle: None,
            timer: Timer::new(config.timer_duration),
            score: Score::new(),
            health: Health::new(config.max_health),
            solved: 0,
            failed: 0,
            paused: false,
            over: false,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn banned(&self) -> &BannedList {
        &self.banned
    }

    /// Replace the banned characters.
    pub fn set_banned(&mut self, banned: BannedList) {
        self.banned = banned;
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    /// Return the number of solved and lost puzzles.
    pub fn results(&self) -> (usize, usize) {
        (self.solved, self.failed)
    }

    /// Number of texts waiting after the current puzzle.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Pause the game. The timer stops and the clicks are ignored.
    pub fn pause(&mut self) {
        self.timer.pause();
        self.paused = true;
    }

    /// Resume the game.
    pub fn resume(&mut self) {
        self.timer.resume();
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Give texts to the machine. If no puzzle is in progress, then the first acceptable text
    /// becomes the new puzzle.
    pub fn feed<I, S>(&mut self, texts: I) -> Vec<GameEvent>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut events: Vec<GameEvent> = Vec::new();
        if self.over {
            return events;
        }
        self.queue
            .extend(texts.into_iter().map(|t| t.as_ref().trim().to_lowercase()));
        if self.puzzle.is_none() {
            self.start_next(&mut events);
        }
        events
    }

    /// Start the puzzle for the next acceptable text in the queue.
    fn start_next(&mut self, events: &mut Vec<GameEvent>) {
        while let Some(text) = self.queue.pop_front() {
            if text.is_empty() {
                continue;
            }
            if let Some(c) = self.banned.find_banned(&text) {
                debug!("Refusing {text:?}: {c:?} is banned");
                events.push(GameEvent::Refused { text, banned: c });
                continue;
            }
            match self.generator.generate_with_rng(&text, &mut self.rng) {
                Ok(automaton) => {
                    self.puzzle = Some(Puzzle::new(automaton, &text, &self.config));
                    self.timer.restart();
                    events.push(GameEvent::Started { text });
                    return;
                }
                Err(e) => warn!("Cannot build a puzzle for {text:?}: {e}"),
            }
        }
        events.push(GameEvent::QueueDone);
    }

    /// Process a click at the given screen position.
    ///
    /// Return None if there is no puzzle, if the game is paused, or if the click is outside the
    /// states.
    pub fn click(&mut self, p: Point) -> Option<MoveOutcome> {
        if self.paused {
            return None;
        }
        let puzzle: &mut Puzzle = self.puzzle.as_mut()?;
        puzzle.diagram.click(&mut puzzle.traversal, p)
    }

    /// Try to move to the given state, as if the player clicked it.
    pub fn select(&mut self, state: StateId) -> Option<MoveOutcome> {
        if self.paused {
            return None;
        }
        let puzzle: &mut Puzzle = self.puzzle.as_mut()?;
        Some(puzzle.traversal.attempt_transition(state))
    }

    /// Advance the game by `dt` seconds: update the timer and check whether the puzzle is
    /// resolved.
    pub fn tick(&mut self, dt: f64) -> Vec<GameEvent> {
        let mut events: Vec<GameEvent> = Vec::new();
        if self.over || self.paused {
            return events;
        }

        let (resolution, text, timed_out) = match self.puzzle.as_mut() {
            Some(puzzle) => {
                if self.timer.update(dt) == TimerEvent::Expired {
                    puzzle.traversal.expire();
                }
                (
                    puzzle.traversal.resolve(),
                    puzzle.traversal.target().to_string(),
                    puzzle.traversal.is_timed_out(),
                )
            }
            None => return events,
        };

        match resolution {
            Resolution::Pending => return events,
            Resolution::Accepted => {
                let points: u32 = self
                    .config
                    .points_per_symbol
                    .saturating_mul(text.chars().count() as u32);
                self.score.add(points);
                self.solved += 1;
                events.push(GameEvent::Solved { text, points });
            }
            Resolution::Failed => {
                let reason: FailReason = if timed_out {
                    self.score.subtract(self.config.timeout_penalty);
                    FailReason::Timeout
                } else {
                    self.score.subtract(self.config.wrong_penalty);
                    FailReason::WrongMove
                };
                self.health.take_damage(1);
                self.failed += 1;
                events.push(GameEvent::Failed { text, reason });
            }
        }

        self.timer.stop();
        self.puzzle = None;
        if !self.health.is_alive() {
            debug!("Game over: score = {}", self.score.get());
            self.over = true;
            self.queue.clear();
            events.push(GameEvent::GameOver);
            return events;
        }
        self.start_next(&mut events);
        events
    }
}
