/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers tuning the automaton generator. They can also be
//! used to play a game in the terminal.
//!
//! # Examples
//!
//! Generate an automaton for the `cat` text and print its states and transitions:
//!
//! ```text
//! $ machina --pattern cat --seed 7
//! Text: "cat"
//! Start: q0  Accept: q3
//! Layer 0: q0 (175, 300)
//! Layer 1: q1 (325, 300)
//! Layer 2: q2 (475, 250)  q_extra_1 (475, 350)
//! Layer 3: q3 (625, 300)
//! Transitions:
//!   q0 --c--> q1
//!   ...
//! ```
//!
//! Generate 500 automata at the hard difficulty level and print some statistics:
//!
//! ```text
//! $ machina -p stack -f hard -c 500 -s
//! ```
//!
//! Play in the terminal. Type a state name, such as `q1`, or click coordinates, such as `325,300`:
//!
//! ```text
//! $ machina --play -p cat -p dog --time 30
//! ```

use chrono::{DateTime, Local};
use clap::Parser;
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use machina::config::{self, COPYRIGHT_NOTICE};
use machina::game::{FailReason, Game, GameConfig, GameEvent};
use machina::generator::automaton::{Automaton, StateId};
use machina::generator::difficulty::Difficulty;
use machina::generator::random_automaton::RandomAutomaton;
use machina::highscores::HighScores;
use machina::layout::{self, Bounds, Point};
use machina::saver;
use machina::saver::highscores::SaverHighScores;
use machina::traversal::MoveOutcome;

/// Texts the machine eats when no text is given in play mode.
const SAMPLE_TEXTS: [&str; 6] = ["cat", "moon", "abba", "rust", "stack", "queue"];

/// Build random Machina automata, or play in the terminal.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Text to build an automaton for. Repeat the option for several texts
    #[arg(short, long)]
    pattern: Vec<String>,

    /// Difficulty level for the automata
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Number of automata to generate for each text
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Print some statistics after generating the automata
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Play a game in the terminal
    #[arg(long, default_value_t = false)]
    play: bool,

    /// Seconds to solve each puzzle in play mode
    #[arg(short, long, default_value_t = config::TIMER_DURATION)]
    time: f64,

    /// Seed for the random generator
    #[arg(long)]
    seed: Option<u64>,

    /// Width of the drawing area
    #[arg(long, default_value_t = config::SCREEN_WIDTH)]
    width: f64,

    /// Height of the drawing area
    #[arg(long, default_value_t = config::SCREEN_HEIGHT)]
    height: f64,

    /// List the high scores
    #[arg(long, default_value_t = false)]
    scores: bool,

    /// Directory where the high scores are stored
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Generator statistics for the `--summary` option.
#[derive(Default)]
struct Stats {
    draws: usize,
    states: usize,
    transitions: usize,
    removed: usize,
    passes: usize,
    total: f32,
    max: f32,

    /// Automata that do not accept their text. Always zero unless there is a bug.
    failures: usize,
}

impl Stats {
    fn record(&mut self, generator: &RandomAutomaton, automaton: &Automaton, text: &str) {
        self.draws += 1;
        self.states += automaton.states().len();
        self.transitions += automaton.transitions().len();
        self.removed += generator.removed;
        self.passes += generator.passes;
        self.total += generator.duration;
        self.max = self.max.max(generator.duration);
        if !automaton.accepts_word(text) {
            eprintln!("Automaton does not accept {text:?}");
            automaton.debug();
            self.failures += 1;
        }
    }

    fn print(&self) {
        let n: f32 = self.draws.max(1) as f32;
        println!(
            "
             draws = {}
       mean states = {:.2}
  mean transitions = {:.2}
mean removed states = {:.2}
mean cleanup passes = {:.2}
      average time = {}s
          max time = {}s
acceptance failures = {}",
            self.draws,
            self.states as f32 / n,
            self.transitions as f32 / n,
            self.removed as f32 / n,
            self.passes as f32 / n,
            self.total / n,
            self.max,
            self.failures
        );
    }
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    if args.scores {
        return list_scores(&args);
    }
    if args.play {
        return play(&args);
    }
    if args.pattern.is_empty() {
        eprintln!("Nothing to do. Use --pattern, --play, or --scores. See --help.");
        return 2;
    }
    generate(&args)
}

/// Create the random generator, seeded when requested.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Generate the automata for the `--pattern` texts.
fn generate(args: &Args) -> u8 {
    let mut rng: StdRng = make_rng(args.seed);
    let bounds: Bounds = Bounds::new(args.width, args.height);
    let mut generator: RandomAutomaton =
        RandomAutomaton::new(args.difficulty.generator_config());
    let mut stats: Stats = Stats::default();

    for text in &args.pattern {
        for i in 0..args.count.max(1) {
            debug!("Iteration {i} for {text:?}");
            let mut automaton: Automaton = match generator.generate_with_rng(text, &mut rng) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Error: {text:?}: {e}");
                    return 1;
                }
            };
            layout::assign_positions(&mut automaton, bounds);
            stats.record(&generator, &automaton, text);
            if !args.summary {
                print_automaton(&automaton, text);
            }
        }
    }

    if args.summary {
        stats.print();
    }
    if stats.failures > 0 { 1 } else { 0 }
}

/// Print the states by layer, with their positions, and the transitions.
fn print_automaton(automaton: &Automaton, text: &str) {
    let accepts: Vec<String> = automaton.accepts().iter().map(|s| s.to_string()).collect();
    println!("Text: {text:?}");
    println!("Start: {}  Accept: {}", automaton.start(), accepts.join(" "));
    for (i, layer) in layout::layers(automaton).iter().enumerate() {
        let states: Vec<String> = layer
            .iter()
            .map(|s| match automaton.position(*s) {
                Some(p) => format!("{s} ({:.0}, {:.0})", p.x, p.y),
                None => s.to_string(),
            })
            .collect();
        println!("Layer {i}: {}", states.join("  "));
    }
    println!("Transitions:");
    for from in automaton.states() {
        for (symbol, destinations) in automaton.transitions().outgoing(*from) {
            for to in destinations {
                println!("  {from} --{symbol}--> {to}");
            }
        }
    }
    println!();
}

/// Player input in play mode.
enum Input {
    State(StateId),
    Click(Point),
    Quit,
}

/// Parse a line typed by the player: a state name, `x,y` coordinates, or `q` to quit.
fn parse_input(line: &str) -> Result<Input, String> {
    let line: &str = line.trim();
    if line == "q" || line == "quit" {
        return Ok(Input::Quit);
    }
    if let Some((x, y)) = line.split_once(',') {
        let x: f64 = x.trim().parse().map_err(|_| format!("Invalid coordinate: {x}"))?;
        let y: f64 = y.trim().parse().map_err(|_| format!("Invalid coordinate: {y}"))?;
        return Ok(Input::Click(Point::new(x, y)));
    }
    line.parse().map(Input::State)
}

/// Print the game events.
fn report(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::Refused { text, banned } => {
                println!("The machine refuses {text:?}: it does not eat {banned:?}")
            }
            GameEvent::Started { text } => println!("\n=== New text: {text:?} ==="),
            GameEvent::Solved { text, points } => println!("Solved {text:?}: +{points} points"),
            GameEvent::Failed { text, reason } => match reason {
                FailReason::WrongMove => println!("Wrong move, {text:?} is lost"),
                FailReason::Timeout => println!("Time is over, {text:?} is lost"),
            },
            GameEvent::QueueDone => println!("\nThe machine ate everything."),
            GameEvent::GameOver => println!("\nGame over."),
        }
    }
}

/// Print the puzzle in progress.
fn print_puzzle(game: &Game) {
    let Some(puzzle) = game.puzzle() else {
        return;
    };
    println!(
        "Output: {:?}  Time left: {}  Score: {}  Health: {}/{}",
        puzzle.traversal.output(),
        game.timer().time_string(),
        game.score().get(),
        game.health().get(),
        game.health().max()
    );
    for (state, p, status) in puzzle.diagram.nodes(&puzzle.traversal) {
        let marker: &str = if state == puzzle.traversal.current() {
            "*"
        } else {
            " "
        };
        println!("{marker} {state:<10} ({:>4.0}, {:>4.0})  {status:?}", p.x, p.y);
    }
    for edge in puzzle.diagram.edges() {
        println!("    {} --{}--> {}", edge.from, edge.label(), edge.to);
    }
}

/// Print the input prompt. The prompt has no newline, so the output must be flushed.
fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Play a game in the terminal.
fn play(args: &Args) -> u8 {
    let config: GameConfig = GameConfig {
        difficulty: args.difficulty,
        timer_duration: args.time,
        bounds: Bounds::new(args.width, args.height),
        ..GameConfig::default()
    };
    let mut game: Game = match args.seed {
        Some(s) => Game::with_seed(config, s),
        None => Game::new(config),
    };
    let texts: Vec<String> = if args.pattern.is_empty() {
        SAMPLE_TEXTS.iter().map(|s| s.to_string()).collect()
    } else {
        args.pattern.clone()
    };

    let banned: String = game.banned().chars().iter().collect();
    println!("The machine does not eat: {banned}");
    report(&game.feed(&texts));

    let mut lines = io::stdin().lock().lines();
    let mut last: Instant = Instant::now();
    while game.puzzle().is_some() {
        print_puzzle(&game);
        if let Err(e) = prompt(&mut io::stdout()) {
            warn!("Cannot write the prompt: {e}");
        }
        let line: String = match lines.next() {
            Some(Ok(l)) => l,
            _ => break,
        };

        // The time spent typing counts
        let now: Instant = Instant::now();
        let events: Vec<GameEvent> = game.tick(now.duration_since(last).as_secs_f64());
        last = now;
        if !events.is_empty() {
            report(&events);
            continue;
        }

        let outcome: Option<MoveOutcome> = match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::State(s)) => game.select(s),
            Ok(Input::Click(p)) => game.click(p),
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };
        match outcome {
            Some(MoveOutcome::Advanced { symbol, to }) => println!("{symbol:?} -> {to}"),
            Some(MoveOutcome::Wrong { symbol }) => println!("{symbol:?} is not the next symbol"),
            Some(MoveOutcome::Illegal) => println!("No transition to that state"),
            Some(MoveOutcome::Inactive) => (),
            None => println!("No state there"),
        }
        report(&game.tick(0.0));
    }

    let (solved, failed) = game.results();
    println!(
        "Final score: {}  Solved: {solved}  Lost: {failed}",
        game.score().get()
    );
    record_score(args, game.score().get(), solved);
    0
}

/// Return the high scores saver for the `--data-dir` directory or the user data directory.
fn highscores_saver(args: &Args) -> Option<SaverHighScores> {
    args.data_dir
        .clone()
        .or_else(saver::user_data_dir)
        .map(SaverHighScores::new)
}

/// Add the final score to the high scores and save them.
fn record_score(args: &Args, points: u32, solved: usize) {
    let Some(saver) = highscores_saver(args) else {
        warn!("No data directory, the score is not saved");
        return;
    };
    let mut highscores: HighScores = match saver.get_highscores() {
        Ok(Some(h)) => h,
        Ok(None) => HighScores::new(),
        Err(e) => {
            eprintln!("Cannot read the high scores: {e}");
            return;
        }
    };
    if let Some(position) = highscores.add_score(args.difficulty, points, solved) {
        println!("New high score! Position {position}");
        if let Err(e) = saver.save_highscores(&highscores) {
            eprintln!("Cannot save the high scores: {e}");
        }
    }
}

/// Print the high scores for each difficulty level.
fn list_scores(args: &Args) -> u8 {
    let Some(saver) = highscores_saver(args) else {
        eprintln!("No data directory. Use --data-dir.");
        return 1;
    };
    let highscores: HighScores = match saver.get_highscores() {
        Ok(Some(h)) => h,
        Ok(None) => HighScores::new(),
        Err(e) => {
            eprintln!("Cannot read the high scores: {e}");
            return 1;
        }
    };
    if highscores.is_empty() {
        println!("No high scores yet.");
        return 0;
    }
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let Some(top) = highscores.get_scores(difficulty) else {
            continue;
        };
        println!("{difficulty}");
        for (i, score) in top.iter().enumerate() {
            let when: DateTime<Local> = score.when.into();
            println!(
                "{:>3}. {:>6}  {:>3} solved  {}",
                i + 1,
                score.points,
                score.solved,
                when.format("%Y-%m-%d %H:%M")
            );
        }
    }
    0
}
