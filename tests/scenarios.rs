/*
scenarios.rs

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

use std::collections::BTreeSet;
use test_case::test_case;

use machina::banned_list::BannedList;
use machina::diagram::{Diagram, DiagramConfig};
use machina::game::{FailReason, Game, GameConfig, GameEvent};
use machina::generator::automaton::{Automaton, StateId};
use machina::generator::difficulty::GeneratorConfig;
use machina::generator::random_automaton::RandomAutomaton;
use machina::generator::transitions::Transitions;
use machina::layout::{self, Bounds, Point};
use machina::traversal::{MoveOutcome, Resolution, StateStatus, Traversal};

/// q0 --c--> q1 --a--> q2 --t--> q3, with the distractor q1 --t--> q_extra_0 --a--> q3.
fn cat() -> Automaton {
    let states: BTreeSet<StateId> = (0..4)
        .map(StateId::Main)
        .chain([StateId::Extra(0)])
        .collect();
    let alphabet: BTreeSet<char> = BTreeSet::from(['a', 'c', 't']);
    let mut t = Transitions::new(&states, &alphabet);
    t.add(StateId::Main(0), 'c', StateId::Main(1)).unwrap();
    t.add(StateId::Main(1), 'a', StateId::Main(2)).unwrap();
    t.add(StateId::Main(2), 't', StateId::Main(3)).unwrap();
    t.add(StateId::Main(1), 't', StateId::Extra(0)).unwrap();
    t.add(StateId::Extra(0), 'a', StateId::Main(3)).unwrap();
    let mut a = Automaton::new(
        states,
        alphabet,
        StateId::Main(0),
        BTreeSet::from([StateId::Main(3)]),
        t,
    );
    layout::assign_positions(&mut a, Bounds::default());
    a
}

/// Bare path for "aa": q0 --a--> q1 --a--> q2, plus the loop on q1.
fn aa() -> Automaton {
    let mut g = RandomAutomaton::new(GeneratorConfig::without_distractors());
    let mut a = g.generate("aa").unwrap();
    layout::assign_positions(&mut a, Bounds::default());
    a
}

/// Click the states through the diagram, then run the resolution check.
fn play(automaton: Automaton, target: &str, clicks: &[StateId]) -> (Traversal, Resolution) {
    let diagram = Diagram::new(&automaton, DiagramConfig::default());
    let mut traversal = Traversal::new(automaton, target);
    for state in clicks {
        let p: Point = diagram.center(*state).unwrap();
        assert!(diagram.click(&mut traversal, p).is_some());
    }
    let resolution = traversal.resolve();
    (traversal, resolution)
}

#[test_case(&[StateId::Main(1), StateId::Main(2), StateId::Main(3)], Resolution::Accepted ; "main path wins")]
#[test_case(&[StateId::Main(1), StateId::Extra(0)], Resolution::Failed ; "distractor symbol loses")]
#[test_case(&[StateId::Main(1), StateId::Main(2)], Resolution::Pending ; "half way is pending")]
#[test_case(&[StateId::Main(3)], Resolution::Pending ; "illegal click is ignored")]
fn cat_scenario(clicks: &[StateId], expected: Resolution) {
    let (traversal, resolution) = play(cat(), "cat", clicks);
    assert_eq!(resolution, expected);
    assert!("cat".starts_with(traversal.output()) || resolution == Resolution::Failed);
}

#[test]
fn wrong_symbol_marks_the_departed_state() {
    let (traversal, _) = play(cat(), "cat", &[StateId::Main(1), StateId::Extra(0)]);
    assert_eq!(traversal.output(), "ct");
    assert_eq!(traversal.current(), StateId::Main(1));
    assert_eq!(traversal.status(StateId::Main(0)), StateStatus::Right);
    assert_eq!(traversal.status(StateId::Main(1)), StateStatus::Wrong);
    assert!(!traversal.is_analyzing());
    assert!(traversal.signals().failed);
}

#[test]
fn first_move_marks_the_path() {
    let (traversal, _) = play(cat(), "cat", &[StateId::Main(1)]);
    assert_eq!(traversal.output(), "c");
    assert_eq!(traversal.status(StateId::Main(0)), StateStatus::Right);
    assert_eq!(traversal.status(StateId::Main(2)), StateStatus::Current);
    assert_eq!(traversal.status(StateId::Extra(0)), StateStatus::Current);
}

#[test_case(&[StateId::Main(1), StateId::Main(2)], Resolution::Accepted ; "main path")]
#[test_case(&[StateId::Main(1), StateId::Main(1), StateId::Main(2)], Resolution::Failed ; "loop then accept state overshoots")]
fn aa_scenario(clicks: &[StateId], expected: Resolution) {
    let (_, resolution) = play(aa(), "aa", clicks);
    assert_eq!(resolution, expected);
}

#[test]
fn self_loop_is_a_trap() {
    let a = aa();
    assert_eq!(
        a.transitions().get(StateId::Main(1), 'a'),
        Some(&BTreeSet::from([StateId::Main(1), StateId::Main(2)]))
    );

    let (mut traversal, resolution) = play(a, "aa", &[StateId::Main(1), StateId::Main(1)]);
    let signals = traversal.signals();
    assert!(signals.completed);
    assert!(!signals.accepted);
    assert!(!signals.failed);
    assert_eq!(resolution, Resolution::Pending);

    traversal.expire();
    assert_eq!(traversal.resolve(), Resolution::Failed);
    assert_eq!(
        traversal.attempt_transition(StateId::Main(2)),
        MoveOutcome::Inactive
    );
}

#[test]
fn game_loses_the_trapped_puzzle_on_timeout() {
    let mut game = Game::with_seed(GameConfig::default(), 11);
    game.set_banned(BannedList::new());

    assert_eq!(
        game.feed(["aa"]),
        vec![GameEvent::Started {
            text: "aa".to_string()
        }]
    );
    assert!(
        game.puzzle()
            .unwrap()
            .traversal
            .automaton()
            .accepts_word("aa")
    );

    assert!(matches!(
        game.select(StateId::Main(1)),
        Some(MoveOutcome::Advanced { symbol: 'a', .. })
    ));
    assert!(game.tick(0.5).is_empty());
    let events = game.tick(60.0);
    assert_eq!(
        events,
        vec![
            GameEvent::Failed {
                text: "aa".to_string(),
                reason: FailReason::Timeout
            },
            GameEvent::QueueDone,
        ]
    );
    assert_eq!(game.health().get(), game.health().max() - 1);
}
