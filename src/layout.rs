/*
layout.rs

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

//! Place the automaton states on the screen.
//!
//! The states are grouped in layers by their breadth-first distance from the start state.
//! Layers become columns, from left to right, and the states of a layer are stacked in the
//! column.
//! The whole diagram is centered in the provided bounds.

use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use crate::config;
use crate::generator::automaton::{Automaton, StateId};

/// Point in screen coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Size of the area where the diagram is drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: config::SCREEN_WIDTH,
            height: config::SCREEN_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of the area.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Layout spacing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal distance between two layers.
    pub layer_spacing: f64,

    /// Vertical distance between two states in a layer.
    pub node_spacing: f64,

    /// Smallest vertical coordinate of a state.
    pub margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layer_spacing: config::LAYER_SPACING,
            node_spacing: config::NODE_SPACING,
            margin: config::LAYOUT_MARGIN,
        }
    }
}

/// Group the states by BFS layer, as given by [`Automaton::layers`].
///
/// Inside a layer, the states are in discovery order. States that cannot be reached from the
/// start state go to the first layer, after the start state.
pub fn layers(automaton: &Automaton) -> Vec<Vec<StateId>> {
    let depths: BTreeMap<StateId, usize> = automaton.layers();
    let mut order: Vec<StateId> = automaton.bfs().into_iter().map(|(s, _)| s).collect();
    let reached: BTreeSet<StateId> = order.iter().copied().collect();
    for state in automaton.states().difference(&reached) {
        debug!("State {state} is not reachable: using the first layer");
        order.push(*state);
    }

    let mut layers: Vec<Vec<StateId>> = Vec::new();
    for state in order {
        let depth: usize = depths.get(&state).copied().unwrap_or(0);
        if layers.len() <= depth {
            layers.resize_with(depth + 1, Vec::new);
        }
        layers[depth].push(state);
    }
    layers
}

/// Compute the position of every state with the default spacing.
pub fn assign_positions(automaton: &mut Automaton, bounds: Bounds) {
    assign_positions_with(automaton, bounds, &LayoutConfig::default());
}

/// Compute the position of every state.
pub fn assign_positions_with(automaton: &mut Automaton, bounds: Bounds, config: &LayoutConfig) {
    let layers: Vec<Vec<StateId>> = layers(automaton);

    // Center the columns in the width
    let total_width: f64 = layers.len().saturating_sub(1) as f64 * config.layer_spacing;
    let x_start: f64 = (bounds.width - total_width) / 2.0;

    for (depth, nodes) in layers.iter().enumerate() {
        let x: f64 = x_start + depth as f64 * config.layer_spacing;

        // Center the column in the height, without going above the margin
        let total_height: f64 = nodes.len().saturating_sub(1) as f64 * config.node_spacing;
        let y_start: f64 = ((bounds.height - total_height) / 2.0).max(config.margin);

        for (i, state) in nodes.iter().enumerate() {
            let p: Point = Point::new(x, y_start + i as f64 * config.node_spacing);
            debug!("Layer {depth}: {state} at ({}, {})", p.x, p.y);
            automaton.set_position(*state, p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::transitions::Transitions;

    fn chain(n: usize) -> Automaton {
        let states: BTreeSet<StateId> = (0..=n).map(StateId::Main).collect();
        let alphabet: BTreeSet<char> = BTreeSet::from(['a']);
        let mut t = Transitions::new(&states, &alphabet);
        for i in 0..n {
            t.add(StateId::Main(i), 'a', StateId::Main(i + 1)).unwrap();
        }
        Automaton::new(
            states,
            alphabet,
            StateId::Main(0),
            BTreeSet::from([StateId::Main(n)]),
            t,
        )
    }

    #[test]
    fn single_state_is_centered() {
        let mut a = chain(0);
        assign_positions(&mut a, Bounds::new(800.0, 600.0));
        assert_eq!(a.position(StateId::Main(0)), Some(Point::new(400.0, 300.0)));
    }

    #[test]
    fn columns_are_centered_and_evenly_spaced() {
        let mut a = chain(3);
        assign_positions(&mut a, Bounds::new(800.0, 600.0));
        let xs: Vec<f64> = (0..=3).map(|i| a.position(StateId::Main(i)).unwrap().x).collect();
        assert_eq!(xs, vec![175.0, 325.0, 475.0, 625.0]);
        assert!(a.positions().values().all(|p| p.y == 300.0));
    }

    #[test]
    fn crowded_layer_is_clamped_to_the_margin() {
        let states: BTreeSet<StateId> = std::iter::once(StateId::Main(0))
            .chain((0..8).map(StateId::Extra))
            .collect();
        let alphabet: BTreeSet<char> = BTreeSet::from(['a']);
        let mut t = Transitions::new(&states, &alphabet);
        for i in 0..8 {
            t.add(StateId::Main(0), 'a', StateId::Extra(i)).unwrap();
        }
        let mut a = Automaton::new(
            states,
            alphabet,
            StateId::Main(0),
            BTreeSet::from([StateId::Extra(0)]),
            t,
        );
        assign_positions(&mut a, Bounds::new(800.0, 400.0));
        assert_eq!(a.position(StateId::Extra(0)).unwrap().y, 60.0);
        assert_eq!(a.position(StateId::Extra(7)).unwrap().y, 760.0);
        assert_eq!(a.positions().len(), 9);
    }

    #[test]
    fn unreachable_states_fall_back_to_the_first_layer() {
        let states: BTreeSet<StateId> =
            BTreeSet::from([StateId::Main(0), StateId::Main(1), StateId::Extra(0)]);
        let alphabet: BTreeSet<char> = BTreeSet::from(['a']);
        let mut t = Transitions::new(&states, &alphabet);
        t.add(StateId::Main(0), 'a', StateId::Main(1)).unwrap();
        let a = Automaton::new(
            states,
            alphabet,
            StateId::Main(0),
            BTreeSet::from([StateId::Main(1)]),
            t,
        );
        let l = layers(&a);
        assert_eq!(l, vec![vec![StateId::Main(0), StateId::Extra(0)], vec![StateId::Main(1)]]);
    }

    #[test]
    fn columns_match_the_automaton_layers() {
        let states: BTreeSet<StateId> = (0..3)
            .map(StateId::Main)
            .chain([StateId::Extra(0), StateId::Extra(1)])
            .collect();
        let alphabet: BTreeSet<char> = BTreeSet::from(['a', 'b']);
        let mut t = Transitions::new(&states, &alphabet);
        t.add(StateId::Main(0), 'a', StateId::Main(1)).unwrap();
        t.add(StateId::Main(1), 'b', StateId::Main(2)).unwrap();
        t.add(StateId::Main(0), 'b', StateId::Extra(0)).unwrap();
        t.add(StateId::Extra(0), 'a', StateId::Main(2)).unwrap();
        t.add(StateId::Extra(1), 'a', StateId::Main(0)).unwrap();
        let a = Automaton::new(
            states,
            alphabet,
            StateId::Main(0),
            BTreeSet::from([StateId::Main(2)]),
            t,
        );
        let depths = a.layers();
        let l = layers(&a);
        for (depth, nodes) in l.iter().enumerate() {
            for state in nodes {
                assert_eq!(depths[state], depth);
            }
        }
        assert_eq!(l.iter().map(Vec::len).sum::<usize>(), a.states().len());
        assert_eq!(l[0], vec![StateId::Main(0), StateId::Extra(1)]);
    }
}
