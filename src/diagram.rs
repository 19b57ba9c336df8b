/*
diagram.rs

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

//! Diagram geometry and player clicks.
//!
//! The [`Diagram`] object does not draw anything. It provides the renderer with the state
//! positions, the arrows to draw between the states, and it converts a click on the screen into a
//! move in the [`Traversal`].

use log::{Level, debug, log_enabled};
use std::collections::BTreeMap;

use crate::config;
use crate::generator::automaton::{Automaton, StateId};
use crate::layout::Point;
use crate::traversal::{MoveOutcome, StateStatus, Traversal};

/// Diagram sizes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DiagramConfig {
    /// Side of the square region around a state that reacts to clicks.
    pub state_size: f64,

    /// Distance between the center of a state and the ends of its arrows.
    pub arrow_inset: f64,

    /// Distance between an arrow and its label.
    pub label_offset: f64,

    /// Distance between the middle of a curved arrow and its control point.
    pub curve_height: f64,

    /// Radius of the circle drawn for a self-loop.
    pub self_loop_radius: f64,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            state_size: config::STATE_SIZE,
            arrow_inset: 55.0,
            label_offset: 20.0,
            curve_height: 60.0,
            self_loop_radius: 30.0,
        }
    }
}

/// How an edge is drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EdgeShape {
    /// Between two states in the same or in adjacent layers.
    Straight,

    /// From a state to itself.
    SelfLoop,

    /// Between two states more than one layer apart, so that the arrow goes around the layers in
    /// between.
    Curved,
}

/// All the transitions between two states, drawn as a single arrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEdge {
    pub from: StateId,
    pub to: StateId,

    /// Symbols of the transitions, in ascending order.
    pub symbols: Vec<char>,

    pub shape: EdgeShape,
}

impl DiagramEdge {
    /// Label of the arrow, such as `a,b`.
    pub fn label(&self) -> String {
        self.symbols
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(",")
    }
}

/// Geometry of an arrow, in screen coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Arrow {
    Straight {
        start: Point,
        end: Point,
        label: Point,
    },
    Curved {
        start: Point,
        control: Point,
        end: Point,
        label: Point,
    },
    SelfLoop {
        center: Point,
        radius: f64,
        label: Point,
    },
}

/// Details of a drawn state. This is used to quickly identify a state from a click position.
#[derive(Debug, Copy, Clone, PartialEq)]
struct StateRegion {
    state: StateId,
    center: Point,
}

/// Diagram object.
#[derive(Debug, Clone)]
pub struct Diagram {
    /// Click regions, one per positioned state.
    regions: Vec<StateRegion>,

    /// Arrows between the states.
    edges: Vec<DiagramEdge>,

    /// BFS layer of each state.
    layers: BTreeMap<StateId, usize>,

    /// Start state, which receives an extra incoming arrow.
    start: StateId,

    config: DiagramConfig,
}

impl Diagram {
    /// Create a [`Diagram`] object for an automaton whose positions are already computed.
    pub fn new(automaton: &Automaton, config: DiagramConfig) -> Self {
        let regions: Vec<StateRegion> = automaton
            .positions()
            .iter()
            .map(|(state, center)| StateRegion {
                state: *state,
                center: *center,
            })
            .collect();
        let layers: BTreeMap<StateId, usize> = automaton.layers();

        // Group the symbols by pair of states
        let mut groups: BTreeMap<(StateId, StateId), Vec<char>> = BTreeMap::new();
        for from in automaton.states() {
            for (symbol, destinations) in automaton.transitions().outgoing(*from) {
                for to in destinations {
                    groups.entry((*from, *to)).or_default().push(symbol);
                }
            }
        }

        let edges: Vec<DiagramEdge> = groups
            .into_iter()
            .map(|((from, to), symbols)| DiagramEdge {
                from,
                to,
                symbols,
                shape: Self::shape(&layers, from, to),
            })
            .collect();

        if log_enabled!(Level::Debug) {
            for e in &edges {
                debug!("Edge {} --{}--> {} {:?}", e.from, e.label(), e.to, e.shape);
            }
        }

        Self {
            regions,
            edges,
            layers,
            start: automaton.start(),
            config,
        }
    }

    /// Return how to draw the edge between the two states.
    fn shape(layers: &BTreeMap<StateId, usize>, from: StateId, to: StateId) -> EdgeShape {
        if from == to {
            return EdgeShape::SelfLoop;
        }
        let l1: usize = layers.get(&from).copied().unwrap_or(0);
        let l2: usize = layers.get(&to).copied().unwrap_or(0);
        if l1.abs_diff(l2) > 1 {
            EdgeShape::Curved
        } else {
            EdgeShape::Straight
        }
    }

    pub fn edges(&self) -> &[DiagramEdge] {
        &self.edges
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Return the BFS layer of the state.
    pub fn layer(&self, state: StateId) -> usize {
        self.layers.get(&state).copied().unwrap_or(0)
    }

    /// Return the center of the state.
    pub fn center(&self, state: StateId) -> Option<Point> {
        self.regions
            .iter()
            .find(|r| r.state == state)
            .map(|r| r.center)
    }

    /// Return each state with its position and its status in the traversal.
    pub fn nodes(&self, traversal: &Traversal) -> Vec<(StateId, Point, StateStatus)> {
        self.regions
            .iter()
            .map(|r| (r.state, r.center, traversal.status(r.state)))
            .collect()
    }

    /// Return the state under the given screen position, or None if the position is outside all
    /// the states.
    ///
    /// If the regions of two states overlap, then the closest state wins.
    pub fn hit_test(&self, p: Point) -> Option<StateId> {
        let half: f64 = self.config.state_size / 2.0;

        debug!("Finding clicked state: screen coordinates ({}, {}):", p.x, p.y);

        let hit: Option<&StateRegion> = self
            .regions
            .iter()
            .filter(|r| (r.center.x - p.x).abs() <= half && (r.center.y - p.y).abs() <= half)
            .min_by(|r1, r2| r1.center.distance(p).total_cmp(&r2.center.distance(p)));
        match hit {
            Some(r) => {
                debug!("  Click in state {}", r.state);
                Some(r.state)
            }
            None => {
                debug!("  No state at the screen coordinates");
                None
            }
        }
    }

    /// Process a click: find the clicked state and try to move to it.
    ///
    /// Return None if the click is outside all the states.
    pub fn click(&self, traversal: &mut Traversal, p: Point) -> Option<MoveOutcome> {
        self.hit_test(p)
            .map(|state| traversal.attempt_transition(state))
    }

    /// Return the arrow that points to the start state from its left.
    pub fn start_arrow(&self) -> Option<(Point, Point)> {
        let center: Point = self.center(self.start)?;
        let half: f64 = self.config.state_size / 2.0;
        Some((
            Point::new(center.x - half - self.config.label_offset * 2.0, center.y),
            Point::new(center.x - half, center.y),
        ))
    }

    /// Return the geometry of the edge arrow, or None if a state has no position.
    pub fn arrow(&self, edge: &DiagramEdge) -> Option<Arrow> {
        let from: Point = self.center(edge.from)?;
        let to: Point = self.center(edge.to)?;

        if edge.shape == EdgeShape::SelfLoop {
            let radius: f64 = self.config.self_loop_radius;
            let center: Point =
                Point::new(from.x, from.y - self.config.state_size / 2.0 - radius / 2.0);
            return Some(Arrow::SelfLoop {
                center,
                radius,
                label: Point::new(center.x, center.y - radius - self.config.label_offset),
            });
        }

        let distance: f64 = from.distance(to);
        if distance == 0.0 {
            return None;
        }

        // Unit vector along the arrow, and its perpendicular
        let dx: f64 = (to.x - from.x) / distance;
        let dy: f64 = (to.y - from.y) / distance;
        let (px, py): (f64, f64) = (-dy, dx);
        let middle: Point = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);

        if edge.shape == EdgeShape::Curved {
            let h: f64 = self.config.curve_height;
            let control: Point = Point::new(middle.x + px * h, middle.y + py * h);
            // Ends leave the states in the direction of the control point
            let start: Point = Self::toward(from, control, self.config.arrow_inset);
            let end: Point = Self::toward(to, control, self.config.arrow_inset);
            // Middle of the quadratic curve
            let top: Point = Point::new(
                (start.x + 2.0 * control.x + end.x) / 4.0,
                (start.y + 2.0 * control.y + end.y) / 4.0,
            );
            return Some(Arrow::Curved {
                start,
                control,
                end,
                label: Point::new(
                    top.x + px * self.config.label_offset,
                    top.y + py * self.config.label_offset,
                ),
            });
        }

        let inset: f64 = self.config.arrow_inset;
        Some(Arrow::Straight {
            start: Point::new(from.x + dx * inset, from.y + dy * inset),
            end: Point::new(to.x - dx * inset, to.y - dy * inset),
            label: Point::new(
                middle.x + px * self.config.label_offset,
                middle.y + py * self.config.label_offset,
            ),
        })
    }

    /// Move `distance` from `origin` toward `target`.
    fn toward(origin: Point, target: Point, distance: f64) -> Point {
        let d: f64 = origin.distance(target);
        if d == 0.0 {
            return origin;
        }
        Point::new(
            origin.x + (target.x - origin.x) / d * distance,
            origin.y + (target.y - origin.y) / d * distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::transitions::Transitions;
    use crate::layout::{Bounds, assign_positions};
    use std::collections::BTreeSet;

    /// Layers: q0 | q1 q_extra_0 | q2 | q3, with a loop on q1 and a way back from q3 to q0.
    fn sample() -> Automaton {
        let states: BTreeSet<StateId> = (0..4)
            .map(StateId::Main)
            .chain(std::iter::once(StateId::Extra(0)))
            .collect();
        let alphabet: BTreeSet<char> = BTreeSet::from(['a', 'b']);
        let mut t = Transitions::new(&states, &alphabet);
        t.add(StateId::Main(0), 'a', StateId::Main(1)).unwrap();
        t.add(StateId::Main(1), 'b', StateId::Main(2)).unwrap();
        t.add(StateId::Main(1), 'a', StateId::Main(1)).unwrap();
        t.add(StateId::Main(2), 'b', StateId::Main(3)).unwrap();
        t.add(StateId::Main(3), 'a', StateId::Main(0)).unwrap();
        t.add(StateId::Main(0), 'b', StateId::Extra(0)).unwrap();
        t.add(StateId::Main(0), 'a', StateId::Extra(0)).unwrap();
        t.add(StateId::Extra(0), 'a', StateId::Main(2)).unwrap();
        let mut a = Automaton::new(
            states,
            alphabet,
            StateId::Main(0),
            BTreeSet::from([StateId::Main(3)]),
            t,
        );
        assign_positions(&mut a, Bounds::new(800.0, 600.0));
        a
    }

    fn edge(d: &Diagram, from: StateId, to: StateId) -> DiagramEdge {
        d.edges()
            .iter()
            .find(|e| e.from == from && e.to == to)
            .cloned()
            .unwrap()
    }

    #[test]
    fn symbols_are_grouped_per_pair_of_states() {
        let d = Diagram::new(&sample(), DiagramConfig::default());
        assert_eq!(d.edges().len(), 7);
        let e = edge(&d, StateId::Main(0), StateId::Extra(0));
        assert_eq!(e.symbols, vec!['a', 'b']);
        assert_eq!(e.label(), "a,b");
    }

    #[test]
    fn edge_shapes_follow_the_layers() {
        let d = Diagram::new(&sample(), DiagramConfig::default());
        assert_eq!(d.layer(StateId::Main(3)), 3);
        assert_eq!(edge(&d, StateId::Main(0), StateId::Main(1)).shape, EdgeShape::Straight);
        assert_eq!(edge(&d, StateId::Main(1), StateId::Main(1)).shape, EdgeShape::SelfLoop);
        assert_eq!(edge(&d, StateId::Main(3), StateId::Main(0)).shape, EdgeShape::Curved);
        assert_eq!(edge(&d, StateId::Extra(0), StateId::Main(2)).shape, EdgeShape::Straight);
    }

    #[test]
    fn clicks_inside_the_square_hit_the_state() {
        let a = sample();
        let d = Diagram::new(&a, DiagramConfig::default());
        let c = a.position(StateId::Main(1)).unwrap();
        assert_eq!(d.hit_test(c), Some(StateId::Main(1)));
        assert_eq!(d.hit_test(Point::new(c.x + 44.0, c.y - 44.0)), Some(StateId::Main(1)));
        assert_eq!(d.hit_test(Point::new(c.x + 46.0, c.y)), None);
        assert_eq!(d.hit_test(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn click_forwards_the_move() {
        let a = sample();
        let d = Diagram::new(&a, DiagramConfig::default());
        let mut t = Traversal::new(a.clone(), "abb");
        assert_eq!(d.click(&mut t, Point::new(1.0, 1.0)), None);
        let p2 = a.position(StateId::Main(2)).unwrap();
        assert_eq!(d.click(&mut t, p2), Some(MoveOutcome::Illegal));
        let p1 = a.position(StateId::Main(1)).unwrap();
        assert_eq!(
            d.click(&mut t, p1),
            Some(MoveOutcome::Advanced {
                symbol: 'a',
                to: StateId::Main(1)
            })
        );
        let p0 = a.position(StateId::Main(0)).unwrap();
        assert!(d.nodes(&t).contains(&(StateId::Main(0), p0, StateStatus::Right)));
    }

    #[test]
    fn straight_arrows_stop_before_the_states() {
        let a = sample();
        let d = Diagram::new(&a, DiagramConfig::default());
        let from = a.position(StateId::Main(0)).unwrap();
        let to = a.position(StateId::Main(1)).unwrap();
        match d.arrow(&edge(&d, StateId::Main(0), StateId::Main(1))) {
            Some(Arrow::Straight { start, end, .. }) => {
                assert!((start.distance(from) - 55.0).abs() < 1e-9);
                assert!((end.distance(to) - 55.0).abs() < 1e-9);
            }
            other => panic!("unexpected arrow {other:?}"),
        }
        assert!(matches!(
            d.arrow(&edge(&d, StateId::Main(3), StateId::Main(0))),
            Some(Arrow::Curved { .. })
        ));
        match d.arrow(&edge(&d, StateId::Main(1), StateId::Main(1))) {
            Some(Arrow::SelfLoop { center, .. }) => assert!(center.y < to.y),
            other => panic!("unexpected arrow {other:?}"),
        }
        let (tail, head) = d.start_arrow().unwrap();
        assert!(tail.x < head.x);
        assert_eq!(head.y, from.y);
    }
}
