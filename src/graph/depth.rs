//! Per-side depth counters used to resolve stacked duplicate edges.
//!
//! When several coincident edges merge into one, each contributing area label
//! adds to the depth of the Left/Right sides. After normalization a depth of
//! 0 means Exterior and 1 means Interior; equal sides signal a dimensional
//! collapse.

use crate::graph::label::{Label, Position};
use crate::model::Location;

const NULL_DEPTH: i32 = -1;

fn side_index(pos: Position) -> usize {
    match pos {
        Position::On => 0,
        Position::Left => 1,
        Position::Right => 2,
    }
}

fn depth_at_location(loc: Location) -> i32 {
    if loc == Location::Interior {
        1
    } else {
        0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Depth {
    depth: [[i32; 3]; 2],
}

impl Default for Depth {
    fn default() -> Self {
        Self::new()
    }
}

impl Depth {
    pub fn new() -> Self {
        Depth {
            depth: [[NULL_DEPTH; 3]; 2],
        }
    }

    pub fn is_null(&self) -> bool {
        self.depth
            .iter()
            .all(|row| row.iter().all(|&d| d == NULL_DEPTH))
    }

    pub fn is_null_arg(&self, arg: usize) -> bool {
        self.depth[arg][side_index(Position::Left)] == NULL_DEPTH
    }

    pub fn is_null_at(&self, arg: usize, pos: Position) -> bool {
        self.depth[arg][side_index(pos)] == NULL_DEPTH
    }

    pub fn get(&self, arg: usize, pos: Position) -> i32 {
        self.depth[arg][side_index(pos)]
    }

    /// Accumulate the side locations of a label: Interior adds one, Exterior
    /// adds zero; null cells are seeded rather than summed.
    pub fn add(&mut self, label: &Label) {
        for arg in 0..2 {
            for pos in [Position::Left, Position::Right] {
                if let Some(loc) = label.get(arg, pos) {
                    if loc == Location::Interior || loc == Location::Exterior {
                        let cell = &mut self.depth[arg][side_index(pos)];
                        if *cell == NULL_DEPTH {
                            *cell = depth_at_location(loc);
                        } else {
                            *cell += depth_at_location(loc);
                        }
                    }
                }
            }
        }
    }

    pub fn delta(&self, arg: usize) -> i32 {
        self.depth[arg][side_index(Position::Right)] - self.depth[arg][side_index(Position::Left)]
    }

    /// Reduce depths so the shallower side becomes 0 and any deeper side
    /// becomes 1. A zero delta afterwards means the edge collapsed
    /// dimensionally for that argument.
    pub fn normalize(&mut self) {
        for arg in 0..2 {
            if self.is_null_arg(arg) {
                continue;
            }
            let left = self.depth[arg][side_index(Position::Left)];
            let right = self.depth[arg][side_index(Position::Right)];
            let min_depth = left.min(right).max(0);
            for pos in [Position::Left, Position::Right] {
                let cell = &mut self.depth[arg][side_index(pos)];
                *cell = if *cell > min_depth { 1 } else { 0 };
            }
        }
    }

    /// Location implied by a normalized depth: 0 or less is Exterior,
    /// anything deeper is Interior.
    pub fn location_at(&self, arg: usize, pos: Position) -> Location {
        if self.depth[arg][side_index(pos)] <= 0 {
            Location::Exterior
        } else {
            Location::Interior
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_null() {
        let d = Depth::new();
        assert!(d.is_null());
        assert!(d.is_null_arg(0));
    }

    #[test]
    fn add_and_normalize() {
        let mut d = Depth::new();
        d.add(&Label::area(0, Location::Boundary, Location::Interior, Location::Exterior));
        assert!(!d.is_null());
        assert_eq!(d.get(0, Position::Left), 1);
        assert_eq!(d.get(0, Position::Right), 0);
        d.normalize();
        assert_eq!(d.delta(0), -1);
        assert_eq!(d.location_at(0, Position::Left), Location::Interior);
        assert_eq!(d.location_at(0, Position::Right), Location::Exterior);
    }

    #[test]
    fn stacked_duplicates_collapse() {
        // The same boundary contributed twice with opposite sides: both sides
        // end up at equal depth, which reads as a collapse.
        let mut d = Depth::new();
        d.add(&Label::area(0, Location::Boundary, Location::Interior, Location::Exterior));
        d.add(&Label::area(0, Location::Boundary, Location::Exterior, Location::Interior));
        d.normalize();
        assert_eq!(d.delta(0), 0);
    }

    #[test]
    fn deep_stacks_clamp_to_one() {
        let mut d = Depth::new();
        for _ in 0..3 {
            d.add(&Label::area(1, Location::Boundary, Location::Interior, Location::Interior));
        }
        d.normalize();
        // Uniformly deep sides normalize to the shallow value on both sides.
        assert_eq!(d.get(1, Position::Left), 0);
        assert_eq!(d.get(1, Position::Right), 0);
        assert_eq!(d.delta(1), 0);
    }
}
