//! Topological labels: the position of an edge or node relative to each of
//! the two input geometries.
//!
//! A label holds one `TopologyLocation` per input argument. A line location
//! carries a single On position; an area location carries On plus the
//! locations of the regions on the Left and Right sides of the edge.

use crate::model::Location;

/// Side index on an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    On,
    Left,
    Right,
}

impl Position {
    /// Left and Right swap; On is its own opposite.
    pub fn opposite(self) -> Position {
        match self {
            Position::On => Position::On,
            Position::Left => Position::Right,
            Position::Right => Position::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TopologyLocation {
    Line {
        on: Option<Location>,
    },
    Area {
        on: Option<Location>,
        left: Option<Location>,
        right: Option<Location>,
    },
}

impl TopologyLocation {
    pub fn line(on: Option<Location>) -> Self {
        TopologyLocation::Line { on }
    }

    pub fn area(on: Option<Location>, left: Option<Location>, right: Option<Location>) -> Self {
        TopologyLocation::Area { on, left, right }
    }

    pub fn is_area(&self) -> bool {
        matches!(self, TopologyLocation::Area { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self, TopologyLocation::Line { .. })
    }

    pub fn get(&self, pos: Position) -> Option<Location> {
        match self {
            TopologyLocation::Line { on } => match pos {
                Position::On => *on,
                _ => None,
            },
            TopologyLocation::Area { on, left, right } => match pos {
                Position::On => *on,
                Position::Left => *left,
                Position::Right => *right,
            },
        }
    }

    /// Set one position. Setting a side on a line location upgrades it to an
    /// area location.
    pub fn set(&mut self, pos: Position, loc: Location) {
        match self {
            TopologyLocation::Line { on } => match pos {
                Position::On => *on = Some(loc),
                Position::Left => {
                    *self = TopologyLocation::Area { on: *on, left: Some(loc), right: None }
                }
                Position::Right => {
                    *self = TopologyLocation::Area { on: *on, left: None, right: Some(loc) }
                }
            },
            TopologyLocation::Area { on, left, right } => match pos {
                Position::On => *on = Some(loc),
                Position::Left => *left = Some(loc),
                Position::Right => *right = Some(loc),
            },
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            TopologyLocation::Line { on } => on.is_none(),
            TopologyLocation::Area { on, left, right } => {
                on.is_none() && left.is_none() && right.is_none()
            }
        }
    }

    pub fn is_any_null(&self) -> bool {
        match self {
            TopologyLocation::Line { on } => on.is_none(),
            TopologyLocation::Area { on, left, right } => {
                on.is_none() || left.is_none() || right.is_none()
            }
        }
    }

    pub fn set_all_if_null(&mut self, loc: Location) {
        match self {
            TopologyLocation::Line { on } => {
                if on.is_none() {
                    *on = Some(loc);
                }
            }
            TopologyLocation::Area { on, left, right } => {
                if on.is_none() {
                    *on = Some(loc);
                }
                if left.is_none() {
                    *left = Some(loc);
                }
                if right.is_none() {
                    *right = Some(loc);
                }
            }
        }
    }

    pub fn all_positions_equal(&self, loc: Location) -> bool {
        match self {
            TopologyLocation::Line { on } => *on == Some(loc),
            TopologyLocation::Area { on, left, right } => {
                *on == Some(loc) && *left == Some(loc) && *right == Some(loc)
            }
        }
    }

    /// Swap the Left and Right sides.
    pub fn flip(&mut self) {
        if let TopologyLocation::Area { left, right, .. } = self {
            std::mem::swap(left, right);
        }
    }

    /// Collapse an area location to a line location, keeping On.
    pub fn to_line(&mut self) {
        if let TopologyLocation::Area { on, .. } = self {
            *self = TopologyLocation::Line { on: *on };
        }
    }

    /// Fill null positions from another location. Merging a line location
    /// with an area location upgrades it to an area first.
    pub fn merge(&mut self, other: &TopologyLocation) {
        if other.is_area() && self.is_line() {
            let on = self.get(Position::On);
            *self = TopologyLocation::Area { on, left: None, right: None };
        }
        match self {
            TopologyLocation::Line { on } => {
                if on.is_none() {
                    *on = other.get(Position::On);
                }
            }
            TopologyLocation::Area { on, left, right } => {
                if on.is_none() {
                    *on = other.get(Position::On);
                }
                if left.is_none() {
                    *left = other.get(Position::Left);
                }
                if right.is_none() {
                    *right = other.get(Position::Right);
                }
            }
        }
    }
}

/// A pair of topology locations, one per input argument.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Label {
    elt: [TopologyLocation; 2],
}

impl Label {
    /// Node label: a single On location per argument.
    pub fn node() -> Self {
        Label {
            elt: [TopologyLocation::line(None), TopologyLocation::line(None)],
        }
    }

    /// Line-edge label for one argument; the other argument starts null.
    pub fn line(arg: usize, on: Location) -> Self {
        let mut l = Label {
            elt: [TopologyLocation::line(None), TopologyLocation::line(None)],
        };
        l.elt[arg] = TopologyLocation::line(Some(on));
        l
    }

    /// Area-edge label for one argument; both elements are area-sized so the
    /// other argument's sides can be filled in later.
    pub fn area(arg: usize, on: Location, left: Location, right: Location) -> Self {
        let mut l = Label {
            elt: [
                TopologyLocation::area(None, None, None),
                TopologyLocation::area(None, None, None),
            ],
        };
        l.elt[arg] = TopologyLocation::area(Some(on), Some(left), Some(right));
        l
    }

    pub fn get(&self, arg: usize, pos: Position) -> Option<Location> {
        self.elt[arg].get(pos)
    }

    pub fn on(&self, arg: usize) -> Option<Location> {
        self.elt[arg].get(Position::On)
    }

    pub fn set(&mut self, arg: usize, pos: Position, loc: Location) {
        self.elt[arg].set(pos, loc);
    }

    pub fn set_on(&mut self, arg: usize, loc: Location) {
        self.elt[arg].set(Position::On, loc);
    }

    pub fn set_all_if_null(&mut self, arg: usize, loc: Location) {
        self.elt[arg].set_all_if_null(loc);
    }

    pub fn is_area(&self) -> bool {
        self.elt[0].is_area() || self.elt[1].is_area()
    }

    pub fn is_area_arg(&self, arg: usize) -> bool {
        self.elt[arg].is_area()
    }

    pub fn is_line(&self, arg: usize) -> bool {
        self.elt[arg].is_line()
    }

    pub fn is_null(&self, arg: usize) -> bool {
        self.elt[arg].is_null()
    }

    pub fn is_any_null(&self, arg: usize) -> bool {
        self.elt[arg].is_any_null()
    }

    pub fn all_positions_equal(&self, arg: usize, loc: Location) -> bool {
        self.elt[arg].all_positions_equal(loc)
    }

    /// Swap Left and Right on both arguments.
    pub fn flip(&mut self) {
        self.elt[0].flip();
        self.elt[1].flip();
    }

    pub fn flipped(&self) -> Label {
        let mut l = *self;
        l.flip();
        l
    }

    /// Rewrite one argument from an area location to a line location.
    pub fn to_line(&mut self, arg: usize) {
        self.elt[arg].to_line();
    }

    /// Fill null attributes from another label. Existing non-null values are
    /// retained: the first-set value is authoritative.
    pub fn merge(&mut self, other: &Label) {
        self.elt[0].merge(&other.elt[0]);
        self.elt[1].merge(&other.elt[1]);
    }
}
