//! A planar overlay engine: boolean set operations (intersection, union,
//! difference, symmetric difference) on 2-D vector geometries, computed by
//! noding the inputs into a shared planar graph, labelling every directed
//! edge against both inputs, and assembling result polygons, lines and
//! points with coverage suppression.

pub mod model;
pub mod geometry {
    pub mod intersect;
    pub mod locate;
    pub mod orient;
    pub mod tolerance;
}
pub mod index {
    pub mod bintree;
    pub mod interval;
}
pub mod graph {
    pub mod depth;
    pub mod edge;
    pub mod geomgraph;
    pub mod intersector;
    pub mod label;
    pub mod planar;
}
pub mod algorithms {
    pub mod line_build;
    pub mod overlay;
    pub mod point_build;
    pub mod polygon_build;
}

use serde::{Deserialize, Serialize};

pub use algorithms::overlay::overlay;
pub use index::bintree::BinTree;
pub use index::interval::Interval;
pub use model::{build_geometry, Coordinate, Envelope, Geometry, Location, Polygon};

use graph::label::Label;

/// Boolean set operation on two geometries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpType {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

/// Failures of the overlay core. Invariant violations are programming
/// errors surfaced with the asserted condition; the others carry the node
/// coordinate where the topology broke down.
#[derive(Clone, Debug, PartialEq)]
pub enum TopologyError {
    InvariantViolation(&'static str),
    SideLocationConflict(Coordinate),
    UnclosedRing(Coordinate),
    InvalidGeometry(&'static str),
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopologyError::InvariantViolation(msg) => write!(f, "invariant violation: {}", msg),
            TopologyError::SideLocationConflict(c) => {
                write!(f, "side location conflict at ({}, {})", c.x, c.y)
            }
            TopologyError::UnclosedRing(c) => {
                write!(f, "unable to close result ring at ({}, {})", c.x, c.y)
            }
            TopologyError::InvalidGeometry(msg) => write!(f, "invalid geometry: {}", msg),
        }
    }
}

impl std::error::Error for TopologyError {}

/// Whether a point with the given locations relative to the two input
/// geometries belongs to the result of the operation. Boundary counts as
/// Interior.
pub fn is_result_of_op(loc0: Location, loc1: Location, op: OpType) -> bool {
    let in0 = loc0 != Location::Exterior;
    let in1 = loc1 != Location::Exterior;
    match op {
        OpType::Intersection => in0 && in1,
        OpType::Union => in0 || in1,
        OpType::Difference => in0 && !in1,
        OpType::SymDifference => in0 != in1,
    }
}

/// The label-based form: tests the On locations of both arguments.
pub fn is_result_of_op_label(label: &Label, op: OpType) -> bool {
    let loc0 = label.on(0).unwrap_or(Location::Exterior);
    let loc1 = label.on(1).unwrap_or(Location::Exterior);
    is_result_of_op(loc0, loc1, op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_tables() {
        use Location::*;
        assert!(is_result_of_op(Interior, Interior, OpType::Intersection));
        assert!(is_result_of_op(Boundary, Interior, OpType::Intersection));
        assert!(!is_result_of_op(Interior, Exterior, OpType::Intersection));
        assert!(is_result_of_op(Interior, Exterior, OpType::Union));
        assert!(is_result_of_op(Exterior, Boundary, OpType::Union));
        assert!(!is_result_of_op(Exterior, Exterior, OpType::Union));
        assert!(is_result_of_op(Interior, Exterior, OpType::Difference));
        assert!(!is_result_of_op(Interior, Boundary, OpType::Difference));
        assert!(is_result_of_op(Exterior, Interior, OpType::SymDifference));
        assert!(!is_result_of_op(Interior, Boundary, OpType::SymDifference));
    }
}
