//! Extracts the point-dimensional part of the overlay result: nodes that
//! pass the operation and are not already represented by a result line or
//! polygon.

use crate::algorithms::line_build::covered_by_areas;
use crate::geometry::orient::is_on_line;
use crate::graph::edge::EdgeList;
use crate::graph::planar::PlanarGraph;
use crate::model::{Coordinate, Location, Polygon};
use crate::{is_result_of_op, OpType};

pub fn build_points(
    op: OpType,
    graph: &PlanarGraph,
    edges: &EdgeList,
    result_areas: &[Polygon],
    result_lines: &[Vec<Coordinate>],
) -> Vec<Coordinate> {
    let mut pts = Vec::new();
    for n in 0..graph.nodes.len() {
        let node = &graph.nodes[n];
        // A node on an included edge is already in the result.
        if graph.is_incident_edge_in_result(n, edges) {
            continue;
        }
        // Only isolated nodes can contribute points, except that an
        // intersection can reduce touching edges to a single point.
        if !node.star.is_empty() && op != OpType::Intersection {
            continue;
        }
        let loc0 = node.label.on(0).unwrap_or(Location::Exterior);
        let loc1 = node.label.on(1).unwrap_or(Location::Exterior);
        if !is_result_of_op(loc0, loc1, op) {
            continue;
        }
        if covered_by_lines(node.coord, result_lines) || covered_by_areas(node.coord, result_areas)
        {
            continue;
        }
        pts.push(node.coord);
    }
    pts
}

fn covered_by_lines(p: Coordinate, lines: &[Vec<Coordinate>]) -> bool {
    lines.iter().any(|l| is_on_line(p, l))
}
