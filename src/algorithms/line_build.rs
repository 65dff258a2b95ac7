//! Collects the line-dimensional part of the overlay result: line inputs,
//! dimensional collapses, and (for intersection) area boundaries touching
//! without enclosing area.

use crate::geometry::locate::locate_in_ring;
use crate::graph::edge::EdgeList;
use crate::graph::planar::PlanarGraph;
use crate::model::{Coordinate, Location, Polygon};
use crate::{is_result_of_op_label, OpType};

pub fn build_lines(
    op: OpType,
    graph: &PlanarGraph,
    edges: &mut EdgeList,
    result_areas: &[Polygon],
) -> Vec<Vec<Coordinate>> {
    for n in 0..graph.nodes.len() {
        graph.find_covered_line_edges(n, edges);
    }

    let mut included: Vec<usize> = Vec::new();
    let mut seen = vec![false; edges.len()];
    for d in 0..graph.dirs.len() {
        let de = &graph.dirs[d];
        let eid = de.edge;
        if seen[eid] {
            continue;
        }
        if graph.is_line_edge(d) {
            if is_result_of_op_label(&de.label, op) {
                seen[eid] = true;
                included.push(eid);
            }
        } else if op == OpType::Intersection
            && de.label.is_area()
            && !graph.is_interior_area_edge(d)
            && !edges.get(eid).in_result
            && is_result_of_op_label(&de.label, op)
        {
            // An area boundary shared by both inputs but enclosing no result
            // area contributes its line to an intersection.
            seen[eid] = true;
            included.push(eid);
        }
    }

    let mut lines = Vec::new();
    for eid in included {
        let covered = match edges.get(eid).covered {
            Some(cv) => cv,
            None => {
                let p = edges.get(eid).representative_point();
                covered_by_areas(p, result_areas)
            }
        };
        if covered {
            continue;
        }
        let e = edges.get_mut(eid);
        e.in_result = true;
        lines.push(e.pts.clone());
    }
    lines
}

pub fn covered_by_areas(p: Coordinate, areas: &[Polygon]) -> bool {
    areas.iter().any(|poly| {
        match locate_in_ring(p, &poly.shell) {
            Location::Exterior => false,
            Location::Boundary => true,
            Location::Interior => {
                // Strictly inside a hole is not covered; on a hole ring is.
                !poly
                    .holes
                    .iter()
                    .any(|h| locate_in_ring(p, h) == Location::Interior)
            }
        }
    })
}
