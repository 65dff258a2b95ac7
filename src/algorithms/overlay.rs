//! The overlay driver: computes a boolean set combination of two planar
//! geometries.
//!
//! Pipeline: self-node each input, cross-node the pair, insert the split
//! edges uniquely, derive labels from merged depths, replace collapsed
//! edges, populate the planar graph, complete the labelling, mark and
//! cancel result edges, then assemble polygons, lines and points in that
//! order so the coverage tests can consult the higher-dimensional results.

use crate::algorithms::line_build::build_lines;
use crate::algorithms::point_build::build_points;
use crate::algorithms::polygon_build::build_polygons;
use crate::graph::edge::EdgeList;
use crate::graph::geomgraph::GeometryGraph;
use crate::graph::label::Position;
use crate::graph::planar::PlanarGraph;
use crate::model::{build_geometry, Geometry, Location};
use crate::{is_result_of_op, OpType, TopologyError};

/// Compute the overlay of two geometries under a set operation. The result
/// point-set equals the corresponding boolean combination of the input
/// point-sets.
pub fn overlay(g0: &Geometry, g1: &Geometry, op: OpType) -> Result<Geometry, TopologyError> {
    if g0.is_empty() || g1.is_empty() {
        return Ok(empty_operand_result(g0, g1, op));
    }
    let mut ov = OverlayOp::new(g0, g1)?;
    ov.compute(op)
}

// The noding pipeline needs at least one component per side; with an empty
// operand the result follows directly from the set identities.
fn empty_operand_result(g0: &Geometry, g1: &Geometry, op: OpType) -> Geometry {
    match op {
        OpType::Intersection => Geometry::empty_of_dimension(result_dimension(op, g0, g1)),
        OpType::Union | OpType::SymDifference => {
            if g0.is_empty() {
                g1.clone()
            } else {
                g0.clone()
            }
        }
        OpType::Difference => {
            if g0.is_empty() {
                Geometry::empty_of_dimension(None)
            } else {
                g0.clone()
            }
        }
    }
}

fn result_dimension(op: OpType, g0: &Geometry, g1: &Geometry) -> Option<u8> {
    let d0 = g0.dimension();
    let d1 = g1.dimension();
    match op {
        OpType::Intersection => match (d0, d1) {
            (Some(a), Some(b)) => Some(a.min(b)),
            _ => None,
        },
        OpType::Union | OpType::SymDifference => d0.max(d1),
        OpType::Difference => d0,
    }
}

/// Single-use overlay computation: owns its scratch edge list and planar
/// graph for the duration of one call.
struct OverlayOp {
    graphs: [GeometryGraph; 2],
    graph: PlanarGraph,
    edge_list: EdgeList,
}

impl OverlayOp {
    fn new(g0: &Geometry, g1: &Geometry) -> Result<Self, TopologyError> {
        Ok(OverlayOp {
            graphs: [GeometryGraph::new(0, g0)?, GeometryGraph::new(1, g1)?],
            graph: PlanarGraph::new(),
            edge_list: EdgeList::new(),
        })
    }

    fn compute(&mut self, op: OpType) -> Result<Geometry, TopologyError> {
        // Input points and boundary nodes participate in the result even if
        // no edge passes through them.
        self.copy_points(0);
        self.copy_points(1);

        self.graphs[0].compute_self_nodes();
        self.graphs[1].compute_self_nodes();
        {
            let (g0s, g1s) = self.graphs.split_at_mut(1);
            g0s[0].compute_edge_intersections(&mut g1s[0], true);
        }

        let mut split_edges = Vec::new();
        self.graphs[0].compute_split_edges(&mut split_edges);
        self.graphs[1].compute_split_edges(&mut split_edges);
        for e in split_edges {
            self.edge_list.insert_unique(e);
        }

        self.compute_labels_from_depths()?;
        self.edge_list.replace_collapsed_edges();

        self.graph.add_edges(&self.edge_list);
        self.graph.compute_labelling(&self.edge_list, &self.graphs)?;
        self.graph.label_incomplete_nodes(&self.graphs);

        self.find_result_area_edges(op);
        self.cancel_duplicate_result_edges();

        let polys = build_polygons(&mut self.graph, &mut self.edge_list)?;
        let lines = build_lines(op, &self.graph, &mut self.edge_list, &polys);
        let points = build_points(op, &self.graph, &self.edge_list, &polys, &lines);

        let mut components: Vec<Geometry> = Vec::new();
        for p in points {
            components.push(Geometry::Point(p));
        }
        for l in lines {
            components.push(Geometry::LineString(l));
        }
        for p in polys {
            components.push(Geometry::Polygon(p));
        }
        if components.is_empty() {
            let dim = result_dimension(op, &self.graphs[0].geometry, &self.graphs[1].geometry);
            return Ok(Geometry::empty_of_dimension(dim));
        }
        Ok(build_geometry(components))
    }

    fn copy_points(&mut self, arg: usize) {
        let nodes: Vec<_> = self.graphs[arg].nodes().collect();
        for (coord, loc) in nodes {
            let n = self.graph.add_node(coord);
            self.graph.nodes[n].label.set_on(arg, loc);
        }
    }

    // Edges that absorbed duplicates carry merged depth counters; normalize
    // them and rewrite the labels accordingly. A zero delta means the sides
    // cancelled and the edge is a line for that argument.
    fn compute_labels_from_depths(&mut self) -> Result<(), TopologyError> {
        for e in self.edge_list.iter_mut() {
            if e.depth.is_null() {
                continue;
            }
            e.depth.normalize();
            for arg in 0..2 {
                if e.label.is_null(arg) || !e.label.is_area() || e.depth.is_null_arg(arg) {
                    continue;
                }
                if e.depth.delta(arg) == 0 {
                    e.label.to_line(arg);
                } else {
                    if e.depth.is_null_at(arg, Position::Left) {
                        return Err(TopologyError::InvariantViolation(
                            "depth of left side has not been initialized",
                        ));
                    }
                    e.label
                        .set(arg, Position::Left, e.depth.location_at(arg, Position::Left));
                    if e.depth.is_null_at(arg, Position::Right) {
                        return Err(TopologyError::InvariantViolation(
                            "depth of right side has not been initialized",
                        ));
                    }
                    e.label.set(
                        arg,
                        Position::Right,
                        e.depth.location_at(arg, Position::Right),
                    );
                }
            }
        }
        Ok(())
    }

    // Mark the directed edges bounding the result area. The right-hand side
    // is tested so result shells come out clockwise.
    fn find_result_area_edges(&mut self, op: OpType) {
        for d in 0..self.graph.dirs.len() {
            let lbl = self.graph.dirs[d].label;
            if !lbl.is_area() || self.graph.is_interior_area_edge(d) {
                continue;
            }
            let r0 = lbl.get(0, Position::Right).unwrap_or(Location::Exterior);
            let r1 = lbl.get(1, Position::Right).unwrap_or(Location::Exterior);
            if is_result_of_op(r0, r1, op) {
                self.graph.dirs[d].in_result = true;
            }
        }
    }

    // An edge whose two directions are both marked lies on a boundary the
    // result does not contain.
    fn cancel_duplicate_result_edges(&mut self) {
        for d in 0..self.graph.dirs.len() {
            let sym = self.graph.dirs[d].sym;
            if self.graph.dirs[d].in_result && self.graph.dirs[sym].in_result {
                self.graph.dirs[d].in_result = false;
                self.graph.dirs[sym].in_result = false;
            }
        }
    }
}
