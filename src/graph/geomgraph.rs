//! Decomposition of one input geometry into labelled edges and nodes.
//!
//! Each input argument gets its own graph: polygon rings become closed area
//! edges labelled Boundary/Interior/Exterior by orientation, line strings
//! become line edges with boundary endpoints under the mod-2 rule, points
//! become labelled nodes. Noding records intersection points on the edges;
//! `compute_split_edges` then expands them into split edges.

use crate::geometry::orient::is_ccw;
use crate::graph::edge::Edge;
use crate::graph::intersector::{
    compute_cross_intersections, compute_self_intersections, SegmentIntersector,
};
use crate::graph::label::Label;
use crate::model::{Coordinate, Geometry, Location};
use crate::TopologyError;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug)]
struct NodeInfo {
    loc: Location,
    boundary_count: u32,
}

pub struct GeometryGraph {
    pub arg_index: usize,
    pub geometry: Geometry,
    pub edges: Vec<Edge>,
    nodes: BTreeMap<Coordinate, NodeInfo>,
}

fn remove_repeated(pts: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(pts.len());
    for &p in pts {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    out
}

impl GeometryGraph {
    pub fn new(arg_index: usize, geometry: &Geometry) -> Result<Self, TopologyError> {
        let mut g = GeometryGraph {
            arg_index,
            geometry: geometry.clone(),
            edges: Vec::new(),
            nodes: BTreeMap::new(),
        };
        g.add(geometry)?;
        Ok(g)
    }

    fn add(&mut self, geom: &Geometry) -> Result<(), TopologyError> {
        match geom {
            Geometry::Point(p) => {
                self.insert_point(*p, Location::Interior);
                Ok(())
            }
            Geometry::MultiPoint(pts) => {
                for p in pts {
                    self.insert_point(*p, Location::Interior);
                }
                Ok(())
            }
            Geometry::LineString(pts) => self.add_line_string(pts),
            Geometry::MultiLineString(ls) => {
                for l in ls {
                    self.add_line_string(l)?;
                }
                Ok(())
            }
            Geometry::Polygon(poly) => {
                self.add_polygon_ring(&poly.shell, Location::Exterior, Location::Interior)?;
                for hole in &poly.holes {
                    self.add_polygon_ring(hole, Location::Interior, Location::Exterior)?;
                }
                Ok(())
            }
            Geometry::MultiPolygon(ps) => {
                for poly in ps {
                    self.add(&Geometry::Polygon(poly.clone()))?;
                }
                Ok(())
            }
            Geometry::Collection(gs) => {
                for g in gs {
                    self.add(g)?;
                }
                Ok(())
            }
        }
    }

    fn add_line_string(&mut self, pts: &[Coordinate]) -> Result<(), TopologyError> {
        let pts = remove_repeated(pts);
        if pts.is_empty() {
            return Ok(());
        }
        if pts.len() < 2 {
            return Err(TopologyError::InvalidGeometry(
                "line string has too few distinct points",
            ));
        }
        let first = pts[0];
        let last = pts[pts.len() - 1];
        self.edges
            .push(Edge::new(pts, Label::line(self.arg_index, Location::Interior)));
        self.insert_boundary_point(first);
        self.insert_boundary_point(last);
        Ok(())
    }

    // cw_left / cw_right are the side locations when the ring runs clockwise;
    // a counter-clockwise ring swaps them.
    fn add_polygon_ring(
        &mut self,
        ring: &[Coordinate],
        cw_left: Location,
        cw_right: Location,
    ) -> Result<(), TopologyError> {
        let mut pts = remove_repeated(ring);
        if pts.is_empty() {
            return Ok(());
        }
        if pts.first() != pts.last() {
            pts.push(pts[0]);
        }
        if pts.len() < 4 {
            return Err(TopologyError::InvalidGeometry(
                "polygon ring has too few distinct points",
            ));
        }
        let (mut left, mut right) = (cw_left, cw_right);
        if is_ccw(&pts[..pts.len() - 1]) {
            std::mem::swap(&mut left, &mut right);
        }
        let first = pts[0];
        self.edges.push(Edge::new(
            pts,
            Label::area(self.arg_index, Location::Boundary, left, right),
        ));
        self.insert_point(first, Location::Boundary);
        Ok(())
    }

    fn insert_point(&mut self, coord: Coordinate, loc: Location) {
        self.nodes
            .entry(coord)
            .and_modify(|n| n.loc = loc)
            .or_insert(NodeInfo {
                loc,
                boundary_count: 0,
            });
    }

    // Mod-2 rule: a point used an odd number of times as a line endpoint is
    // on the boundary, an even number of times is interior.
    fn insert_boundary_point(&mut self, coord: Coordinate) {
        let n = self.nodes.entry(coord).or_insert(NodeInfo {
            loc: Location::Interior,
            boundary_count: 0,
        });
        n.boundary_count += 1;
        n.loc = if n.boundary_count % 2 == 1 {
            Location::Boundary
        } else {
            Location::Interior
        };
    }

    pub fn is_boundary_node(&self, coord: Coordinate) -> bool {
        self.nodes
            .get(&coord)
            .map(|n| n.loc == Location::Boundary)
            .unwrap_or(false)
    }

    /// Node the edge set against itself and record the intersections as
    /// nodes of this graph.
    pub fn compute_self_nodes(&mut self) {
        let mut si = SegmentIntersector::new(true);
        compute_self_intersections(&mut self.edges, &mut si);
        self.add_self_intersection_nodes();
    }

    fn add_self_intersection_nodes(&mut self) {
        let mut points: Vec<(Coordinate, Location)> = Vec::new();
        for e in &self.edges {
            let loc = e.label.on(self.arg_index).unwrap_or(Location::Interior);
            for ei in e.eil.iter() {
                points.push((ei.coord, loc));
            }
        }
        for (coord, loc) in points {
            if self.is_boundary_node(coord) {
                continue;
            }
            if loc == Location::Boundary {
                self.insert_boundary_point(coord);
            } else {
                self.insert_point(coord, loc);
            }
        }
    }

    /// Node this graph's edges against another graph's.
    pub fn compute_edge_intersections(
        &mut self,
        other: &mut GeometryGraph,
        include_proper: bool,
    ) -> SegmentIntersector {
        let mut si = SegmentIntersector::new(include_proper);
        compute_cross_intersections(&mut self.edges, &mut other.edges, &mut si);
        si
    }

    /// Expand every edge's intersection list into split edges.
    pub fn compute_split_edges(&mut self, out: &mut Vec<Edge>) {
        for e in &mut self.edges {
            let pts = e.pts.clone();
            e.eil.add_endpoints(&pts);
        }
        for e in &self.edges {
            e.split_edges(out);
        }
    }

    /// The graph's labelled node points (boundary endpoints, point
    /// components, self-intersection points).
    pub fn nodes(&self) -> impl Iterator<Item = (Coordinate, Location)> + '_ {
        self.nodes.iter().map(|(c, n)| (*c, n.loc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::label::Position;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn polygon_ring_sides_follow_orientation() {
        // Counter-clockwise shell: interior on the left.
        let g = Geometry::polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let gg = GeometryGraph::new(0, &g).unwrap();
        assert_eq!(gg.edges.len(), 1);
        let lbl = gg.edges[0].label;
        assert_eq!(lbl.on(0), Some(Location::Boundary));
        assert_eq!(lbl.get(0, Position::Left), Some(Location::Interior));
        assert_eq!(lbl.get(0, Position::Right), Some(Location::Exterior));

        // The same ring reversed: interior on the right.
        let g = Geometry::polygon(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        let gg = GeometryGraph::new(0, &g).unwrap();
        let lbl = gg.edges[0].label;
        assert_eq!(lbl.get(0, Position::Left), Some(Location::Exterior));
        assert_eq!(lbl.get(0, Position::Right), Some(Location::Interior));
    }

    #[test]
    fn line_endpoints_are_boundary() {
        let g = Geometry::line_string(&[(0.0, 0.0), (10.0, 10.0)]);
        let gg = GeometryGraph::new(1, &g).unwrap();
        let nodes: Vec<_> = gg.nodes().collect();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|&(_, l)| l == Location::Boundary));
    }

    #[test]
    fn closed_line_has_no_boundary() {
        let g = Geometry::line_string(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 0.0)]);
        let gg = GeometryGraph::new(0, &g).unwrap();
        // First == last: endpoint inserted twice, mod-2 gives Interior.
        let nodes: Vec<_> = gg.nodes().collect();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].1, Location::Interior);
    }

    #[test]
    fn degenerate_ring_is_rejected() {
        let g = Geometry::Polygon(crate::model::Polygon {
            shell: vec![c(0.0, 0.0), c(1.0, 1.0), c(0.0, 0.0)],
            holes: Vec::new(),
        });
        assert!(GeometryGraph::new(0, &g).is_err());
    }

    #[test]
    fn split_edges_whole_edge_when_unnoded() {
        let g = Geometry::line_string(&[(0.0, 0.0), (10.0, 0.0)]);
        let mut gg = GeometryGraph::new(0, &g).unwrap();
        let mut out = Vec::new();
        gg.compute_split_edges(&mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].pts, vec![c(0.0, 0.0), c(10.0, 0.0)]);
    }
}
