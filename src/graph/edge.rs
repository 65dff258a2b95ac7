//! Edges: labelled coordinate chains, their intersection lists, and the
//! deduplicating edge collection used by the overlay.

use crate::graph::depth::Depth;
use crate::graph::label::Label;
use crate::model::Coordinate;
use std::cmp::Ordering;

/// An intersection point on an edge, positioned by the segment it falls on
/// and its distance along that segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeIntersection {
    pub coord: Coordinate,
    pub segment_index: usize,
    pub dist: f64,
}

impl EdgeIntersection {
    fn key_cmp(&self, segment_index: usize, dist: f64) -> Ordering {
        self.segment_index
            .cmp(&segment_index)
            .then(self.dist.total_cmp(&dist))
    }
}

/// Intersection points of one edge, kept sorted along the edge and unique.
#[derive(Clone, Debug, Default)]
pub struct EdgeIntersectionList {
    list: Vec<EdgeIntersection>,
}

impl EdgeIntersectionList {
    pub fn add(&mut self, coord: Coordinate, segment_index: usize, dist: f64) {
        match self
            .list
            .binary_search_by(|ei| ei.key_cmp(segment_index, dist))
        {
            Ok(_) => {}
            Err(pos) => self.list.insert(
                pos,
                EdgeIntersection {
                    coord,
                    segment_index,
                    dist,
                },
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EdgeIntersection> {
        self.list.iter()
    }

    /// Add the edge endpoints, so the split walk covers the whole edge.
    pub fn add_endpoints(&mut self, pts: &[Coordinate]) {
        if pts.len() < 2 {
            return;
        }
        let max_seg = pts.len() - 1;
        self.add(pts[0], 0, 0.0);
        self.add(pts[max_seg], max_seg, 0.0);
    }
}

/// An oriented chain of coordinates with a topological label, depth counters
/// and the intersection list produced by noding.
#[derive(Clone, Debug)]
pub struct Edge {
    pub pts: Vec<Coordinate>,
    pub label: Label,
    pub depth: Depth,
    pub eil: EdgeIntersectionList,
    pub in_result: bool,
    // Coverage by the result area, once determined by the line builder.
    pub covered: Option<bool>,
}

impl Edge {
    pub fn new(pts: Vec<Coordinate>, label: Label) -> Self {
        Edge {
            pts,
            label,
            depth: Depth::new(),
            eil: EdgeIntersectionList::default(),
            in_result: false,
            covered: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.pts.len() > 1 && self.pts.first() == self.pts.last()
    }

    /// A point in the interior of the edge, for coverage tests.
    pub fn representative_point(&self) -> Coordinate {
        let a = self.pts[0];
        let b = self.pts[1.min(self.pts.len() - 1)];
        Coordinate::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    /// Same coordinate sequence in the forward direction.
    pub fn is_pointwise_equal(&self, other: &Edge) -> bool {
        self.pts == other.pts
    }

    /// Same coordinate sequence in either direction.
    pub fn eq_oriented(&self, other: &Edge) -> bool {
        if self.pts.len() != other.pts.len() {
            return false;
        }
        self.pts == other.pts || self.pts.iter().rev().eq(other.pts.iter())
    }

    /// An area edge that folds back on itself: three points with the first
    /// and last coinciding. Topologically it has become a line.
    pub fn is_collapsed(&self) -> bool {
        self.label.is_area() && self.pts.len() == 3 && self.pts[0] == self.pts[2]
    }

    /// The replacement line edge for a collapsed area edge.
    pub fn collapsed_edge(&self) -> Edge {
        let mut label = self.label;
        label.to_line(0);
        label.to_line(1);
        Edge::new(vec![self.pts[0], self.pts[1]], label)
    }

    /// Expand this edge's intersection list into split edges, each carrying a
    /// copy of the parent label. Endpoints must have been added first.
    pub fn split_edges(&self, out: &mut Vec<Edge>) {
        let mut it = self.eil.iter();
        let mut prev = match it.next() {
            Some(ei) => ei,
            None => return,
        };
        for ei in it {
            out.push(self.create_split_edge(prev, ei));
            prev = ei;
        }
    }

    fn create_split_edge(&self, ei0: &EdgeIntersection, ei1: &EdgeIntersection) -> Edge {
        // If the final intersection sits exactly on a segment start, the
        // segment start itself already closes the chain.
        let last_seg_start = self.pts[ei1.segment_index];
        let use_int_pt1 = ei1.dist > 0.0 || ei1.coord != last_seg_start;
        let mut pts = Vec::with_capacity(ei1.segment_index - ei0.segment_index + 2);
        pts.push(ei0.coord);
        for i in (ei0.segment_index + 1)..=ei1.segment_index {
            pts.push(self.pts[i]);
        }
        if use_int_pt1 {
            pts.push(ei1.coord);
        }
        Edge::new(pts, self.label)
    }
}

/// Ordered collection of edges with unique insertion: a new edge matching an
/// existing one (in either direction) merges its label into the existing
/// edge's label and depth instead of being appended.
#[derive(Debug, Default)]
pub struct EdgeList {
    edges: Vec<Edge>,
}

impl EdgeList {
    pub fn new() -> Self {
        EdgeList { edges: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Edge> {
        self.edges.iter_mut()
    }

    pub fn get(&self, idx: usize) -> &Edge {
        &self.edges[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Edge {
        &mut self.edges[idx]
    }

    /// Index of an existing edge with the same coordinate sequence in either
    /// direction.
    pub fn find_edge_index(&self, e: &Edge) -> Option<usize> {
        self.edges.iter().position(|ex| ex.eq_oriented(e))
    }

    pub fn insert_unique(&mut self, e: Edge) {
        let idx = match self.find_edge_index(&e) {
            Some(idx) => idx,
            None => {
                self.edges.push(e);
                return;
            }
        };
        let existing = &mut self.edges[idx];
        let mut label_to_merge = e.label;
        if !existing.is_pointwise_equal(&e) {
            label_to_merge.flip();
        }
        if existing.depth.is_null() {
            let seed = existing.label;
            existing.depth.add(&seed);
        }
        existing.depth.add(&label_to_merge);
        existing.label.merge(&label_to_merge);
    }

    /// Replace every collapsed edge by its line replacement. Removals and
    /// additions are deferred to the end of the sweep.
    pub fn replace_collapsed_edges(&mut self) {
        let replacements: Vec<Edge> = self
            .edges
            .iter()
            .filter(|e| e.is_collapsed())
            .map(|e| e.collapsed_edge())
            .collect();
        if replacements.is_empty() {
            return;
        }
        self.edges.retain(|e| !e.is_collapsed());
        self.edges.extend(replacements);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::label::Position;
    use crate::model::Location;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn area_edge(pts: &[(f64, f64)], arg: usize) -> Edge {
        Edge::new(
            pts.iter().map(|&(x, y)| c(x, y)).collect(),
            Label::area(arg, Location::Boundary, Location::Interior, Location::Exterior),
        )
    }

    #[test]
    fn intersection_list_sorted_unique() {
        let mut eil = EdgeIntersectionList::default();
        eil.add(c(5.0, 0.0), 1, 2.0);
        eil.add(c(1.0, 0.0), 0, 1.0);
        eil.add(c(5.0, 0.0), 1, 2.0);
        eil.add(c(3.0, 0.0), 1, 0.0);
        let keys: Vec<(usize, f64)> = eil.iter().map(|ei| (ei.segment_index, ei.dist)).collect();
        assert_eq!(keys, vec![(0, 1.0), (1, 0.0), (1, 2.0)]);
    }

    #[test]
    fn split_edges_cover_chain() {
        let mut e = area_edge(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], 0);
        e.eil.add(c(5.0, 0.0), 0, 5.0);
        let pts = e.pts.clone();
        e.eil.add_endpoints(&pts);
        let mut out = Vec::new();
        e.split_edges(&mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pts, vec![c(0.0, 0.0), c(5.0, 0.0)]);
        assert_eq!(out[1].pts, vec![c(5.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)]);
    }

    #[test]
    fn split_at_vertex_does_not_duplicate() {
        let mut e = area_edge(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], 0);
        // Intersection exactly at the middle vertex, recorded on segment 1.
        e.eil.add(c(10.0, 0.0), 1, 0.0);
        let pts = e.pts.clone();
        e.eil.add_endpoints(&pts);
        let mut out = Vec::new();
        e.split_edges(&mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pts, vec![c(0.0, 0.0), c(10.0, 0.0)]);
        assert_eq!(out[1].pts, vec![c(10.0, 0.0), c(10.0, 10.0)]);
    }

    #[test]
    fn unique_insertion_merges_reversed_duplicate() {
        let mut list = EdgeList::new();
        list.insert_unique(area_edge(&[(0.0, 0.0), (1.0, 0.0)], 0));
        // The same segment traversed the other way by the other argument.
        let rev = area_edge(&[(1.0, 0.0), (0.0, 0.0)], 1);
        list.insert_unique(rev);
        assert_eq!(list.len(), 1);
        let merged = list.get(0);
        assert!(!merged.depth.is_null());
        // The reversed label was flipped before merging.
        assert_eq!(merged.label.get(1, Position::Left), Some(Location::Exterior));
        assert_eq!(merged.label.get(1, Position::Right), Some(Location::Interior));
    }

    #[test]
    fn collapsed_edge_replacement() {
        let mut list = EdgeList::new();
        list.insert_unique(area_edge(&[(0.0, 0.0), (5.0, 5.0), (0.0, 0.0)], 0));
        list.insert_unique(area_edge(&[(0.0, 0.0), (9.0, 0.0)], 0));
        assert!(list.get(0).is_collapsed());
        list.replace_collapsed_edges();
        assert_eq!(list.len(), 2);
        let replaced = list
            .iter()
            .find(|e| e.pts == vec![c(0.0, 0.0), c(5.0, 5.0)])
            .expect("replacement edge present");
        assert!(replaced.label.is_line(0));
    }
}
