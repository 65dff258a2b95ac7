//! Pairwise segment intersection over edge sets.
//!
//! Candidate pairs come from a 1-D interval index over segment x-extents;
//! a y-extent check rejects the remainder before the exact intersector runs.
//! Candidates are collected first and recorded afterwards, so the edge lists
//! are never mutated while they are being traversed.

use crate::geometry::intersect::{edge_distance, intersect_segments, SegSegIntersection};
use crate::graph::edge::Edge;
use crate::index::bintree::BinTree;
use crate::index::interval::Interval;
use crate::model::Coordinate;

/// Records intersection points into the edges of one or two edge sets.
pub struct SegmentIntersector {
    include_proper: bool,
    pub has_intersection: bool,
    pub has_proper: bool,
    pub proper_intersection_point: Option<Coordinate>,
}

impl SegmentIntersector {
    pub fn new(include_proper: bool) -> Self {
        SegmentIntersector {
            include_proper,
            has_intersection: false,
            has_proper: false,
            proper_intersection_point: None,
        }
    }

    // An intersection internal to one edge that only reflects chain
    // adjacency: consecutive segments, or the closing point of a ring.
    fn is_trivial(e: &Edge, s0: usize, s1: usize) -> bool {
        if s0.abs_diff(s1) == 1 {
            return true;
        }
        if e.is_closed() {
            let max_seg = e.pts.len() - 2;
            if (s0 == 0 && s1 == max_seg) || (s1 == 0 && s0 == max_seg) {
                return true;
            }
        }
        false
    }

    // Decide whether to record, updating the proper-intersection state.
    fn classify(&mut self, res: &SegSegIntersection, trivial: bool) -> bool {
        let single = match res {
            SegSegIntersection::None => return false,
            SegSegIntersection::Point { .. } => true,
            SegSegIntersection::Collinear { .. } => false,
        };
        if trivial && single {
            return false;
        }
        self.has_intersection = true;
        let proper = matches!(res, SegSegIntersection::Point { proper: true, .. });
        if proper {
            self.has_proper = true;
            if let SegSegIntersection::Point { pt, .. } = res {
                self.proper_intersection_point = Some(*pt);
            }
        }
        self.include_proper || !proper
    }

    fn record(res: &SegSegIntersection, e: &mut Edge, seg: usize) {
        match res {
            SegSegIntersection::None => {}
            SegSegIntersection::Point { pt, .. } => Self::record_point(*pt, e, seg),
            SegSegIntersection::Collinear { p0, p1 } => {
                // Both overlap endpoints split the edge.
                Self::record_point(*p0, e, seg);
                Self::record_point(*p1, e, seg);
            }
        }
    }

    fn record_point(pt: Coordinate, e: &mut Edge, seg: usize) {
        let mut seg_index = seg;
        let mut dist = edge_distance(pt, e.pts[seg], e.pts[seg + 1]);
        // An intersection landing on the next vertex belongs to the next
        // segment at distance zero.
        let next = seg + 1;
        if next < e.pts.len() && pt == e.pts[next] {
            seg_index = next;
            dist = 0.0;
        }
        e.eil.add(pt, seg_index, dist);
    }

    /// Intersect two segments of the same edge set.
    pub fn add_intersections_within(
        &mut self,
        edges: &mut [Edge],
        (i0, s0): (usize, usize),
        (i1, s1): (usize, usize),
    ) {
        if i0 == i1 && s0 == s1 {
            return;
        }
        let p0 = edges[i0].pts[s0];
        let p1 = edges[i0].pts[s0 + 1];
        let q0 = edges[i1].pts[s1];
        let q1 = edges[i1].pts[s1 + 1];
        let res = intersect_segments(p0, p1, q0, q1);
        let trivial = i0 == i1 && Self::is_trivial(&edges[i0], s0, s1);
        if !self.classify(&res, trivial) {
            return;
        }
        Self::record(&res, &mut edges[i0], s0);
        Self::record(&res, &mut edges[i1], s1);
    }

    /// Intersect a segment of one edge set with a segment of another.
    pub fn add_intersections_between(
        &mut self,
        edges0: &mut [Edge],
        (i0, s0): (usize, usize),
        edges1: &mut [Edge],
        (i1, s1): (usize, usize),
    ) {
        let p0 = edges0[i0].pts[s0];
        let p1 = edges0[i0].pts[s0 + 1];
        let q0 = edges1[i1].pts[s1];
        let q1 = edges1[i1].pts[s1 + 1];
        let res = intersect_segments(p0, p1, q0, q1);
        if !self.classify(&res, false) {
            return;
        }
        Self::record(&res, &mut edges0[i0], s0);
        Self::record(&res, &mut edges1[i1], s1);
    }
}

fn x_interval(a: Coordinate, b: Coordinate) -> Interval {
    Interval::new(a.x, b.x)
}

fn y_overlaps(a0: Coordinate, a1: Coordinate, b0: Coordinate, b1: Coordinate) -> bool {
    let (alo, ahi) = (a0.y.min(a1.y), a0.y.max(a1.y));
    let (blo, bhi) = (b0.y.min(b1.y), b0.y.max(b1.y));
    !(ahi < blo || bhi < alo)
}

fn segments_of(edges: &[Edge]) -> impl Iterator<Item = (usize, usize)> + '_ {
    edges
        .iter()
        .enumerate()
        .flat_map(|(i, e)| (0..e.pts.len().saturating_sub(1)).map(move |s| (i, s)))
}

/// Compute all self-intersections within one edge set.
pub fn compute_self_intersections(edges: &mut [Edge], si: &mut SegmentIntersector) {
    let mut tree: BinTree<(usize, usize)> = BinTree::new();
    for (i, s) in segments_of(edges) {
        tree.insert(x_interval(edges[i].pts[s], edges[i].pts[s + 1]), (i, s));
    }
    let mut pairs: Vec<((usize, usize), (usize, usize))> = Vec::new();
    for (i, s) in segments_of(edges) {
        let a0 = edges[i].pts[s];
        let a1 = edges[i].pts[s + 1];
        for &(j, t) in tree.query(x_interval(a0, a1)) {
            if (j, t) <= (i, s) {
                continue;
            }
            if !y_overlaps(a0, a1, edges[j].pts[t], edges[j].pts[t + 1]) {
                continue;
            }
            pairs.push(((i, s), (j, t)));
        }
    }
    for (a, b) in pairs {
        si.add_intersections_within(edges, a, b);
    }
}

/// Compute all intersections between two edge sets.
pub fn compute_cross_intersections(
    edges0: &mut [Edge],
    edges1: &mut [Edge],
    si: &mut SegmentIntersector,
) {
    let mut tree: BinTree<(usize, usize)> = BinTree::new();
    for (i, s) in segments_of(edges0) {
        tree.insert(x_interval(edges0[i].pts[s], edges0[i].pts[s + 1]), (i, s));
    }
    let mut pairs: Vec<((usize, usize), (usize, usize))> = Vec::new();
    for (j, t) in segments_of(edges1) {
        let b0 = edges1[j].pts[t];
        let b1 = edges1[j].pts[t + 1];
        for &(i, s) in tree.query(x_interval(b0, b1)) {
            if !y_overlaps(edges0[i].pts[s], edges0[i].pts[s + 1], b0, b1) {
                continue;
            }
            pairs.push(((i, s), (j, t)));
        }
    }
    for (a, b) in pairs {
        si.add_intersections_between(edges0, a, edges1, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::label::Label;
    use crate::model::Location;

    fn line_edge(pts: &[(f64, f64)], arg: usize) -> Edge {
        Edge::new(
            pts.iter().map(|&(x, y)| Coordinate::new(x, y)).collect(),
            Label::line(arg, Location::Interior),
        )
    }

    #[test]
    fn cross_intersection_recorded_on_both() {
        let mut a = vec![line_edge(&[(0.0, 0.0), (10.0, 10.0)], 0)];
        let mut b = vec![line_edge(&[(0.0, 10.0), (10.0, 0.0)], 1)];
        let mut si = SegmentIntersector::new(true);
        compute_cross_intersections(&mut a, &mut b, &mut si);
        assert!(si.has_intersection);
        assert!(si.has_proper);
        assert_eq!(si.proper_intersection_point, Some(Coordinate::new(5.0, 5.0)));
        assert_eq!(a[0].eil.iter().count(), 1);
        assert_eq!(b[0].eil.iter().count(), 1);
    }

    #[test]
    fn ring_adjacency_is_not_an_intersection() {
        let mut ring = vec![line_edge(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)],
            0,
        )];
        let mut si = SegmentIntersector::new(true);
        compute_self_intersections(&mut ring, &mut si);
        assert!(!si.has_intersection);
        assert!(ring[0].eil.is_empty());
    }

    #[test]
    fn self_crossing_line_nodes_itself() {
        let mut edges = vec![line_edge(
            &[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)],
            0,
        )];
        let mut si = SegmentIntersector::new(true);
        compute_self_intersections(&mut edges, &mut si);
        assert!(si.has_intersection);
        assert_eq!(edges[0].eil.iter().count(), 2);
    }

    #[test]
    fn collinear_overlap_records_both_endpoints() {
        let mut a = vec![line_edge(&[(0.0, 0.0), (10.0, 0.0)], 0)];
        let mut b = vec![line_edge(&[(3.0, 0.0), (7.0, 0.0)], 1)];
        let mut si = SegmentIntersector::new(true);
        compute_cross_intersections(&mut a, &mut b, &mut si);
        let pts: Vec<Coordinate> = a[0].eil.iter().map(|ei| ei.coord).collect();
        assert_eq!(pts.len(), 2);
        assert!(pts.contains(&Coordinate::new(3.0, 0.0)));
        assert!(pts.contains(&Coordinate::new(7.0, 0.0)));
    }
}
