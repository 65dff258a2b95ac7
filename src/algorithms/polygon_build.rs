//! Assembles result polygons from the marked directed edges of the planar
//! graph.
//!
//! Result edges are linked around each node star, then walked into maximal
//! rings. A maximal ring that passes through a node more than once is
//! re-linked per-ring and split into minimal rings. Clockwise rings are
//! shells, counter-clockwise rings are holes; holes attach to the shell of
//! their maximal ring or, failing that, to the smallest enclosing shell.

use crate::geometry::locate::locate_in_ring;
use crate::geometry::orient::{is_ccw, signed_area2};
use crate::geometry::tolerance::{near_zero, EPS_AREA};
use crate::graph::edge::EdgeList;
use crate::graph::planar::{DirId, PlanarGraph};
use crate::model::{Coordinate, Envelope, Location, Polygon};
use crate::TopologyError;

struct RingData {
    pts: Vec<Coordinate>,
    is_hole: bool,
    is_degenerate: bool,
}

pub fn build_polygons(
    graph: &mut PlanarGraph,
    edges: &mut EdgeList,
) -> Result<Vec<Polygon>, TopologyError> {
    for n in 0..graph.nodes.len() {
        graph.link_result_directed_edges(n)?;
    }

    let mut max_rings: Vec<Vec<DirId>> = Vec::new();
    for d in 0..graph.dirs.len() {
        if graph.dirs[d].in_result && graph.dirs[d].label.is_area() && graph.dirs[d].ring.is_none()
        {
            let id = max_rings.len();
            max_rings.push(walk_ring(graph, d, id, false)?);
        }
    }

    let mut shells: Vec<(RingData, Vec<RingData>)> = Vec::new();
    let mut free_holes: Vec<RingData> = Vec::new();
    let mut min_ring_count = 0usize;

    for (rid, ring_dirs) in max_rings.iter().enumerate() {
        let needs_split = ring_dirs
            .iter()
            .any(|&d| graph.outgoing_degree_in_ring(graph.dirs[d].node, rid) >= 2);
        if !needs_split {
            let ring = make_ring(graph, edges, ring_dirs);
            if ring.is_degenerate {
                continue;
            }
            if ring.is_hole {
                free_holes.push(ring);
            } else {
                shells.push((ring, Vec::new()));
            }
            continue;
        }
        // Re-link this ring's edges per node to carve out its minimal rings.
        for &d in ring_dirs {
            let n = graph.dirs[d].node;
            graph.link_minimal_directed_edges(n, rid)?;
        }
        let mut minimal: Vec<RingData> = Vec::new();
        for &d in ring_dirs {
            if graph.dirs[d].min_ring.is_none() {
                let mid = min_ring_count;
                min_ring_count += 1;
                let dirs = walk_ring(graph, d, mid, true)?;
                let ring = make_ring(graph, edges, &dirs);
                if !ring.is_degenerate {
                    minimal.push(ring);
                }
            }
        }
        let shell_count = minimal.iter().filter(|r| !r.is_hole).count();
        if shell_count > 1 {
            return Err(TopologyError::InvariantViolation(
                "more than one shell in a maximal ring",
            ));
        }
        let (mut shell_rings, hole_rings): (Vec<_>, Vec<_>) =
            minimal.into_iter().partition(|r| !r.is_hole);
        match shell_rings.pop() {
            Some(shell) => shells.push((shell, hole_rings)),
            None => free_holes.extend(hole_rings),
        }
    }

    for hole in free_holes {
        let idx = find_shell_containing(&shells, &hole)?;
        shells[idx].1.push(hole);
    }

    Ok(shells
        .into_iter()
        .map(|(shell, holes)| Polygon {
            shell: shell.pts,
            holes: holes.into_iter().map(|h| h.pts).collect(),
        })
        .collect())
}

// Follow the ring links from `start`, marking each visited edge with the
// ring id. `minimal` selects the minimal-ring links and id slot.
fn walk_ring(
    graph: &mut PlanarGraph,
    start: DirId,
    id: usize,
    minimal: bool,
) -> Result<Vec<DirId>, TopologyError> {
    let mut dirs = Vec::new();
    let mut d = start;
    loop {
        let seen = if minimal {
            graph.dirs[d].min_ring
        } else {
            graph.dirs[d].ring
        };
        if seen == Some(id) {
            return Err(TopologyError::InvariantViolation(
                "directed edge visited twice during ring building",
            ));
        }
        if minimal {
            graph.dirs[d].min_ring = Some(id);
        } else {
            graph.dirs[d].ring = Some(id);
        }
        dirs.push(d);
        let next = if minimal {
            graph.dirs[d].next_min
        } else {
            graph.dirs[d].next
        };
        d = match next {
            Some(nd) => nd,
            None => {
                let end = graph.end_node(d);
                return Err(TopologyError::UnclosedRing(graph.nodes[end].coord));
            }
        };
        if d == start {
            break;
        }
    }
    Ok(dirs)
}

fn make_ring(graph: &PlanarGraph, edges: &mut EdgeList, dirs: &[DirId]) -> RingData {
    let mut pts: Vec<Coordinate> = Vec::new();
    for (i, &d) in dirs.iter().enumerate() {
        let de = &graph.dirs[d];
        let e = edges.get_mut(de.edge);
        e.in_result = true;
        add_ring_points(&mut pts, &e.pts, de.forward, i == 0);
    }
    let area2 = signed_area2(&pts);
    RingData {
        is_hole: is_ccw(&pts),
        is_degenerate: near_zero(area2, EPS_AREA),
        pts,
    }
}

fn add_ring_points(out: &mut Vec<Coordinate>, pts: &[Coordinate], forward: bool, first: bool) {
    if forward {
        let start = if first { 0 } else { 1 };
        out.extend_from_slice(&pts[start..]);
    } else {
        let start = if first { pts.len() } else { pts.len() - 1 };
        for i in (0..start).rev() {
            out.push(pts[i]);
        }
    }
}

// The smallest shell whose envelope and ring contain the hole.
fn find_shell_containing(
    shells: &[(RingData, Vec<RingData>)],
    hole: &RingData,
) -> Result<usize, TopologyError> {
    let hole_env = Envelope::of_points(&hole.pts);
    let mut best: Option<(usize, f64)> = None;
    for (i, (shell, _)) in shells.iter().enumerate() {
        let env = Envelope::of_points(&shell.pts);
        if !env.covers(&hole_env) {
            continue;
        }
        let test_pt = hole.pts.iter().find(|p| !shell.pts.contains(p));
        let inside = match test_pt {
            Some(&p) => locate_in_ring(p, &shell.pts) != Location::Exterior,
            None => false,
        };
        if !inside {
            continue;
        }
        let area = env.area();
        if best.map_or(true, |(_, ba)| area < ba) {
            best = Some((i, area));
        }
    }
    best.map(|(i, _)| i)
        .ok_or(TopologyError::InvariantViolation(
            "unable to assign hole to a shell",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn ring_points_forward_and_reverse() {
        let pts = vec![c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0)];
        let mut out = Vec::new();
        add_ring_points(&mut out, &pts, true, true);
        assert_eq!(out, pts);
        add_ring_points(&mut out, &pts, false, false);
        // Continuing backwards from the shared endpoint.
        assert_eq!(out.len(), 5);
        assert_eq!(out[3], c(1.0, 0.0));
        assert_eq!(out[4], c(0.0, 0.0));
    }
}
