//! The overlay's planar graph: nodes, directed half-edges and their angular
//! stars, stored in arenas and referenced by index.
//!
//! Every edge of the edge list contributes a forward and a backward directed
//! edge (syms of each other); each directed edge points away from its origin
//! node. Stars are kept in counter-clockwise angular order, which is the
//! order every star algorithm below relies on.

use crate::geometry::locate::{locate, locate_in_areas};
use crate::graph::edge::EdgeList;
use crate::graph::geomgraph::GeometryGraph;
use crate::graph::label::{Label, Position};
use crate::model::{Coordinate, Location};
use crate::TopologyError;
use std::collections::BTreeMap;

pub type NodeId = usize;
pub type DirId = usize;

#[derive(Debug)]
pub struct Node {
    pub coord: Coordinate,
    pub label: Label,
    pub star_label: Label,
    // Outgoing directed edges, sorted counter-clockwise by angle.
    pub star: Vec<DirId>,
}

#[derive(Debug)]
pub struct DirectedEdge {
    pub edge: usize,
    pub forward: bool,
    pub node: NodeId,
    pub sym: DirId,
    pub label: Label,
    pub angle: f64,
    pub in_result: bool,
    pub next: Option<DirId>,
    pub next_min: Option<DirId>,
    pub ring: Option<usize>,
    pub min_ring: Option<usize>,
}

#[derive(Debug, Default)]
pub struct PlanarGraph {
    pub nodes: Vec<Node>,
    node_map: BTreeMap<Coordinate, NodeId>,
    pub dirs: Vec<DirectedEdge>,
}

enum LinkState {
    Scanning,
    Linking(DirId),
}

impl PlanarGraph {
    pub fn new() -> Self {
        PlanarGraph::default()
    }

    pub fn add_node(&mut self, coord: Coordinate) -> NodeId {
        if let Some(&id) = self.node_map.get(&coord) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            coord,
            label: Label::node(),
            star_label: Label::node(),
            star: Vec::new(),
        });
        self.node_map.insert(coord, id);
        id
    }

    pub fn node_id(&self, coord: Coordinate) -> Option<NodeId> {
        self.node_map.get(&coord).copied()
    }

    /// Create the directed-edge pair for every edge of the list and sort the
    /// node stars by angle.
    pub fn add_edges(&mut self, edges: &EdgeList) {
        for (eid, e) in edges.iter().enumerate() {
            if e.pts.len() < 2 {
                continue;
            }
            let n = e.pts.len();
            let n0 = self.add_node(e.pts[0]);
            let n1 = self.add_node(e.pts[n - 1]);
            let fwd = self.dirs.len();
            let bwd = fwd + 1;
            self.dirs.push(DirectedEdge {
                edge: eid,
                forward: true,
                node: n0,
                sym: bwd,
                label: e.label,
                angle: angle_of(e.pts[0], e.pts[1]),
                in_result: false,
                next: None,
                next_min: None,
                ring: None,
                min_ring: None,
            });
            self.dirs.push(DirectedEdge {
                edge: eid,
                forward: false,
                node: n1,
                sym: fwd,
                label: e.label.flipped(),
                angle: angle_of(e.pts[n - 1], e.pts[n - 2]),
                in_result: false,
                next: None,
                next_min: None,
                ring: None,
                min_ring: None,
            });
            self.nodes[n0].star.push(fwd);
            self.nodes[n1].star.push(bwd);
        }
        for node in &mut self.nodes {
            let dirs = &self.dirs;
            node.star
                .sort_by(|&a, &b| dirs[a].angle.total_cmp(&dirs[b].angle).then(a.cmp(&b)));
        }
    }

    pub fn end_node(&self, d: DirId) -> NodeId {
        self.dirs[self.dirs[d].sym].node
    }

    /// Labelling stages A-C for every node star.
    pub fn compute_labelling(
        &mut self,
        edges: &EdgeList,
        graphs: &[GeometryGraph; 2],
    ) -> Result<(), TopologyError> {
        for n in 0..self.nodes.len() {
            self.compute_star_labelling(n, edges, graphs)?;
        }
        self.merge_sym_labels();
        self.update_node_labels();
        Ok(())
    }

    fn compute_star_labelling(
        &mut self,
        n: NodeId,
        edges: &EdgeList,
        graphs: &[GeometryGraph; 2],
    ) -> Result<(), TopologyError> {
        self.propagate_side_labels(n, 0)?;
        self.propagate_side_labels(n, 1)?;

        // Arguments still unlabelled here have no edge of their own at this
        // node. A dimensional-collapse edge pins the location to Exterior;
        // otherwise the node is located within the argument's areas.
        let star = self.nodes[n].star.clone();
        let mut has_collapse = [false, false];
        for &d in &star {
            let lbl = &self.dirs[d].label;
            for arg in 0..2 {
                if lbl.is_line(arg) && lbl.on(arg) == Some(Location::Boundary) {
                    has_collapse[arg] = true;
                }
            }
        }
        let coord = self.nodes[n].coord;
        let mut area_loc: [Option<Location>; 2] = [None, None];
        for &d in &star {
            for arg in 0..2 {
                if self.dirs[d].label.is_any_null(arg) {
                    let loc = if has_collapse[arg] {
                        Location::Exterior
                    } else {
                        *area_loc[arg]
                            .get_or_insert_with(|| locate_in_areas(coord, &graphs[arg].geometry))
                    };
                    self.dirs[d].label.set_all_if_null(arg, loc);
                }
            }
        }

        // The star's own label: an argument is Interior here when any
        // incident edge runs through or along it.
        let mut star_label = Label::node();
        for &d in &star {
            let e_label = edges.get(self.dirs[d].edge).label;
            for arg in 0..2 {
                if matches!(
                    e_label.on(arg),
                    Some(Location::Interior) | Some(Location::Boundary)
                ) {
                    star_label.set_on(arg, Location::Interior);
                }
            }
        }
        self.nodes[n].star_label = star_label;
        Ok(())
    }

    // Walking the star counter-clockwise crosses from each edge's Left side
    // to the next edge's Right side; both must agree on the region between.
    fn propagate_side_labels(&mut self, n: NodeId, arg: usize) -> Result<(), TopologyError> {
        let star = self.nodes[n].star.clone();
        let mut start_loc: Option<Location> = None;
        for &d in &star {
            let lbl = &self.dirs[d].label;
            if lbl.is_area_arg(arg) {
                if let Some(l) = lbl.get(arg, Position::Left) {
                    start_loc = Some(l);
                }
            }
        }
        let mut curr = match start_loc {
            Some(l) => l,
            None => return Ok(()),
        };
        let coord = self.nodes[n].coord;
        for &d in &star {
            let lbl = &mut self.dirs[d].label;
            if lbl.on(arg).is_none() {
                lbl.set_on(arg, curr);
            }
            if !lbl.is_area_arg(arg) {
                continue;
            }
            let left = lbl.get(arg, Position::Left);
            let right = lbl.get(arg, Position::Right);
            match right {
                Some(r) => {
                    if r != curr {
                        return Err(TopologyError::SideLocationConflict(coord));
                    }
                    match left {
                        Some(l) => curr = l,
                        None => {
                            return Err(TopologyError::InvariantViolation(
                                "single null side on labelled edge",
                            ))
                        }
                    }
                }
                None => {
                    if left.is_some() {
                        return Err(TopologyError::InvariantViolation(
                            "single null side on unlabelled edge",
                        ));
                    }
                    lbl.set(arg, Position::Right, curr);
                    lbl.set(arg, Position::Left, curr);
                }
            }
        }
        Ok(())
    }

    /// Stage B: a directed edge null on an argument inherits the flipped
    /// label of its sym.
    pub fn merge_sym_labels(&mut self) {
        for d in 0..self.dirs.len() {
            let sym_label = self.dirs[self.dirs[d].sym].label.flipped();
            self.dirs[d].label.merge(&sym_label);
        }
    }

    /// Stage C: each node's label absorbs its star's label.
    pub fn update_node_labels(&mut self) {
        for node in &mut self.nodes {
            let star_label = node.star_label;
            node.label.merge(&star_label);
        }
    }

    /// Stage D: nodes present in only one input get their missing location
    /// from the full point locator, and push it into incident edges.
    pub fn label_incomplete_nodes(&mut self, graphs: &[GeometryGraph; 2]) {
        for n in 0..self.nodes.len() {
            for arg in 0..2 {
                if self.nodes[n].label.on(arg).is_none() {
                    let loc = locate(self.nodes[n].coord, &graphs[arg].geometry);
                    self.nodes[n].label.set_on(arg, loc);
                }
            }
            self.update_star_labelling(n);
        }
    }

    pub fn update_star_labelling(&mut self, n: NodeId) {
        let label = self.nodes[n].label;
        let star = self.nodes[n].star.clone();
        for &d in &star {
            for arg in 0..2 {
                if let Some(loc) = label.on(arg) {
                    self.dirs[d].label.set_all_if_null(arg, loc);
                }
            }
        }
    }

    /// An edge lying wholly inside the result area of both arguments.
    pub fn is_interior_area_edge(&self, d: DirId) -> bool {
        let lbl = &self.dirs[d].label;
        (0..2).all(|arg| {
            lbl.is_area_arg(arg)
                && lbl.get(arg, Position::Left) == Some(Location::Interior)
                && lbl.get(arg, Position::Right) == Some(Location::Interior)
        })
    }

    /// A directed edge representing a line in the result: line-labelled for
    /// some argument and not inside either argument's area.
    pub fn is_line_edge(&self, d: DirId) -> bool {
        let lbl = &self.dirs[d].label;
        let is_line = lbl.is_line(0) || lbl.is_line(1);
        let exterior_if_area = (0..2).all(|arg| {
            !lbl.is_area_arg(arg) || lbl.all_positions_equal(arg, Location::Exterior)
        });
        is_line && exterior_if_area
    }

    /// Link each in-result incoming edge to the next in-result outgoing edge
    /// in counter-clockwise order, so result rings keep their face on the
    /// right.
    pub fn link_result_directed_edges(&mut self, n: NodeId) -> Result<(), TopologyError> {
        let star = self.nodes[n].star.clone();
        let mut first_out: Option<DirId> = None;
        let mut state = LinkState::Scanning;
        for &next_out in &star {
            let next_in = self.dirs[next_out].sym;
            if !self.dirs[next_out].label.is_area() {
                continue;
            }
            if first_out.is_none() && self.dirs[next_out].in_result {
                first_out = Some(next_out);
            }
            match state {
                LinkState::Scanning => {
                    if self.dirs[next_in].in_result {
                        state = LinkState::Linking(next_in);
                    }
                }
                LinkState::Linking(incoming) => {
                    if self.dirs[next_out].in_result {
                        self.dirs[incoming].next = Some(next_out);
                        state = LinkState::Scanning;
                    }
                }
            }
        }
        if let LinkState::Linking(incoming) = state {
            let fo = match first_out {
                Some(fo) => fo,
                None => return Err(TopologyError::UnclosedRing(self.nodes[n].coord)),
            };
            if !self.dirs[fo].in_result {
                return Err(TopologyError::InvariantViolation(
                    "unable to link last incoming directed edge",
                ));
            }
            self.dirs[incoming].next = Some(fo);
        }
        Ok(())
    }

    /// The clockwise variant of result linking, scoped to one maximal ring;
    /// writes the minimal-ring links.
    pub fn link_minimal_directed_edges(
        &mut self,
        n: NodeId,
        ring: usize,
    ) -> Result<(), TopologyError> {
        let star = self.nodes[n].star.clone();
        let mut first_out: Option<DirId> = None;
        let mut state = LinkState::Scanning;
        for &next_out in star.iter().rev() {
            let next_in = self.dirs[next_out].sym;
            if first_out.is_none() && self.dirs[next_out].ring == Some(ring) {
                first_out = Some(next_out);
            }
            match state {
                LinkState::Scanning => {
                    if self.dirs[next_in].ring == Some(ring) {
                        state = LinkState::Linking(next_in);
                    }
                }
                LinkState::Linking(incoming) => {
                    if self.dirs[next_out].ring == Some(ring) {
                        self.dirs[incoming].next_min = Some(next_out);
                        state = LinkState::Scanning;
                    }
                }
            }
        }
        if let LinkState::Linking(incoming) = state {
            let fo = match first_out {
                Some(fo) => fo,
                None => {
                    return Err(TopologyError::InvariantViolation(
                        "no outgoing edge found for minimal ring",
                    ))
                }
            };
            if self.dirs[fo].ring != Some(ring) {
                return Err(TopologyError::InvariantViolation(
                    "unable to link last incoming minimal-ring edge",
                ));
            }
            self.dirs[incoming].next_min = Some(fo);
        }
        Ok(())
    }

    /// Classify the line edges around a node as covered or uncovered by the
    /// result area, from the in-result area edges crossed while walking the
    /// star counter-clockwise.
    pub fn find_covered_line_edges(&self, n: NodeId, edges: &mut EdgeList) {
        let star = &self.nodes[n].star;
        let mut start_loc: Option<Location> = None;
        for &next_out in star {
            let next_in = self.dirs[next_out].sym;
            if !self.is_line_edge(next_out) {
                if self.dirs[next_out].in_result {
                    start_loc = Some(Location::Interior);
                    break;
                }
                if self.dirs[next_in].in_result {
                    start_loc = Some(Location::Exterior);
                    break;
                }
            }
        }
        let mut curr = match start_loc {
            Some(l) => l,
            None => return,
        };
        for &next_out in star {
            let next_in = self.dirs[next_out].sym;
            if self.is_line_edge(next_out) {
                let eid = self.dirs[next_out].edge;
                edges.get_mut(eid).covered = Some(curr == Location::Interior);
            } else {
                if self.dirs[next_out].in_result {
                    curr = Location::Exterior;
                }
                if self.dirs[next_in].in_result {
                    curr = Location::Interior;
                }
            }
        }
    }

    /// Number of star edges already assigned to the given maximal ring.
    pub fn outgoing_degree_in_ring(&self, n: NodeId, ring: usize) -> usize {
        self.nodes[n]
            .star
            .iter()
            .filter(|&&d| self.dirs[d].ring == Some(ring))
            .count()
    }

    pub fn is_incident_edge_in_result(&self, n: NodeId, edges: &EdgeList) -> bool {
        self.nodes[n].star.iter().any(|&d| {
            self.dirs[d].in_result
                || self.dirs[self.dirs[d].sym].in_result
                || edges.get(self.dirs[d].edge).in_result
        })
    }
}

fn angle_of(from: Coordinate, to: Coordinate) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}
