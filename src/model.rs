use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A 2-D point with exact value equality.
///
/// Coordinates compare bit-for-bit (no tolerance): two coordinates produced by
/// the noding pass are the same node if and only if they are equal here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }
}

impl Eq for Coordinate {}

// Total order by (x, y) so coordinates can key ordered maps.
impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then(self.y.total_cmp(&other.y))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Position of a point relative to a geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

/// Axis-aligned bounding rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Envelope {
    /// An envelope containing nothing; expanding it with any point yields
    /// that point's envelope.
    pub fn empty() -> Self {
        Envelope {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn of_points(pts: &[Coordinate]) -> Self {
        let mut env = Envelope::empty();
        for p in pts {
            env.expand_to_include(*p);
        }
        env
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn expand_to_include(&mut self, p: Coordinate) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn expand_to_include_envelope(&mut self, other: &Envelope) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    pub fn intersects(&self, other: &Envelope) -> bool {
        !(self.is_empty()
            || other.is_empty()
            || other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    pub fn contains_point(&self, p: Coordinate) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn covers(&self, other: &Envelope) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    pub fn area(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            (self.max_x - self.min_x) * (self.max_y - self.min_y)
        }
    }
}

/// A polygon: one outer shell ring plus zero or more hole rings.
/// Rings are stored closed (first coordinate repeated at the end).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub shell: Vec<Coordinate>,
    pub holes: Vec<Vec<Coordinate>>,
}

/// A planar geometry: point, line-string, polygon, or a collection of such.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Coordinate),
    MultiPoint(Vec<Coordinate>),
    LineString(Vec<Coordinate>),
    MultiLineString(Vec<Vec<Coordinate>>),
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
    Collection(Vec<Geometry>),
}

fn close_ring(mut ring: Vec<Coordinate>) -> Vec<Coordinate> {
    if ring.len() >= 2 && ring.first() != ring.last() {
        ring.push(ring[0]);
    }
    ring
}

impl Geometry {
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Coordinate::new(x, y))
    }

    pub fn line_string(pts: &[(f64, f64)]) -> Self {
        Geometry::LineString(pts.iter().map(|&(x, y)| Coordinate::new(x, y)).collect())
    }

    /// Build a polygon from an open or closed shell ring; the ring is closed
    /// if needed.
    pub fn polygon(shell: &[(f64, f64)]) -> Self {
        Geometry::polygon_with_holes(shell, &[])
    }

    pub fn polygon_with_holes(shell: &[(f64, f64)], holes: &[Vec<(f64, f64)>]) -> Self {
        let shell = close_ring(shell.iter().map(|&(x, y)| Coordinate::new(x, y)).collect());
        let holes = holes
            .iter()
            .map(|h| close_ring(h.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()))
            .collect();
        Geometry::Polygon(Polygon { shell, holes })
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::MultiPoint(pts) => pts.is_empty(),
            Geometry::LineString(pts) => pts.is_empty(),
            Geometry::MultiLineString(ls) => ls.iter().all(|l| l.is_empty()),
            Geometry::Polygon(p) => p.shell.is_empty(),
            Geometry::MultiPolygon(ps) => ps.iter().all(|p| p.shell.is_empty()),
            Geometry::Collection(gs) => gs.iter().all(|g| g.is_empty()),
        }
    }

    /// Topological dimension of the geometry: 0 for points, 1 for lines,
    /// 2 for areas; the maximum over components. None when empty.
    pub fn dimension(&self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Some(0),
            Geometry::LineString(_) | Geometry::MultiLineString(_) => Some(1),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Some(2),
            Geometry::Collection(gs) => gs.iter().filter_map(|g| g.dimension()).max(),
        }
    }

    pub fn envelope(&self) -> Envelope {
        let mut env = Envelope::empty();
        match self {
            Geometry::Point(p) => env.expand_to_include(*p),
            Geometry::MultiPoint(pts) => {
                for p in pts {
                    env.expand_to_include(*p);
                }
            }
            Geometry::LineString(pts) => {
                for p in pts {
                    env.expand_to_include(*p);
                }
            }
            Geometry::MultiLineString(ls) => {
                for l in ls {
                    for p in l {
                        env.expand_to_include(*p);
                    }
                }
            }
            Geometry::Polygon(poly) => {
                for p in &poly.shell {
                    env.expand_to_include(*p);
                }
            }
            Geometry::MultiPolygon(ps) => {
                for poly in ps {
                    for p in &poly.shell {
                        env.expand_to_include(*p);
                    }
                }
            }
            Geometry::Collection(gs) => {
                for g in gs {
                    env.expand_to_include_envelope(&g.envelope());
                }
            }
        }
        env
    }

    /// An empty geometry of the given dimension.
    pub fn empty_of_dimension(dim: Option<u8>) -> Geometry {
        match dim {
            Some(0) => Geometry::MultiPoint(Vec::new()),
            Some(1) => Geometry::MultiLineString(Vec::new()),
            Some(2) => Geometry::MultiPolygon(Vec::new()),
            _ => Geometry::Collection(Vec::new()),
        }
    }
}

/// Select the most specific geometry type for a list of components:
/// a single element stays itself, a homogeneous list becomes the multi
/// variant, a mixed list becomes a collection.
pub fn build_geometry(mut components: Vec<Geometry>) -> Geometry {
    if components.is_empty() {
        return Geometry::Collection(Vec::new());
    }
    if components.len() == 1 {
        return components.remove(0);
    }
    if components.iter().all(|g| matches!(g, Geometry::Point(_))) {
        let pts = components
            .into_iter()
            .filter_map(|g| match g {
                Geometry::Point(p) => Some(p),
                _ => None,
            })
            .collect();
        return Geometry::MultiPoint(pts);
    }
    if components
        .iter()
        .all(|g| matches!(g, Geometry::LineString(_)))
    {
        let ls = components
            .into_iter()
            .filter_map(|g| match g {
                Geometry::LineString(l) => Some(l),
                _ => None,
            })
            .collect();
        return Geometry::MultiLineString(ls);
    }
    if components.iter().all(|g| matches!(g, Geometry::Polygon(_))) {
        let ps = components
            .into_iter()
            .filter_map(|g| match g {
                Geometry::Polygon(p) => Some(p),
                _ => None,
            })
            .collect();
        return Geometry::MultiPolygon(ps);
    }
    Geometry::Collection(components)
}
