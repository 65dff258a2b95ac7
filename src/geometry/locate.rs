//! Point location: where does a coordinate lie relative to a geometry?
//!
//! Two locators are provided. `locate` considers every component and applies
//! the mod-2 boundary rule when components share boundary points.
//! `locate_in_areas` considers polygonal components only; a point on a line
//! or point component is Exterior to the *areas* of the geometry.

use crate::geometry::orient::{is_on_line, point_on_segment};
use crate::model::{Coordinate, Geometry, Location, Polygon};

/// Locate a point in a ring (closed coordinate chain).
pub fn locate_in_ring(p: Coordinate, ring: &[Coordinate]) -> Location {
    if ring.len() < 3 {
        return Location::Exterior;
    }
    for w in ring.windows(2) {
        if point_on_segment(p, w[0], w[1]) {
            return Location::Boundary;
        }
    }
    // Ray to the right of p; half-open y-interval per segment so that ring
    // vertices on the ray are counted once.
    let mut crossings = 0u32;
    for w in ring.windows(2) {
        let (a, b) = (w[0], w[1]);
        let y_crosses = (a.y <= p.y && b.y > p.y) || (b.y <= p.y && a.y > p.y);
        if y_crosses {
            let t = (p.y - a.y) / (b.y - a.y);
            let x_int = a.x + t * (b.x - a.x);
            if p.x < x_int {
                crossings += 1;
            }
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn locate_in_polygon(p: Coordinate, poly: &Polygon) -> Location {
    if poly.shell.is_empty() {
        return Location::Exterior;
    }
    match locate_in_ring(p, &poly.shell) {
        Location::Exterior => return Location::Exterior,
        Location::Boundary => return Location::Boundary,
        Location::Interior => {}
    }
    for hole in &poly.holes {
        match locate_in_ring(p, hole) {
            Location::Boundary => return Location::Boundary,
            Location::Interior => return Location::Exterior,
            Location::Exterior => {}
        }
    }
    Location::Interior
}

fn update(p: Coordinate, geom: &Geometry, is_in: &mut bool, boundary_count: &mut u32) {
    match geom {
        Geometry::Point(c) => {
            if p == *c {
                *is_in = true;
            }
        }
        Geometry::MultiPoint(pts) => {
            if pts.contains(&p) {
                *is_in = true;
            }
        }
        Geometry::LineString(pts) => locate_on_line_string(p, pts, is_in, boundary_count),
        Geometry::MultiLineString(ls) => {
            for l in ls {
                locate_on_line_string(p, l, is_in, boundary_count);
            }
        }
        Geometry::Polygon(poly) => match locate_in_polygon(p, poly) {
            Location::Interior => *is_in = true,
            Location::Boundary => *boundary_count += 1,
            Location::Exterior => {}
        },
        Geometry::MultiPolygon(ps) => {
            for poly in ps {
                match locate_in_polygon(p, poly) {
                    Location::Interior => *is_in = true,
                    Location::Boundary => *boundary_count += 1,
                    Location::Exterior => {}
                }
            }
        }
        Geometry::Collection(gs) => {
            for g in gs {
                update(p, g, is_in, boundary_count);
            }
        }
    }
}

fn locate_on_line_string(
    p: Coordinate,
    pts: &[Coordinate],
    is_in: &mut bool,
    boundary_count: &mut u32,
) {
    if pts.len() < 2 {
        return;
    }
    let closed = pts.first() == pts.last();
    if !closed && (p == pts[0] || p == pts[pts.len() - 1]) {
        *boundary_count += 1;
        return;
    }
    if is_on_line(p, pts) {
        *is_in = true;
    }
}

/// Locate a point relative to a geometry, honouring the mod-2 boundary rule
/// across components.
pub fn locate(p: Coordinate, geom: &Geometry) -> Location {
    if geom.is_empty() {
        return Location::Exterior;
    }
    let mut is_in = false;
    let mut boundary_count = 0u32;
    update(p, geom, &mut is_in, &mut boundary_count);
    if boundary_count % 2 == 1 {
        Location::Boundary
    } else if boundary_count > 0 || is_in {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Locate a point relative to the polygonal components of a geometry only.
pub fn locate_in_areas(p: Coordinate, geom: &Geometry) -> Location {
    match geom {
        Geometry::Polygon(poly) => locate_in_polygon(p, poly),
        Geometry::MultiPolygon(ps) => {
            for poly in ps {
                let loc = locate_in_polygon(p, poly);
                if loc != Location::Exterior {
                    return loc;
                }
            }
            Location::Exterior
        }
        Geometry::Collection(gs) => {
            for g in gs {
                let loc = locate_in_areas(p, g);
                if loc != Location::Exterior {
                    return loc;
                }
            }
            Location::Exterior
        }
        _ => Location::Exterior,
    }
}
