//! Orientation and ring predicates.

use crate::model::Coordinate;

/// Sign of the cross product (q - p) x (r - p):
/// +1 if r lies to the left of the directed line p->q, -1 to the right,
/// 0 if the three points are collinear.
#[inline]
pub fn orientation_index(p: Coordinate, q: Coordinate, r: Coordinate) -> i32 {
    let det = (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x);
    if det > 0.0 {
        1
    } else if det < 0.0 {
        -1
    } else {
        0
    }
}

/// Twice the signed area of a ring (closed or open chain; the closing segment
/// is implied). Positive for counter-clockwise rings.
pub fn signed_area2(ring: &[Coordinate]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut a = 0.0;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        a += p.x * q.y - q.x * p.y;
    }
    a
}

/// True when the ring winds counter-clockwise.
pub fn is_ccw(ring: &[Coordinate]) -> bool {
    signed_area2(ring) > 0.0
}

/// True when p lies on the closed segment [a, b].
pub fn point_on_segment(p: Coordinate, a: Coordinate, b: Coordinate) -> bool {
    if orientation_index(a, b, p) != 0 {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// True when p lies on any segment of the chain.
pub fn is_on_line(p: Coordinate, chain: &[Coordinate]) -> bool {
    chain
        .windows(2)
        .any(|w| point_on_segment(p, w[0], w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn orientation_signs() {
        assert_eq!(orientation_index(c(0.0, 0.0), c(1.0, 0.0), c(0.0, 1.0)), 1);
        assert_eq!(orientation_index(c(0.0, 0.0), c(1.0, 0.0), c(0.0, -1.0)), -1);
        assert_eq!(orientation_index(c(0.0, 0.0), c(2.0, 2.0), c(1.0, 1.0)), 0);
    }

    #[test]
    fn ring_orientation() {
        let ccw = [c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 1.0)];
        assert!(is_ccw(&ccw));
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!(!is_ccw(&cw));
    }

    #[test]
    fn on_segment_bounds() {
        assert!(point_on_segment(c(1.0, 1.0), c(0.0, 0.0), c(2.0, 2.0)));
        assert!(!point_on_segment(c(3.0, 3.0), c(0.0, 0.0), c(2.0, 2.0)));
        assert!(!point_on_segment(c(1.0, 1.2), c(0.0, 0.0), c(2.0, 2.0)));
    }
}
