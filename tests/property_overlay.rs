//! Property tests: set-theoretic laws, orientation and coverage invariants,
//! checked by point sampling on randomized inputs.

use overlay2d::geometry::locate::locate;
use overlay2d::geometry::orient::signed_area2;
use overlay2d::{overlay, Coordinate, Geometry, Location, OpType};
use proptest::prelude::*;

fn rect_strategy() -> impl Strategy<Value = Geometry> {
    (0i32..12, 0i32..12, 1i32..8, 1i32..8).prop_map(|(x, y, w, h)| {
        let (x0, y0, x1, y1) = (x as f64, y as f64, (x + w) as f64, (y + h) as f64);
        Geometry::polygon(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)])
    })
}

// All inputs have integer coordinates, so half-offset samples never land on
// a boundary of the inputs; result boundaries are subsets of input
// boundaries for area operands.
fn samples() -> Vec<Coordinate> {
    let mut pts = Vec::new();
    for ix in -1..21 {
        for iy in -1..21 {
            pts.push(Coordinate::new(ix as f64 + 0.5, iy as f64 + 0.5));
        }
    }
    pts
}

fn covers(g: &Geometry, p: Coordinate) -> bool {
    locate(p, g) != Location::Exterior
}

fn op_expected(op: OpType, in_a: bool, in_b: bool) -> bool {
    match op {
        OpType::Intersection => in_a && in_b,
        OpType::Union => in_a || in_b,
        OpType::Difference => in_a && !in_b,
        OpType::SymDifference => in_a != in_b,
    }
}

fn each_polygon(g: &Geometry, f: &mut dyn FnMut(&overlay2d::Polygon)) {
    match g {
        Geometry::Polygon(p) => f(p),
        Geometry::MultiPolygon(ps) => ps.iter().for_each(|p| f(p)),
        Geometry::Collection(gs) => gs.iter().for_each(|g| each_polygon(g, f)),
        _ => {}
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn set_laws_on_rectangles(a in rect_strategy(), b in rect_strategy()) {
        let pts = samples();
        for op in [OpType::Intersection, OpType::Union, OpType::Difference, OpType::SymDifference] {
            let r = overlay(&a, &b, op).unwrap();
            for &p in &pts {
                let expected = op_expected(op, covers(&a, p), covers(&b, p));
                prop_assert_eq!(covers(&r, p), expected, "op {:?} at ({}, {})", op, p.x, p.y);
            }
        }
    }

    #[test]
    fn intersection_commutes(a in rect_strategy(), b in rect_strategy()) {
        let ab = overlay(&a, &b, OpType::Intersection).unwrap();
        let ba = overlay(&b, &a, OpType::Intersection).unwrap();
        for &p in &samples() {
            prop_assert_eq!(covers(&ab, p), covers(&ba, p));
        }
    }

    #[test]
    fn symdifference_is_union_minus_intersection(a in rect_strategy(), b in rect_strategy()) {
        let sym = overlay(&a, &b, OpType::SymDifference).unwrap();
        let union = overlay(&a, &b, OpType::Union).unwrap();
        let inter = overlay(&a, &b, OpType::Intersection).unwrap();
        let diff = overlay(&union, &inter, OpType::Difference).unwrap();
        for &p in &samples() {
            prop_assert_eq!(covers(&sym, p), covers(&diff, p));
        }
    }

    #[test]
    fn difference_and_intersection_partition_the_left_operand(
        a in rect_strategy(),
        b in rect_strategy(),
    ) {
        let diff = overlay(&a, &b, OpType::Difference).unwrap();
        let inter = overlay(&a, &b, OpType::Intersection).unwrap();
        for &p in &samples() {
            prop_assert_eq!(covers(&diff, p) || covers(&inter, p), covers(&a, p));
            // The two parts are disjoint in the interior.
            prop_assert!(!(locate(p, &diff) == Location::Interior
                && locate(p, &inter) == Location::Interior));
        }
    }

    #[test]
    fn shells_clockwise_holes_counter_clockwise(a in rect_strategy(), b in rect_strategy()) {
        for op in [OpType::Intersection, OpType::Union, OpType::Difference, OpType::SymDifference] {
            let r = overlay(&a, &b, op).unwrap();
            let mut ok = true;
            each_polygon(&r, &mut |poly| {
                if signed_area2(&poly.shell) >= 0.0 {
                    ok = false;
                }
                for h in &poly.holes {
                    if signed_area2(h) <= 0.0 {
                        ok = false;
                    }
                }
            });
            prop_assert!(ok, "orientation invariant violated for {:?}", op);
        }
    }

    #[test]
    fn coverage_invariant_for_lines(
        rect in rect_strategy(),
        y4 in 1i32..47,
        x0 in -2i32..10,
        len in 4i32..20,
    ) {
        // A horizontal line at a quarter-integer height never coincides with
        // rectangle boundaries.
        let y = y4 as f64 / 4.0;
        let line = Geometry::line_string(&[(x0 as f64, y), ((x0 + len) as f64, y)]);
        for op in [OpType::Intersection, OpType::Union, OpType::Difference, OpType::SymDifference] {
            let r = overlay(&line, &rect, op).unwrap();
            let mut areas: Vec<overlay2d::Polygon> = Vec::new();
            each_polygon(&r, &mut |p| areas.push(p.clone()));
            let lines = collect_lines(&r);
            for l in &lines {
                let mid = Coordinate::new((l[0].x + l[1].x) / 2.0, (l[0].y + l[1].y) / 2.0);
                for poly in &areas {
                    let g = Geometry::Polygon(poly.clone());
                    prop_assert_ne!(
                        locate(mid, &g),
                        Location::Interior,
                        "result line covered by result polygon in {:?}",
                        op
                    );
                }
            }
        }
    }
}

fn collect_lines(g: &Geometry) -> Vec<Vec<Coordinate>> {
    match g {
        Geometry::LineString(l) => vec![l.clone()],
        Geometry::MultiLineString(ls) => ls.clone(),
        Geometry::Collection(gs) => gs.iter().flat_map(collect_lines).collect(),
        _ => Vec::new(),
    }
}
