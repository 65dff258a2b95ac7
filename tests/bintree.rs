//! Integration tests for the 1-D interval index.

use overlay2d::{BinTree, Interval};

#[test]
fn padded_point_items_pad_downward() {
    let mut t: BinTree<char> = BinTree::new();
    t.insert(Interval::point(0.0), 'A');
    t.insert(Interval::point(1.0), 'B');
    t.insert(Interval::new(0.0, 2.0), 'C');

    let mut hits: Vec<char> = t.query(Interval::new(0.5, 1.5)).copied().collect();
    hits.sort_unstable();
    // The zero-width items are padded below their value, so A ([-0.5, 0])
    // misses the query while B ([0.5, 1]) overlaps it.
    assert_eq!(hits, vec!['B', 'C']);

    let hits: Vec<char> = t.query(Interval::point(5.0)).copied().collect();
    assert!(hits.is_empty());
}

#[test]
fn query_returns_exactly_overlapping_items() {
    // Deterministic LCG, as elsewhere in the suite.
    fn lcg(seed: &mut u64) -> f64 {
        *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        (((*seed >> 24) & 0xFFFF_FFFF) as u32) as f64 / (u32::MAX as f64)
    }
    let mut seed = 0x0DDB_1A5E_5BAD_5EEDu64;
    let mut t: BinTree<usize> = BinTree::new();
    let mut min_extent = 1.0f64;
    let mut stored: Vec<Interval> = Vec::new();
    for i in 0..200 {
        let a = lcg(&mut seed) * 200.0 - 100.0;
        let w = if i % 7 == 0 { 0.0 } else { lcg(&mut seed) * 10.0 };
        let iv = Interval::new(a, a + w);
        // Mirror the padding rule to build the reference model.
        if w > 0.0 && w < min_extent {
            min_extent = w;
        }
        let padded = if w == 0.0 {
            let min = iv.min - min_extent / 2.0;
            Interval::new(min, min + min_extent / 2.0)
        } else {
            iv
        };
        stored.push(padded);
        t.insert(iv, i);
    }
    assert_eq!(t.len(), 200);

    for _ in 0..50 {
        let a = lcg(&mut seed) * 220.0 - 110.0;
        let w = lcg(&mut seed) * 30.0;
        let q = Interval::new(a, a + w);
        let mut got: Vec<usize> = t.query(q).copied().collect();
        got.sort_unstable();
        let expected: Vec<usize> = stored
            .iter()
            .enumerate()
            .filter(|(_, iv)| iv.overlaps(&q))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(got, expected, "query {:?}", q);
    }
}

#[test]
fn metrics_depend_only_on_insertions() {
    let intervals = [
        (0.0, 1.0),
        (4.0, 8.0),
        (-3.0, -2.0),
        (100.0, 101.0),
        (0.25, 0.5),
        (7.0, 7.0),
    ];
    let mut plain: BinTree<usize> = BinTree::new();
    let mut queried: BinTree<usize> = BinTree::new();
    for (i, &(a, b)) in intervals.iter().enumerate() {
        plain.insert(Interval::new(a, b), i);
        queried.insert(Interval::new(a, b), i);
        // Interleaved queries must not affect the tree shape.
        let _ = queried.query(Interval::new(-200.0, 200.0)).count();
        let _ = queried.query_value(a).count();
    }
    assert_eq!(plain.depth(), queried.depth());
    assert_eq!(plain.len(), queried.len());
    assert_eq!(plain.node_size(), queried.node_size());
}

#[test]
fn shrinking_extent_only_affects_later_inserts() {
    let mut t: BinTree<&str> = BinTree::new();
    t.insert(Interval::point(10.0), "wide");
    // Stored as [9.5, 10.0] under the initial extent of 1.0.
    t.insert(Interval::new(0.0, 0.1), "shrinker");
    t.insert(Interval::point(10.0), "narrow");
    // The later point item is padded with the shrunken extent: [9.95, 10.0].
    let hits: Vec<&&str> = t.query(Interval::new(9.6, 9.8)).collect();
    assert_eq!(hits, vec![&"wide"]);
    let mut hits: Vec<&str> = t.query(Interval::new(9.96, 9.99)).copied().collect();
    hits.sort_unstable();
    assert_eq!(hits, vec!["narrow", "wide"]);
}
