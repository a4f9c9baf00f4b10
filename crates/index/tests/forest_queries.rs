//! Integration tests comparing the forest against exact search.

use knnlike_index::{ExactIndex, ForestConfig, Points, RpForest, SearchIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(n: usize, dim: usize, seed: u64) -> Points {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..n * dim).map(|_| rng.random::<f64>()).collect();
    Points::new(data, dim).unwrap()
}

/// Every stored point is its own nearest neighbor at distance zero.
#[test]
fn stored_points_found_exactly() {
    let points = random_points(500, 4, 1);
    let forest = RpForest::build(&points, &ForestConfig::new().with_depth(6)).unwrap();
    for i in (0..points.len()).step_by(7) {
        let n = forest.query(&points, points.row(i), 5).unwrap();
        assert_eq!(n.distances()[0], 0.0);
        assert_eq!(n.indices()[0], i);
    }
}

/// Distances are ascending and the result has exactly k entries.
#[test]
fn results_sorted_and_sized() {
    let points = random_points(300, 3, 2);
    let forest = RpForest::build(&points, &ForestConfig::new().with_depth(4)).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let q: Vec<f64> = (0..3).map(|_| rng.random::<f64>()).collect();
        let n = forest.query(&points, &q, 4).unwrap();
        assert_eq!(n.len(), 4);
        assert!(n.distances().windows(2).all(|w| w[0] <= w[1]));
    }
}

/// With enough trees the forest recovers most exact neighbors.
#[test]
fn recall_against_exact() {
    let points = random_points(2000, 4, 4);
    let forest = RpForest::build(
        &points,
        &ForestConfig::new().with_depth(5).with_n_trees(20),
    )
    .unwrap();
    let exact = ExactIndex::build(&points, &()).unwrap();

    let mut rng = StdRng::seed_from_u64(5);
    let (mut hits, mut total) = (0usize, 0usize);
    for _ in 0..50 {
        let q: Vec<f64> = (0..4).map(|_| rng.random::<f64>()).collect();
        let approx = forest.query(&points, &q, 5).unwrap();
        let truth = exact.query(&points, &q, 5).unwrap();
        hits += truth
            .indices()
            .iter()
            .filter(|i| approx.indices().contains(i))
            .count();
        total += 5;
    }
    let recall = hits as f64 / total as f64;
    assert!(recall > 0.8, "recall {recall} too low");
}

/// A query outside the unit cube still returns neighbors.
#[test]
fn extrapolated_query_answered() {
    let points = random_points(100, 2, 6);
    let forest = RpForest::build(&points, &ForestConfig::new()).unwrap();
    let n = forest.query(&points, &[5.0, -3.0], 3).unwrap();
    assert_eq!(n.len(), 3);
}

/// Seeded builds answer identically.
#[test]
fn seeded_builds_reproducible() {
    let points = random_points(400, 4, 7);
    let cfg = ForestConfig::new().with_depth(5).with_seed(Some(99));
    let a = RpForest::build(&points, &cfg).unwrap();
    let b = RpForest::build(&points, &cfg).unwrap();
    let q = [0.3, 0.6, 0.1, 0.8];
    assert_eq!(
        a.query(&points, &q, 6).unwrap(),
        b.query(&points, &q, 6).unwrap()
    );
}
