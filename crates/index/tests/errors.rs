//! Integration tests for IndexError variants.

use knnlike_index::{ExactIndex, ForestConfig, IndexError, Points, RpForest, SearchIndex};

fn points() -> Points {
    Points::from_rows(&[[0.0, 0.0], [1.0, 1.0], [0.5, 0.2], [0.1, 0.9]]).unwrap()
}

#[test]
fn error_k_zero() {
    let p = points();
    let forest = RpForest::build(&p, &ForestConfig::new()).unwrap();
    assert!(matches!(
        forest.query(&p, &[0.0, 0.0], 0),
        Err(IndexError::InvalidK { k: 0 })
    ));
}

#[test]
fn error_query_dimension() {
    let p = points();
    let exact = ExactIndex::build(&p, &()).unwrap();
    assert!(matches!(
        exact.query(&p, &[0.0, 0.0, 0.0], 1),
        Err(IndexError::QueryDimensionMismatch { query: 3, dim: 2 })
    ));
}

#[test]
fn error_query_nan() {
    let p = points();
    let forest = RpForest::build(&p, &ForestConfig::new()).unwrap();
    assert!(matches!(
        forest.query(&p, &[f64::NAN, 0.0], 1),
        Err(IndexError::NonFiniteInput { input: "query" })
    ));
}

#[test]
fn error_invalid_config() {
    let p = points();
    assert!(matches!(
        RpForest::build(&p, &ForestConfig::new().with_n_trees(0)),
        Err(IndexError::InvalidTrees { n_trees: 0 })
    ));
}

#[test]
fn error_empty_points() {
    assert!(matches!(
        Points::new(Vec::new(), 3),
        Err(IndexError::EmptyPoints)
    ));
}
