//! Index persistence through the estimator, and loading pools from `.npy`.

use std::fs;

use knnlike_index::{ForestConfig, Points};
use knnlike_surrogate::{IndexSource, LogLike, SamplePool, SurrogateError};
use ndarray::{Array1, Array2};
use ndarray_npy::write_npy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_pool(n: usize, dim: usize, seed: u64) -> SamplePool {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..n * dim).map(|_| rng.random_range(-10.0..10.0)).collect();
    let ll: Vec<f64> = (0..n).map(|_| -rng.random_range(0.0..50.0)).collect();
    SamplePool::new(Points::new(data, dim).unwrap(), ll).unwrap()
}

fn queries(dim: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..20)
        .map(|_| (0..dim).map(|_| rng.random_range(-10.0..10.0)).collect())
        .collect()
}

#[test]
fn build_then_load_gives_same_estimates() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("pool.index");
    let config = ForestConfig::new().with_depth(5);

    let mut first: LogLike = LogLike::new(random_pool(400, 4, 1)).unwrap();
    assert_eq!(
        first.lazyload(&path, &config).unwrap(),
        IndexSource::Built { saved: true }
    );
    assert!(path.exists());

    let mut second: LogLike = LogLike::new(random_pool(400, 4, 1)).unwrap();
    assert_eq!(second.lazyload(&path, &config).unwrap(), IndexSource::Loaded);

    for q in queries(4, 2) {
        assert_eq!(first.estimate(&q).unwrap(), second.estimate(&q).unwrap());
    }
}

#[test]
fn corrupt_index_is_rebuilt() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("pool.index");
    fs::write(&path, b"definitely not an index").unwrap();

    let mut loglike: LogLike = LogLike::new(random_pool(100, 2, 3)).unwrap();
    let source = loglike
        .lazyload(&path, &ForestConfig::new().with_depth(4))
        .unwrap();
    assert_eq!(source, IndexSource::Built { saved: true });
    assert!(loglike.is_ready());

    let mut reloaded: LogLike = LogLike::new(random_pool(100, 2, 3)).unwrap();
    assert_eq!(
        reloaded
            .lazyload(&path, &ForestConfig::new().with_depth(4))
            .unwrap(),
        IndexSource::Loaded
    );
}

#[test]
fn index_from_other_pool_is_rebuilt() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("pool.index");
    let config = ForestConfig::new().with_depth(4);

    let mut a: LogLike = LogLike::new(random_pool(200, 3, 4)).unwrap();
    a.lazyload(&path, &config).unwrap();

    let mut b: LogLike = LogLike::new(random_pool(200, 3, 5)).unwrap();
    assert_eq!(
        b.lazyload(&path, &config).unwrap(),
        IndexSource::Built { saved: true }
    );
}

#[test]
fn unwritable_index_path_keeps_memory_index() {
    let dir = tempfile::tempdir().expect("create temp dir");
    // A regular file where a parent directory is expected.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"").unwrap();
    let path = blocker.join("pool.index");

    let mut loglike: LogLike = LogLike::new(random_pool(50, 2, 6)).unwrap();
    let source = loglike
        .lazyload(&path, &ForestConfig::new().with_depth(3))
        .unwrap();
    assert_eq!(source, IndexSource::Built { saved: false });
    assert!(loglike.estimate(&[0.0, 0.0]).is_ok());
}

#[test]
fn pool_from_npy_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let param_path = dir.path().join("params.npy");
    let ll_path = dir.path().join("loglike.npy");

    let params =
        Array2::from_shape_vec((3, 2), vec![0.0, 0.0, 1.0, 1.0, 2.0, 0.5]).unwrap();
    let ll = Array1::from(vec![-1.0, -2.0, -3.0]);
    write_npy(&param_path, &params).unwrap();
    write_npy(&ll_path, &ll).unwrap();

    let pool = SamplePool::from_npy(&param_path, &ll_path).unwrap();
    assert_eq!(pool.len(), 3);
    assert_eq!(pool.dim(), 2);
    assert_eq!(pool.params().row(2), &[2.0, 0.5]);
    assert_eq!(pool.loglikes(), &[-1.0, -2.0, -3.0]);
}

#[test]
fn npy_length_mismatch_is_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let param_path = dir.path().join("params.npy");
    let ll_path = dir.path().join("loglike.npy");
    write_npy(&param_path, &Array2::<f64>::zeros((4, 2))).unwrap();
    write_npy(&ll_path, &Array1::<f64>::zeros(3)).unwrap();

    let err = SamplePool::from_npy(&param_path, &ll_path).unwrap_err();
    assert!(matches!(
        err,
        SurrogateError::LengthMismatch {
            params: 4,
            loglikes: 3
        }
    ));
    assert_eq!(
        err.to_string(),
        "number of loglike samples 3 does not match param samples 4"
    );
}

#[test]
fn missing_npy_file_is_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let missing = dir.path().join("nope.npy");
    let err = SamplePool::from_npy(&missing, &missing).unwrap_err();
    assert!(matches!(err, SurrogateError::Npy { .. }));
}
