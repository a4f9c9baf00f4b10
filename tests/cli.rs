//! Runs the knnlike binary end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use ndarray::{Array1, Array2};
use ndarray_npy::write_npy;

fn knnlike(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_knnlike"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run knnlike")
}

fn stdout(out: &Output) -> String {
    assert!(
        out.status.success(),
        "knnlike failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

#[test]
fn information_of_chain() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("chain.txt"), "0.5 2.0 1 2 3 4\n0.5 4.0 1 2 3 4\n").unwrap();

    let out = knnlike(dir.path(), &["information", "chain.txt", "-3"]);
    assert_eq!(stdout(&out), "information = 1.5");
}

#[test]
fn augment_writes_default_name() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(
        dir.path().join("scan_.txt"),
        "0.5 2.0 10 100 50 4\n0.5 4.0 -300 800 200 20\n",
    )
    .unwrap();

    let out = knnlike(dir.path(), &["augment", "scan_.txt", "--workers", "2"]);
    assert_eq!(stdout(&out), "scan_modified.txt");

    let text = fs::read_to_string(dir.path().join("scan_modified.txt")).unwrap();
    let rows: Vec<Vec<f64>> = text
        .lines()
        .map(|l| l.split_whitespace().map(|t| t.parse().unwrap()).collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.len() == 12));
    assert_eq!(&rows[1][..6], &[0.5, 4.0, -300.0, 800.0, 200.0, 20.0]);
}

#[test]
fn estimate_builds_then_reuses_index() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let params = Array2::from_shape_vec((2, 2), vec![0.0, 0.0, 1.0, 1.0]).unwrap();
    write_npy(dir.path().join("param_samples.npy"), &params).unwrap();
    write_npy(
        dir.path().join("loglike_samples.npy"),
        &Array1::from(vec![-1.0, -2.0]),
    )
    .unwrap();

    let out = knnlike(dir.path(), &["build-index"]);
    assert_eq!(stdout(&out), "index built and saved");
    assert!(dir.path().join("samples.index").exists());

    let out = knnlike(dir.path(), &["build-index"]);
    assert_eq!(stdout(&out), "index is up to date");

    let out = knnlike(dir.path(), &["estimate", "0", "0", "-k", "1"]);
    assert_eq!(stdout(&out).parse::<f64>().unwrap(), -1.0);

    let out = knnlike(dir.path(), &["estimate", "0.5", "0.5", "-k", "2"]);
    let expected = (0.5 * (-1.0_f64).exp() + 0.5 * (-2.0_f64).exp()).ln();
    assert!((stdout(&out).parse::<f64>().unwrap() - expected).abs() < 1e-12);
}

#[test]
fn estimate_with_config_reference() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let params = Array2::from_shape_vec((2, 2), vec![0.0, 0.0, 1.0, 1.0]).unwrap();
    write_npy(dir.path().join("p.npy"), &params).unwrap();
    write_npy(dir.path().join("l.npy"), &Array1::from(vec![-1.0, -2.0])).unwrap();
    fs::write(
        dir.path().join("knnlike.toml"),
        "[samples]\nparams = \"p.npy\"\nloglikes = \"l.npy\"\nindex = \"p.index\"\nloglike_ref = 0.5\n",
    )
    .unwrap();

    let out = knnlike(
        dir.path(),
        &["-c", "knnlike.toml", "estimate", "1", "1", "--relative"],
    );
    assert_eq!(stdout(&out).parse::<f64>().unwrap(), -2.5);
}

#[test]
fn missing_samples_fail_with_context() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let out = knnlike(dir.path(), &["estimate", "0", "0"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error: failed to load samples"), "{stderr}");
}
