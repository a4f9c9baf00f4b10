//! Spectrum-generator runs against stand-in scripts, and chain augmentation
//! with mass columns.

use approx::assert_relative_eq;
use knnlike_chain::{Chain, TransformConfig, augment};
use knnlike_spectrum::{
    ElectroweakParams, Softsusy, SoftsusyConfig, SpectrumError, TreeLevelMasses, tree_level,
};

fn point() -> ElectroweakParams {
    ElectroweakParams::from_slice(&[10.0, 100.0, 50.0, 4.0]).unwrap()
}

/// A script that drains its input before running `body`.
#[cfg(unix)]
fn write_script(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    write_raw_script(dir, name, &format!("cat > /dev/null\n{body}"))
}

#[cfg(unix)]
fn write_raw_script(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

// Scripts are written and executed from one test so no other test thread
// forks while a script is still open for writing.
#[cfg(unix)]
#[test]
fn stand_in_generators() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let good = write_script(
        dir.path(),
        "good.sh",
        "cat <<'SLHA'
Block SPINFO
     1    SOFTSUSY
Block MASS
   1000022    -1.1e+01
   1000023     4.2e+01
   1000025    -6.3e+01
   1000035     1.4e+02
   1000024     4.0e+01
   1000037    -1.5e+02
SLHA
",
    );
    let garbage = write_script(dir.path(), "garbage.sh", "echo 'point is unphysical'\nexit 1\n");
    let closes_stdin = write_raw_script(
        dir.path(),
        "closes_stdin.sh",
        "exec 0<&-\necho 'bad point'\nexit 1\n",
    );
    let partial = write_script(
        dir.path(),
        "partial.sh",
        "printf 'Block MASS\\n 1000022 1.1e+01\\n'\n",
    );

    let p = point();
    let tree = tree_level::masses(&p);

    let runner = Softsusy::new(SoftsusyConfig::new().with_program(&good));
    assert_eq!(
        runner.masses(&p).unwrap(),
        [11.0, 42.0, 63.0, 140.0, 40.0, 150.0]
    );

    let runner = Softsusy::new(SoftsusyConfig::new().with_program(&garbage));
    assert_eq!(runner.masses(&p).unwrap(), tree);

    let runner = Softsusy::new(SoftsusyConfig::new().with_program(&partial));
    assert_eq!(runner.masses(&p).unwrap(), tree);

    // Whether the input write hits a closed pipe depends on timing, so
    // repeat until both orderings have almost certainly occurred.
    let runner = Softsusy::new(SoftsusyConfig::new().with_program(&closes_stdin));
    for _ in 0..100 {
        assert_eq!(runner.masses(&p).unwrap(), tree);
    }
    let rows: Vec<[f64; 6]> = (0..40)
        .map(|i| [0.5, 1.0, 10.0 + i as f64, 100.0, 50.0, 4.0])
        .collect();
    let batch = Chain::from_rows(&rows).unwrap();
    let config = TransformConfig::new().with_workers(Some(4));
    let out = augment(&batch, &runner, &config).unwrap();
    assert_eq!(out.n_rows(), 40);
    for row in out.rows() {
        let p = ElectroweakParams::from_slice(&row[2..6]).unwrap();
        assert_eq!(&row[6..], &tree_level::masses(&p));
    }

    // Parallel rows through the chain transformer.
    let runner = Softsusy::new(SoftsusyConfig::new().with_program(&good));
    let chain = Chain::from_rows(&[
        [0.5, 1.0, 10.0, 100.0, 50.0, 4.0],
        [0.5, 2.0, -20.0, 300.0, 80.0, 10.0],
    ])
    .unwrap();
    let out = augment(&chain, &runner, &TransformConfig::new().with_workers(Some(2))).unwrap();
    assert_eq!(out.n_cols(), 12);
    assert_eq!(&out.row(1)[6..], &[11.0, 42.0, 63.0, 140.0, 40.0, 150.0]);

    let missing = Softsusy::new(SoftsusyConfig::new().with_program(dir.path().join("absent")));
    assert!(matches!(
        missing.masses(&p),
        Err(SpectrumError::Program { .. })
    ));
}

#[test]
fn tree_level_columns_appended() {
    let chain = Chain::from_rows(&[
        [0.25, 3.0, 10.0, 100.0, 50.0, 4.0],
        [0.75, 5.0, -500.0, 800.0, 300.0, 40.0],
    ])
    .unwrap();
    let out = augment(&chain, &TreeLevelMasses, &TransformConfig::new()).unwrap();
    assert_eq!(out.n_cols(), 12);
    for (orig, row) in chain.rows().zip(out.rows()) {
        assert_eq!(&row[..6], orig);
        let p = ElectroweakParams::from_slice(&orig[2..6]).unwrap();
        for (got, want) in row[6..].iter().zip(tree_level::masses(&p)) {
            assert_relative_eq!(*got, want);
        }
    }
}

#[test]
fn reference_point_masses() {
    // Strong wino-higgsino mixing pushes the light chargino well below |mu|.
    let m = tree_level::masses(&point());
    assert!(m.iter().all(|x| x.is_finite() && *x >= 0.0));
    let c = tree_level::chargino_masses(&point());
    assert_eq!(c, [m[4], m[5]]);
    assert!(c[0] < 50.0);
}
