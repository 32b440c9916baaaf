//! End-to-end checks of the `stencilgen` binary.
//!
//! Purpose:
//! - equal seeds produce byte-identical artifacts that `check` accepts;
//! - failed runs exit non-zero and leave no artifact behind;
//! - profiles, the JSON sidecar and `show` agree with the artifact.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn stencilgen(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stencilgen"))
        .args(args)
        .current_dir(cwd)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn stencilgen")
}

#[test]
fn seeded_runs_are_byte_identical_and_check_clean() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.stencil", "b.stencil"] {
        let out = stencilgen(
            &["generate", "-d", "2", "--seed", "42", "-o", name],
            dir.path(),
        );
        assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    }
    let a = fs::read(dir.path().join("a.stencil")).unwrap();
    let b = fs::read(dir.path().join("b.stencil")).unwrap();
    assert_eq!(a, b);
    assert!(a.starts_with(b"Stencil::new(\n["));

    let out = stencilgen(&["check", "a.stencil"], dir.path());
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("OK:"));
}

#[test]
fn default_output_name_follows_dimension() {
    let dir = tempfile::tempdir().unwrap();
    let out = stencilgen(&["generate", "--seed", "3"], dir.path());
    assert!(out.status.success());
    assert!(dir.path().join("gen_1d.stencil").exists());
}

#[test]
fn exhausted_space_fails_without_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let out = stencilgen(
        &[
            "generate",
            "--max-distance",
            "1",
            "--count",
            "5",
            "--seed",
            "0",
            "-o",
            "never.stencil",
        ],
        dir.path(),
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("offset space exhausted"));
    assert!(!dir.path().join("never.stencil").exists());
}

#[test]
fn failed_sidecar_write_leaves_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("blocker"), b"not a directory").unwrap();
    let out = stencilgen(
        &[
            "generate",
            "--seed",
            "1",
            "-o",
            "a.stencil",
            "--definition-out",
            "blocker/d.json",
        ],
        dir.path(),
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("writing definition"));
    assert!(!dir.path().join("a.stencil").exists());
}

#[test]
fn failed_artifact_write_removes_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("blocker"), b"not a directory").unwrap();
    let out = stencilgen(
        &[
            "generate",
            "--seed",
            "1",
            "-o",
            "blocker/a.stencil",
            "--definition-out",
            "d.json",
        ],
        dir.path(),
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("writing artifact"));
    assert!(!dir.path().join("d.json").exists());
}

#[test]
fn oversized_max_count_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = stencilgen(
        &[
            "generate",
            "-d",
            "3",
            "--max-distance",
            "2147483647",
            "--max-count",
            "18446744073709551615",
            "-o",
            "x.stencil",
        ],
        dir.path(),
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("max_count"));
    assert!(!dir.path().join("x.stencil").exists());
}

#[test]
fn invalid_dimension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = stencilgen(&["generate", "-d", "0", "-o", "x.stencil"], dir.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("dimension"));
    assert!(!dir.path().join("x.stencil").exists());
}

#[test]
fn profile_sidecar_and_show_agree() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("run.toml"),
        "[params]\ndimension = 3\nmax_distance = 4\ncount = 6\nseed = 11\n\n\
         [output]\nartifact = \"out/gen.stencil\"\ndefinition = \"out/gen.json\"\n",
    )
    .unwrap();

    let out = stencilgen(&["generate", "--profile", "run.toml"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let artifact = fs::read_to_string(dir.path().join("out/gen.stencil")).unwrap();
    assert!(artifact.contains("|args: &[f32; 6]|"));

    let out = stencilgen(&["show", "out/gen.json"], dir.path());
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), artifact);
}

#[test]
fn check_rejects_tampered_artifact() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.stencil"),
        "Stencil::new(\n[[1],[1],],\n|args: &[f32; 2]| {\nargs[0] * 0.5f32 + args[1] * 0.5f32 + 0.0\n})",
    )
    .unwrap();
    let out = stencilgen(&["check", "bad.stencil"], dir.path());
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("duplicate"));
}
