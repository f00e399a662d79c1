//! CLI binary smoke tests using assert_cmd.
//!
//! These tests run the compiled `linea` binary to check argument parsing,
//! the one-shot subcommands and the exit status on task failures.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("linea").unwrap()
}

fn plain() -> Command {
    let mut c = cmd();
    c.args(["--style", "plain"]);
    c
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("kernel"))
        .stdout(predicate::str::contains("change-basis"))
        .stdout(predicate::str::contains("eigen"))
        .stdout(predicate::str::contains("menu"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("linea"));
}

#[test]
fn unknown_style_is_rejected() {
    cmd()
        .args(["--style", "fancy", "plane", "1", "2", "3"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// plane
// ---------------------------------------------------------------------------

#[test]
fn plane_has_dimension_two() {
    plain()
        .args(["plane", "1", "2", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("u1 = [-2, 1, 0]"))
        .stdout(predicate::str::contains("dim W = 2"));
}

#[test]
fn plane_accepts_negative_coefficients() {
    plain()
        .args(["plane", "-4", "0", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dim W = 2"));
}

#[test]
fn zero_plane_is_whole_space() {
    plain()
        .args(["plane", "0", "0", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("whole space"))
        .stdout(predicate::str::contains("dim W = 3"));
}

#[test]
fn plane_rejects_non_numbers() {
    plain().args(["plane", "1", "x", "3"]).assert().failure();
}

// ---------------------------------------------------------------------------
// kernel
// ---------------------------------------------------------------------------

#[test]
fn kernel_of_rank_one_matrix() {
    plain()
        .args(["kernel", "--matrix", "1 2; 2 4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nullity = 1"))
        .stdout(predicate::str::contains("rank = 1"))
        .stdout(predicate::str::contains("w1 = [1, 2]"));
}

#[test]
fn kernel_of_identity_is_trivial() {
    plain()
        .args(["kernel", "-m", "1,0;0,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ker(T) = {0}"));
}

#[test]
fn kernel_rejects_ragged_matrix() {
    plain()
        .args(["kernel", "--matrix", "1 2; 3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --matrix"));
}

// ---------------------------------------------------------------------------
// change-basis
// ---------------------------------------------------------------------------

#[test]
fn canonical_bases_keep_the_matrix() {
    plain()
        .args([
            "change-basis",
            "--matrix",
            "2 3; 4 -1",
            "--beta",
            "1 0; 0 1",
            "--gamma",
            "1 0; 0 1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[4, -1]"));
}

#[test]
fn singular_beta_exits_with_error() {
    plain()
        .args([
            "change-basis",
            "--matrix",
            "1 0; 0 1",
            "--beta",
            "1 2; 2 4",
            "--gamma",
            "1 0; 0 1",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("beta is not a valid basis"));
}

// ---------------------------------------------------------------------------
// eigen
// ---------------------------------------------------------------------------

#[test]
fn eigen_of_diagonal_2x2() {
    plain()
        .args(["eigen", "--matrix", "2 0; 0 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lambda1 = 3"))
        .stdout(predicate::str::contains("lambda2 = 2"))
        .stdout(predicate::str::contains("v1 = [1, 0]"));
}

#[test]
fn eigen_of_rotation_has_complex_eigenvectors() {
    plain()
        .args(["eigen", "--matrix", "0 -1; 1 0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[T] operator matrix:\n  [0, -1]\n  [1, 0]"))
        .stdout(predicate::str::contains("lambda1 = 0 + 1i"))
        .stdout(predicate::str::contains("v1 = [0 + 1i, 1]"))
        .stdout(predicate::str::contains("no eigenvectors found").not());
}

#[test]
fn eigen_of_diagonal_3x3_uses_qr() {
    plain()
        .args(["eigen", "--matrix", "1 0 0; 0 2 0; 0 0 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("QR iteration (60 steps)"));
}

#[test]
fn eigen_rejects_4x4() {
    plain()
        .args(["eigen", "--matrix", "1 0 0 0; 0 1 0 0; 0 0 1 0; 0 0 0 1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("only 2x2 and 3x3"));
}

#[test]
fn eigen_rejects_rectangular_matrix() {
    plain()
        .args(["eigen", "--matrix", "1 2 3; 4 5 6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("square"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_prints_defaults() {
    cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"qr_iterations\": 60"));
}

#[test]
fn config_file_overrides_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "qr_iterations": 5 }}"#).unwrap();
    cmd()
        .arg("--config")
        .arg(file.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"qr_iterations\": 5"));
}

#[test]
fn invalid_config_file_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "qr_iterations": 0 }}"#).unwrap();
    cmd()
        .arg("--config")
        .arg(file.path())
        .arg("config")
        .assert()
        .failure();
}

#[test]
fn nonexistent_config_file_errors() {
    cmd()
        .args(["--config", "/nonexistent/linea.json", "config"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// menu
// ---------------------------------------------------------------------------

#[test]
fn menu_runs_from_stdin() {
    plain()
        .arg("menu")
        .write_stdin("1\n1\n2\n3\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("dim W = 2"))
        .stdout(predicate::str::contains("Goodbye."));
}

#[test]
fn menu_ends_cleanly_at_end_of_input() {
    plain()
        .arg("menu")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye."));
}
