// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Integration tests for `loom list` and `loom emit`.

use std::process::{Command, Output};

const DEMOS: &[&str] = &["scale", "saxpy", "triangle", "clamp", "fill", "blocks"];

fn loom(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_loom"))
        .args(args)
        .env_remove("FORCE_COLOR")
        .env_remove("LOOM_LOG")
        .output()
        .expect("failed to run loom")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

#[test]
fn list_names_every_demo() {
    let out = loom(&["list", "--no-color"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let listing = stdout(&out);
    for demo in DEMOS {
        assert!(listing.contains(demo), "`{}` missing from:\n{}", demo, listing);
    }
}

#[test]
fn every_demo_emits() {
    for demo in DEMOS {
        let out = loom(&["emit", demo, "--no-color"]);
        assert!(
            out.status.success(),
            "loom emit {} failed:\nstderr: {}",
            demo,
            stderr(&out)
        );
        assert!(stdout(&out).starts_with(&format!("func @{}(", demo)));
    }
}

#[test]
fn clamp_prints_compare_and_select() {
    let out = loom(&["emit", "clamp", "--no-color"]);
    let expected = "\
func @clamp(%0: f32, %1: f32, %2: f32) {
  %3 = constant 0 : index
  %4 = constant 1 : index
  %5 = cmpf lt, %0, %1 : f32
  %6 = cmpf gt, %0, %2 : f32
  %7 = select %6, %2, %0 : f32
  %8 = select %5, %1, %7 : f32
  return %8 : f32
}
";
    assert_eq!(stdout(&out), expected);
}

#[test]
fn symbolic_bounds_in_saxpy_and_triangle() {
    let saxpy = stdout(&loom(&["emit", "saxpy", "--no-color"]));
    assert!(saxpy.contains("affine.for %6 = (d0) -> (d0)(%4) to (d0) -> (d0)(%0) step 1 {"));

    let triangle = stdout(&loom(&["emit", "triangle", "--no-color"]));
    assert!(triangle.contains("affine.apply (d0, d1) -> (d0 + d1)"));
    assert_eq!(triangle.matches("affine.for").count(), 2);
}

#[test]
fn verbose_logs_bindings_to_stderr() {
    let out = loom(&["emit", "fill", "--no-color", "--verbose"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("binding"));
    assert!(!stdout(&out).contains("binding"));
}

#[test]
fn unknown_demo_fails_with_hint() {
    let out = loom(&["emit", "nope", "--no-color"]);
    assert_eq!(out.status.code(), Some(2));
    let err = stderr(&out);
    assert!(err.contains("unknown demo `nope`"));
    assert!(err.contains("loom list"));
}
