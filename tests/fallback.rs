// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Exercised by `cargo test --no-default-features`.
#![cfg(not(feature = "raster"))]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn icongen(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_icongen"))
        .args(args)
        .current_dir(root)
        .output()
        .unwrap()
}

#[test]
fn prints_manual_instructions_without_writing_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("public")).unwrap();
    fs::write(
        dir.path().join("public").join("icon.svg"),
        "<svg xmlns='http://www.w3.org/2000/svg'/>",
    )
    .unwrap();

    let output = icongen(dir.path(), &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("https://cloudconvert.com/svg-to-png"));
    for name in [
        "icon-192.png",
        "icon-512.png",
        "icon-maskable-192.png",
        "icon-maskable-512.png",
    ] {
        assert!(stdout.contains(name), "missing instruction for {}", name);
    }

    let wrote_png = fs::read_dir(dir.path().join("public"))
        .unwrap()
        .any(|e| e.unwrap().file_name().to_string_lossy().ends_with(".png"));
    assert!(!wrote_png);
}

#[test]
fn missing_logo_is_still_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("public")).unwrap();

    let output = icongen(dir.path(), &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("not found"));
}

#[test]
fn help_does_not_advertise_rendering_flags() {
    let dir = tempfile::tempdir().unwrap();

    let output = icongen(dir.path(), &["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--quiet"));
    assert!(!stdout.contains("--background"));
    assert!(!stdout.contains("--perf"));
}
